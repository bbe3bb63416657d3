pub(crate) mod av1;
pub(crate) mod generic;
pub(crate) mod h264;
pub(crate) mod vp9;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use unicase::UniCase;

use crate::rtp_transceiver::fmtp::av1::Av1Fmtp;
use crate::rtp_transceiver::fmtp::generic::GenericFmtp;
use crate::rtp_transceiver::fmtp::h264::H264Fmtp;
use crate::rtp_transceiver::fmtp::vp9::Vp9Fmtp;

/// Fmtp interface for implementing custom
/// Fmtp parsers based on mime_type
pub trait Fmtp: fmt::Debug + Send + Sync {
    /// mime_type returns the mime_type associated with
    /// the fmtp
    fn mime_type(&self) -> &str;

    /// match_fmtp compares two fmtp descriptions for
    /// compatibility based on the mime_type
    fn match_fmtp(&self, f: &(dyn Fmtp)) -> bool;

    /// parameter returns a value for the associated key
    /// if contained in the parsed fmtp string
    fn parameter(&self, key: &str) -> Option<&String>;

    /// equal compares two fmtp descriptions structurally
    fn equal(&self, other: &(dyn Fmtp)) -> bool;

    fn as_any(&self) -> &(dyn Any);
}

impl PartialEq for dyn Fmtp {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

/// parse_parameters splits an fmtp line into lowercase keys and raw values.
/// Segments without a key are dropped.
pub(crate) fn parse_parameters(line: &str) -> HashMap<String, String> {
    let mut parameters = HashMap::new();
    for p in line.split(';') {
        let (key, value) = match p.trim().split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (p.trim(), ""),
        };
        if key.is_empty() {
            continue;
        }
        parameters.insert(key.to_lowercase(), value.to_owned());
    }
    parameters
}

/// parse parses an fmtp string based on the MimeType
pub fn parse(mime_type: &str, clock_rate: u32, channels: u16, line: &str) -> Box<dyn Fmtp> {
    let parameters = parse_parameters(line);
    let mime = UniCase::new(mime_type);

    if mime == UniCase::new(h264::MIME_TYPE) {
        Box::new(H264Fmtp { parameters })
    } else if mime == UniCase::new(vp9::MIME_TYPE) {
        Box::new(Vp9Fmtp { parameters })
    } else if mime == UniCase::new(av1::MIME_TYPE) {
        Box::new(Av1Fmtp { parameters })
    } else {
        Box::new(GenericFmtp {
            mime_type: mime_type.to_owned(),
            clock_rate,
            channels,
            parameters,
        })
    }
}

/// clock_rate_equal treats an unset (zero) clock rate as matching anything.
pub fn clock_rate_equal(_mime_type: &str, a: u32, b: u32) -> bool {
    a == 0 || b == 0 || a == b
}

/// channels_equal treats an unset (zero) channel count as mono.
pub fn channels_equal(_mime_type: &str, a: u16, b: u16) -> bool {
    let a = if a == 0 { 1 } else { a };
    let b = if b == 0 { 1 } else { b };
    a == b
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_picks_comparator_by_mime_type() {
        let tests = vec![
            ("video/H264", "video/h264"),
            ("VIDEO/vp9", "video/vp9"),
            ("video/AV1", "video/av1"),
            ("audio/opus", "audio/opus"),
        ];

        for (mime_type, expected) in tests {
            let f = parse(mime_type, 90000, 0, "");
            assert_eq!(
                UniCase::new(f.mime_type()),
                UniCase::new(expected),
                "{mime_type}"
            );
        }
    }

    #[test]
    fn test_parse_parameters_drops_empty_keys() {
        let p = parse_parameters("");
        assert!(p.is_empty());

        let p = parse_parameters("apt=96;;  ;");
        assert_eq!(p.len(), 1);
        assert_eq!(p.get("apt"), Some(&"96".to_owned()));
    }

    #[test]
    fn test_clock_rate_equal() {
        assert!(clock_rate_equal("audio/opus", 48000, 48000));
        assert!(clock_rate_equal("audio/opus", 0, 48000));
        assert!(clock_rate_equal("audio/opus", 48000, 0));
        assert!(!clock_rate_equal("audio/opus", 48000, 8000));
    }

    #[test]
    fn test_channels_equal() {
        assert!(channels_equal("audio/opus", 2, 2));
        assert!(channels_equal("audio/pcmu", 0, 1));
        assert!(channels_equal("audio/pcmu", 1, 0));
        assert!(!channels_equal("audio/opus", 0, 2));
    }
}
