use std::fmt;

use unicase::UniCase;

use super::*;
use crate::api::media_engine::*;
use crate::error::{Error, Result};
use crate::rtp_transceiver::fmtp;

/// RTPCodecType determines the type of a codec
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RTPCodecType {
    /// RTPCodecTypeAudio indicates this is an audio codec
    Audio,

    /// RTPCodecTypeVideo indicates this is a video codec
    Video,
}

/// Media section kinds are matched case-insensitively; anything other
/// than audio or video is rejected.
impl TryFrom<&str> for RTPCodecType {
    type Error = Error;

    fn try_from(raw: &str) -> Result<Self> {
        if raw.eq_ignore_ascii_case("audio") {
            Ok(RTPCodecType::Audio)
        } else if raw.eq_ignore_ascii_case("video") {
            Ok(RTPCodecType::Video)
        } else {
            Err(Error::ErrUnknownType)
        }
    }
}

impl fmt::Display for RTPCodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTPCodecType::Audio => "audio",
            RTPCodecType::Video => "video",
        };
        write!(f, "{s}")
    }
}

/// RTPCodecCapability provides information about codec capabilities.
/// <https://w3c.github.io/webrtc-pc/#dictionary-rtcrtpcodeccapability-members>
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCRtpCodecCapability {
    pub mime_type: String,
    pub clock_rate: u32,
    /// Zero means unspecified, which compares equal to mono.
    pub channels: u16,
    pub sdp_fmtp_line: String,
    pub rtcp_feedback: Vec<RTCPFeedback>,
}

/// PayloaderKind names the packetizer family a codec is sent with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloaderKind {
    H264,
    Vp8,
    Vp9,
    Av1,
    Opus,
    /// G722, PCMU, PCMA and telephone-event share one framing.
    G7xx,
}

impl RTCRtpCodecCapability {
    /// Select the payloader family for this codec's MIME type
    pub fn payloader_kind(&self) -> Result<PayloaderKind> {
        let mime_type = UniCase::new(self.mime_type.as_str());
        let kind = if mime_type == UniCase::new(MIME_TYPE_H264) {
            PayloaderKind::H264
        } else if mime_type == UniCase::new(MIME_TYPE_VP8) {
            PayloaderKind::Vp8
        } else if mime_type == UniCase::new(MIME_TYPE_VP9) {
            PayloaderKind::Vp9
        } else if mime_type == UniCase::new(MIME_TYPE_AV1) {
            PayloaderKind::Av1
        } else if mime_type == UniCase::new(MIME_TYPE_OPUS) {
            PayloaderKind::Opus
        } else if mime_type == UniCase::new(MIME_TYPE_G722)
            || mime_type == UniCase::new(MIME_TYPE_PCMU)
            || mime_type == UniCase::new(MIME_TYPE_PCMA)
            || mime_type == UniCase::new(MIME_TYPE_TELEPHONE_EVENT)
        {
            PayloaderKind::G7xx
        } else {
            return Err(Error::ErrNoPayloaderForCodec);
        };

        Ok(kind)
    }

    /// Turn codec capability into a `packetizer::Payloader`
    pub fn payloader_for_codec(
        &self,
    ) -> Result<Box<dyn rtp::packetizer::Payloader + Send + Sync>> {
        let payloader: Box<dyn rtp::packetizer::Payloader + Send + Sync> =
            match self.payloader_kind()? {
                PayloaderKind::H264 => Box::<rtp::codecs::h264::H264Payloader>::default(),
                PayloaderKind::Vp8 => {
                    let mut vp8_payloader = rtp::codecs::vp8::Vp8Payloader::default();
                    vp8_payloader.enable_picture_id = true;
                    Box::new(vp8_payloader)
                }
                PayloaderKind::Vp9 => Box::<rtp::codecs::vp9::Vp9Payloader>::default(),
                PayloaderKind::Av1 => Box::<rtp::codecs::av1::Av1Payloader>::default(),
                PayloaderKind::Opus => Box::<rtp::codecs::opus::OpusPayloader>::default(),
                PayloaderKind::G7xx => Box::<rtp::codecs::g7xx::G7xxPayloader>::default(),
            };

        Ok(payloader)
    }
}

/// RTPHeaderExtensionCapability is used to define a RFC5285 RTP header extension supported by the codec.
/// <https://w3c.github.io/webrtc-pc/#dom-rtcrtpcapabilities-headerextensions>
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCRtpHeaderExtensionCapability {
    pub uri: String,
}

/// RTPHeaderExtensionParameter represents a negotiated RFC5285 RTP header extension.
/// <https://w3c.github.io/webrtc-pc/#dictionary-rtcrtpheaderextensionparameters-members>
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCRtpHeaderExtensionParameters {
    pub uri: String,
    pub id: isize,
}

/// RTPCodecParameters is a sequence containing the media codecs that an RtpSender
/// will choose from, as well as entries for RTX, RED and FEC mechanisms. This also
/// includes the PayloadType that has been negotiated
/// <https://w3c.github.io/webrtc-pc/#rtcrtpcodecparameters>
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCRtpCodecParameters {
    pub capability: RTCRtpCodecCapability,
    pub payload_type: PayloadType,
    pub stats_id: String,
}

impl RTCRtpCodecParameters {
    /// Two entries describe the same codec when payload type, MIME type,
    /// clock rate and channel count agree.
    pub(crate) fn same_codec(&self, other: &RTCRtpCodecParameters) -> bool {
        let mime_type = &self.capability.mime_type;
        self.payload_type == other.payload_type
            && UniCase::new(mime_type) == UniCase::new(&other.capability.mime_type)
            && fmtp::clock_rate_equal(
                mime_type,
                self.capability.clock_rate,
                other.capability.clock_rate,
            )
            && fmtp::channels_equal(mime_type, self.capability.channels, other.capability.channels)
    }
}

/// RTPParameters is a list of negotiated codecs and header extensions
/// <https://w3c.github.io/webrtc-pc/#dictionary-rtcrtpparameters-members>
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCRtpParameters {
    pub header_extensions: Vec<RTCRtpHeaderExtensionParameters>,
    pub codecs: Vec<RTCRtpCodecParameters>,
}

/// How closely a remote codec matches a local one. Ordered so that
/// `min` yields the weaker of two matches.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CodecMatch {
    #[default]
    None = 0,
    Partial = 1,
    Exact = 2,
}

/// Do a fuzzy find for a codec in the list of codecs
/// Used for lookup up a codec in an existing list to find a match
/// Returns codecMatchExact, codecMatchPartial, or codecMatchNone
pub(crate) fn codec_parameters_fuzzy_search(
    needle: &RTCRtpCodecParameters,
    haystack: &[RTCRtpCodecParameters],
) -> (RTCRtpCodecParameters, CodecMatch) {
    let needle_fmtp = fmtp::parse(
        &needle.capability.mime_type,
        needle.capability.clock_rate,
        needle.capability.channels,
        &needle.capability.sdp_fmtp_line,
    );

    let same_format = |c: &RTCRtpCodecParameters| {
        UniCase::new(&c.capability.mime_type) == UniCase::new(&needle.capability.mime_type)
            && fmtp::clock_rate_equal(
                &c.capability.mime_type,
                c.capability.clock_rate,
                needle.capability.clock_rate,
            )
            && fmtp::channels_equal(
                &c.capability.mime_type,
                c.capability.channels,
                needle.capability.channels,
            )
    };

    // First attempt to match on mime_type + clock_rate + channels + sdp_fmtp_line
    for c in haystack {
        let cfmtp = fmtp::parse(
            &c.capability.mime_type,
            c.capability.clock_rate,
            c.capability.channels,
            &c.capability.sdp_fmtp_line,
        );
        if same_format(c) && needle_fmtp.match_fmtp(&*cfmtp) {
            return (c.clone(), CodecMatch::Exact);
        }
    }

    // Fallback to just mime_type + clock_rate + channels
    for c in haystack {
        if same_format(c) {
            return (c.clone(), CodecMatch::Partial);
        }
    }

    (RTCRtpCodecParameters::default(), CodecMatch::None)
}

/// Keeps the feedback mechanisms both sides declared, in local order.
pub(crate) fn rtcp_feedback_intersection(
    local: &[RTCPFeedback],
    remote: &[RTCPFeedback],
) -> Vec<RTCPFeedback> {
    local
        .iter()
        .filter(|l| remote.contains(l))
        .cloned()
        .collect()
}
