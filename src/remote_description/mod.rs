#[cfg(test)]
mod remote_description_test;

use std::io::BufReader;

use sdp::description::media::MediaDescription;
use sdp::description::session::{SessionDescription, ATTR_KEY_EXT_MAP};
use sdp::extmap::ExtMap;

use crate::error::{Error, Result};
use crate::rtp_transceiver::rtp_codec::{
    RTCRtpCodecCapability, RTCRtpCodecParameters, RTPCodecType,
};
use crate::rtp_transceiver::{PayloadType, RTCPFeedback};

/// One `m=` section of a peer's session description, reduced to what
/// codec and header extension negotiation needs.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RemoteMediaSection {
    /// Media kind as written by the peer, e.g. `audio`, `video` or `application`.
    pub media: String,
    /// Codecs in the peer's preference order, carrying the peer's payload types.
    pub codecs: Vec<RTCRtpCodecParameters>,
    /// `(uri, id)` pairs from `a=extmap`, in declaration order.
    pub header_extensions: Vec<(String, isize)>,
}

/// The media sections of a remote offer or answer, in order.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RemoteDescription {
    pub media_sections: Vec<RemoteMediaSection>,
}

impl RemoteDescription {
    /// Parses raw SDP text.
    pub fn unmarshal(raw: &str) -> Result<Self> {
        let mut reader = std::io::Cursor::new(raw.as_bytes());
        let desc = SessionDescription::unmarshal(&mut reader)?;
        RemoteDescription::try_from(&desc)
    }
}

impl TryFrom<&SessionDescription> for RemoteDescription {
    type Error = Error;

    fn try_from(desc: &SessionDescription) -> Result<Self> {
        let media_sections = desc
            .media_descriptions
            .iter()
            .map(RemoteMediaSection::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(RemoteDescription { media_sections })
    }
}

impl TryFrom<&MediaDescription> for RemoteMediaSection {
    type Error = Error;

    fn try_from(m: &MediaDescription) -> Result<Self> {
        // only RTP sections carry payload types worth reading
        let codecs = if RTPCodecType::try_from(m.media_name.media.as_str()).is_ok() {
            codecs_from_media_description(m)?
        } else {
            vec![]
        };

        Ok(RemoteMediaSection {
            media: m.media_name.media.clone(),
            codecs,
            header_extensions: rtp_extensions_from_media_description(m)?,
        })
    }
}

pub(crate) fn codecs_from_media_description(
    m: &MediaDescription,
) -> Result<Vec<RTCRtpCodecParameters>> {
    let s = SessionDescription {
        media_descriptions: vec![m.clone()],
        ..Default::default()
    };

    let mut out = vec![];
    for payload_str in &m.media_name.formats {
        let payload_type: PayloadType = payload_str.parse::<u8>()?;
        let codec = match s.get_codec_for_payload_type(payload_type) {
            Ok(codec) => codec,
            Err(err) => {
                // static payload type 0 (PCMU) may be listed without an rtpmap
                if payload_type == 0 {
                    continue;
                }
                return Err(err.into());
            }
        };

        let channels = codec.encoding_parameters.parse::<u16>().unwrap_or(0);
        let rtcp_feedback = codec
            .rtcp_feedback
            .iter()
            .map(|raw| RTCPFeedback::from(raw.as_str()))
            .collect();

        out.push(RTCRtpCodecParameters {
            capability: RTCRtpCodecCapability {
                mime_type: m.media_name.media.clone() + "/" + codec.name.as_str(),
                clock_rate: codec.clock_rate,
                channels,
                sdp_fmtp_line: codec.fmtp.clone(),
                rtcp_feedback,
            },
            payload_type,
            stats_id: String::new(),
        })
    }

    Ok(out)
}

pub(crate) fn rtp_extensions_from_media_description(
    m: &MediaDescription,
) -> Result<Vec<(String, isize)>> {
    let mut out = vec![];

    for a in m.attributes.iter().filter(|a| a.key == ATTR_KEY_EXT_MAP) {
        let a_str = a.to_string();
        let mut reader = BufReader::new(a_str.as_bytes());
        let e = ExtMap::unmarshal(&mut reader)?;

        if let Some(uri) = e.uri {
            out.push((uri.to_string(), e.value));
        }
    }

    Ok(out)
}
