use serde::Serialize;
use tokio::time::Instant;

use crate::rtp_transceiver::rtp_codec::RTCRtpCodecParameters;
use crate::rtp_transceiver::PayloadType;

mod serialize;
pub mod stats_collector;

pub use stats_collector::StatsCollector;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum RTCStatsType {
    #[serde(rename = "codec")]
    Codec,
}

#[derive(Debug)]
pub enum StatsReportType {
    Codec(CodecStats),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecStats {
    // RTCStats
    #[serde(serialize_with = "serialize::instant_to_epoch_seconds::serialize")]
    pub timestamp: Instant,
    #[serde(rename = "type")]
    pub stats_type: RTCStatsType,
    pub id: String,

    // RTCCodecStats
    pub payload_type: PayloadType,
    pub mime_type: String,
    pub channels: u16,
    pub clock_rate: u32,
    pub sdp_fmtp_line: String,
}

impl From<&RTCRtpCodecParameters> for CodecStats {
    fn from(codec: &RTCRtpCodecParameters) -> Self {
        CodecStats {
            channels: codec.capability.channels,
            clock_rate: codec.capability.clock_rate,
            id: codec.stats_id.clone(),
            mime_type: codec.capability.mime_type.clone(),
            payload_type: codec.payload_type,
            sdp_fmtp_line: codec.capability.sdp_fmtp_line.clone(),
            stats_type: RTCStatsType::Codec,
            timestamp: Instant::now(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;

    #[test]
    fn test_codec_stats_serialize() {
        let codec = RTCRtpCodecParameters {
            capability: RTCRtpCodecCapability {
                mime_type: "audio/opus".to_owned(),
                clock_rate: 48000,
                channels: 2,
                sdp_fmtp_line: "minptime=10;useinbandfec=1".to_owned(),
                rtcp_feedback: vec![],
            },
            payload_type: 111,
            stats_id: "RTPCodec-1".to_owned(),
        };

        let value = serde_json::to_value(CodecStats::from(&codec)).unwrap();

        assert_eq!(value["type"], "codec");
        assert_eq!(value["id"], "RTPCodec-1");
        assert_eq!(value["payloadType"], 111);
        assert_eq!(value["mimeType"], "audio/opus");
        assert_eq!(value["channels"], 2);
        assert_eq!(value["clockRate"], 48000);
        assert_eq!(value["sdpFmtpLine"], "minptime=10;useinbandfec=1");
        assert!(value["timestamp"].as_f64().unwrap() > 1_600_000_000.0);
    }
}
