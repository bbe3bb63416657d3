pub mod fmtp;
pub mod rtp_codec;
pub mod rtp_transceiver_direction;

/// PayloadType identifies the format of the RTP payload and determines
/// its interpretation by the application. Each codec in a RTP Session
/// will have a different PayloadType
/// <https://tools.ietf.org/html/rfc3550#section-3>
pub type PayloadType = u8;

/// TYPE_RTCP_FB_TRANSPORT_CC ..
pub const TYPE_RTCP_FB_TRANSPORT_CC: &str = "transport-cc";

/// TYPE_RTCP_FB_GOOG_REMB ..
pub const TYPE_RTCP_FB_GOOG_REMB: &str = "goog-remb";

/// TYPE_RTCP_FB_ACK ..
pub const TYPE_RTCP_FB_ACK: &str = "ack";

/// TYPE_RTCP_FB_CCM ..
pub const TYPE_RTCP_FB_CCM: &str = "ccm";

/// TYPE_RTCP_FB_NACK ..
pub const TYPE_RTCP_FB_NACK: &str = "nack";

/// RTCPFeedback signals the connection to use additional RTCP packet types.
/// <https://draft.ortc.org/#dom-rtcrtcpfeedback>
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCPFeedback {
    /// Type is the type of feedback.
    /// valid: ack, ccm, nack, goog-remb, transport-cc
    pub typ: String,

    /// The parameter value depends on the type.
    /// For example, type="nack" parameter="pli" will send Picture Loss Indicator packets.
    pub parameter: String,
}

impl RTCPFeedback {
    pub fn new(typ: &str, parameter: &str) -> Self {
        RTCPFeedback {
            typ: typ.to_owned(),
            parameter: parameter.to_owned(),
        }
    }
}

/// Parses one `a=rtcp-fb` value such as `nack pli` or `goog-remb`.
impl From<&str> for RTCPFeedback {
    fn from(raw: &str) -> Self {
        match raw.trim().split_once(' ') {
            Some((typ, parameter)) => RTCPFeedback::new(typ, parameter.trim()),
            None => RTCPFeedback::new(raw.trim(), ""),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rtcp_feedback_from_str() {
        let tests = vec![
            ("nack", RTCPFeedback::new(TYPE_RTCP_FB_NACK, "")),
            ("nack pli", RTCPFeedback::new(TYPE_RTCP_FB_NACK, "pli")),
            ("ccm fir", RTCPFeedback::new(TYPE_RTCP_FB_CCM, "fir")),
            (" goog-remb ", RTCPFeedback::new(TYPE_RTCP_FB_GOOG_REMB, "")),
        ];

        for (raw, expected) in tests {
            assert_eq!(RTCPFeedback::from(raw), expected, "{raw}");
        }
    }
}
