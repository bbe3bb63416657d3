use std::fmt;

/// RTCRtpTransceiverDirection indicates which way media flows for a transceiver.
/// Header extensions are registered against a subset of these directions.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RTCRtpTransceiverDirection {
    #[default]
    Unspecified,

    /// Sendrecv indicates media is both sent and received.
    Sendrecv,

    /// Sendonly indicates media is only sent.
    Sendonly,

    /// Recvonly indicates media is only received.
    Recvonly,

    /// Inactive indicates media flows neither way.
    Inactive,
}

const RTP_TRANSCEIVER_DIRECTION_SENDRECV_STR: &str = "sendrecv";
const RTP_TRANSCEIVER_DIRECTION_SENDONLY_STR: &str = "sendonly";
const RTP_TRANSCEIVER_DIRECTION_RECVONLY_STR: &str = "recvonly";
const RTP_TRANSCEIVER_DIRECTION_INACTIVE_STR: &str = "inactive";

impl From<&str> for RTCRtpTransceiverDirection {
    fn from(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            RTP_TRANSCEIVER_DIRECTION_SENDRECV_STR => RTCRtpTransceiverDirection::Sendrecv,
            RTP_TRANSCEIVER_DIRECTION_SENDONLY_STR => RTCRtpTransceiverDirection::Sendonly,
            RTP_TRANSCEIVER_DIRECTION_RECVONLY_STR => RTCRtpTransceiverDirection::Recvonly,
            RTP_TRANSCEIVER_DIRECTION_INACTIVE_STR => RTCRtpTransceiverDirection::Inactive,
            _ => RTCRtpTransceiverDirection::Unspecified,
        }
    }
}

impl fmt::Display for RTCRtpTransceiverDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCRtpTransceiverDirection::Sendrecv => RTP_TRANSCEIVER_DIRECTION_SENDRECV_STR,
            RTCRtpTransceiverDirection::Sendonly => RTP_TRANSCEIVER_DIRECTION_SENDONLY_STR,
            RTCRtpTransceiverDirection::Recvonly => RTP_TRANSCEIVER_DIRECTION_RECVONLY_STR,
            RTCRtpTransceiverDirection::Inactive => RTP_TRANSCEIVER_DIRECTION_INACTIVE_STR,
            RTCRtpTransceiverDirection::Unspecified => crate::UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

impl RTCRtpTransceiverDirection {
    /// reverse indicate the opposite direction
    pub fn reverse(&self) -> RTCRtpTransceiverDirection {
        match *self {
            RTCRtpTransceiverDirection::Sendonly => RTCRtpTransceiverDirection::Recvonly,
            RTCRtpTransceiverDirection::Recvonly => RTCRtpTransceiverDirection::Sendonly,
            _ => *self,
        }
    }

    pub fn intersect(&self, other: RTCRtpTransceiverDirection) -> RTCRtpTransceiverDirection {
        Self::from_send_recv(
            self.has_send() && other.has_send(),
            self.has_recv() && other.has_recv(),
        )
    }

    pub fn from_send_recv(send: bool, recv: bool) -> RTCRtpTransceiverDirection {
        match (send, recv) {
            (true, true) => Self::Sendrecv,
            (true, false) => Self::Sendonly,
            (false, true) => Self::Recvonly,
            (false, false) => Self::Inactive,
        }
    }

    pub fn has_send(&self) -> bool {
        matches!(self, Self::Sendrecv | Self::Sendonly)
    }

    pub fn has_recv(&self) -> bool {
        matches!(self, Self::Sendrecv | Self::Recvonly)
    }

    /// Only the one-way directions may restrict a header extension.
    pub(crate) fn is_header_extension_direction(&self) -> bool {
        matches!(self, Self::Sendonly | Self::Recvonly)
    }
}

/// Reports whether any direction appears in both lists.
pub(crate) fn have_rtp_transceiver_direction_intersection(
    have: &[RTCRtpTransceiverDirection],
    want: &[RTCRtpTransceiverDirection],
) -> bool {
    have.iter().any(|h| want.contains(h))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rtp_transceiver_direction_from_str() {
        let tests = vec![
            ("Unspecified", RTCRtpTransceiverDirection::Unspecified),
            ("sendrecv", RTCRtpTransceiverDirection::Sendrecv),
            ("SendOnly", RTCRtpTransceiverDirection::Sendonly),
            ("recvonly", RTCRtpTransceiverDirection::Recvonly),
            ("INACTIVE", RTCRtpTransceiverDirection::Inactive),
            ("sideways", RTCRtpTransceiverDirection::Unspecified),
        ];

        for (raw, expected) in tests {
            assert_eq!(RTCRtpTransceiverDirection::from(raw), expected, "{raw}");
        }
    }

    #[test]
    fn test_rtp_transceiver_direction_display_round_trips() {
        use RTCRtpTransceiverDirection::*;

        for d in [Sendrecv, Sendonly, Recvonly, Inactive] {
            assert_eq!(RTCRtpTransceiverDirection::from(d.to_string().as_str()), d);
        }
        assert_eq!(Unspecified.to_string(), "Unspecified");
    }

    #[test]
    fn test_rtp_transceiver_direction_send_recv() {
        use RTCRtpTransceiverDirection::*;

        let tests = vec![
            (Unspecified, false, false),
            (Sendrecv, true, true),
            (Sendonly, true, false),
            (Recvonly, false, true),
            (Inactive, false, false),
        ];

        for (d, send, recv) in tests {
            assert_eq!(d.has_send(), send, "{d}");
            assert_eq!(d.has_recv(), recv, "{d}");
            if d != Unspecified {
                assert_eq!(RTCRtpTransceiverDirection::from_send_recv(send, recv), d);
            }
        }
    }

    #[test]
    fn test_rtp_transceiver_direction_reverse_and_intersect() {
        use RTCRtpTransceiverDirection::*;

        assert_eq!(Sendonly.reverse(), Recvonly);
        assert_eq!(Recvonly.reverse(), Sendonly);
        assert_eq!(Sendrecv.reverse(), Sendrecv);

        let tests = vec![
            ((Sendrecv, Recvonly), Recvonly),
            ((Sendrecv, Sendonly), Sendonly),
            ((Sendonly, Recvonly), Inactive),
            ((Recvonly, Sendrecv), Recvonly),
            ((Inactive, Sendrecv), Inactive),
        ];

        for ((a, b), expected) in tests {
            assert_eq!(a.intersect(b), expected);
        }
    }

    #[test]
    fn test_have_rtp_transceiver_direction_intersection() {
        use RTCRtpTransceiverDirection::*;

        assert!(have_rtp_transceiver_direction_intersection(
            &[Recvonly, Sendonly],
            &[Sendonly]
        ));
        assert!(!have_rtp_transceiver_direction_intersection(
            &[Recvonly],
            &[Sendonly, Sendrecv]
        ));
        assert!(!have_rtp_transceiver_direction_intersection(&[], &[Recvonly]));
        assert!(!have_rtp_transceiver_direction_intersection(&[Recvonly], &[]));
    }

    #[test]
    fn test_is_header_extension_direction() {
        use RTCRtpTransceiverDirection::*;

        assert!(Sendonly.is_header_extension_direction());
        assert!(Recvonly.is_header_extension_direction());
        assert!(!Sendrecv.is_header_extension_direction());
        assert!(!Inactive.is_header_extension_direction());
        assert!(!Unspecified.is_header_extension_direction());
    }
}
