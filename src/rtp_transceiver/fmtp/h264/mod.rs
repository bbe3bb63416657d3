
use super::*;

pub(crate) const MIME_TYPE: &str = "video/h264";

/// Compares the profile_idc and profile-iop bytes; the level byte is free to differ.
fn profile_level_id_matches(a: &str, b: &str) -> bool {
    let aa = match hex::decode(a) {
        Ok(aa) if aa.len() >= 2 => aa,
        _ => return false,
    };
    let bb = match hex::decode(b) {
        Ok(bb) if bb.len() >= 2 => bb,
        _ => return false,
    };

    aa[0] == bb[0] && aa[1] == bb[1]
}

#[derive(Debug, PartialEq)]
pub(crate) struct H264Fmtp {
    pub(crate) parameters: HashMap<String, String>,
}

impl H264Fmtp {
    fn packetization_mode(&self) -> &str {
        self.parameters
            .get("packetization-mode")
            .map_or("0", String::as_str)
    }
}

impl Fmtp for H264Fmtp {
    fn mime_type(&self) -> &str {
        MIME_TYPE
    }

    /// Match returns true if h and b are compatible fmtp descriptions
    /// Based on RFC6184 Section 8.2.2:
    ///   The parameters identifying a media format configuration for H.264
    ///   are profile-level-id and packetization-mode.  These media format
    ///   configuration parameters (except for the level part of profile-
    ///   level-id) MUST be used symmetrically.
    /// An absent packetization-mode means mode 0.
    fn match_fmtp(&self, f: &(dyn Fmtp)) -> bool {
        let c = match f.as_any().downcast_ref::<H264Fmtp>() {
            Some(c) => c,
            None => return false,
        };

        if self.packetization_mode() != c.packetization_mode() {
            return false;
        }

        match (
            self.parameters.get("profile-level-id"),
            c.parameters.get("profile-level-id"),
        ) {
            (Some(a), Some(b)) => profile_level_id_matches(a, b),
            _ => false,
        }
    }

    fn parameter(&self, key: &str) -> Option<&String> {
        self.parameters.get(key)
    }

    fn equal(&self, other: &(dyn Fmtp)) -> bool {
        other
            .as_any()
            .downcast_ref::<H264Fmtp>()
            .map_or(false, |a| self == a)
    }

    fn as_any(&self) -> &(dyn Any) {
        self
    }
}
