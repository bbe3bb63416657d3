use super::*;

pub(crate) const MIME_TYPE: &str = "video/av1";

/// AV1 configurations are compatible when their `profile` agrees,
/// absent meaning profile 0 (RTP Payload Format For AV1, section 7.2).
#[derive(Debug, PartialEq)]
pub(crate) struct Av1Fmtp {
    pub(crate) parameters: HashMap<String, String>,
}

impl Fmtp for Av1Fmtp {
    fn mime_type(&self) -> &str {
        MIME_TYPE
    }

    fn match_fmtp(&self, f: &(dyn Fmtp)) -> bool {
        let c = match f.as_any().downcast_ref::<Av1Fmtp>() {
            Some(c) => c,
            None => return false,
        };

        let profile = |p: &HashMap<String, String>| {
            p.get("profile").cloned().unwrap_or_else(|| "0".to_owned())
        };
        profile(&self.parameters) == profile(&c.parameters)
    }

    fn parameter(&self, key: &str) -> Option<&String> {
        self.parameters.get(key)
    }

    fn equal(&self, other: &(dyn Fmtp)) -> bool {
        other
            .as_any()
            .downcast_ref::<Av1Fmtp>()
            .map_or(false, |a| self == a)
    }

    fn as_any(&self) -> &(dyn Any) {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_av1_fmtp_compare() {
        let tests = vec![
            ("Equal", "profile=1", "profile=1", true),
            ("ImplicitProfileZero", "", "profile=0", true),
            ("LevelIgnored", "profile=0;level-idx=5", "profile=0;level-idx=8", true),
            ("DifferentProfile", "profile=0", "profile=1", false),
        ];

        for (name, a, b, consist) in tests {
            let aa = parse("video/AV1", 90000, 0, a);
            let bb = parse("video/av1", 90000, 0, b);

            assert_eq!(aa.match_fmtp(&*bb), consist, "{name}: forward");
            assert_eq!(bb.match_fmtp(&*aa), consist, "{name}: reverse");
        }

        let vp9 = parse("video/VP9", 90000, 0, "");
        assert!(!parse("video/AV1", 90000, 0, "").match_fmtp(&*vp9));
    }
}
