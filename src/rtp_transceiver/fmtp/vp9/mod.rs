use super::*;

pub(crate) const MIME_TYPE: &str = "video/vp9";

/// VP9 configurations are compatible when their profile-id agrees.
/// An absent profile-id means profile 0.
#[derive(Debug, PartialEq)]
pub(crate) struct Vp9Fmtp {
    pub(crate) parameters: HashMap<String, String>,
}

impl Vp9Fmtp {
    fn profile_id(&self) -> &str {
        self.parameters.get("profile-id").map_or("0", String::as_str)
    }
}

impl Fmtp for Vp9Fmtp {
    fn mime_type(&self) -> &str {
        MIME_TYPE
    }

    fn match_fmtp(&self, f: &(dyn Fmtp)) -> bool {
        f.as_any()
            .downcast_ref::<Vp9Fmtp>()
            .map_or(false, |c| self.profile_id() == c.profile_id())
    }

    fn parameter(&self, key: &str) -> Option<&String> {
        self.parameters.get(key)
    }

    fn equal(&self, other: &(dyn Fmtp)) -> bool {
        other
            .as_any()
            .downcast_ref::<Vp9Fmtp>()
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
    fn test_vp9_fmtp_compare() {
        let tests = vec![
            ("Equal", "profile-id=0", "profile-id=0", true),
            ("ImplicitProfileZero", "profile-id=0", "", true),
            ("BothAbsent", "", "", true),
            ("ExtraParams", "profile-id=2;x=1", "profile-id=2", true),
            ("DifferentProfile", "profile-id=0", "profile-id=2", false),
            ("AbsentVsTwo", "", "profile-id=2", false),
        ];

        for (name, a, b, consist) in tests {
            let aa = parse("video/VP9", 90000, 0, a);
            let bb = parse("video/vp9", 90000, 0, b);

            assert_eq!(aa.match_fmtp(&*bb), consist, "{name}: forward");
            assert_eq!(bb.match_fmtp(&*aa), consist, "{name}: reverse");
        }
    }
}
