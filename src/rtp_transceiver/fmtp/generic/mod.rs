#[cfg(test)]
mod generic_test;

use super::*;

/// fmtp_consist checks that two FMTP parameters are not inconsistent.
/// Keys present on only one side are ignored.
fn fmtp_consist(a: &HashMap<String, String>, b: &HashMap<String, String>) -> bool {
    a.iter().all(|(k, v)| match b.get(k) {
        Some(vb) => UniCase::new(v) == UniCase::new(vb),
        None => true,
    })
}

#[derive(Debug, PartialEq)]
pub(crate) struct GenericFmtp {
    pub(crate) mime_type: String,
    pub(crate) clock_rate: u32,
    pub(crate) channels: u16,
    pub(crate) parameters: HashMap<String, String>,
}

impl Fmtp for GenericFmtp {
    fn mime_type(&self) -> &str {
        self.mime_type.as_str()
    }

    /// Match returns true if g and b are compatible fmtp descriptions
    /// The generic implementation is used for MimeTypes that are not defined
    fn match_fmtp(&self, f: &(dyn Fmtp)) -> bool {
        let c = match f.as_any().downcast_ref::<GenericFmtp>() {
            Some(c) => c,
            None => return false,
        };

        UniCase::new(&self.mime_type) == UniCase::new(&c.mime_type)
            && clock_rate_equal(&self.mime_type, self.clock_rate, c.clock_rate)
            && channels_equal(&self.mime_type, self.channels, c.channels)
            && fmtp_consist(&self.parameters, &c.parameters)
    }

    fn parameter(&self, key: &str) -> Option<&String> {
        self.parameters.get(key)
    }

    fn equal(&self, other: &(dyn Fmtp)) -> bool {
        other
            .as_any()
            .downcast_ref::<GenericFmtp>()
            .map_or(false, |a| self == a)
    }

    fn as_any(&self) -> &(dyn Any) {
        self
    }
}
