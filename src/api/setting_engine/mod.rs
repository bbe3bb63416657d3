#[cfg(test)]
mod setting_engine_test;

/// SettingEngine allows influencing behavior in ways that are not
/// supported by the WebRTC API. This allows us to support additional
/// use-cases without deviating from the WebRTC API elsewhere.
#[derive(Default, Debug, Clone)]
pub struct SettingEngine {
    pub(crate) disable_media_engine_copy: bool,
    pub(crate) negotiate_multi_codecs: Option<bool>,
}

impl SettingEngine {
    /// disable_media_engine_copy stops the MediaEngine from being copied for each session.
    /// Every session then negotiates against the configured engine itself, so negotiated
    /// codecs and header extensions are shared by all of them. Only disable copying when the
    /// API serves a single session.
    pub fn disable_media_engine_copy(&mut self, is_disabled: bool) {
        self.disable_media_engine_copy = is_disabled;
    }

    /// set_multi_codec_negotiation overrides the MediaEngine's multi-codec negotiation flag
    /// on every copy handed out by the API. Has no effect when copying is disabled.
    pub fn set_multi_codec_negotiation(&mut self, negotiate_multi_codecs: bool) {
        self.negotiate_multi_codecs = Some(negotiate_multi_codecs);
    }
}
