
pub mod media_engine;
pub mod setting_engine;

use std::sync::Arc;

use log::trace;
use media_engine::*;
use setting_engine::*;

/// API bundles the codec and header extension configuration shared by
/// every session created from it.
pub struct API {
    pub(crate) setting_engine: Arc<SettingEngine>,
    pub(crate) media_engine: Arc<MediaEngine>,
}

impl API {
    /// new_media_engine returns the MediaEngine a new session negotiates with.
    ///
    /// Each call yields a fresh copy of the configured engine with negotiation state
    /// reset, unless [`SettingEngine::disable_media_engine_copy`] was set, in which
    /// case the configured engine itself is shared.
    pub fn new_media_engine(&self) -> Arc<MediaEngine> {
        if self.setting_engine.disable_media_engine_copy {
            trace!("sharing the configured media engine");
            return Arc::clone(&self.media_engine);
        }

        let mut media_engine = self.media_engine.clone_to();
        if let Some(negotiate_multi_codecs) = self.setting_engine.negotiate_multi_codecs {
            media_engine.set_multi_codec_negotiation(negotiate_multi_codecs);
        }
        Arc::new(media_engine)
    }

    /// Returns the internal [`SettingEngine`].
    pub fn setting_engine(&self) -> Arc<SettingEngine> {
        Arc::clone(&self.setting_engine)
    }

    /// Returns the internal [`MediaEngine`].
    pub fn media_engine(&self) -> Arc<MediaEngine> {
        Arc::clone(&self.media_engine)
    }
}

#[derive(Default)]
pub struct APIBuilder {
    setting_engine: Option<Arc<SettingEngine>>,
    media_engine: Option<Arc<MediaEngine>>,
}

impl APIBuilder {
    pub fn new() -> Self {
        APIBuilder::default()
    }

    pub fn build(mut self) -> API {
        API {
            setting_engine: if let Some(setting_engine) = self.setting_engine.take() {
                setting_engine
            } else {
                Arc::new(SettingEngine::default())
            },
            media_engine: if let Some(media_engine) = self.media_engine.take() {
                media_engine
            } else {
                Arc::new(MediaEngine::default())
            },
        }
    }

    /// WithSettingEngine allows providing a SettingEngine to the API.
    /// Settings should not be changed after passing the engine to an API.
    pub fn with_setting_engine(mut self, setting_engine: SettingEngine) -> Self {
        self.setting_engine = Some(Arc::new(setting_engine));
        self
    }

    /// WithMediaEngine allows providing a MediaEngine to the API.
    /// Registrations must be complete before passing the engine to an API.
    pub fn with_media_engine(mut self, media_engine: MediaEngine) -> Self {
        self.media_engine = Some(Arc::new(media_engine));
        self
    }
}
