use super::*;

#[test]
fn test_setting_engine_defaults() {
    let s = SettingEngine::default();

    assert!(
        !s.disable_media_engine_copy,
        "SettingEngine defaults aren't as expected."
    );
    assert_eq!(s.negotiate_multi_codecs, None);
}

#[test]
fn test_disable_media_engine_copy() {
    let mut s = SettingEngine::default();

    s.disable_media_engine_copy(true);
    assert!(s.disable_media_engine_copy);

    s.disable_media_engine_copy(false);
    assert!(!s.disable_media_engine_copy);
}

#[test]
fn test_set_multi_codec_negotiation() {
    let mut s = SettingEngine::default();

    s.set_multi_codec_negotiation(false);
    assert_eq!(s.negotiate_multi_codecs, Some(false));

    s.set_multi_codec_negotiation(true);
    assert_eq!(s.negotiate_multi_codecs, Some(true));
}
