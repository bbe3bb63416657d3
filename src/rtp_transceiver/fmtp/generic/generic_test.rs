use super::*;

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_generic_fmtp_parse() {
    let tests: Vec<(&str, &str, HashMap<String, String>)> = vec![
        ("OneParam", "key-name=value", params(&[("key-name", "value")])),
        (
            "OneParamWithWhiteSpaces",
            "\tkey-name=value ",
            params(&[("key-name", "value")]),
        ),
        (
            "TwoParams",
            "key-name=value;key2=value2",
            params(&[("key-name", "value"), ("key2", "value2")]),
        ),
        (
            "TwoParamsWithWhiteSpaces",
            "key-name=value;  \n\tkey2=value2 ",
            params(&[("key-name", "value"), ("key2", "value2")]),
        ),
        ("UppercaseKey", "APT=96", params(&[("apt", "96")])),
        ("Empty", "", params(&[])),
    ];

    for (name, input, parameters) in tests {
        let f = parse("audio/generic", 8000, 1, input);
        let expected: Box<dyn Fmtp> = Box::new(GenericFmtp {
            mime_type: "audio/generic".to_owned(),
            clock_rate: 8000,
            channels: 1,
            parameters,
        });
        assert_eq!(&f, &expected, "{name} failed");

        assert_eq!(f.mime_type(), "audio/generic");
    }
}

#[test]
fn test_generic_fmtp_compare() {
    let tests = vec![
        (
            "Equal",
            "key1=value1;key2=value2;key3=value3",
            "key1=value1;key2=value2;key3=value3",
            true,
        ),
        (
            "EqualWithWhitespaceVariants",
            "key1=value1;key2=value2;key3=value3",
            "  key1=value1;  \nkey2=value2;\t\nkey3=value3",
            true,
        ),
        (
            "EqualWithCase",
            "key1=value1;key2=value2;key3=value3",
            "key1=value1;key2=Value2;Key3=value3",
            true,
        ),
        (
            "OneHasExtraParam",
            "key1=value1;key2=value2;key3=value3",
            "key1=value1;key2=value2;key3=value3;key4=value4",
            true,
        ),
        (
            "Inconsistent",
            "key1=value1;key2=value2;key3=value3",
            "key1=value1;key2=different_value;key3=value3",
            false,
        ),
        (
            "Inconsistent_OneHasExtraParam",
            "key1=value1;key2=value2;key3=value3;key4=value4",
            "key1=value1;key2=different_value;key3=value3",
            false,
        ),
        ("RtxDifferentApt", "apt=96", "apt=100", false),
    ];

    for (name, a, b, consist) in tests {
        let aa = parse("video/rtx", 90000, 0, a);
        let bb = parse("video/rtx", 90000, 0, b);

        assert_eq!(aa.match_fmtp(&*bb), consist, "{name}: forward");
        assert_eq!(bb.match_fmtp(&*aa), consist, "{name}: reverse");
    }
}

#[test]
fn test_generic_fmtp_compare_mime_type_case_mismatch() {
    let a = parse("audio/opus", 48000, 2, "");
    let b = parse("audio/OPUS", 48000, 2, "");

    assert!(
        b.match_fmtp(&*a),
        "fmtp lines should match even if they use different casing"
    );
}

#[test]
fn test_generic_fmtp_compare_clock_rate_and_channels() {
    let opus = parse("audio/opus", 48000, 2, "minptime=10");

    assert!(opus.match_fmtp(&*parse("audio/opus", 0, 2, "minptime=10")));
    assert!(!opus.match_fmtp(&*parse("audio/opus", 16000, 2, "minptime=10")));
    assert!(!opus.match_fmtp(&*parse("audio/opus", 48000, 1, "minptime=10")));

    let pcmu = parse("audio/PCMU", 8000, 0, "");
    assert!(pcmu.match_fmtp(&*parse("audio/PCMU", 8000, 1, "")));
}

#[test]
fn test_generic_fmtp_does_not_match_other_comparators() {
    let a = parse("video/rtx", 90000, 0, "");
    let b = parse("video/H264", 90000, 0, "packetization-mode=1");

    assert!(!a.match_fmtp(&*b));
    assert!(!b.match_fmtp(&*a));
}
