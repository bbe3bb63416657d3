use super::*;
use crate::rtp_transceiver::{TYPE_RTCP_FB_NACK, TYPE_RTCP_FB_TRANSPORT_CC};

const OFFER: &str = "v=0
o=- 4596489990601351948 2 IN IP4 127.0.0.1
s=-
t=0 0
m=audio 9 UDP/TLS/RTP/SAVPF 111
a=rtpmap:111 opus/48000/2
a=fmtp:111 minptime=10;useinbandfec=1
a=rtcp-fb:111 transport-cc
a=extmap:1 urn:ietf:params:rtp-hdrext:ssrc-audio-level
a=extmap:3 urn:ietf:params:rtp-hdrext:sdes:mid
m=video 9 UDP/TLS/RTP/SAVPF 96 97
a=rtpmap:96 VP8/90000
a=rtcp-fb:96 nack
a=rtcp-fb:96 nack pli
a=rtpmap:97 rtx/90000
a=fmtp:97 apt=96
a=extmap:3 urn:ietf:params:rtp-hdrext:sdes:mid
m=application 9 UDP/DTLS/SCTP webrtc-datachannel
";

#[test]
fn test_remote_description_from_sdp() -> Result<()> {
    let desc = RemoteDescription::unmarshal(OFFER)?;

    assert_eq!(desc.media_sections.len(), 3);

    let audio = &desc.media_sections[0];
    assert_eq!(audio.media, "audio");
    assert_eq!(audio.codecs.len(), 1);
    let opus = &audio.codecs[0];
    assert_eq!(opus.payload_type, 111);
    assert_eq!(opus.capability.mime_type, "audio/opus");
    assert_eq!(opus.capability.clock_rate, 48000);
    assert_eq!(opus.capability.channels, 2);
    assert_eq!(opus.capability.sdp_fmtp_line, "minptime=10;useinbandfec=1");
    assert_eq!(
        opus.capability.rtcp_feedback,
        vec![RTCPFeedback::new(TYPE_RTCP_FB_TRANSPORT_CC, "")]
    );
    assert_eq!(
        audio.header_extensions,
        vec![
            ("urn:ietf:params:rtp-hdrext:ssrc-audio-level".to_owned(), 1),
            ("urn:ietf:params:rtp-hdrext:sdes:mid".to_owned(), 3),
        ]
    );

    let video = &desc.media_sections[1];
    assert_eq!(video.media, "video");
    assert_eq!(video.codecs.len(), 2);
    assert_eq!(video.codecs[0].capability.mime_type, "video/VP8");
    assert_eq!(video.codecs[0].capability.channels, 0);
    assert_eq!(
        video.codecs[0].capability.rtcp_feedback,
        vec![
            RTCPFeedback::new(TYPE_RTCP_FB_NACK, ""),
            RTCPFeedback::new(TYPE_RTCP_FB_NACK, "pli"),
        ]
    );
    assert_eq!(video.codecs[1].capability.mime_type, "video/rtx");
    assert_eq!(video.codecs[1].capability.sdp_fmtp_line, "apt=96");

    let application = &desc.media_sections[2];
    assert_eq!(application.media, "application");
    assert!(application.codecs.is_empty());
    assert!(application.header_extensions.is_empty());

    Ok(())
}

#[test]
fn test_remote_description_bad_payload_type() {
    let raw = "v=0
o=- 4596489990601351948 2 IN IP4 127.0.0.1
s=-
t=0 0
m=video 9 UDP/TLS/RTP/SAVPF 96
a=rtpmap:97 VP8/90000
";

    assert!(
        RemoteDescription::unmarshal(raw).is_err(),
        "a listed payload type without rtpmap must be rejected"
    );
}
