
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, trace, warn};
use portable_atomic::{AtomicU64, Ordering};
use unicase::UniCase;
use util::sync::RwLock;

use crate::error::{flatten_errs, Error, Result};
use crate::remote_description::{RemoteDescription, RemoteMediaSection};
use crate::rtp_transceiver::fmtp;
use crate::rtp_transceiver::rtp_codec::{
    codec_parameters_fuzzy_search, rtcp_feedback_intersection, CodecMatch, RTCRtpCodecCapability,
    RTCRtpCodecParameters, RTCRtpHeaderExtensionCapability, RTCRtpHeaderExtensionParameters,
    RTCRtpParameters, RTPCodecType,
};
use crate::rtp_transceiver::rtp_transceiver_direction::{
    have_rtp_transceiver_direction_intersection, RTCRtpTransceiverDirection,
};
use crate::rtp_transceiver::{PayloadType, RTCPFeedback};
use crate::stats::stats_collector::StatsCollector;
use crate::stats::StatsReportType::Codec;
use crate::stats::{CodecStats, StatsReportType};

/// MIME_TYPE_H264 H264 MIME type.
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_H264: &str = "video/H264";
/// MIME_TYPE_HEVC HEVC MIME type.
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_HEVC: &str = "video/H265";
/// MIME_TYPE_OPUS Opus MIME type
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_OPUS: &str = "audio/opus";
/// MIME_TYPE_VP8 VP8 MIME type
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_VP8: &str = "video/VP8";
/// MIME_TYPE_VP9 VP9 MIME type
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_VP9: &str = "video/VP9";
/// MIME_TYPE_AV1 AV1 MIME type
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_AV1: &str = "video/AV1";
/// MIME_TYPE_G722 G722 MIME type
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_G722: &str = "audio/G722";
/// MIME_TYPE_PCMU PCMU MIME type
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_PCMU: &str = "audio/PCMU";
/// MIME_TYPE_PCMA PCMA MIME type
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_PCMA: &str = "audio/PCMA";
/// MIME_TYPE_TELEPHONE_EVENT telephone-event MIME type
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_TELEPHONE_EVENT: &str = "audio/telephone-event";
/// MIME_TYPE_RTX RTX MIME type
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_RTX: &str = "video/rtx";
/// MIME_TYPE_FLEX_FEC FlexFEC MIME type
/// Note: Matching should be case insensitive.
pub const MIME_TYPE_FLEX_FEC: &str = "video/flexfec";

/// One-byte header extension IDs; 15 is reserved.
const VALID_EXT_IDS: Range<isize> = 1..15;

static STATS_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_stats_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!(
        "RTPCodec-{}-{}",
        nanos,
        STATS_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub(crate) struct MediaEngineHeaderExtension {
    pub(crate) uri: String,
    pub(crate) is_audio: bool,
    pub(crate) is_video: bool,
    // Only transceivers with one of these directions use the extension
    pub(crate) allowed_directions: Vec<RTCRtpTransceiverDirection>,
}

impl MediaEngineHeaderExtension {
    fn is_kind(&self, typ: RTPCodecType) -> bool {
        match typ {
            RTPCodecType::Audio => self.is_audio,
            RTPCodecType::Video => self.is_video,
        }
    }

    fn set_kind(&mut self, typ: RTPCodecType) {
        match typ {
            RTPCodecType::Audio => self.is_audio = true,
            RTPCodecType::Video => self.is_video = true,
        }
    }
}

/// State that changes while a session negotiates.
#[derive(Default, Debug)]
struct NegotiationState {
    // If we have attempted to negotiate a codec type yet.
    negotiated_video: bool,
    negotiated_audio: bool,

    negotiated_video_codecs: Vec<RTCRtpCodecParameters>,
    negotiated_audio_codecs: Vec<RTCRtpCodecParameters>,

    // None until the first header extension is registered
    negotiated_header_extensions: Option<BTreeMap<isize, MediaEngineHeaderExtension>>,
}

impl NegotiationState {
    fn is_negotiated(&self, typ: RTPCodecType) -> bool {
        match typ {
            RTPCodecType::Audio => self.negotiated_audio,
            RTPCodecType::Video => self.negotiated_video,
        }
    }

    fn set_negotiated(&mut self, typ: RTPCodecType) {
        match typ {
            RTPCodecType::Audio => self.negotiated_audio = true,
            RTPCodecType::Video => self.negotiated_video = true,
        }
    }

    fn push_codecs(
        &mut self,
        codecs: Vec<(PayloadType, RTCRtpCodecParameters)>,
        typ: RTPCodecType,
    ) -> Vec<Error> {
        let negotiated = match typ {
            RTPCodecType::Audio => &mut self.negotiated_audio_codecs,
            RTPCodecType::Video => &mut self.negotiated_video_codecs,
        };

        codecs
            .into_iter()
            .filter_map(|(_, codec)| MediaEngine::add_codec(negotiated, codec).err())
            .collect()
    }

    fn header_extension_id(&self, uri: &str) -> Option<isize> {
        self.negotiated_header_extensions
            .as_ref()?
            .iter()
            .find(|(_, e)| e.uri == uri)
            .map(|(id, _)| *id)
    }

    fn is_header_extension_id_taken(&self, id: isize) -> bool {
        self.negotiated_header_extensions
            .as_ref()
            .map_or(false, |n| n.contains_key(&id))
    }
}

/// A MediaEngine defines the codecs supported by a session, and the
/// configuration of those codecs.
///
/// Codecs and header extensions are registered up front through `&mut self`.
/// Once the engine is shared, negotiation and every query go through one
/// reader/writer lock, so readers never observe a half-applied remote description.
pub struct MediaEngine {
    video_codecs: Vec<RTCRtpCodecParameters>,
    audio_codecs: Vec<RTCRtpCodecParameters>,
    header_extensions: Vec<MediaEngineHeaderExtension>,
    negotiate_multi_codecs: bool,

    state: RwLock<NegotiationState>,
}

impl Default for MediaEngine {
    fn default() -> Self {
        MediaEngine {
            video_codecs: vec![],
            audio_codecs: vec![],
            header_extensions: vec![],
            negotiate_multi_codecs: false,
            state: RwLock::new(NegotiationState::default()),
        }
    }
}

impl MediaEngine {
    /// register_default_codecs registers the default codecs supported by this crate.
    /// register_default_codecs is not safe for concurrent use.
    pub fn register_default_codecs(&mut self) -> Result<()> {
        // Default Audio Codecs
        for (mime_type, clock_rate, channels, sdp_fmtp_line, payload_type) in [
            (MIME_TYPE_OPUS, 48000, 2, "minptime=10;useinbandfec=1", 111),
            (MIME_TYPE_G722, 8000, 0, "", 9),
            (MIME_TYPE_PCMU, 8000, 0, "", 0),
            (MIME_TYPE_PCMA, 8000, 0, "", 8),
        ] {
            self.register_codec(
                RTCRtpCodecParameters {
                    capability: RTCRtpCodecCapability {
                        mime_type: mime_type.to_owned(),
                        clock_rate,
                        channels,
                        sdp_fmtp_line: sdp_fmtp_line.to_owned(),
                        rtcp_feedback: vec![],
                    },
                    payload_type,
                    ..Default::default()
                },
                RTPCodecType::Audio,
            )?;
        }

        let video_rtcp_feedback = vec![
            RTCPFeedback::new("goog-remb", ""),
            RTCPFeedback::new("ccm", "fir"),
            RTCPFeedback::new("nack", ""),
            RTCPFeedback::new("nack", "pli"),
        ];

        // (mime type, fmtp, payload type, rtx payload type)
        for (mime_type, sdp_fmtp_line, payload_type, rtx_payload_type) in [
            (MIME_TYPE_VP8, "", 96, 97),
            (
                MIME_TYPE_H264,
                "level-asymmetry-allowed=1;packetization-mode=1;profile-level-id=42001f",
                102,
                103,
            ),
            (
                MIME_TYPE_H264,
                "level-asymmetry-allowed=1;packetization-mode=0;profile-level-id=42001f",
                104,
                105,
            ),
            (
                MIME_TYPE_H264,
                "level-asymmetry-allowed=1;packetization-mode=1;profile-level-id=42e01f",
                106,
                107,
            ),
            (
                MIME_TYPE_H264,
                "level-asymmetry-allowed=1;packetization-mode=0;profile-level-id=42e01f",
                108,
                109,
            ),
            (
                MIME_TYPE_H264,
                "level-asymmetry-allowed=1;packetization-mode=1;profile-level-id=4d001f",
                127,
                125,
            ),
            (
                MIME_TYPE_H264,
                "level-asymmetry-allowed=1;packetization-mode=0;profile-level-id=4d001f",
                39,
                40,
            ),
            (MIME_TYPE_HEVC, "", 116, 117),
            (MIME_TYPE_AV1, "", 45, 46),
            (MIME_TYPE_VP9, "profile-id=0", 98, 99),
            (MIME_TYPE_VP9, "profile-id=2", 100, 101),
            (
                MIME_TYPE_H264,
                "level-asymmetry-allowed=1;packetization-mode=1;profile-level-id=64001f",
                112,
                113,
            ),
        ] {
            self.register_codec(
                RTCRtpCodecParameters {
                    capability: RTCRtpCodecCapability {
                        mime_type: mime_type.to_owned(),
                        clock_rate: 90000,
                        channels: 0,
                        sdp_fmtp_line: sdp_fmtp_line.to_owned(),
                        rtcp_feedback: video_rtcp_feedback.clone(),
                    },
                    payload_type,
                    ..Default::default()
                },
                RTPCodecType::Video,
            )?;
            self.register_codec(
                RTCRtpCodecParameters {
                    capability: RTCRtpCodecCapability {
                        mime_type: MIME_TYPE_RTX.to_owned(),
                        clock_rate: 90000,
                        channels: 0,
                        sdp_fmtp_line: format!("apt={payload_type}"),
                        rtcp_feedback: vec![],
                    },
                    payload_type: rtx_payload_type,
                    ..Default::default()
                },
                RTPCodecType::Video,
            )?;
        }

        Ok(())
    }

    /// add_codec appends codec unless its payload type is taken. Re-adding the
    /// same codec is a no-op; a different codec on a taken payload type is an error.
    fn add_codec(
        codecs: &mut Vec<RTCRtpCodecParameters>,
        codec: RTCRtpCodecParameters,
    ) -> Result<()> {
        if let Some(c) = codecs.iter().find(|c| c.payload_type == codec.payload_type) {
            return if c.same_codec(&codec) {
                Ok(())
            } else {
                Err(Error::ErrCodecAlreadyRegistered)
            };
        }

        codecs.push(codec);
        Ok(())
    }

    /// register_codec adds codec to the MediaEngine
    /// These are the list of codecs supported by this session.
    /// register_codec is not safe for concurrent use.
    pub fn register_codec(
        &mut self,
        mut codec: RTCRtpCodecParameters,
        typ: RTPCodecType,
    ) -> Result<()> {
        codec.stats_id = next_stats_id();
        match typ {
            RTPCodecType::Audio => MediaEngine::add_codec(&mut self.audio_codecs, codec),
            RTPCodecType::Video => MediaEngine::add_codec(&mut self.video_codecs, codec),
        }
    }

    /// Adds a header extension to the MediaEngine
    /// To determine the negotiated value use [`MediaEngine::get_header_extension_id`] after signaling is complete.
    ///
    /// `allowed_directions` may hold `Recvonly` and `Sendonly`; empty allows both.
    /// Registering the same URI again for another kind enables it for that kind too,
    /// and replaces its allowed directions.
    pub fn register_header_extension(
        &mut self,
        extension: RTCRtpHeaderExtensionCapability,
        typ: RTPCodecType,
        allowed_directions: Vec<RTCRtpTransceiverDirection>,
    ) -> Result<()> {
        let allowed_directions = if allowed_directions.is_empty() {
            vec![
                RTCRtpTransceiverDirection::Recvonly,
                RTCRtpTransceiverDirection::Sendonly,
            ]
        } else {
            allowed_directions
        };
        if !allowed_directions
            .iter()
            .all(RTCRtpTransceiverDirection::is_header_extension_direction)
        {
            return Err(Error::ErrRegisterHeaderExtensionInvalidDirection);
        }

        self.state
            .write()
            .negotiated_header_extensions
            .get_or_insert_with(BTreeMap::new);

        let index = match self
            .header_extensions
            .iter()
            .position(|ext| ext.uri == extension.uri)
        {
            Some(index) => index,
            None => {
                self.header_extensions.push(MediaEngineHeaderExtension {
                    uri: extension.uri,
                    ..Default::default()
                });
                self.header_extensions.len() - 1
            }
        };

        let ext = &mut self.header_extensions[index];
        ext.set_kind(typ);
        ext.allowed_directions = allowed_directions;

        Ok(())
    }

    /// register_feedback adds feedback mechanism to already registered codecs.
    pub fn register_feedback(&mut self, feedback: RTCPFeedback, typ: RTPCodecType) {
        let codecs = match typ {
            RTPCodecType::Video => &mut self.video_codecs,
            RTPCodecType::Audio => &mut self.audio_codecs,
        };
        for c in codecs {
            c.capability.rtcp_feedback.push(feedback.clone());
        }
    }

    /// set_multi_codec_negotiation lets media sections after the first of a
    /// kind add codecs to an already negotiated kind.
    pub fn set_multi_codec_negotiation(&mut self, negotiate_multi_codecs: bool) {
        self.negotiate_multi_codecs = negotiate_multi_codecs;
    }

    pub fn multi_codec_negotiation(&self) -> bool {
        self.negotiate_multi_codecs
    }

    /// get_header_extension_id returns the negotiated ID for a header extension
    /// and whether it is enabled for audio and for video.
    /// An extension that has not been negotiated yields `(0, false, false)`.
    pub fn get_header_extension_id(
        &self,
        extension: RTCRtpHeaderExtensionCapability,
    ) -> (isize, bool, bool) {
        let state = self.state.read();
        let negotiated_header_extensions = match &state.negotiated_header_extensions {
            Some(n) => n,
            None => return (0, false, false),
        };

        for (id, h) in negotiated_header_extensions {
            if extension.uri == h.uri {
                return (*id, h.is_audio, h.is_video);
            }
        }

        (0, false, false)
    }

    /// clone_to copies any user modifiable state of the MediaEngine
    /// all internal state is reset
    pub fn clone_to(&self) -> Self {
        let negotiated_header_extensions = if self.header_extensions.is_empty() {
            None
        } else {
            Some(BTreeMap::new())
        };

        MediaEngine {
            video_codecs: self.video_codecs.clone(),
            audio_codecs: self.audio_codecs.clone(),
            header_extensions: self.header_extensions.clone(),
            negotiate_multi_codecs: self.negotiate_multi_codecs,
            state: RwLock::new(NegotiationState {
                negotiated_header_extensions,
                ..Default::default()
            }),
        }
    }

    fn codecs_by_kind<'a>(
        &'a self,
        state: &'a NegotiationState,
        typ: RTPCodecType,
    ) -> &'a [RTCRtpCodecParameters] {
        match typ {
            RTPCodecType::Video if state.negotiated_video => &state.negotiated_video_codecs,
            RTPCodecType::Video => &self.video_codecs,
            RTPCodecType::Audio if state.negotiated_audio => &state.negotiated_audio_codecs,
            RTPCodecType::Audio => &self.audio_codecs,
        }
    }

    fn codec_by_payload(
        &self,
        state: &NegotiationState,
        payload_type: PayloadType,
    ) -> Result<(RTCRtpCodecParameters, RTPCodecType)> {
        // negotiated codecs come first so the peer's choice wins over our registry
        let candidates: [(&[RTCRtpCodecParameters], RTPCodecType, bool); 4] = [
            (
                &state.negotiated_video_codecs,
                RTPCodecType::Video,
                state.negotiated_video,
            ),
            (
                &state.negotiated_audio_codecs,
                RTPCodecType::Audio,
                state.negotiated_audio,
            ),
            (&self.video_codecs, RTPCodecType::Video, !state.negotiated_video),
            (&self.audio_codecs, RTPCodecType::Audio, !state.negotiated_audio),
        ];

        candidates
            .into_iter()
            .filter(|(_, _, enabled)| *enabled)
            .find_map(|(codecs, typ, _)| {
                codecs
                    .iter()
                    .find(|codec| codec.payload_type == payload_type)
                    .map(|codec| (codec.clone(), typ))
            })
            .ok_or(Error::ErrCodecNotFound)
    }

    /// get_codec_by_payload finds the codec bound to a payload type,
    /// preferring negotiated codecs over registered ones.
    pub fn get_codec_by_payload(
        &self,
        payload_type: PayloadType,
    ) -> Result<(RTCRtpCodecParameters, RTPCodecType)> {
        let state = self.state.read();
        self.codec_by_payload(&state, payload_type)
    }

    /// collect_stats reports every codec currently in use, which is the negotiated
    /// list for a negotiated kind and the registered list otherwise.
    pub fn collect_stats(&self, collector: &StatsCollector) {
        let state = self.state.read();

        let reports: HashMap<String, StatsReportType> = [RTPCodecType::Video, RTPCodecType::Audio]
            .into_iter()
            .flat_map(|typ| self.codecs_by_kind(&state, typ))
            .map(|codec| (codec.stats_id.clone(), Codec(CodecStats::from(codec))))
            .collect();

        collector.merge(reports);
    }

    /// Look up a codec and enable if it exists.
    ///
    /// Returns the entry to commit, which keeps the remote capability but takes
    /// the local payload type, stats id and the intersected feedback.
    /// `exact_matches` and `partial_matches` hold `(remote payload type, entry)`
    /// pairs already matched in the same media section.
    fn match_remote_codec(
        &self,
        remote_codec: &RTCRtpCodecParameters,
        typ: RTPCodecType,
        exact_matches: &[(PayloadType, RTCRtpCodecParameters)],
        partial_matches: &[(PayloadType, RTCRtpCodecParameters)],
    ) -> Result<(RTCRtpCodecParameters, CodecMatch)> {
        let codecs = match typ {
            RTPCodecType::Audio => &self.audio_codecs,
            RTPCodecType::Video => &self.video_codecs,
        };

        let remote_fmtp = fmtp::parse(
            &remote_codec.capability.mime_type,
            remote_codec.capability.clock_rate,
            remote_codec.capability.channels,
            &remote_codec.capability.sdp_fmtp_line,
        );

        let (to_match, apt_match) = if let Some(apt) = remote_fmtp.parameter("apt") {
            let payload_type = apt.parse::<u8>()?;

            let found = |matches: &[(PayloadType, RTCRtpCodecParameters)]| {
                matches
                    .iter()
                    .find(|(remote_pt, _)| *remote_pt == payload_type)
                    .map(|(_, codec)| codec.payload_type)
            };
            let (local_payload_type, apt_match) = if let Some(pt) = found(exact_matches) {
                (pt, CodecMatch::Exact)
            } else if let Some(pt) = found(partial_matches) {
                (pt, CodecMatch::Partial)
            } else {
                // not an error, we just ignore this codec we don't support
                trace!(
                    "ignoring {} {}: apt={} matched nothing",
                    remote_codec.capability.mime_type,
                    remote_codec.payload_type,
                    payload_type
                );
                return Ok((RTCRtpCodecParameters::default(), CodecMatch::None));
            };

            // point apt at the local payload type of the associated codec
            let mut to_match = remote_codec.clone();
            to_match.capability.sdp_fmtp_line =
                replace_apt(&remote_codec.capability.sdp_fmtp_line, local_payload_type);
            (to_match, apt_match)
        } else {
            (remote_codec.clone(), CodecMatch::Exact)
        };

        let (local_codec, match_type) = codec_parameters_fuzzy_search(&to_match, codecs);
        // if apt's media codec is partial match, then apt codec must be partial match too
        let match_type = std::cmp::min(match_type, apt_match);
        trace!(
            "{} {} matched {:?}",
            remote_codec.capability.mime_type,
            remote_codec.payload_type,
            match_type
        );

        if match_type == CodecMatch::None {
            return Ok((RTCRtpCodecParameters::default(), CodecMatch::None));
        }

        let rtcp_feedback = rtcp_feedback_intersection(
            &local_codec.capability.rtcp_feedback,
            &to_match.capability.rtcp_feedback,
        );
        Ok((
            RTCRtpCodecParameters {
                capability: RTCRtpCodecCapability {
                    rtcp_feedback,
                    ..to_match.capability
                },
                payload_type: local_codec.payload_type,
                stats_id: local_codec.stats_id,
            },
            match_type,
        ))
    }

    /// Look up a header extension and enable if it exists.
    ///
    /// A URI keeps the first ID it was negotiated with, and an ID keeps the
    /// first URI bound to it; conflicting remote mappings are logged and dropped.
    fn update_header_extension(
        &self,
        state: &mut NegotiationState,
        id: isize,
        extension: &str,
        typ: RTPCodecType,
    ) {
        let negotiated_header_extensions = match state.negotiated_header_extensions.as_mut() {
            Some(n) => n,
            None => return,
        };
        let local_extension = match self.header_extensions.iter().find(|e| e.uri == extension) {
            Some(e) => e,
            None => return,
        };
        let applies = local_extension.is_kind(typ);

        if let Some((nid, n_ext)) = negotiated_header_extensions
            .iter_mut()
            .find(|(_, e)| e.uri == extension)
        {
            if *nid == id {
                if applies {
                    n_ext.set_kind(typ);
                }
            } else {
                warn!(
                    "Invalid ext id mapping in update_header_extension. {} was negotiated as {}, but was {} in call",
                    extension, nid, id
                );
            }
            return;
        }

        if let Some(prev_ext) = negotiated_header_extensions.get(&id) {
            warn!(
                "Assigning {} to {} would override previous assignment to {}, no action taken",
                id, extension, prev_ext.uri
            );
            return;
        }

        debug!("negotiated header extension {} as {} for {}", extension, id, typ);
        let mut h = MediaEngineHeaderExtension {
            uri: extension.to_owned(),
            allowed_directions: local_extension.allowed_directions.clone(),
            ..Default::default()
        };
        if applies {
            h.set_kind(typ);
        }
        negotiated_header_extensions.insert(id, h);
    }

    fn update_header_extension_from_media_section(
        &self,
        state: &mut NegotiationState,
        section: &RemoteMediaSection,
        typ: RTPCodecType,
    ) {
        for (extension, id) in &section.header_extensions {
            self.update_header_extension(state, *id, extension, typ);
        }
    }

    /// Update the MediaEngine from a remote description
    ///
    /// The whole description is applied under the write lock. A malformed `apt`
    /// aborts with an error; codecs that clash with already negotiated payload
    /// types are skipped and reported together once every section is processed.
    pub fn update_from_remote_description(&self, desc: &RemoteDescription) -> Result<()> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let mut errs = vec![];

        for section in &desc.media_sections {
            let typ = match RTPCodecType::try_from(section.media.as_str()) {
                Ok(typ) => typ,
                Err(_) => {
                    trace!("skipping {} media section", section.media);
                    continue;
                }
            };

            if !state.is_negotiated(typ) {
                debug!("negotiating {typ} codecs");
                state.set_negotiated(typ);
            } else {
                // a peer may add header extensions on renegotiation,
                // e.g. when a second track starts simulcast
                self.update_header_extension_from_media_section(state, section, typ);

                if !self.negotiate_multi_codecs {
                    continue;
                }
            }

            let mut exact_matches = vec![];
            let mut partial_matches = vec![];

            for remote_codec in &section.codecs {
                let (codec, match_type) =
                    self.match_remote_codec(remote_codec, typ, &exact_matches, &partial_matches)?;

                match match_type {
                    CodecMatch::Exact => exact_matches.push((remote_codec.payload_type, codec)),
                    CodecMatch::Partial => partial_matches.push((remote_codec.payload_type, codec)),
                    CodecMatch::None => {}
                }
            }

            // use exact matches when they exist, otherwise fall back to partial
            let matches = if !exact_matches.is_empty() {
                debug!("{} exact {typ} codec matches", exact_matches.len());
                exact_matches
            } else if !partial_matches.is_empty() {
                debug!("{} partial {typ} codec matches", partial_matches.len());
                partial_matches
            } else {
                // no match, not negotiated
                debug!("no {typ} codec matched");
                continue;
            };

            errs.extend(state.push_codecs(matches, typ));

            self.update_header_extension_from_media_section(state, section, typ);
        }

        flatten_errs(errs)
    }

    /// get_codecs_by_kind returns the negotiated codecs of a kind once it has been
    /// negotiated, and the registered ones before that.
    pub fn get_codecs_by_kind(&self, typ: RTPCodecType) -> Vec<RTCRtpCodecParameters> {
        let state = self.state.read();
        self.codecs_by_kind(&state, typ).to_vec()
    }

    /// get_rtp_parameters_by_kind returns the codecs and header extensions to use for a
    /// transceiver of the given kind whose direction is one of `directions`.
    ///
    /// Before the kind is negotiated, IDs are proposed for every registered header
    /// extension: an already negotiated ID is reused, otherwise the lowest ID free in
    /// both the negotiated table and this proposal is picked. Nothing is recorded,
    /// so repeated calls propose the same IDs.
    pub fn get_rtp_parameters_by_kind(
        &self,
        typ: RTPCodecType,
        directions: &[RTCRtpTransceiverDirection],
    ) -> RTCRtpParameters {
        let state = self.state.read();
        let mut header_extensions = vec![];

        if state.is_negotiated(typ) {
            if let Some(negotiated_header_extensions) = &state.negotiated_header_extensions {
                for (id, e) in negotiated_header_extensions {
                    if have_rtp_transceiver_direction_intersection(&e.allowed_directions, directions)
                        && e.is_kind(typ)
                    {
                        header_extensions.push(RTCRtpHeaderExtensionParameters {
                            id: *id,
                            uri: e.uri.clone(),
                        });
                    }
                }
            }
        } else {
            let mut proposed_header_extensions: BTreeMap<isize, &MediaEngineHeaderExtension> =
                BTreeMap::new();

            for local_extension in &self.header_extensions {
                let id = state.header_extension_id(&local_extension.uri).or_else(|| {
                    VALID_EXT_IDS.clone().find(|id| {
                        !state.is_header_extension_id_taken(*id)
                            && !proposed_header_extensions.contains_key(id)
                    })
                });

                match id {
                    Some(id) => {
                        proposed_header_extensions.insert(id, local_extension);
                    }
                    None => warn!("No available RTP extension ID for {}", local_extension.uri),
                }
            }

            for (id, e) in proposed_header_extensions {
                if have_rtp_transceiver_direction_intersection(&e.allowed_directions, directions)
                    && e.is_kind(typ)
                {
                    header_extensions.push(RTCRtpHeaderExtensionParameters {
                        id,
                        uri: e.uri.clone(),
                    });
                }
            }
        }

        RTCRtpParameters {
            header_extensions,
            codecs: self.codecs_by_kind(&state, typ).to_vec(),
        }
    }

    /// get_rtp_parameters_by_payload_type returns the codec bound to a payload type
    /// with the negotiated header extensions of its kind.
    pub fn get_rtp_parameters_by_payload_type(
        &self,
        payload_type: PayloadType,
    ) -> Result<RTCRtpParameters> {
        let state = self.state.read();
        let (codec, typ) = self.codec_by_payload(&state, payload_type)?;

        let header_extensions = state
            .negotiated_header_extensions
            .iter()
            .flatten()
            .filter(|(_, e)| e.is_kind(typ))
            .map(|(id, e)| RTCRtpHeaderExtensionParameters {
                uri: e.uri.clone(),
                id: *id,
            })
            .collect();

        Ok(RTCRtpParameters {
            header_extensions,
            codecs: vec![codec],
        })
    }

    /// is_rtx_enabled reports whether a retransmission codec is in use for the kind.
    pub fn is_rtx_enabled(
        &self,
        typ: RTPCodecType,
        directions: &[RTCRtpTransceiverDirection],
    ) -> bool {
        self.get_rtp_parameters_by_kind(typ, directions)
            .codecs
            .iter()
            .any(|p| UniCase::new(p.capability.mime_type.as_str()) == UniCase::new(MIME_TYPE_RTX))
    }

    /// is_fec_enabled reports whether a FlexFEC codec is in use for the kind.
    pub fn is_fec_enabled(
        &self,
        typ: RTPCodecType,
        directions: &[RTCRtpTransceiverDirection],
    ) -> bool {
        self.get_rtp_parameters_by_kind(typ, directions)
            .codecs
            .iter()
            .any(|p| p.capability.mime_type.to_lowercase().contains(MIME_TYPE_FLEX_FEC))
    }
}

/// Rewrites the value of the `apt` fmtp parameter, leaving every other
/// parameter untouched.
fn replace_apt(sdp_fmtp_line: &str, payload_type: PayloadType) -> String {
    sdp_fmtp_line
        .split(';')
        .map(|p| match p.split_once('=') {
            Some((key, _)) if key.trim().eq_ignore_ascii_case("apt") => {
                format!("apt={payload_type}")
            }
            _ => p.to_owned(),
        })
        .collect::<Vec<_>>()
        .join(";")
}
