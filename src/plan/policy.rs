//! Codec and stream selection rules.

use super::types::{
    AudioDecision, Container, ConversionType, StreamKind, StreamMapping, SubtitleCodec,
    SubtitleRemediation, TeletextFix, VideoDecision,
};
use ffbatch_av::MediaInfo;

/// Codec id ffprobe reports for DVB teletext subtitles.
pub const DVB_TELETEXT: &str = "dvb_teletext";

/// Estimate the target video bitrate (bits/sec) from the source width.
///
/// Widths above 4000 fall through to 1000 b/s. That is almost certainly too
/// low, but it is kept so existing outputs stay reproducible.
pub fn bitrate_for(width: u32) -> u64 {
    match width {
        1280..=4000 => 2_200_000,
        w if w < 1280 => 400_000,
        _ => 1_000,
    }
}

/// Pick the text subtitle codec supported by a container extension.
pub fn subtitle_codec_for(container: &str) -> SubtitleCodec {
    match container.trim_start_matches('.').to_lowercase().as_str() {
        "mp4" | "m4v" | "mov" => SubtitleCodec::MovText,
        "mkv" | "mka" | "matroska" => SubtitleCodec::Srt,
        _ => SubtitleCodec::Srt,
    }
}

/// Stream selection and codec decisions for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecPolicy {
    pub mappings: Vec<StreamMapping>,
    pub video: VideoDecision,
    pub audio: AudioDecision,
    pub subtitles: Option<SubtitleRemediation>,
}

/// Decide stream mapping and codecs for `conversion_type`.
///
/// Returns `None` for [`ConversionType::Video`] when the file has no video
/// stream to size the bitrate from.
pub fn codec_policy(
    conversion_type: ConversionType,
    info: &MediaInfo,
    container: Container,
    video_codec: &str,
) -> Option<CodecPolicy> {
    let mut mappings: Vec<StreamMapping> = info
        .video_tracks
        .iter()
        .map(|t| StreamMapping::new(StreamKind::Video, t.index))
        .chain(
            info.audio_tracks
                .iter()
                .map(|t| StreamMapping::new(StreamKind::Audio, t.index)),
        )
        .collect();

    match conversion_type {
        ConversionType::Video => {
            let width = info.primary_video()?.width;
            Some(CodecPolicy {
                mappings,
                video: VideoDecision::Encode {
                    codec: video_codec.to_string(),
                    bitrate: bitrate_for(width),
                },
                audio: AudioDecision::EncoderDefault,
                subtitles: None,
            })
        }
        ConversionType::SubtitleOnly => {
            mappings.extend(
                info.subtitle_tracks
                    .iter()
                    .map(|t| StreamMapping::new(StreamKind::Subtitle, t.index)),
            );

            let teletext_fix = info
                .subtitle_tracks
                .iter()
                .any(|t| t.codec == DVB_TELETEXT)
                .then(|| TeletextFix {
                    frame_rate: info.primary_video().and_then(|v| v.frame_rate),
                });

            Some(CodecPolicy {
                mappings,
                video: VideoDecision::Copy,
                audio: AudioDecision::Copy,
                subtitles: Some(SubtitleRemediation {
                    codec: subtitle_codec_for(container.extension()),
                    teletext_fix,
                }),
            })
        }
    }
}
