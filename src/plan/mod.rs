//! Conversion planning.
//!
//! A [`ConversionPlan`] is built once per discovered file from its probed
//! stream layout:
//!
//! - **Video**: every video and audio stream is mapped and video is
//!   re-encoded to the target codec at a width-based bitrate.
//! - **SubtitleOnly**: audio and video are copied, subtitle streams are mapped
//!   and converted to the container's text codec, and DVB teletext gets
//!   duration and frame-rate fixes.

mod builder;
mod policy;
mod types;

pub use builder::{PlanBuilder, PlanSettings};
pub use policy::{bitrate_for, codec_policy, subtitle_codec_for, CodecPolicy, DVB_TELETEXT};
pub use types::{
    AudioDecision, Container, ConversionPlan, ConversionRequest, ConversionType, StreamKind,
    StreamMapping, SubtitleCodec, SubtitleRemediation, TeletextFix, VideoDecision,
};
