//! Media file probing.
//!
//! Stream metadata is extracted by running the ffprobe CLI and parsing its
//! JSON output.

mod ffprobe;
mod types;

pub use ffprobe::{parse_ffprobe_json, probe_with_ffprobe};
pub use types::*;
