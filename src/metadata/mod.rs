mod chain;
mod detector;
mod extractor;
mod probe;
mod strategy;
mod types;

pub use chain::{BinaryInspection, MetadataChain, MetadataStrategy};
pub use detector::{detect_format, detect_stream_format};
pub use extractor::{
    extract_video_metadata, get_video_metadata, read_local_metadata, read_remote_metadata,
};
pub use probe::{probe_local_detailed, probe_remote_detailed, probe_stream};
pub use strategy::{plan_avi_window, plan_mp4_windows, read_window};

pub use types::*;
