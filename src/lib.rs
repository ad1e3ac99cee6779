pub mod bits;

pub mod mp4;
pub use mp4::MoovSummary;

pub mod avi;
pub use avi::AviSummary;

pub mod streams;
pub use streams::{
    seekable_http_stream, seekable_stream, LocalSeekableStream, MemorySeekableStream,
    SeekableHttpStream, SeekableStream,
};

pub mod metadata;
pub use metadata::{
    detect_format, extract_video_metadata, get_video_metadata, BinaryInspection, ByteWindow,
    ContainerFormat, MetadataChain, MetadataStrategy, ProbeResult, VideoMetadata,
};

pub mod estimate;
pub use estimate::{
    aspect_ratio_label, classify_gif_size, estimate_gif_size, format_duration, format_file_size,
    GifSettings, QualityTier, SizeWarning, SizeWarningLevel,
};

pub mod config;
pub use config::ProbeConfig;

pub mod errors;
pub use errors::{MediaProbeError, MediaProbeResult, MetadataError, StreamError};

macro_rules! with_seekable_stream {
    ($source:expr, |$stream:ident| $body:expr) => {
        if $source.starts_with("http://") || $source.starts_with("https://") {
            let mut $stream = SeekableHttpStream::new($source).await?;
            let result = $body;
            $stream.log_stats();
            result
        } else {
            let mut $stream = LocalSeekableStream::open($source).await?;
            $body
        }
    };
}

/// Extract metadata from a local path or an http(s) URL with default windows
pub async fn extract_metadata(source: String) -> MediaProbeResult<VideoMetadata> {
    let config = ProbeConfig::default();
    with_seekable_stream!(source, |stream| {
        crate::metadata::extract_video_metadata(&mut stream, &config).await
    })
}

/// Detect the container of a local path or an http(s) URL
pub async fn probe(source: String) -> MediaProbeResult<ProbeResult> {
    with_seekable_stream!(source, |stream| {
        crate::metadata::probe_stream(&mut stream).await
    })
}
