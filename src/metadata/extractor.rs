use super::detector::detect_stream_format;
use super::strategy::{plan_avi_window, plan_mp4_windows, read_window};
use super::types::{ContainerFormat, VideoMetadata};
use crate::avi::{scan_avi_window, RIFF_HEADER_SIZE};
use crate::config::ProbeConfig;
use crate::errors::{MediaProbeResult, MetadataError};
use crate::mp4::scan_mp4_window;
use crate::streams::{LocalSeekableStream, SeekableHttpStream, SeekableStream};
use log::{debug, warn};
use std::path::Path;

/// Extract metadata from a local file
pub async fn read_local_metadata<P: AsRef<Path>>(
    path: P,
    config: &ProbeConfig,
) -> MediaProbeResult<VideoMetadata> {
    let mut stream = LocalSeekableStream::open(path).await?;
    extract_video_metadata(&mut stream, config).await
}

/// Extract metadata from a remote URL
pub async fn read_remote_metadata(
    url: impl Into<String>,
    config: &ProbeConfig,
) -> MediaProbeResult<VideoMetadata> {
    let mut stream = SeekableHttpStream::new(url).await?;
    let result = extract_video_metadata(&mut stream, config).await;
    stream.log_stats();
    result
}

/// Extract metadata with the default window sizes
pub async fn get_video_metadata<S: SeekableStream + ?Sized>(
    stream: &mut S,
) -> MediaProbeResult<VideoMetadata> {
    extract_video_metadata(stream, &ProbeConfig::default()).await
}

/// Detect the container and walk it for duration and resolution.
///
/// Returns `MetadataUnavailable` when every window was tried without a
/// complete result. I/O failures are returned as they happen.
pub async fn extract_video_metadata<S: SeekableStream + ?Sized>(
    stream: &mut S,
    config: &ProbeConfig,
) -> MediaProbeResult<VideoMetadata> {
    let file_size = stream.total_len().await?;
    if file_size < RIFF_HEADER_SIZE as u64 {
        return Err(MetadataError::new(format!(
            "file too small to inspect ({} bytes)",
            file_size
        ))
        .into());
    }

    match detect_stream_format(stream).await? {
        ContainerFormat::Avi => extract_avi_metadata(stream, file_size, config).await,
        ContainerFormat::IsoBmff => extract_mp4_metadata(stream, file_size, config).await,
    }
}

async fn extract_mp4_metadata<S: SeekableStream + ?Sized>(
    stream: &mut S,
    file_size: u64,
    config: &ProbeConfig,
) -> MediaProbeResult<VideoMetadata> {
    let windows = plan_mp4_windows(file_size, config);
    for window in &windows {
        let bytes = read_window(stream, *window).await?;
        let summary = scan_mp4_window(&bytes);
        debug!(
            "MP4 window {}+{}: {:?}",
            window.start_offset, window.length, summary
        );
        let Some(summary) = summary else { continue };
        let Some(duration) = summary.duration_seconds() else {
            continue;
        };
        let metadata = VideoMetadata::new(
            duration,
            summary.width,
            summary.height,
            file_size,
            ContainerFormat::IsoBmff,
        );
        if metadata.is_complete() {
            return Ok(metadata);
        }
    }

    warn!(
        "no complete moov box in {} window(s) of a {}-byte file",
        windows.len(),
        file_size
    );
    Err(MetadataError::new(format!(
        "no complete moov box found in {} window(s) of a {}-byte MP4/MOV file",
        windows.len(),
        file_size
    ))
    .into())
}

async fn extract_avi_metadata<S: SeekableStream + ?Sized>(
    stream: &mut S,
    file_size: u64,
    config: &ProbeConfig,
) -> MediaProbeResult<VideoMetadata> {
    if let Some(window) = plan_avi_window(file_size, config) {
        let bytes = read_window(stream, window).await?;
        let summary = scan_avi_window(&bytes);
        debug!("AVI window 0+{}: {:?}", window.length, summary);
        if let Some(summary) = summary {
            let metadata = VideoMetadata::new(
                summary.duration_seconds().unwrap_or(0.0),
                summary.width,
                summary.height,
                file_size,
                ContainerFormat::Avi,
            )
            .with_frame_rate(summary.frame_rate());
            if metadata.is_complete() {
                return Ok(metadata);
            }
        }
    }

    warn!("no complete avih header in a {}-byte AVI file", file_size);
    Err(MetadataError::new(format!(
        "no complete avih header found in a {}-byte AVI file",
        file_size
    ))
    .into())
}
