use super::detector::detect_stream_format;
use super::types::ProbeResult;
use crate::avi::RIFF_HEADER_SIZE;
use crate::errors::MediaProbeResult;
use crate::streams::{LocalSeekableStream, SeekableHttpStream, SeekableStream};
use std::path::Path;

/// Probe a local file and return detailed information
pub async fn probe_local_detailed<P: AsRef<Path>>(path: P) -> MediaProbeResult<ProbeResult> {
    let mut stream = LocalSeekableStream::open(path).await?;
    probe_stream(&mut stream).await
}

/// Probe a remote file and return detailed information
pub async fn probe_remote_detailed(url: impl Into<String>) -> MediaProbeResult<ProbeResult> {
    let mut stream = SeekableHttpStream::new(url).await?;
    probe_stream(&mut stream).await
}

/// Size and container family, without walking any boxes
pub async fn probe_stream<S: SeekableStream + ?Sized>(
    stream: &mut S,
) -> MediaProbeResult<ProbeResult> {
    let size = stream.total_len().await?;
    if size < RIFF_HEADER_SIZE as u64 {
        return Ok(ProbeResult {
            format: None,
            size,
            is_valid: false,
            error: Some(format!("file too small to inspect ({} bytes)", size)),
        });
    }

    let format = detect_stream_format(stream).await?;
    Ok(ProbeResult {
        format: Some(format),
        size,
        is_valid: true,
        error: None,
    })
}
