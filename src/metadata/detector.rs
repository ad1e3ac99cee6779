use super::types::ContainerFormat;
use crate::avi::{AVI_FORM, RIFF_HEADER_SIZE, RIFF_MAGIC};
use crate::streams::SeekableStream;
use std::io;

/// Choose the walker from the first 12 bytes. Anything that is not
/// `RIFF....AVI ` is treated as ISO-BMFF.
pub fn detect_format(header: &[u8]) -> ContainerFormat {
    if header.len() >= RIFF_HEADER_SIZE
        && &header[0..4] == RIFF_MAGIC
        && &header[8..12] == AVI_FORM
    {
        ContainerFormat::Avi
    } else {
        ContainerFormat::IsoBmff
    }
}

/// Read the signature from the start of the stream and detect the format
pub async fn detect_stream_format<S: SeekableStream + ?Sized>(
    stream: &mut S,
) -> io::Result<ContainerFormat> {
    let header = stream.read_range(0, RIFF_HEADER_SIZE).await?;
    Ok(detect_format(&header))
}
