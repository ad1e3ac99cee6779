use std::io;
use thiserror::Error;

/// Enumeration of all errors surfaced by the prober
#[derive(Debug, Error)]
pub enum MediaProbeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),
    #[error("Metadata unavailable: {0}")]
    MetadataUnavailable(#[from] MetadataError),
    #[error("Invalid GIF settings: {0}")]
    InvalidSettings(String),
}

/// Binary inspection could not produce complete metadata
#[derive(Debug, Error)]
#[error("{message}")]
pub struct MetadataError {
    pub message: String,
}

impl MetadataError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Transport level failure of a remote stream
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StreamError {
    pub message: String,
}

impl StreamError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl MediaProbeError {
    /// True when the error means "no metadata", as opposed to a broken handle.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, MediaProbeError::MetadataUnavailable(_))
    }
}

// Conversion to io::Error so stream implementations can use `?` on probe results
impl From<MediaProbeError> for io::Error {
    fn from(err: MediaProbeError) -> Self {
        match err {
            MediaProbeError::Io(inner) => inner,
            other => io::Error::other(other),
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        io::Error::other(err)
    }
}

// Type alias for Result with MediaProbeError
pub type MediaProbeResult<T> = Result<T, MediaProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_kind() {
        let err: MediaProbeError = MetadataError::new("no moov box").into();
        assert!(err.is_unavailable());
        assert_eq!(err.to_string(), "Metadata unavailable: no moov box");

        let io_err: io::Error = MediaProbeError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "short read",
        ))
        .into();
        assert_eq!(io_err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
