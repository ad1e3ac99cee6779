use super::extractor::extract_video_metadata;
use super::types::VideoMetadata;
use crate::config::ProbeConfig;
use crate::errors::{MediaProbeError, MediaProbeResult, MetadataError};
use crate::streams::SeekableStream;
use async_trait::async_trait;
use log::debug;

/// One way of obtaining metadata. Hosts add their own (a media element, a
/// transcoder probe) after the built-in binary inspection.
#[async_trait]
pub trait MetadataStrategy: Send + Sync {
    fn name(&self) -> &str;

    async fn extract(&self, stream: &mut dyn SeekableStream) -> MediaProbeResult<VideoMetadata>;
}

/// Container parsing over byte windows, no media APIs needed
#[derive(Debug, Clone, Default)]
pub struct BinaryInspection {
    pub config: ProbeConfig,
}

impl BinaryInspection {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MetadataStrategy for BinaryInspection {
    fn name(&self) -> &str {
        "binary inspection"
    }

    async fn extract(&self, stream: &mut dyn SeekableStream) -> MediaProbeResult<VideoMetadata> {
        extract_video_metadata(stream, &self.config).await
    }
}

/// Strategies tried in order until one yields complete metadata
pub struct MetadataChain {
    strategies: Vec<Box<dyn MetadataStrategy>>,
}

impl Default for MetadataChain {
    fn default() -> Self {
        Self::new().with(BinaryInspection::default())
    }
}

impl MetadataChain {
    /// An empty chain.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    pub fn with(mut self, strategy: impl MetadataStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run the strategies in order. Failures and incomplete results move on
    /// to the next strategy; when all are spent the reasons are combined.
    pub async fn extract(&self, stream: &mut dyn SeekableStream) -> MediaProbeResult<VideoMetadata> {
        let mut failures = Vec::new();
        for strategy in &self.strategies {
            let reason = match strategy.extract(stream).await {
                Ok(metadata) if metadata.is_complete() => return Ok(metadata),
                Ok(_) => "incomplete result".to_string(),
                Err(MediaProbeError::MetadataUnavailable(inner)) => inner.message,
                Err(e) => e.to_string(),
            };
            let failure = format!("{}: {}", strategy.name(), reason);
            debug!("metadata strategy failed: {}", failure);
            failures.push(failure);
        }
        if failures.is_empty() {
            failures.push("no strategies configured".to_string());
        }
        Err(MetadataError::new(failures.join("; ")).into())
    }
}
