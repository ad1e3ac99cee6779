use serde::{Deserialize, Serialize};

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;

/// Window sizes used by binary inspection
///
/// Hosts can embed this in their own settings file; missing keys fall back
/// to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// First MP4 attempt: bytes read from the start of the file.
    pub head_window_bytes: u64,
    /// Second MP4 attempt: bytes read from the end of the file.
    pub tail_window_bytes: u64,
    /// Third MP4 attempt reads the whole file only up to this size.
    pub whole_file_limit_bytes: u64,
    /// The single head window read for AVI.
    pub avi_window_bytes: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            head_window_bytes: 512 * KIB,
            tail_window_bytes: MIB,
            whole_file_limit_bytes: 10 * MIB,
            avi_window_bytes: 512 * KIB,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ProbeConfig = serde_json::from_str(r#"{"tail_window_bytes": 2048}"#).unwrap();
        assert_eq!(config.tail_window_bytes, 2048);
        assert_eq!(config.head_window_bytes, 512 * 1024);
        assert_eq!(config.whole_file_limit_bytes, 10 * 1024 * 1024);
    }
}
