use crate::config::MIB;
use crate::errors::{MediaProbeError, MediaProbeResult};
use crate::metadata::VideoMetadata;
use serde::{Deserialize, Serialize};

/// Fixed header and trailer bytes on top of the palette.
const GIF_BASE_OVERHEAD: u64 = 1024;
/// Empirical LZW compression applied to the raw pixel estimate.
const COMPRESSION_DIVISOR: f64 = 2.0;

pub const WARNING_THRESHOLD_BYTES: u64 = 8 * MIB;
pub const DANGER_THRESHOLD_BYTES: u64 = 12 * MIB;

/// Palette size chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityTier {
    pub fn color_count(self) -> u32 {
        match self {
            QualityTier::Low => 64,
            QualityTier::Medium => 128,
            QualityTier::High => 256,
        }
    }

    pub fn bits_per_pixel(self) -> u32 {
        self.color_count().ilog2()
    }
}

/// Output settings the estimate depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GifSettings {
    /// Output width in pixels; the height follows the source aspect ratio.
    pub width: u32,
    pub frame_rate: f64,
    #[serde(default)]
    pub quality: QualityTier,
    #[serde(default)]
    pub start_seconds: Option<f64>,
    #[serde(default)]
    pub end_seconds: Option<f64>,
}

impl Default for GifSettings {
    fn default() -> Self {
        Self {
            width: 480,
            frame_rate: 15.0,
            quality: QualityTier::Medium,
            start_seconds: None,
            end_seconds: None,
        }
    }
}

impl GifSettings {
    /// Length of the clip that ends up in the GIF. The trim points are
    /// clamped into `[0, duration]` and an inverted range yields 0.
    pub fn effective_duration(&self, duration_seconds: f64) -> f64 {
        let duration = duration_seconds.max(0.0);
        let start = self.start_seconds.unwrap_or(0.0).clamp(0.0, duration);
        let end = self.end_seconds.unwrap_or(duration).clamp(0.0, duration);
        (end - start).max(0.0)
    }
}

/// Estimate the output size in bytes of a GIF rendered from a video with
/// the given aspect ratio and duration.
pub fn estimate_gif_size(
    aspect_ratio: f64,
    duration_seconds: f64,
    settings: &GifSettings,
) -> MediaProbeResult<u64> {
    if settings.width == 0 {
        return Err(MediaProbeError::InvalidSettings("width must be positive".into()));
    }
    if !settings.frame_rate.is_finite() || settings.frame_rate <= 0.0 {
        return Err(MediaProbeError::InvalidSettings(format!(
            "frame rate must be positive, got {}",
            settings.frame_rate
        )));
    }
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(MediaProbeError::InvalidSettings(format!(
            "aspect ratio must be positive, got {}",
            aspect_ratio
        )));
    }

    let width = settings.width as f64;
    let height = (width / aspect_ratio).round();
    let total_frames = (settings.effective_duration(duration_seconds) * settings.frame_rate).round();
    let bytes_per_frame = width * height * settings.quality.bits_per_pixel() as f64 / 8.0;
    let base_size = bytes_per_frame * total_frames;
    let overhead = (GIF_BASE_OVERHEAD + settings.quality.color_count() as u64 * 3) as f64;
    Ok(((base_size + overhead) / COMPRESSION_DIVISOR).round() as u64)
}

/// [`estimate_gif_size`] for extracted metadata.
pub fn estimate_gif_size_for(
    metadata: &VideoMetadata,
    settings: &GifSettings,
) -> MediaProbeResult<u64> {
    estimate_gif_size(metadata.aspect_ratio, metadata.duration_seconds, settings)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeWarningLevel {
    Safe,
    Warning,
    Danger,
}

/// Size tier of an estimate with the advisory shown for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeWarning {
    pub level: SizeWarningLevel,
    pub message: Option<&'static str>,
}

/// Classify an estimated size: safe below 8 MiB, warning below 12 MiB,
/// danger from 12 MiB.
pub fn classify_gif_size(estimated_bytes: u64) -> SizeWarning {
    if estimated_bytes >= DANGER_THRESHOLD_BYTES {
        SizeWarning {
            level: SizeWarningLevel::Danger,
            message: Some(
                "This GIF will likely be over 12 MB and rejected by most sites. Lower the width or frame rate, or trim the clip.",
            ),
        }
    } else if estimated_bytes >= WARNING_THRESHOLD_BYTES {
        SizeWarning {
            level: SizeWarningLevel::Warning,
            message: Some(
                "This GIF may exceed 8 MB, the upload limit of many sites. Consider a smaller width or a lower frame rate.",
            ),
        }
    } else {
        SizeWarning {
            level: SizeWarningLevel::Safe,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ContainerFormat;

    #[test]
    fn test_medium_quality_estimate() {
        let settings = GifSettings {
            width: 480,
            frame_rate: 15.0,
            quality: QualityTier::Medium,
            ..GifSettings::default()
        };
        assert_eq!(estimate_gif_size(16.0 / 9.0, 5.0, &settings).unwrap(), 4_253_204);

        let metadata = VideoMetadata::new(5.0, 1920, 1080, 0, ContainerFormat::IsoBmff);
        assert_eq!(estimate_gif_size_for(&metadata, &settings).unwrap(), 4_253_204);
    }

    #[test]
    fn test_quality_tiers() {
        assert_eq!(QualityTier::Low.bits_per_pixel(), 6);
        assert_eq!(QualityTier::Medium.bits_per_pixel(), 7);
        assert_eq!(QualityTier::High.bits_per_pixel(), 8);

        // 320x240, 2s at 10fps, 256 colors: 76_800 * 20 + 1024 + 768, halved.
        let settings = GifSettings {
            width: 320,
            frame_rate: 10.0,
            quality: QualityTier::High,
            ..GifSettings::default()
        };
        assert_eq!(estimate_gif_size(4.0 / 3.0, 2.0, &settings).unwrap(), 768_896);
    }

    #[test]
    fn test_trim_shortens_clip() {
        let settings = GifSettings {
            start_seconds: Some(2.0),
            end_seconds: Some(4.5),
            ..GifSettings::default()
        };
        assert_eq!(settings.effective_duration(10.0), 2.5);
        assert_eq!(settings.effective_duration(3.0), 1.0);

        let inverted = GifSettings {
            start_seconds: Some(5.0),
            end_seconds: Some(1.0),
            ..GifSettings::default()
        };
        assert_eq!(inverted.effective_duration(10.0), 0.0);
        // Zero frames still pays for the palette and headers.
        assert_eq!(estimate_gif_size(1.0, 10.0, &inverted).unwrap(), 704);
    }

    #[test]
    fn test_invalid_settings() {
        let settings = GifSettings::default();
        assert!(estimate_gif_size(0.0, 5.0, &settings).is_err());
        let zero_width = GifSettings {
            width: 0,
            ..GifSettings::default()
        };
        assert!(matches!(
            estimate_gif_size(1.5, 5.0, &zero_width),
            Err(MediaProbeError::InvalidSettings(_))
        ));
        let zero_rate = GifSettings {
            frame_rate: 0.0,
            ..GifSettings::default()
        };
        assert!(estimate_gif_size(1.5, 5.0, &zero_rate).is_err());
    }

    #[test]
    fn test_classify_gif_size() {
        assert_eq!(classify_gif_size(4_253_204).level, SizeWarningLevel::Safe);
        assert_eq!(classify_gif_size(4_253_204).message, None);
        assert_eq!(classify_gif_size(8 * MIB - 1).level, SizeWarningLevel::Safe);
        assert_eq!(classify_gif_size(8 * MIB).level, SizeWarningLevel::Warning);
        assert_eq!(classify_gif_size(12 * MIB - 1).level, SizeWarningLevel::Warning);
        let danger = classify_gif_size(12 * MIB);
        assert_eq!(danger.level, SizeWarningLevel::Danger);
        assert!(danger.message.is_some());
    }
}
