/*
# Estimate Module

 Pure functions over extracted metadata for display: the aspect ratio label,
 human readable duration and size, and the GIF output size estimate with
 its size warning.
*/

pub mod aspect;
pub use aspect::{aspect_ratio_label, aspect_ratio_label_for};
pub mod format;
pub use format::{format_duration, format_file_size};
pub mod gif_size;
pub use gif_size::{
    classify_gif_size, estimate_gif_size, estimate_gif_size_for, GifSettings, QualityTier,
    SizeWarning, SizeWarningLevel,
};
