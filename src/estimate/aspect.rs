/// Tolerance for matching a measured ratio against the table.
pub const ASPECT_TOLERANCE: f64 = 0.01;

/// Common display ratios, stored rounded to two decimals.
const COMMON_RATIOS: [(&str, f64); 9] = [
    ("16:9", 1.78),
    ("4:3", 1.33),
    ("3:2", 1.5),
    ("21:9", 2.33),
    ("1:1", 1.0),
    ("9:16", 0.56),
    ("3:4", 0.75),
    ("2:3", 0.67),
    ("9:21", 0.43),
];

/// Label of the common ratio within tolerance of `aspect_ratio`, if any.
pub fn aspect_ratio_label(aspect_ratio: f64) -> Option<&'static str> {
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return None;
    }
    COMMON_RATIOS
        .iter()
        .find(|(_, ratio)| (aspect_ratio - ratio).abs() < ASPECT_TOLERANCE)
        .map(|(label, _)| *label)
}

/// Label for a pixel size.
pub fn aspect_ratio_label_for(width: u32, height: u32) -> Option<&'static str> {
    if height == 0 {
        return None;
    }
    aspect_ratio_label(width as f64 / height as f64)
}
