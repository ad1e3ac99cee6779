use super::mvhd::parse_mvhd;
use super::r#box::{box_body, boxes, find_box, parse_box_header};
use super::tkhd::parse_tkhd_dimensions;
use log::trace;

/// Fields gathered from one moov box. Zero means "not found".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MoovSummary {
    pub timescale: u32,
    /// Duration in timescale ticks.
    pub duration: u32,
    pub width: u32,
    pub height: u32,
}

impl MoovSummary {
    /// Duration in seconds, `None` when the timescale is zero.
    pub fn duration_seconds(&self) -> Option<f64> {
        if self.timescale == 0 {
            return None;
        }
        Some(self.duration as f64 / self.timescale as f64)
    }

    pub fn is_complete(&self) -> bool {
        self.duration_seconds().is_some_and(|d| d > 0.0) && self.width > 0 && self.height > 0
    }
}

/// Walk a moov payload for the movie header and the first track with a
/// non-zero display size.
///
/// Tracks are not filtered by handler type: the first tkhd with both
/// dimensions set is taken to be the video track.
pub fn walk_moov(moov: &[u8]) -> MoovSummary {
    let mut summary = MoovSummary::default();
    let mut have_mvhd = false;
    for header in boxes(moov) {
        if header.is(b"mvhd") && !have_mvhd {
            if let Some(mvhd) = parse_mvhd(box_body(moov, &header)) {
                summary.timescale = mvhd.timescale;
                summary.duration = mvhd.duration;
                have_mvhd = true;
            }
        } else if header.is(b"trak") && (summary.width == 0 || summary.height == 0) {
            let dimensions = find_box(box_body(moov, &header), b"tkhd").and_then(parse_tkhd_dimensions);
            match dimensions {
                Some((width, height)) if width > 0 && height > 0 => {
                    summary.width = width;
                    summary.height = height;
                }
                other => trace!("skipping trak without display size: {:?}", other),
            }
        }
    }
    summary
}

/// Payload of the top-level moov box in a window that starts on a box
/// boundary.
pub fn find_moov_aligned(window: &[u8]) -> Option<&[u8]> {
    find_box(window, b"moov")
}

/// Payloads of every plausible moov box found by scanning for the tag.
///
/// Used when the window starts mid-box (a tail window), where the aligned
/// walk only sees garbage sizes.
pub fn scan_moov_candidates(window: &[u8]) -> impl Iterator<Item = &[u8]> + '_ {
    (0..window.len().saturating_sub(7)).filter_map(move |i| {
        if &window[i + 4..i + 8] != b"moov" {
            return None;
        }
        let header = parse_box_header(window, i)?;
        if header.size < header.header_size || header.size > (window.len() - i) as u64 {
            trace!("moov tag at {} has implausible size {}", i, header.size);
            return None;
        }
        Some(box_body(window, &header))
    })
}

/// Locate the moov box in a window and summarize it.
///
/// The aligned walk runs first. The tag scan follows when the aligned walk
/// finds no moov; the first complete candidate wins, otherwise the first
/// partial one is returned.
pub fn scan_mp4_window(window: &[u8]) -> Option<MoovSummary> {
    if let Some(moov) = find_moov_aligned(window) {
        return Some(walk_moov(moov));
    }
    let mut partial = None;
    for moov in scan_moov_candidates(window) {
        let summary = walk_moov(moov);
        if summary.is_complete() {
            return Some(summary);
        }
        partial.get_or_insert(summary);
    }
    partial
}
