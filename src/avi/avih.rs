use crate::bits::reader::read_u32_le;

/// Main AVI header fields needed for duration and resolution
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AviSummary {
    pub micro_sec_per_frame: u32,
    pub total_frames: u32,
    pub width: u32,
    pub height: u32,
}

impl AviSummary {
    pub fn frame_rate(&self) -> Option<f64> {
        if self.micro_sec_per_frame == 0 {
            return None;
        }
        Some(1_000_000.0 / self.micro_sec_per_frame as f64)
    }

    /// `total_frames / frame_rate`, when both are positive.
    pub fn duration_seconds(&self) -> Option<f64> {
        let frame_rate = self.frame_rate()?;
        if self.total_frames == 0 {
            return None;
        }
        Some(self.total_frames as f64 / frame_rate)
    }

    pub fn is_complete(&self) -> bool {
        self.duration_seconds().is_some_and(|d| d > 0.0) && self.width > 0 && self.height > 0
    }
}

/// Parse an avih payload.
///
/// Fields are little endian u32s at the offsets below. Note these are not the
/// AVIMAINHEADER positions of dwTotalFrames (16) and dwWidth/dwHeight (32/36);
/// files whose header follows that layout report wrong sizes here and rely on
/// the caller's next fallback.
pub fn parse_avih(avih: &[u8]) -> Option<AviSummary> {
    Some(AviSummary {
        micro_sec_per_frame: read_u32_le(avih, FIELD_MICRO_SEC_PER_FRAME)?,
        total_frames: read_u32_le(avih, FIELD_TOTAL_FRAMES)?,
        width: read_u32_le(avih, FIELD_WIDTH)?,
        height: read_u32_le(avih, FIELD_HEIGHT)?,
    })
}

const FIELD_MICRO_SEC_PER_FRAME: usize = 0;
const FIELD_TOTAL_FRAMES: usize = 8;
const FIELD_WIDTH: usize = 24;
const FIELD_HEIGHT: usize = 28;

#[cfg(test)]
pub(crate) fn avih_payload(
    micro_sec_per_frame: u32,
    total_frames: u32,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let mut payload = vec![0u8; 56];
    payload[FIELD_MICRO_SEC_PER_FRAME..FIELD_MICRO_SEC_PER_FRAME + 4]
        .copy_from_slice(&micro_sec_per_frame.to_le_bytes());
    payload[FIELD_TOTAL_FRAMES..FIELD_TOTAL_FRAMES + 4].copy_from_slice(&total_frames.to_le_bytes());
    payload[FIELD_WIDTH..FIELD_WIDTH + 4].copy_from_slice(&width.to_le_bytes());
    payload[FIELD_HEIGHT..FIELD_HEIGHT + 4].copy_from_slice(&height.to_le_bytes());
    payload
}
