use crate::bits::reader::read_u32_be;

/// Timing fields of the movie header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieHeader {
    pub version: u8,
    pub timescale: u32,
    /// Movie duration in timescale ticks. Version 1 stores 64 bits, only the
    /// low 32 are kept.
    pub duration: u32,
}

impl MovieHeader {
    /// Duration in seconds, `None` when the timescale is zero.
    pub fn duration_seconds(&self) -> Option<f64> {
        if self.timescale == 0 {
            return None;
        }
        Some(self.duration as f64 / self.timescale as f64)
    }
}

/// Parse an mvhd payload (the bytes after the 8-byte box header).
///
/// Version 0: version/flags(4) creation(4) modification(4) timescale(4) duration(4).
/// Version 1: version/flags(4) creation(8) modification(8) timescale(4) duration(8).
pub fn parse_mvhd(mvhd: &[u8]) -> Option<MovieHeader> {
    let version = *mvhd.first()?;
    let (timescale_at, duration_at) = match version {
        0 => (12, 16),
        1 => (20, 28),
        _ => return None,
    };
    Some(MovieHeader {
        version,
        timescale: read_u32_be(mvhd, timescale_at)?,
        duration: read_u32_be(mvhd, duration_at)?,
    })
}

#[cfg(test)]
pub(crate) fn mvhd_payload_v0(timescale: u32, duration: u32) -> Vec<u8> {
    let mut payload = vec![0u8; 100];
    payload[12..16].copy_from_slice(&timescale.to_be_bytes());
    payload[16..20].copy_from_slice(&duration.to_be_bytes());
    payload
}
