use crate::bits::reader::read_u32_be;

/// Width field offset in a version 0 tkhd payload: version/flags(4),
/// creation(4), modification(4), track id(4), reserved(4), duration(4),
/// reserved(8), layer(2), alternate group(2), volume(2), reserved(2),
/// matrix(36).
const WIDTH_OFFSET_V0: usize = 76;
/// Version 1 widens creation, modification and duration to 8 bytes each.
const WIDTH_OFFSET_V1: usize = 88;

/// Convert a 16.16 fixed point value to the nearest whole pixel.
fn fixed_16_16_to_pixels(raw: u32) -> u32 {
    (raw as f64 / 65536.0).round() as u32
}

/// Parse the display dimensions of a tkhd payload.
pub fn parse_tkhd_dimensions(tkhd: &[u8]) -> Option<(u32, u32)> {
    let width_at = match *tkhd.first()? {
        1 => WIDTH_OFFSET_V1,
        _ => WIDTH_OFFSET_V0,
    };
    let width = read_u32_be(tkhd, width_at)?;
    let height = read_u32_be(tkhd, width_at + 4)?;
    Some((fixed_16_16_to_pixels(width), fixed_16_16_to_pixels(height)))
}

#[cfg(test)]
pub(crate) fn tkhd_payload(version: u8, width: u32, height: u32) -> Vec<u8> {
    let width_at = if version == 1 {
        WIDTH_OFFSET_V1
    } else {
        WIDTH_OFFSET_V0
    };
    let mut payload = vec![0u8; width_at + 8];
    payload[0] = version;
    payload[width_at..width_at + 4].copy_from_slice(&(width << 16).to_be_bytes());
    payload[width_at + 4..width_at + 8].copy_from_slice(&(height << 16).to_be_bytes());
    payload
}
