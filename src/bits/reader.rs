/*
# Bits Reader Module

 Fixed-width integer and tag readers over an in-memory byte window.
 ISO-BMFF stores sizes big endian, RIFF stores them little endian, so both
 byte orders are provided side by side.

 Every reader returns `None` instead of panicking when `offset + width`
 runs past the end of the slice. Walkers bounds-check before reading, the
 `Option` is what keeps a truncated window from ever becoming a crash.
*/

/// Read a 32-bit big endian value at `offset`.
pub fn read_u32_be(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a 32-bit little endian value at `offset`.
pub fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a 64-bit big endian value at `offset`.
pub fn read_u64_be(data: &[u8], offset: usize) -> Option<u64> {
    let bytes = data.get(offset..offset.checked_add(8)?)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Some(u64::from_be_bytes(buf))
}

/// Read `length` bytes as Latin-1 text. Every byte maps to the code point of
/// the same value, so non-UTF-8 tags still come back as a string.
pub fn read_ascii(data: &[u8], offset: usize, length: usize) -> Option<String> {
    let bytes = data.get(offset..offset.checked_add(length)?)?;
    Some(bytes.iter().map(|&b| b as char).collect())
}

/// Read a four character code at `offset`.
pub fn read_fourcc(data: &[u8], offset: usize) -> Option<[u8; 4]> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    let mut tag = [0u8; 4];
    tag.copy_from_slice(bytes);
    Some(tag)
}

/// Render a four character code for logs and display.
pub fn fourcc_to_string(tag: &[u8; 4]) -> String {
    tag.iter().map(|&b| b as char).collect()
}
