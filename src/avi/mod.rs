pub mod avih;
pub use avih::{parse_avih, AviSummary};
pub mod chunk;
pub use chunk::{
    chunk_body, chunks, write_chunk_header, ChunkHeader, ChunkIter, AVI_FORM, LIST_ID,
    RIFF_HEADER_SIZE, RIFF_MAGIC,
};

use log::trace;

/// Walk a window that starts at the RIFF header and return the main AVI
/// header from `LIST hdrl`.
pub fn scan_avi_window(window: &[u8]) -> Option<AviSummary> {
    for header in ChunkIter::starting_at(window, RIFF_HEADER_SIZE) {
        if header.list_type(window) != Some(*b"hdrl") {
            continue;
        }
        // List payload is the 4-byte list type followed by child chunks.
        let hdrl = &chunk_body(window, &header)[4..];
        for child in chunks(hdrl) {
            if child.is(b"avih") {
                return parse_avih(chunk_body(hdrl, &child));
            }
        }
        trace!("hdrl at {} has no avih", header.offset);
    }
    None
}
