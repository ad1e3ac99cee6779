use crate::bits::reader::{fourcc_to_string, read_fourcc, read_u32_le};
use log::trace;

/// Size of the `RIFF` size form-type preamble.
pub const RIFF_HEADER_SIZE: usize = 12;
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const AVI_FORM: &[u8; 4] = b"AVI ";
pub const LIST_ID: &[u8; 4] = b"LIST";

/// RIFF chunk header information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: [u8; 4],
    /// Declared payload size, excluding the 8-byte header and the pad byte.
    pub size: u32,
    /// Position of the header inside the parsed slice.
    pub offset: usize,
}

impl ChunkHeader {
    pub fn body_offset(&self) -> usize {
        self.offset + 8
    }

    pub fn body_end(&self) -> usize {
        self.body_offset() + self.size as usize
    }

    /// Position of the next sibling header. Odd sizes are followed by one
    /// pad byte so every chunk starts on a word boundary.
    pub fn next_offset(&self) -> usize {
        self.body_end() + (self.size as usize & 1)
    }

    pub fn id_str(&self) -> String {
        fourcc_to_string(&self.id)
    }

    pub fn is(&self, id: &[u8; 4]) -> bool {
        &self.id == id
    }

    /// List type of a `LIST` chunk, read from the first four payload bytes.
    pub fn list_type(&self, data: &[u8]) -> Option<[u8; 4]> {
        if !self.is(LIST_ID) || self.size < 4 {
            return None;
        }
        read_fourcc(data, self.body_offset())
    }
}

/// Iterates the chunks of one nesting level.
///
/// A chunk whose payload runs past the end of the slice ends the level.
#[derive(Debug, Clone)]
pub struct ChunkIter<'a> {
    data: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> ChunkIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::starting_at(data, 0)
    }

    pub fn starting_at(data: &'a [u8], pos: usize) -> Self {
        Self {
            data,
            pos,
            done: false,
        }
    }
}

impl Iterator for ChunkIter<'_> {
    type Item = ChunkHeader;

    fn next(&mut self) -> Option<ChunkHeader> {
        if self.done || self.pos.saturating_add(8) > self.data.len() {
            return None;
        }
        let (Some(id), Some(size)) = (
            read_fourcc(self.data, self.pos),
            read_u32_le(self.data, self.pos + 4),
        ) else {
            self.done = true;
            return None;
        };
        let header = ChunkHeader {
            id,
            size,
            offset: self.pos,
        };
        if size as u64 > (self.data.len() - header.body_offset()) as u64 {
            trace!(
                "chunk walk stopped at {}: {} overruns the window",
                self.pos,
                header.id_str()
            );
            self.done = true;
            return None;
        }
        trace!("chunk {} at {} ({} bytes)", header.id_str(), header.offset, size);
        self.pos = header.next_offset();
        Some(header)
    }
}

/// Chunks of the level held in `data`, starting at offset 0.
pub fn chunks(data: &[u8]) -> ChunkIter<'_> {
    ChunkIter::new(data)
}

/// Payload of a chunk yielded by [`ChunkIter`] over the same slice.
pub fn chunk_body<'a>(data: &'a [u8], header: &ChunkHeader) -> &'a [u8] {
    &data[header.body_offset()..header.body_end()]
}

/// Write a chunk header to a vector
pub fn write_chunk_header(output: &mut Vec<u8>, id: &str, size: u32) {
    output.extend_from_slice(id.as_bytes());
    output.extend_from_slice(&size.to_le_bytes());
}
