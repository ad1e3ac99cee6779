use crate::bits::reader::{fourcc_to_string, read_fourcc, read_u32_be, read_u64_be};
use log::trace;

/// Box header information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxHeader {
    pub name: [u8; 4],
    /// Declared size including the header.
    pub size: u64,
    pub header_size: u64,
    /// Position of the header inside the parsed slice.
    pub offset: usize,
}

impl BoxHeader {
    /// Position of the first payload byte inside the parsed slice.
    pub fn body_offset(&self) -> usize {
        self.offset + self.header_size as usize
    }

    /// Position one past the last byte of the box.
    pub fn end(&self) -> usize {
        self.offset + self.size as usize
    }

    pub fn name_str(&self) -> String {
        fourcc_to_string(&self.name)
    }

    pub fn is(&self, name: &[u8; 4]) -> bool {
        &self.name == name
    }
}

/// Parse a box header at `pos` without validating the declared size.
///
/// A 32-bit size of 1 means a 64-bit largesize follows the name.
pub fn parse_box_header(data: &[u8], pos: usize) -> Option<BoxHeader> {
    let size32 = read_u32_be(data, pos)?;
    let name = read_fourcc(data, pos + 4)?;
    let (size, header_size) = if size32 == 1 {
        (read_u64_be(data, pos + 8)?, 16)
    } else {
        (size32 as u64, 8)
    };
    Some(BoxHeader {
        name,
        size,
        header_size,
        offset: pos,
    })
}

/// Iterates the boxes of one nesting level.
///
/// A zero size, a size smaller than its own header or a size running past
/// the end of the slice ends the level. Boxes yielded before that point stay
/// valid, which is what lets a truncated window still produce results.
#[derive(Debug, Clone)]
pub struct BoxIter<'a> {
    data: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> BoxIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            done: false,
        }
    }

    fn stop(&mut self, reason: &str) -> Option<BoxHeader> {
        trace!("box walk stopped at {}: {}", self.pos, reason);
        self.done = true;
        None
    }
}

impl Iterator for BoxIter<'_> {
    type Item = BoxHeader;

    fn next(&mut self) -> Option<BoxHeader> {
        if self.done || self.pos + 8 > self.data.len() {
            return None;
        }
        let Some(header) = parse_box_header(self.data, self.pos) else {
            return self.stop("truncated header");
        };
        if header.size == 0 {
            return self.stop("zero-sized box");
        }
        if header.size < header.header_size {
            return self.stop("box smaller than its header");
        }
        if header.size > (self.data.len() - self.pos) as u64 {
            return self.stop("box overruns the window");
        }
        trace!(
            "box {} at {} ({} bytes)",
            header.name_str(),
            header.offset,
            header.size
        );
        self.pos = header.end();
        Some(header)
    }
}

/// Boxes of the level held in `data`.
pub fn boxes(data: &[u8]) -> BoxIter<'_> {
    BoxIter::new(data)
}

/// Payload of a box yielded by [`BoxIter`] over the same slice.
pub fn box_body<'a>(data: &'a [u8], header: &BoxHeader) -> &'a [u8] {
    &data[header.body_offset()..header.end()]
}

/// Find a box on this level and return its payload
pub fn find_box<'a>(data: &'a [u8], name: &[u8; 4]) -> Option<&'a [u8]> {
    boxes(data)
        .find(|header| header.is(name))
        .map(|header| box_body(data, &header))
}

/// Write a box header to a vector
pub fn write_box_header(output: &mut Vec<u8>, name: &str, size: u32) {
    output.extend_from_slice(&size.to_be_bytes());
    output.extend_from_slice(name.as_bytes());
}
