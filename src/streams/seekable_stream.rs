use async_trait::async_trait;
use std::io::{self, SeekFrom};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Random access to a source file or blob: its length and arbitrary byte ranges
#[async_trait]
pub trait SeekableStream: Send {
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    async fn seek(&mut self, pos: SeekFrom) -> io::Result<u64>;

    /// Fill `buf` until it is full or the stream ends.
    async fn read_all(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut total_read = 0;
        while total_read < buf.len() {
            let bytes_read = self.read(&mut buf[total_read..]).await?;
            if bytes_read == 0 {
                break;
            }
            total_read += bytes_read;
        }
        Ok(total_read)
    }

    /// Total length in bytes.
    async fn total_len(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::End(0)).await
    }

    /// Materialize `length` bytes starting at `start`. The result is shorter
    /// than `length` when the stream ends first.
    async fn read_range(&mut self, start: u64, length: usize) -> io::Result<Vec<u8>> {
        self.seek(SeekFrom::Start(start)).await?;
        let mut buf = vec![0u8; length];
        let bytes_read = self.read_all(&mut buf).await?;
        buf.truncate(bytes_read);
        Ok(buf)
    }

    fn log_stats(&self) {}

    fn http_request_count(&self) -> u64 {
        0
    }

    fn http_request_bytes_read(&self) -> u64 {
        0
    }
}

/// Local file wrapper
pub struct LocalSeekableStream(File);

impl LocalSeekableStream {
    pub async fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(LocalSeekableStream(File::open(path).await?))
    }
}

#[async_trait]
impl SeekableStream for LocalSeekableStream {
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf).await
    }

    async fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.0.seek(pos).await
    }

    async fn total_len(&mut self) -> io::Result<u64> {
        Ok(self.0.metadata().await?.len())
    }
}

/// Blob already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySeekableStream {
    data: Vec<u8>,
    position: u64,
}

impl MemorySeekableStream {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }
}

#[async_trait]
impl SeekableStream for MemorySeekableStream {
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = self.data.len() as u64;
        if self.position >= len {
            return Ok(0);
        }
        let start = self.position as usize;
        let count = buf.len().min(self.data.len() - start);
        buf[..count].copy_from_slice(&self.data[start..start + count]);
        self.position += count as u64;
        Ok(count)
    }

    async fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let len = self.data.len() as u64;
        let new_position = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(offset) => len.checked_add_signed(offset),
            SeekFrom::Current(offset) => self.position.checked_add_signed(offset),
        };
        self.position = new_position.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek to a negative position",
            )
        })?;
        Ok(self.position)
    }
}
