#![allow(dead_code)]

use async_trait::async_trait;
use std::io::{self, SeekFrom};
use vidprobe::avi::write_chunk_header;
use vidprobe::mp4::write_box_header;
use vidprobe::{MemorySeekableStream, SeekableStream};

pub fn make_box(name: &str, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_box_header(&mut buf, name, (payload.len() + 8) as u32);
    buf.extend_from_slice(payload);
    buf
}

pub fn ftyp() -> Vec<u8> {
    make_box("ftyp", b"isom\x00\x00\x02\x00isomiso2avc1mp41")
}

pub fn mdat(len: usize) -> Vec<u8> {
    make_box("mdat", &vec![0u8; len])
}

pub fn mvhd_v0(timescale: u32, duration: u32) -> Vec<u8> {
    let mut payload = vec![0u8; 100];
    payload[12..16].copy_from_slice(&timescale.to_be_bytes());
    payload[16..20].copy_from_slice(&duration.to_be_bytes());
    make_box("mvhd", &payload)
}

pub fn mvhd_v1(timescale: u32, duration: u64) -> Vec<u8> {
    let mut payload = vec![0u8; 112];
    payload[0] = 1;
    payload[20..24].copy_from_slice(&timescale.to_be_bytes());
    payload[24..32].copy_from_slice(&duration.to_be_bytes());
    make_box("mvhd", &payload)
}

pub fn trak(version: u8, width: u32, height: u32) -> Vec<u8> {
    let width_at = if version == 1 { 88 } else { 76 };
    let mut payload = vec![0u8; width_at + 8];
    payload[0] = version;
    payload[width_at..width_at + 4].copy_from_slice(&(width * 65536).to_be_bytes());
    payload[width_at + 4..width_at + 8].copy_from_slice(&(height * 65536).to_be_bytes());
    make_box("trak", &make_box("tkhd", &payload))
}

/// moov with an audio track (no display size) ahead of the video track.
pub fn moov(timescale: u32, duration: u32, width: u32, height: u32) -> Vec<u8> {
    make_box(
        "moov",
        &[
            mvhd_v0(timescale, duration),
            trak(0, 0, 0),
            trak(0, width, height),
        ]
        .concat(),
    )
}

pub fn fast_start_mp4(mdat_len: usize) -> Vec<u8> {
    [ftyp(), moov(1000, 5000, 1280, 720), mdat(mdat_len)].concat()
}

pub fn moov_at_end_mp4(mdat_len: usize) -> Vec<u8> {
    [ftyp(), mdat(mdat_len), moov(90000, 900_000, 1920, 1080)].concat()
}

pub fn make_chunk(id: &str, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_chunk_header(&mut buf, id, payload.len() as u32);
    buf.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        buf.push(0);
    }
    buf
}

pub fn make_list(list_type: &str, children: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = list_type.as_bytes().to_vec();
    payload.extend_from_slice(&children.concat());
    make_chunk("LIST", &payload)
}

pub fn avih(micro_sec_per_frame: u32, total_frames: u32, width: u32, height: u32) -> Vec<u8> {
    let mut payload = vec![0u8; 56];
    payload[0..4].copy_from_slice(&micro_sec_per_frame.to_le_bytes());
    payload[8..12].copy_from_slice(&total_frames.to_le_bytes());
    payload[24..28].copy_from_slice(&width.to_le_bytes());
    payload[28..32].copy_from_slice(&height.to_le_bytes());
    make_chunk("avih", &payload)
}

pub fn avi(micro_sec_per_frame: u32, total_frames: u32, width: u32, height: u32) -> Vec<u8> {
    let body = [
        make_list(
            "hdrl",
            &[
                avih(micro_sec_per_frame, total_frames, width, height),
                make_list("strl", &[make_chunk("strh", &[0; 56])]),
            ],
        ),
        make_chunk("JUNK", &[0; 13]),
        make_list("movi", &[make_chunk("00dc", &[0xAB; 101])]),
    ]
    .concat();
    let mut buf = Vec::new();
    write_chunk_header(&mut buf, "RIFF", (body.len() + 4) as u32);
    buf.extend_from_slice(b"AVI ");
    buf.extend_from_slice(&body);
    buf
}

/// In-memory stream that records every window requested through `read_range`.
pub struct RecordingStream {
    inner: MemorySeekableStream,
    pub ranges: Vec<(u64, usize)>,
}

impl RecordingStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            inner: MemorySeekableStream::new(data),
            ranges: Vec::new(),
        }
    }
}

#[async_trait]
impl SeekableStream for RecordingStream {
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).await
    }

    async fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos).await
    }

    async fn read_range(&mut self, start: u64, length: usize) -> io::Result<Vec<u8>> {
        self.ranges.push((start, length));
        self.inner.read_range(start, length).await
    }
}
