use log::error;
use std::env;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use vidprobe::avi::{LIST_ID, RIFF_HEADER_SIZE};
use vidprobe::bits::reader::{fourcc_to_string, read_fourcc, read_u32_le};
use vidprobe::estimate::estimate_gif_size_for;
use vidprobe::mp4::parse_box_header;
use vidprobe::{
    aspect_ratio_label, classify_gif_size, detect_format, format_duration, format_file_size,
    ContainerFormat, GifSettings, ProbeConfig,
};

/// Boxes whose payload is a list of child boxes.
const MP4_CONTAINERS: [&[u8; 4]; 7] = [
    b"moov", b"trak", b"mdia", b"minf", b"stbl", b"udta", b"edts",
];

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        println!("Usage: container_scanner <video.mp4|video.mov|video.avi> [--json]");
        return;
    };
    let json = args.iter().skip(2).any(|arg| arg == "--json");

    if !json {
        if let Err(e) = print_structure(path) {
            error!("Scan of {} failed: {}", path, e);
        }
    }

    match vidprobe::metadata::read_local_metadata(path, &ProbeConfig::default()).await {
        Ok(metadata) => {
            let settings = GifSettings::default();
            let gif_bytes = estimate_gif_size_for(&metadata, &settings).ok();
            if json {
                let report = serde_json::json!({
                    "metadata": metadata,
                    "aspect_label": aspect_ratio_label(metadata.aspect_ratio),
                    "gif_settings": settings,
                    "gif_estimate_bytes": gif_bytes,
                    "gif_warning": gif_bytes.map(classify_gif_size),
                });
                match serde_json::to_string_pretty(&report) {
                    Ok(text) => println!("{}", text),
                    Err(e) => error!("Failed to serialize report: {}", e),
                }
                return;
            }
            println!();
            println!("Format:   {}", metadata.format.name());
            println!(
                "Duration: {} ({:.3}s)",
                format_duration(metadata.duration_seconds),
                metadata.duration_seconds
            );
            println!(
                "Size:     {}x{} ({})",
                metadata.width,
                metadata.height,
                aspect_ratio_label(metadata.aspect_ratio).unwrap_or("non-standard")
            );
            println!("File:     {}", format_file_size(metadata.file_size_bytes));
            if let Some(bytes) = gif_bytes {
                println!(
                    "GIF @ {}px/{}fps/{:?}: ~{}",
                    settings.width,
                    settings.frame_rate,
                    settings.quality,
                    format_file_size(bytes)
                );
                if let Some(message) = classify_gif_size(bytes).message {
                    println!("          {}", message);
                }
            }
        }
        Err(e) => error!("{}", e),
    }
}

fn print_structure(path: &str) -> std::io::Result<()> {
    let mut file = File::open(path)?;
    let file_size = file.metadata()?.len();
    let mut signature = [0u8; RIFF_HEADER_SIZE];
    let read = file.read(&mut signature)?;

    println!("File: {} ({} bytes)", path, file_size);
    match detect_format(&signature[..read]) {
        ContainerFormat::Avi => {
            println!("RIFF AVI  [size: {}]", file_size);
            scan_chunks(&mut file, RIFF_HEADER_SIZE as u64, file_size, 1)
        }
        ContainerFormat::IsoBmff => scan_boxes(&mut file, 0, file_size, 0),
    }
}

fn scan_boxes(file: &mut File, start: u64, end: u64, depth: usize) -> std::io::Result<()> {
    let mut pos = start;
    let indent = "  ".repeat(depth);
    while pos + 8 <= end {
        file.seek(SeekFrom::Start(pos))?;
        let mut header_bytes = [0u8; 16];
        let read = file.read(&mut header_bytes)?;
        let Some(header) = parse_box_header(&header_bytes[..read], 0) else {
            break;
        };
        if header.size < header.header_size || header.size > end - pos {
            println!(
                "{}! {} declares {} bytes at {}, stopping",
                indent,
                header.name_str(),
                header.size,
                pos
            );
            break;
        }
        println!(
            "{}{} [size: {}, pos: {}]",
            indent,
            header.name_str(),
            header.size,
            pos
        );
        if MP4_CONTAINERS.contains(&&header.name) {
            scan_boxes(file, pos + header.header_size, pos + header.size, depth + 1)?;
        }
        pos += header.size;
    }
    Ok(())
}

fn scan_chunks(file: &mut File, start: u64, end: u64, depth: usize) -> std::io::Result<()> {
    let mut pos = start;
    let indent = "  ".repeat(depth);
    while pos + 8 <= end {
        file.seek(SeekFrom::Start(pos))?;
        let mut header = [0u8; 12];
        let read = file.read(&mut header)?;
        let (Some(id), Some(size)) = (
            read_fourcc(&header[..read], 0),
            read_u32_le(&header[..read], 4),
        ) else {
            break;
        };
        let size = size as u64;
        if size > end - pos - 8 {
            println!(
                "{}! {} declares {} bytes at {}, stopping",
                indent,
                fourcc_to_string(&id),
                size,
                pos
            );
            break;
        }
        match read_fourcc(&header[..read], 8) {
            Some(list_type) if &id == LIST_ID && size >= 4 => {
                println!(
                    "{}LIST {} [size: {}, pos: {}]",
                    indent,
                    fourcc_to_string(&list_type),
                    size,
                    pos
                );
                if &list_type != b"movi" {
                    scan_chunks(file, pos + 12, pos + 8 + size, depth + 1)?;
                }
            }
            _ => println!(
                "{}{} [size: {}, pos: {}]",
                indent,
                fourcc_to_string(&id),
                size,
                pos
            ),
        }
        pos += 8 + size + (size & 1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use vidprobe::mp4::write_box_header;

    fn scan_file(data: &[u8]) -> std::io::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(data)?;
        file.flush()?;
        print_structure(&file.path().to_string_lossy())
    }

    #[test]
    fn test_largesize_past_end_stops_scan() {
        let mut data = Vec::new();
        write_box_header(&mut data, "ftyp", 16);
        data.extend_from_slice(b"isom\x00\x00\x02\x00");
        write_box_header(&mut data, "mdat", 1);
        data.extend_from_slice(&u64::MAX.to_be_bytes());
        data.resize(64, 0);
        assert!(scan_file(&data).is_ok());
    }

    #[test]
    fn test_nested_boxes_and_oversized_chunk() {
        let mut data = Vec::new();
        write_box_header(&mut data, "moov", 24);
        write_box_header(&mut data, "trak", 16);
        write_box_header(&mut data, "tkhd", 0xFFFF_FFF0);
        assert!(scan_file(&data).is_ok());

        let mut avi = b"RIFF\x20\x00\x00\x00AVI ".to_vec();
        avi.extend_from_slice(b"LIST");
        avi.extend_from_slice(&u32::MAX.to_le_bytes());
        avi.extend_from_slice(b"hdrl");
        assert!(scan_file(&avi).is_ok());
    }
}
