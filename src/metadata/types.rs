use serde::Serialize;

/// Container family chosen from the file signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContainerFormat {
    /// MP4, MOV and the rest of the ISO base media family.
    IsoBmff,
    Avi,
}

impl ContainerFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ContainerFormat::IsoBmff => "MP4/MOV",
            ContainerFormat::Avi => "AVI",
        }
    }
}

/// Duration and resolution of a video, plus the size of the whole source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
    /// `width / height`, 0 when the height is 0.
    pub aspect_ratio: f64,
    pub file_size_bytes: u64,
    pub format: ContainerFormat,
    /// Only known for AVI, where it is stored in the main header.
    pub frame_rate: Option<f64>,
}

impl VideoMetadata {
    pub fn new(
        duration_seconds: f64,
        width: u32,
        height: u32,
        file_size_bytes: u64,
        format: ContainerFormat,
    ) -> Self {
        let aspect_ratio = if height == 0 {
            0.0
        } else {
            width as f64 / height as f64
        };
        Self {
            duration_seconds,
            width,
            height,
            aspect_ratio,
            file_size_bytes,
            format,
            frame_rate: None,
        }
    }

    pub fn with_frame_rate(mut self, frame_rate: Option<f64>) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Only complete metadata is ever handed to callers.
    pub fn is_complete(&self) -> bool {
        self.duration_seconds > 0.0 && self.width > 0 && self.height > 0
    }
}

/// Contiguous slice of the source materialized for one parse attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteWindow {
    pub start_offset: u64,
    pub length: u64,
}

impl ByteWindow {
    pub fn new(start_offset: u64, length: u64) -> Self {
        Self {
            start_offset,
            length,
        }
    }
}

/// Probe result containing basic file information
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub format: Option<ContainerFormat>,
    pub size: u64,
    pub is_valid: bool,
    pub error: Option<String>,
}
