use super::types::ByteWindow;
use crate::config::ProbeConfig;
use crate::streams::SeekableStream;
use std::io;

/// Windows to try for an MP4/MOV file, in order: head, tail, then the whole
/// file when it is small enough.
///
/// A window identical to one already planned is dropped, since walking the
/// same bytes twice cannot change the outcome.
pub fn plan_mp4_windows(file_size: u64, config: &ProbeConfig) -> Vec<ByteWindow> {
    if file_size == 0 {
        return Vec::new();
    }
    let head = ByteWindow::new(0, config.head_window_bytes.min(file_size));
    let tail_length = config.tail_window_bytes.min(file_size);
    let tail = ByteWindow::new(file_size - tail_length, tail_length);

    let mut windows = vec![head];
    let mut push = |window: ByteWindow| {
        if window.length > 0 && !windows.contains(&window) {
            windows.push(window);
        }
    };
    push(tail);
    if file_size <= config.whole_file_limit_bytes {
        push(ByteWindow::new(0, file_size));
    }
    windows.retain(|window| window.length > 0);
    windows
}

/// The single head window read for an AVI file.
pub fn plan_avi_window(file_size: u64, config: &ProbeConfig) -> Option<ByteWindow> {
    let length = config.avi_window_bytes.min(file_size);
    (length > 0).then(|| ByteWindow::new(0, length))
}

/// Materialize a window from the stream.
pub async fn read_window<S: SeekableStream + ?Sized>(
    stream: &mut S,
    window: ByteWindow,
) -> io::Result<Vec<u8>> {
    stream
        .read_range(window.start_offset, window.length as usize)
        .await
}
