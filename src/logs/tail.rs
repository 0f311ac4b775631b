//! Bounded tail reads.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

/// Largest number of file bytes read from one log file.
pub const TAIL_WINDOW_BYTES: u64 = 50 * 1024;

/// Prepended when only the end of a file was read.
pub const TRUNCATION_MARKER: &str = "... (earlier output truncated) ...\n";

/// Read `path`, or only its last [`TAIL_WINDOW_BYTES`] if it is larger.
///
/// Invalid UTF-8 is replaced rather than rejected. A window that starts in
/// the middle of a multi-byte character drops the partial bytes.
pub async fn read_tail(path: &Path) -> std::io::Result<String> {
    let file = File::open(path).await?;
    let len = file.metadata().await?.len();
    tail_of(file, len).await
}

// `len` is the size observed when the file was opened; bytes appended
// after that are not read.
async fn tail_of(mut file: File, len: u64) -> std::io::Result<String> {
    if len <= TAIL_WINDOW_BYTES {
        let mut buf = Vec::with_capacity(len as usize);
        file.take(len).read_to_end(&mut buf).await?;
        return Ok(String::from_utf8_lossy(&buf).into_owned());
    }

    file.seek(SeekFrom::Start(len - TAIL_WINDOW_BYTES)).await?;
    let mut buf = Vec::with_capacity(TAIL_WINDOW_BYTES as usize);
    file.take(TAIL_WINDOW_BYTES).read_to_end(&mut buf).await?;

    let start = buf
        .iter()
        .position(|b| b & 0xC0 != 0x80)
        .unwrap_or(buf.len());

    let mut text = String::with_capacity(TRUNCATION_MARKER.len() + buf.len() - start);
    text.push_str(TRUNCATION_MARKER);
    text.push_str(&String::from_utf8_lossy(&buf[start..]));
    Ok(text)
}
