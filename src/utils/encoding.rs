//! Text decoding for data files exported by third-party tools.
//!
//! Data dumps arrive as UTF-8, UTF-8 with BOM, UTF-16 or legacy single-byte
//! encodings. Strict UTF-8 is tried first; otherwise the encoding is sniffed
//! with chardetng and decoded with replacement characters.

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::path::Path;

const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Guess the encoding of raw bytes: BOM first, then strict UTF-8, then chardetng.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    if std::str::from_utf8(sample).is_ok() {
        return UTF_8;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}

/// Read a file as text, returning the content and the encoding name used.
///
/// A leading byte-order mark is consumed by the decoder for UTF-16 input;
/// UTF-8 input keeps it, so callers parsing JSON should strip `\u{feff}`.
pub fn read_file_safe(
    path: &Path,
    max_chars: Option<usize>,
    encoding: Option<&str>,
) -> Result<(String, String)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let (content, used) = match std::str::from_utf8(&bytes) {
        Ok(text) if encoding.is_none() => (text.to_string(), UTF_8),
        _ => {
            let chosen = encoding
                .and_then(|label| Encoding::for_label(label.as_bytes()))
                .unwrap_or_else(|| detect_encoding(&bytes));
            let (decoded, used, _had_errors) = chosen.decode(&bytes);
            (decoded.into_owned(), used)
        }
    };

    let content = match max_chars {
        Some(limit) => content.chars().take(limit).collect(),
        None => content,
    };
    Ok((content, used.name().to_ascii_lowercase()))
}
