//! Export loading
//!
//! Reads an already-transliterated Notebook export. The only failure that
//! aborts an import happens here: input that is not valid UTF-8 means the
//! upstream transliteration step did not run or failed.

use std::fs;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::error::{AppError, AppResult};

/// Read an export file and prepare it for parsing
pub fn load_source(path: impl AsRef<Path>) -> AppResult<String> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode_source(bytes)
}

/// Decode raw export bytes: UTF-8, `\n` line endings, NFC
pub fn decode_source(bytes: Vec<u8>) -> AppResult<String> {
    let text = String::from_utf8(bytes).map_err(|e| {
        AppError::InvalidInput(format!(
            "export is not valid UTF-8 at byte {}; run the transliteration step first",
            e.utf8_error().valid_up_to()
        ))
    })?;

    Ok(text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .nfc()
        .collect())
}

/// Default source identifier for error records: the file name
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
