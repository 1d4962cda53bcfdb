//! JSON rendering for pass outputs.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value to JSON. Non-ASCII text is written as-is.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize a value and write it to `path`.
///
/// The whole document is rendered before the file is touched, so a
/// serialization failure leaves no partial output behind.
pub fn write_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
    format: JsonFormat,
) -> Result<()> {
    let json = to_json(value, format)?;
    write_rendered(path, &json)
}

/// Write already-rendered output, creating parent directories as needed.
pub fn write_rendered(path: impl AsRef<Path>, rendered: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, rendered)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
