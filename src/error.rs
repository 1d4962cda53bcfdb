//! Error types for packscan library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while running a pass.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input artifact could not be read. Aborts the pass.
    #[error("Cannot read input {}: {source}", path.display())]
    MissingInput {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A scan pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The layout file could not be parsed.
    #[error("Layout parsing error: {0}")]
    Layout(String),

    /// The layout table does not fit the scanned document.
    #[error("Layout configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error during JSON rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// No pass is registered under the given name.
    #[error("Unknown pass: {0}")]
    UnknownPass(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an I/O error raised while reading an input artifact.
    pub fn missing_input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::MissingInput {
            path: path.into(),
            source,
        }
    }
}

/// Structured layout validation errors.
///
/// Each variant names the section and block that failed so the offending
/// record can be found in the layout file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A slice ends past the number of images found in the document.
    #[error(
        "block '{block}' in section '{section}' needs images [{start}..{end}) but the document has {available}"
    )]
    SliceOutOfBounds {
        section: String,
        block: String,
        start: usize,
        end: usize,
        available: usize,
    },

    /// A slice starts after it ends.
    #[error("block '{block}' in section '{section}' has start {start} after end {end}")]
    InvertedSlice {
        section: String,
        block: String,
        start: usize,
        end: usize,
    },

    /// Two blocks in one section share an id.
    #[error("section '{section}' declares block '{block}' more than once")]
    DuplicateBlock { section: String, block: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownPass("thumbnails".into());
        assert_eq!(err.to_string(), "Unknown pass: thumbnails");

        let err = Error::Config(ConfigError::SliceOutOfBounds {
            section: "ANIMAIS".into(),
            block: "35".into(),
            start: 24,
            end: 59,
            available: 40,
        });
        assert_eq!(
            err.to_string(),
            "Layout configuration error: block '35' in section 'ANIMAIS' needs images [24..59) but the document has 40"
        );
    }

    #[test]
    fn test_missing_input_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::missing_input("wishlistpacks.html", io_err);
        assert_eq!(
            err.to_string(),
            "Cannot read input wishlistpacks.html: file not found"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_pattern_error_conversion() {
        let err: Error = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, Error::Pattern(_)));
    }
}
