//! Image order index.

use std::path::Path;

use crate::error::{Error, Result};

/// Turn a newline-delimited identifier list into an ordered list.
///
/// Trailing whitespace (including `\r`) is stripped from each line. Order,
/// duplicates and blank interior lines are kept as they are.
pub fn generate_index(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim_end().to_string()).collect()
}

/// Read an identifier list from a file.
pub fn generate_index_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::missing_input(path, e))?;
    Ok(generate_index(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_order_and_duplicates() {
        let index = generate_index("image3\nimage1\nimage3\n");
        assert_eq!(index, vec!["image3", "image1", "image3"]);
    }

    #[test]
    fn test_strips_trailing_whitespace_only() {
        let index = generate_index("  image1 \t\r\nimage2\r\n");
        assert_eq!(index, vec!["  image1", "image2"]);
    }

    #[test]
    fn test_blank_lines_kept() {
        let index = generate_index("image1\n\nimage2");
        assert_eq!(index, vec!["image1", "", "image2"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(generate_index("").is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = generate_index_file("/nonexistent/original_order.txt").unwrap_err();
        assert!(matches!(err, Error::MissingInput { .. }));
    }
}
