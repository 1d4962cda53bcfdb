//! Image identifiers and file extension tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of one logical image (e.g. `image42`), independent of its file extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Create an identifier from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build `<prefix><n>`, e.g. `ImageId::numbered("image", 7)` is `image7`.
    pub fn numbered(prefix: &str, n: u32) -> Self {
        Self(format!("{}{}", prefix, n))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing decimal number, if the identifier ends with one.
    pub fn number(&self) -> Option<u32> {
        let digits = self.0.len()
            - self
                .0
                .bytes()
                .rev()
                .take_while(|b| b.is_ascii_digit())
                .count();
        self.0[digits..].parse().ok()
    }

    /// File name for this image with the given extension.
    pub fn file_name(&self, ext: ImageExt) -> String {
        format!("{}.{}", self.0, ext.suffix())
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ImageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// JPEG magic bytes
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
/// PNG magic bytes
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// File extension tag of an image on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageExt {
    /// `.jpg`
    Jpg,
    /// `.png`
    Png,
}

impl ImageExt {
    /// Default probe order: JPEG first, then PNG.
    pub const ALL: [ImageExt; 2] = [ImageExt::Jpg, ImageExt::Png];

    /// File suffix without the leading dot.
    pub fn suffix(self) -> &'static str {
        match self {
            ImageExt::Jpg => "jpg",
            ImageExt::Png => "png",
        }
    }

    /// Magic bytes a file of this type starts with.
    pub fn magic(self) -> &'static [u8] {
        match self {
            ImageExt::Jpg => JPEG_MAGIC,
            ImageExt::Png => PNG_MAGIC,
        }
    }

    /// Number of leading bytes needed to sniff any supported type.
    pub fn sniff_len() -> usize {
        PNG_MAGIC.len()
    }

    /// Identify the image type from the first bytes of a file.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|ext| data.starts_with(ext.magic()))
    }

    /// Parse a suffix (case-insensitive, leading dot allowed).
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageExt::Jpg),
            "png" => Some(ImageExt::Png),
            _ => None,
        }
    }
}

impl fmt::Display for ImageExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
