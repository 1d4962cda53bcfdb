//! Compiled scan patterns.

use regex::Regex;

use crate::error::Result;
use crate::model::ImageId;

use super::ScanOptions;

/// How a markup line reads against the block label pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A block label line
    Label(u32),
    /// A block label line whose capture is not a valid `u32`
    BadLabel,
    /// Any other line
    Content,
}

/// Block label and image reference patterns, compiled once per scan.
#[derive(Debug, Clone)]
pub struct Patterns {
    block: Regex,
    image: Regex,
}

impl Patterns {
    /// Compile the patterns named in the options.
    pub fn compile(options: &ScanOptions) -> Result<Self> {
        Ok(Self {
            block: Regex::new(&options.block_pattern)?,
            image: Regex::new(&options.image_pattern)?,
        })
    }

    /// Classify a line against the block label pattern.
    pub fn classify(&self, line: &str) -> LineKind {
        let Some(raw) = self
            .block
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            return LineKind::Content;
        };
        match raw.parse() {
            Ok(label) => LineKind::Label(label),
            Err(_) => {
                log::debug!("Unparsable block label {:?}, skipping its block", raw);
                LineKind::BadLabel
            }
        }
    }

    /// Every image identifier referenced in `text`, in order of appearance.
    pub fn image_refs<'a>(&'a self, text: &'a str) -> impl Iterator<Item = ImageId> + 'a {
        self.image
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| ImageId::new(m.as_str())))
    }
}
