//! Catalog structure types.

use super::ImageId;
use serde::{Deserialize, Serialize};

/// The full catalog: an ordered list of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    /// Sections in display order
    pub sections: Vec<Section>,
}

impl Structure {
    /// Create an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Find a section by title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title() == title)
    }

    /// Total number of image references across all image blocks.
    pub fn image_ref_count(&self) -> usize {
        self.sections
            .iter()
            .filter_map(|s| match s {
                Section::Images(section) => Some(section),
                Section::Text(_) => None,
            })
            .flat_map(|s| &s.blocks)
            .map(|b| b.images.len())
            .sum()
    }
}

/// One catalog section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Section {
    /// Section made of numbered image blocks
    Images(ImageSection),
    /// Section made of literal text lists
    Text(TextSection),
}

impl Section {
    /// Section title.
    pub fn title(&self) -> &str {
        match self {
            Section::Images(s) => &s.title,
            Section::Text(s) => &s.title,
        }
    }
}

/// A section whose content is sliced from the document's images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSection {
    /// Section title
    pub title: String,

    /// Optional subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Blocks in display order
    pub blocks: Vec<ImageBlock>,
}

impl ImageSection {
    /// Get a block by id.
    pub fn block(&self, id: &str) -> Option<&ImageBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }
}

/// A labelled group of images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Unique id within the section (e.g. "15_2")
    pub id: String,

    /// Display title (e.g. "15", "27¹")
    pub title: String,

    /// Images in document order
    pub images: Vec<ImageId>,
}

/// A section of curated text, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSection {
    /// Section title
    pub title: String,

    /// Optional subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Listed items
    pub items: Vec<String>,

    /// Items explicitly left out
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_included: Vec<String>,
}
