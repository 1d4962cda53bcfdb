//! Layout tables and structure building.
//!
//! A [`LayoutConfig`] describes the catalog as data: image sections list
//! blocks as `[start, end)` slices of the document's flat image sequence,
//! and text sections carry literal lists. [`build_structure`] applies a
//! layout to a scanned document after validating every slice against the
//! number of images actually found.

mod wishlist;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::model::{ImageBlock, ImageId, ImageSection, Section, Structure, TextSection};
use crate::parser::{scan_images, ScanOptions};

/// How to treat slices that reach past the available images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Fail on the first out-of-range slice
    #[default]
    Strict,
    /// Resolve out-of-range slices through each block's [`Fallback`]
    Lenient,
}

/// What a block holds in lenient mode when its slice reaches past the
/// available images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    /// No images
    #[default]
    Empty,
    /// The images from `start` up to the end of the sequence
    Truncate,
}

/// A catalog layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Sections in display order
    pub sections: Vec<SectionSpec>,
}

/// One section of a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionSpec {
    /// Blocks sliced from the flat image sequence
    Images {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        blocks: Vec<BlockSpec>,
    },
    /// Literal text lists
    Text {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        items: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        not_included: Vec<String>,
    },
}

impl SectionSpec {
    /// Section title.
    pub fn title(&self) -> &str {
        match self {
            SectionSpec::Images { title, .. } | SectionSpec::Text { title, .. } => title,
        }
    }
}

/// A block as a half-open slice `[start, end)` of the flat image sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    /// Unique id within the section
    pub id: String,
    /// Display title
    pub title: String,
    /// First image index (inclusive)
    pub start: usize,
    /// Last image index (exclusive)
    pub end: usize,
    /// Contents when `end` is past the available images (lenient mode only)
    #[serde(default)]
    pub fallback: Fallback,
}

impl BlockSpec {
    /// Block whose title equals its id.
    pub fn new(id: impl Into<String>, start: usize, end: usize) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            start,
            end,
            fallback: Fallback::Empty,
        }
    }

    /// Block with a distinct display title.
    pub fn titled(id: impl Into<String>, title: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            fallback: Fallback::Empty,
        }
    }

    /// Keep whatever images remain when the slice runs past the end.
    pub fn truncating(mut self) -> Self {
        self.fallback = Fallback::Truncate;
        self
    }
}

impl LayoutConfig {
    /// The built-in layout of the wishlist packs page.
    pub fn wishlist() -> Self {
        wishlist::layout()
    }

    /// Parse a layout from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Layout(e.to_string()))
    }

    /// Read a layout from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::missing_input(path, e))?;
        Self::from_json(&json)
    }

    /// Largest `end` over all blocks, i.e. the image count the layout needs.
    pub fn required_images(&self) -> usize {
        self.block_specs().map(|(_, b)| b.end).max().unwrap_or(0)
    }

    /// Check every block against `available` images.
    ///
    /// In strict mode the first out-of-range slice is an error. Inverted
    /// slices and duplicate ids are errors in both modes.
    pub fn validate(&self, available: usize, mode: LayoutMode) -> std::result::Result<(), ConfigError> {
        for section in &self.sections {
            let SectionSpec::Images { title, blocks, .. } = section else {
                continue;
            };

            let mut ids = HashSet::new();
            for block in blocks {
                if !ids.insert(block.id.as_str()) {
                    return Err(ConfigError::DuplicateBlock {
                        section: title.clone(),
                        block: block.id.clone(),
                    });
                }
                if block.start > block.end {
                    return Err(ConfigError::InvertedSlice {
                        section: title.clone(),
                        block: block.id.clone(),
                        start: block.start,
                        end: block.end,
                    });
                }
                if block.end > available && mode == LayoutMode::Strict {
                    return Err(ConfigError::SliceOutOfBounds {
                        section: title.clone(),
                        block: block.id.clone(),
                        start: block.start,
                        end: block.end,
                        available,
                    });
                }
            }
        }
        Ok(())
    }

    /// Apply the layout to a flat image sequence.
    pub fn apply(&self, images: &[ImageId], mode: LayoutMode) -> Result<Structure> {
        self.validate(images.len(), mode)?;

        let mut structure = Structure::new();
        for section in &self.sections {
            let built = match section {
                SectionSpec::Images {
                    title,
                    subtitle,
                    blocks,
                } => Section::Images(ImageSection {
                    title: title.clone(),
                    subtitle: subtitle.clone(),
                    blocks: blocks
                        .iter()
                        .map(|b| slice_block(title, b, images))
                        .collect(),
                }),
                SectionSpec::Text {
                    title,
                    subtitle,
                    items,
                    not_included,
                } => Section::Text(TextSection {
                    title: title.clone(),
                    subtitle: subtitle.clone(),
                    items: items.clone(),
                    not_included: not_included.clone(),
                }),
            };
            structure.add_section(built);
        }
        Ok(structure)
    }

    fn block_specs(&self) -> impl Iterator<Item = (&str, &BlockSpec)> {
        self.sections.iter().flat_map(|s| {
            let blocks: &[BlockSpec] = match s {
                SectionSpec::Images { blocks, .. } => blocks,
                SectionSpec::Text { .. } => &[],
            };
            blocks.iter().map(move |b| (s.title(), b))
        })
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::wishlist()
    }
}

/// Slice one block. Out-of-range slices follow the block's fallback.
fn slice_block(section: &str, spec: &BlockSpec, images: &[ImageId]) -> ImageBlock {
    let available = images.len();
    let images = if spec.end <= available {
        images[spec.start..spec.end].to_vec()
    } else {
        match spec.fallback {
            Fallback::Empty => {
                log::warn!(
                    "Block '{}' in section '{}' needs {} images, {} available; left empty",
                    spec.id,
                    section,
                    spec.end,
                    available
                );
                Vec::new()
            }
            Fallback::Truncate => {
                let start = spec.start.min(available);
                log::warn!(
                    "Block '{}' in section '{}' truncated to [{}..{}) of {} images",
                    spec.id,
                    section,
                    start,
                    available,
                    available
                );
                images[start..].to_vec()
            }
        }
    };

    ImageBlock {
        id: spec.id.clone(),
        title: spec.title.clone(),
        images,
    }
}

/// Scan a document and build its catalog structure.
///
/// # Example
///
/// ```
/// use packscan::layout::{build_structure, BlockSpec, LayoutConfig, LayoutMode, SectionSpec};
/// use packscan::parser::ScanOptions;
///
/// let layout = LayoutConfig {
///     sections: vec![SectionSpec::Images {
///         title: "ANIMAIS".into(),
///         subtitle: None,
///         blocks: vec![BlockSpec::new("2", 0, 2)],
///     }],
/// };
/// let html = r#"<img src="images/image1.jpg"><img src="images/image2.png">"#;
/// let structure = build_structure(html, &layout, LayoutMode::Strict, &ScanOptions::default())?;
/// assert_eq!(structure.image_ref_count(), 2);
/// # Ok::<(), packscan::Error>(())
/// ```
pub fn build_structure(
    html: &str,
    layout: &LayoutConfig,
    mode: LayoutMode,
    options: &ScanOptions,
) -> Result<Structure> {
    let images = scan_images(html, options)?;
    layout.apply(&images, mode)
}
