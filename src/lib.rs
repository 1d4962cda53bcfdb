//! # packscan
//!
//! Extract image blocks and catalog structure from an HTML wishlist export.
//!
//! The library is a set of independent one-shot passes. Each reads one
//! input artifact and produces one JSON-serializable value:
//!
//! - **Extension resolution**: which of `imageN.jpg` / `imageN.png` exists
//! - **Block extraction**: images grouped under numbered block markers
//! - **Structure building**: the flat image sequence sliced by a layout table
//! - **Index generation**: an ordered identifier list as a JSON array
//!
//! ## Quick Start
//!
//! ```no_run
//! use packscan::{extract_blocks_file, render};
//!
//! fn main() -> packscan::Result<()> {
//!     let blocks = extract_blocks_file("wishlistpacks.html")?;
//!     for (label, images) in blocks.iter() {
//!         println!("Block {}: {} images", label, images.len());
//!     }
//!
//!     render::write_json("blocks_structure.json", &blocks, render::JsonFormat::Pretty)?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod index;
pub mod layout;
pub mod model;
pub mod parser;
pub mod pass;
pub mod render;
pub mod resolve;

// Re-export commonly used types
pub use error::{ConfigError, Error, Result};
pub use index::{generate_index, generate_index_file};
pub use layout::{build_structure, BlockSpec, Fallback, LayoutConfig, LayoutMode, SectionSpec};
pub use model::{
    BlockMap, ExtensionMap, ImageBlock, ImageExt, ImageId, ImageSection, Section, Structure,
    TextSection,
};
pub use parser::{extract_blocks, scan_images, RepeatPolicy, ScanOptions};
pub use pass::{Pass, PassConfig, PassRegistry, PassReport};
pub use render::{to_json, write_json, JsonFormat};
pub use resolve::{resolve_extensions, ExtensionReport, MissingImage, ResolveOptions};

use std::path::Path;

/// Read a markup document, failing with [`Error::MissingInput`] if it cannot be read.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| Error::missing_input(path, e))
}

/// Extract numbered blocks from a markup file with default patterns.
///
/// # Example
///
/// ```no_run
/// use packscan::extract_blocks_file;
///
/// let blocks = extract_blocks_file("wishlistpacks.html").unwrap();
/// println!("Blocks: {}", blocks.block_count());
/// ```
pub fn extract_blocks_file<P: AsRef<Path>>(path: P) -> Result<BlockMap> {
    let html = read_document(path)?;
    extract_blocks(&html, &ScanOptions::default())
}

/// Build the catalog structure of a markup file with the built-in layout.
///
/// Slices are validated strictly; use [`build_structure`] for other modes.
///
/// # Example
///
/// ```no_run
/// use packscan::{build_structure_file, JsonFormat};
///
/// let structure = build_structure_file("wishlistpacks.html").unwrap();
/// let json = packscan::to_json(&structure, JsonFormat::Pretty).unwrap();
/// std::fs::write("complete_structure.json", json).unwrap();
/// ```
pub fn build_structure_file<P: AsRef<Path>>(path: P) -> Result<Structure> {
    let html = read_document(path)?;
    build_structure(
        &html,
        &LayoutConfig::wishlist(),
        LayoutMode::Strict,
        &ScanOptions::default(),
    )
}
