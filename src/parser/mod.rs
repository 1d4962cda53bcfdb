//! Markup scanning module.

mod blocks;
mod images;
mod options;
mod patterns;

pub use blocks::{extract_blocks, BlockFold, OpenBlock};
pub use images::scan_images;
pub use options::{RepeatPolicy, ScanOptions, DEFAULT_BLOCK_PATTERN, DEFAULT_IMAGE_PATTERN};
pub use patterns::{LineKind, Patterns};
