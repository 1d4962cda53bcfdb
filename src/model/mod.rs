//! Data model for scanned catalog content.
//!
//! Every type here is produced once by a pass and then serialized. Nothing
//! is mutated after the pass that built it returns.

mod blocks;
mod extensions;
mod image;
mod structure;

pub use blocks::BlockMap;
pub use extensions::ExtensionMap;
pub use image::{ImageExt, ImageId};
pub use structure::{ImageBlock, ImageSection, Section, Structure, TextSection};
