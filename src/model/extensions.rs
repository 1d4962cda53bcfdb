//! Mapping from image identifier to the extension found on disk.

use super::{ImageExt, ImageId};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered `ImageId -> ImageExt` mapping.
///
/// Entries keep insertion order, which for the resolver is ascending probe
/// order. Each identifier appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionMap {
    entries: Vec<(ImageId, ImageExt)>,
}

impl ExtensionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the extension for an identifier.
    ///
    /// Returns `false` and leaves the map untouched if the identifier is
    /// already present.
    pub fn insert(&mut self, id: ImageId, ext: ImageExt) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.entries.push((id, ext));
        true
    }

    /// Look up the extension of an identifier.
    pub fn get(&self, id: &str) -> Option<ImageExt> {
        self.entries
            .iter()
            .find(|(i, _)| i.as_str() == id)
            .map(|(_, ext)| *ext)
    }

    /// Whether the identifier has an entry.
    pub fn contains(&self, id: &ImageId) -> bool {
        self.entries.iter().any(|(i, _)| i == id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ImageId, ImageExt)> {
        self.entries.iter().map(|(id, ext)| (id, *ext))
    }

    /// Identifiers whose extension is `ext`, in insertion order.
    pub fn with_extension(&self, ext: ImageExt) -> Vec<&ImageId> {
        self.iter()
            .filter(|(_, e)| *e == ext)
            .map(|(id, _)| id)
            .collect()
    }
}

impl Serialize for ExtensionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, ext) in &self.entries {
            map.serialize_entry(id, ext)?;
        }
        map.end()
    }
}
