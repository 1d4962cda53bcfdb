//! Line-oriented block extraction.
//!
//! Extraction is a fold over the document's lines. [`BlockFold`] carries
//! the block currently being filled plus every block already closed, so a
//! caller can inspect the state after any prefix of the document.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::{BlockMap, ImageId};

use super::{LineKind, Patterns, RepeatPolicy, ScanOptions};

/// The block currently receiving images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBlock {
    /// Label captured from the marker line
    pub label: u32,
    /// Images collected so far, deduplicated
    pub images: Vec<ImageId>,
}

impl OpenBlock {
    fn new(label: u32) -> Self {
        Self {
            label,
            images: Vec::new(),
        }
    }
}

/// Fold state for block extraction.
#[derive(Debug, Clone)]
pub struct BlockFold {
    policy: RepeatPolicy,
    open: Option<OpenBlock>,
    closed: BTreeMap<u32, Vec<ImageId>>,
}

impl BlockFold {
    /// Start a fold with no open block.
    pub fn new(policy: RepeatPolicy) -> Self {
        Self {
            policy,
            open: None,
            closed: BTreeMap::new(),
        }
    }

    /// The block currently being filled.
    pub fn open_block(&self) -> Option<&OpenBlock> {
        self.open.as_ref()
    }

    /// Blocks closed so far, including empty ones.
    pub fn closed_blocks(&self) -> &BTreeMap<u32, Vec<ImageId>> {
        &self.closed
    }

    /// Feed one line.
    ///
    /// A label line closes the open block and opens a new one; the rest of
    /// that line is not scanned. A label that does not parse closes the
    /// open block and drops images up to the next label. Other lines add
    /// their image references to the open block. Lines before the first
    /// label are ignored.
    pub fn step(mut self, patterns: &Patterns, line: &str) -> Self {
        match patterns.classify(line) {
            LineKind::Label(label) => {
                self.close();
                self.open = Some(OpenBlock::new(label));
                return self;
            }
            LineKind::BadLabel => {
                self.close();
                return self;
            }
            LineKind::Content => {}
        }

        if let Some(open) = self.open.as_mut() {
            for id in patterns.image_refs(line) {
                if !open.images.contains(&id) {
                    open.images.push(id);
                }
            }
        }
        self
    }

    /// Close the open block and return the non-empty blocks.
    pub fn finish(mut self) -> BlockMap {
        self.close();
        BlockMap::from_blocks(self.closed)
    }

    fn close(&mut self) {
        let Some(block) = self.open.take() else {
            return;
        };

        match self.policy {
            RepeatPolicy::Reset => {
                if self.closed.insert(block.label, block.images).is_some() {
                    log::debug!("Block {} repeated, earlier images discarded", block.label);
                }
            }
            RepeatPolicy::Merge => {
                let merged = self.closed.entry(block.label).or_default();
                for id in block.images {
                    if !merged.contains(&id) {
                        merged.push(id);
                    }
                }
            }
        }
    }
}

/// Extract numbered image blocks from markup.
///
/// # Example
///
/// ```
/// use packscan::parser::{extract_blocks, ScanOptions};
///
/// let html = "<p class=\"c9\"><span>7</span>\n<img src=\"images/image1.jpg\">\n";
/// let blocks = extract_blocks(html, &ScanOptions::default()).unwrap();
/// assert_eq!(blocks.get(7).unwrap().len(), 1);
/// ```
pub fn extract_blocks(html: &str, options: &ScanOptions) -> Result<BlockMap> {
    let patterns = Patterns::compile(options)?;
    let fold = html
        .lines()
        .fold(BlockFold::new(options.repeat_policy), |acc, line| {
            acc.step(&patterns, line)
        });
    Ok(fold.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(n: u32) -> String {
        format!(r#"<img src="images/image{}.jpg">"#, n)
    }

    fn label(n: u32) -> String {
        format!(r#"<p class="c9"><span>{}</span>"#, n)
    }

    fn names(images: &[ImageId]) -> Vec<&str> {
        images.iter().map(|i| i.as_str()).collect()
    }

    #[test]
    fn test_two_blocks() {
        let html = [
            label(7),
            img(1),
            img(2),
            img(3),
            label(12),
            img(4),
            img(5),
        ]
        .join("\n");

        let blocks = extract_blocks(&html, &ScanOptions::default()).unwrap();
        assert_eq!(blocks.labels(), vec![7, 12]);
        assert_eq!(names(blocks.get(7).unwrap()), ["image1", "image2", "image3"]);
        assert_eq!(names(blocks.get(12).unwrap()), ["image4", "image5"]);
    }

    #[test]
    fn test_images_before_first_label_ignored() {
        let html = [img(9), label(3), img(1)].join("\n");
        let blocks = extract_blocks(&html, &ScanOptions::default()).unwrap();
        assert_eq!(names(blocks.get(3).unwrap()), ["image1"]);
        assert_eq!(blocks.image_count(), 1);
    }

    #[test]
    fn test_label_line_not_scanned_for_images() {
        let html = format!("{}{}\n{}", label(4), img(1), img(2));
        let blocks = extract_blocks(&html, &ScanOptions::default()).unwrap();
        assert_eq!(names(blocks.get(4).unwrap()), ["image2"]);
    }

    #[test]
    fn test_unparsable_label_closes_block() {
        let html = [
            label(4),
            img(1),
            r#"<p class="c9"><span>99999999999</span>"#.to_string(),
            img(2),
            label(5),
            img(3),
        ]
        .join("\n");
        let blocks = extract_blocks(&html, &ScanOptions::default()).unwrap();
        assert_eq!(names(blocks.get(4).unwrap()), ["image1"]);
        assert_eq!(names(blocks.get(5).unwrap()), ["image3"]);
        assert_eq!(blocks.image_count(), 2);
    }

    #[test]
    fn test_dedup_within_block_only() {
        let html = [
            label(1),
            format!("{}{}", img(1), img(1)),
            label(2),
            img(1),
        ]
        .join("\n");
        let blocks = extract_blocks(&html, &ScanOptions::default()).unwrap();
        assert_eq!(names(blocks.get(1).unwrap()), ["image1"]);
        assert_eq!(names(blocks.get(2).unwrap()), ["image1"]);
    }

    #[test]
    fn test_empty_blocks_dropped_and_sorted() {
        let html = [label(20), img(1), label(5), label(3), img(2)].join("\n");
        let blocks = extract_blocks(&html, &ScanOptions::default()).unwrap();
        assert_eq!(blocks.labels(), vec![3, 20]);
    }

    #[test]
    fn test_repeated_label_reset() {
        let html = [label(15), img(1), img(2), label(8), img(3), label(15), img(4)].join("\n");
        let blocks = extract_blocks(&html, &ScanOptions::default()).unwrap();
        assert_eq!(names(blocks.get(15).unwrap()), ["image4"]);
    }

    #[test]
    fn test_repeated_empty_label_erases_block() {
        let html = [label(15), img(1), label(15)].join("\n");
        let blocks = extract_blocks(&html, &ScanOptions::default()).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_repeated_label_merge() {
        let html = [label(15), img(1), img(2), label(8), img(3), label(15), img(2), img(4)].join("\n");
        let options = ScanOptions::new().merge_repeated();
        let blocks = extract_blocks(&html, &options).unwrap();
        assert_eq!(names(blocks.get(15).unwrap()), ["image1", "image2", "image4"]);
        assert_eq!(names(blocks.get(8).unwrap()), ["image3"]);
    }

    #[test]
    fn test_fold_state_is_observable() {
        let patterns = Patterns::compile(&ScanOptions::default()).unwrap();
        let fold = BlockFold::new(RepeatPolicy::Reset)
            .step(&patterns, &label(7))
            .step(&patterns, &img(1));

        let open = fold.open_block().unwrap();
        assert_eq!(open.label, 7);
        assert_eq!(names(&open.images), ["image1"]);
        assert!(fold.closed_blocks().is_empty());

        let fold = fold.step(&patterns, &label(9));
        assert_eq!(fold.open_block().unwrap().label, 9);
        assert_eq!(fold.closed_blocks().len(), 1);
    }
}
