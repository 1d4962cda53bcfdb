//! Flat image scan over a whole document.

use std::collections::HashSet;

use crate::error::Result;
use crate::model::ImageId;

use super::{Patterns, ScanOptions};

/// Every image referenced in the document, deduplicated, in first-seen order.
///
/// Block markers play no part here; the whole text is scanned in one go.
pub fn scan_images(html: &str, options: &ScanOptions) -> Result<Vec<ImageId>> {
    let patterns = Patterns::compile(options)?;
    let mut seen = HashSet::new();
    let images: Vec<ImageId> = patterns
        .image_refs(html)
        .filter(|id| seen.insert(id.clone()))
        .collect();

    log::debug!("Found {} unique images", images.len());
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let html = r#"<img src="images/image5.png"><p class="c9"><span>3</span>
<img src="images/image2.jpg">
<img src="images/image5.png"><img src="images/image1.jpg">"#;

        let images = scan_images(html, &ScanOptions::default()).unwrap();
        let names: Vec<&str> = images.iter().map(|i| i.as_str()).collect();
        assert_eq!(names, vec!["image5", "image2", "image1"]);
    }

    #[test]
    fn test_empty_document() {
        let images = scan_images("", &ScanOptions::default()).unwrap();
        assert!(images.is_empty());
    }
}
