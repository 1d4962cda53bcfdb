//! The four built-in passes.

use crate::error::Result;
use crate::index::generate_index_file;
use crate::model::{ImageExt, ImageId};
use crate::parser::{extract_blocks, scan_images};
use crate::render::to_json;
use crate::read_document;
use crate::resolve::resolve_extensions;

use super::{finish_report, Pass, PassConfig, PassReport};

fn read_html(config: &PassConfig) -> Result<String> {
    read_document(config.resolve_path(&config.html))
}

fn preview(images: &[ImageId], n: usize) -> String {
    let names: Vec<&str> = images.iter().take(n).map(|i| i.as_str()).collect();
    format!("[{}]", names.join(", "))
}

/// Probes the image directory for each identifier's file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionsPass;

impl Pass for ExtensionsPass {
    fn name(&self) -> &str {
        "extensions"
    }

    fn description(&self) -> &str {
        "Map each image identifier to the extension found on disk"
    }

    fn default_output(&self) -> &str {
        "extensions_map.json"
    }

    fn run(&self, config: &PassConfig) -> Result<PassReport> {
        let images_dir = config.resolve_path(&config.resolve.images_dir);
        let options = config.resolve.clone().with_images_dir(images_dir);
        let resolved = resolve_extensions(&options);

        let json = to_json(&resolved.map, config.json_format)?;
        let pngs: Vec<&str> = resolved
            .with_extension(ImageExt::Png)
            .into_iter()
            .map(ImageId::as_str)
            .collect();

        let report = PassReport::new(self.name(), resolved.found(), json)
            .with_warnings(resolved.warnings())
            .with_detail(format!("Found extensions for {} images", resolved.found()))
            .with_detail(format!("PNG files: [{}]", pngs.join(", ")));
        finish_report(self, config, report)
    }
}

/// Groups image references under the numbered block marker preceding them.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlocksPass;

impl Pass for BlocksPass {
    fn name(&self) -> &str {
        "blocks"
    }

    fn description(&self) -> &str {
        "Group images by the numbered block marker above them"
    }

    fn default_output(&self) -> &str {
        "blocks_structure.json"
    }

    fn run(&self, config: &PassConfig) -> Result<PassReport> {
        let html = read_html(config)?;
        let blocks = extract_blocks(&html, &config.scan)?;
        let json = to_json(&blocks, config.json_format)?;

        let mut report = PassReport::new(self.name(), blocks.block_count(), json);
        for (label, images) in blocks.iter() {
            report = report.with_detail(format!(
                "Block {}: {} images, first 5: {}",
                label,
                images.len(),
                preview(images, 5)
            ));
        }
        report = report
            .with_detail(format!("Total blocks: {}", blocks.block_count()))
            .with_detail(format!(
                "Total unique images across blocks: {}",
                blocks.image_count()
            ));
        finish_report(self, config, report)
    }
}

/// Slices the document's flat image sequence into the configured catalog layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructurePass;

impl Pass for StructurePass {
    fn name(&self) -> &str {
        "structure"
    }

    fn description(&self) -> &str {
        "Build the catalog structure from the layout table"
    }

    fn default_output(&self) -> &str {
        "complete_structure.json"
    }

    fn run(&self, config: &PassConfig) -> Result<PassReport> {
        let html = read_html(config)?;
        let images = scan_images(&html, &config.scan)?;
        let structure = config.layout.apply(&images, config.layout_mode)?;
        let json = to_json(&structure, config.json_format)?;

        let mut warnings = Vec::new();
        let required = config.layout.required_images();
        if required > images.len() {
            warnings.push(format!(
                "Layout expects {} images but the document has {}; blocks were truncated",
                required,
                images.len()
            ));
        }

        let report = PassReport::new(self.name(), structure.section_count(), json)
            .with_warnings(warnings)
            .with_detail(format!("Unique images found: {}", images.len()))
            .with_detail(format!("Sections: {}", structure.section_count()));
        finish_report(self, config, report)
    }
}

/// Re-serializes the ordered identifier list as a JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexPass;

impl Pass for IndexPass {
    fn name(&self) -> &str {
        "index"
    }

    fn description(&self) -> &str {
        "Convert the ordered identifier list to JSON"
    }

    fn default_output(&self) -> &str {
        "index.json"
    }

    fn run(&self, config: &PassConfig) -> Result<PassReport> {
        let index = generate_index_file(config.resolve_path(&config.order_list))?;
        let json = to_json(&index, config.json_format)?;

        let first: Vec<&str> = index.iter().take(10).map(String::as_str).collect();
        let report = PassReport::new(self.name(), index.len(), json)
            .with_detail(format!("Index has {} images", index.len()))
            .with_detail(format!("First 10: [{}]", first.join(", ")));
        finish_report(self, config, report)
    }
}
