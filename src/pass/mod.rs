//! Pass registry for running the extraction steps by name.
//!
//! Each pass reads one input artifact under a root directory and writes one
//! JSON artifact. Passes are independent; the registry only fixes the order
//! they run in when all of them are requested.
//!
//! # Example
//!
//! ```no_run
//! use packscan::pass::{PassConfig, PassRegistry};
//!
//! fn main() -> packscan::Result<()> {
//!     let registry = PassRegistry::with_defaults();
//!     let config = PassConfig::new().with_root("./export");
//!
//!     for report in registry.run_all(&config)? {
//!         println!("{}: {} entries", report.pass, report.entries);
//!     }
//!     Ok(())
//! }
//! ```

mod builtin;

pub use builtin::{BlocksPass, ExtensionsPass, IndexPass, StructurePass};

use crate::error::{Error, Result};
use crate::layout::{LayoutConfig, LayoutMode};
use crate::parser::ScanOptions;
use crate::render::{write_rendered, JsonFormat};
use crate::resolve::ResolveOptions;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Configuration shared by all passes.
#[derive(Debug, Clone)]
pub struct PassConfig {
    /// Directory relative paths are resolved against
    pub root: PathBuf,

    /// Markup document read by the block and structure passes
    pub html: PathBuf,

    /// Identifier list read by the index pass
    pub order_list: PathBuf,

    /// Extension resolution options (`images_dir` is relative to `root`)
    pub resolve: ResolveOptions,

    /// Markup scanning options
    pub scan: ScanOptions,

    /// Catalog layout for the structure pass
    pub layout: LayoutConfig,

    /// Out-of-range slice handling
    pub layout_mode: LayoutMode,

    /// Output JSON format
    pub json_format: JsonFormat,

    /// Write outputs to disk (otherwise only render them)
    pub write_output: bool,

    /// Output path overrides by pass name
    outputs: HashMap<String, PathBuf>,
}

impl PassConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the markup document.
    pub fn with_html(mut self, html: impl Into<PathBuf>) -> Self {
        self.html = html.into();
        self
    }

    /// Set the identifier list.
    pub fn with_order_list(mut self, path: impl Into<PathBuf>) -> Self {
        self.order_list = path.into();
        self
    }

    /// Set extension resolution options.
    pub fn with_resolve_options(mut self, options: ResolveOptions) -> Self {
        self.resolve = options;
        self
    }

    /// Set scan options.
    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.scan = options;
        self
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the layout mode.
    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    /// Set the JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Enable or disable writing outputs.
    pub fn with_write_output(mut self, write: bool) -> Self {
        self.write_output = write;
        self
    }

    /// Override the output path of one pass.
    pub fn with_output(mut self, pass: &str, path: impl Into<PathBuf>) -> Self {
        self.outputs.insert(pass.to_lowercase(), path.into());
        self
    }

    /// Resolve a path against the root directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Output path for a pass, honoring overrides.
    pub fn output_path(&self, pass: &dyn Pass) -> PathBuf {
        let path = self
            .outputs
            .get(&pass.name().to_lowercase())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(pass.default_output()));
        self.resolve_path(&path)
    }
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            html: PathBuf::from("wishlistpacks.html"),
            order_list: PathBuf::from("original_order.txt"),
            resolve: ResolveOptions::default(),
            scan: ScanOptions::default(),
            layout: LayoutConfig::default(),
            layout_mode: LayoutMode::default(),
            json_format: JsonFormat::default(),
            write_output: true,
            outputs: HashMap::new(),
        }
    }
}

/// Result of running one pass.
#[derive(Debug, Clone)]
pub struct PassReport {
    /// Pass name
    pub pass: String,

    /// Where the output was written, if it was
    pub output: Option<PathBuf>,

    /// Number of top-level entries in the output
    pub entries: usize,

    /// Non-fatal problems found while running
    pub warnings: Vec<String>,

    /// Short human-readable summary lines
    pub details: Vec<String>,

    /// The rendered output
    pub json: String,
}

impl PassReport {
    /// Create a report with no warnings or details.
    pub fn new(pass: impl Into<String>, entries: usize, json: String) -> Self {
        Self {
            pass: pass.into(),
            output: None,
            entries,
            warnings: Vec::new(),
            details: Vec::new(),
            json,
        }
    }

    /// Set warnings.
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Add a summary line.
    pub fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    /// Whether any warnings were raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// One standalone extraction step.
///
/// Implement this trait to add a pass to the registry.
pub trait Pass: Send + Sync {
    /// Unique pass name (lowercase).
    fn name(&self) -> &str;

    /// One-line description.
    fn description(&self) -> &str;

    /// Output file name used when no override is configured.
    fn default_output(&self) -> &str;

    /// Run the pass.
    fn run(&self, config: &PassConfig) -> Result<PassReport>;
}

/// Write a rendered report to its output path when enabled.
pub(crate) fn finish_report(
    pass: &dyn Pass,
    config: &PassConfig,
    mut report: PassReport,
) -> Result<PassReport> {
    if config.write_output {
        let path = config.output_path(pass);
        write_rendered(&path, &report.json)?;
        report.output = Some(path);
    }
    Ok(report)
}

/// Registry of passes, kept in registration order.
pub struct PassRegistry {
    passes: Vec<Arc<dyn Pass>>,
    by_name: HashMap<String, usize>,
}

impl PassRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            passes: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the four built-in passes.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ExtensionsPass));
        registry.register(Arc::new(BlocksPass));
        registry.register(Arc::new(StructurePass));
        registry.register(Arc::new(IndexPass));
        registry
    }

    /// Register a pass. A pass with the same name is replaced in place.
    pub fn register(&mut self, pass: Arc<dyn Pass>) {
        let key = pass.name().to_lowercase();
        match self.by_name.get(&key) {
            Some(&i) => self.passes[i] = pass,
            None => {
                self.by_name.insert(key, self.passes.len());
                self.passes.push(pass);
            }
        }
    }

    /// Get a pass by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<Arc<dyn Pass>> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&i| self.passes[i].clone())
    }

    /// Whether a pass is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Pass names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Number of registered passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run one pass by name.
    pub fn run(&self, name: &str, config: &PassConfig) -> Result<PassReport> {
        let pass = self
            .get(name)
            .ok_or_else(|| Error::UnknownPass(name.to_string()))?;
        log::debug!("Running pass {}", pass.name());
        pass.run(config)
    }

    /// Run every pass in registration order, stopping at the first error.
    pub fn run_all(&self, config: &PassConfig) -> Result<Vec<PassReport>> {
        self.passes
            .iter()
            .map(|pass| {
                log::debug!("Running pass {}", pass.name());
                pass.run(config)
            })
            .collect()
    }
}

impl Default for PassRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullPass;

    impl Pass for NullPass {
        fn name(&self) -> &str {
            "Null"
        }

        fn description(&self) -> &str {
            "Does nothing"
        }

        fn default_output(&self) -> &str {
            "null.json"
        }

        fn run(&self, _config: &PassConfig) -> Result<PassReport> {
            Ok(PassReport::new(self.name(), 0, "null".into()))
        }
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = PassRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec!["extensions", "blocks", "structure", "index"]
        );
        assert!(registry.contains("BLOCKS"));
        assert!(!registry.contains("thumbnails"));
    }

    #[test]
    fn test_registry_replace_keeps_position() {
        let mut registry = PassRegistry::new();
        registry.register(Arc::new(NullPass));
        registry.register(Arc::new(IndexPass));
        registry.register(Arc::new(NullPass));
        assert_eq!(registry.names(), vec!["Null", "index"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_run_unknown_pass() {
        let registry = PassRegistry::new();
        let err = registry.run("blocks", &PassConfig::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownPass(name) if name == "blocks"));
    }

    #[test]
    fn test_output_path_override() {
        let config = PassConfig::new()
            .with_root("export")
            .with_output("NULL", "custom/out.json");
        assert_eq!(
            config.output_path(&NullPass),
            Path::new("export").join("custom/out.json")
        );
        assert_eq!(
            config.output_path(&IndexPass),
            Path::new("export").join("index.json")
        );
    }

    #[test]
    fn test_no_write_leaves_output_unset() {
        let config = PassConfig::new().with_write_output(false);
        let report = finish_report(&NullPass, &config, PassReport::new("Null", 0, "null".into())).unwrap();
        assert!(report.output.is_none());
    }
}
