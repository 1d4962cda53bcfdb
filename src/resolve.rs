//! Image extension resolution.
//!
//! For every identifier in a numbered range, probes the image directory for
//! each candidate extension in preference order and records the first one
//! that exists. Identifiers with no matching file are reported, not failed.

use std::fs::File;
use std::io::{self, Read};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::model::{ExtensionMap, ImageExt, ImageId};

/// Filesystem access used by the resolver.
pub trait FileProbe {
    /// Whether a regular file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Up to `len` leading bytes of the file at `path`.
    fn read_head(&self, path: &Path, len: usize) -> io::Result<Vec<u8>>;
}

/// [`FileProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_head(&self, path: &Path, len: usize) -> io::Result<Vec<u8>> {
        let mut head = Vec::with_capacity(len);
        File::open(path)?.take(len as u64).read_to_end(&mut head)?;
        Ok(head)
    }
}

/// Options for extension resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Directory holding the image files
    pub images_dir: PathBuf,

    /// Identifier prefix (identifiers are `<prefix><n>`)
    pub prefix: String,

    /// Numbers to probe
    pub range: RangeInclusive<u32>,

    /// Candidate extensions in preference order
    pub extensions: Vec<ImageExt>,

    /// Also require the file's magic bytes to match the extension
    pub verify_content: bool,
}

impl ResolveOptions {
    /// Create new resolve options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image directory.
    pub fn with_images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = dir.into();
        self
    }

    /// Set the identifier prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Probe `1..=count`.
    pub fn with_count(mut self, count: u32) -> Self {
        self.range = 1..=count;
        self
    }

    /// Probe an explicit range.
    pub fn with_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.range = range;
        self
    }

    /// Set candidate extensions in preference order.
    pub fn with_extensions(mut self, extensions: Vec<ImageExt>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Enable or disable magic-byte verification.
    pub fn with_verify_content(mut self, verify: bool) -> Self {
        self.verify_content = verify;
        self
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("images"),
            prefix: "image".to_string(),
            range: 1..=205,
            extensions: ImageExt::ALL.to_vec(),
            verify_content: false,
        }
    }
}

/// An identifier for which no candidate file was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingImage {
    /// The identifier
    pub id: ImageId,
    /// Paths that were probed, in preference order
    pub candidates: Vec<PathBuf>,
}

impl MissingImage {
    /// Human-readable warning, e.g. `Neither images/image1.jpg nor images/image1.png found`.
    pub fn warning(&self) -> String {
        let paths: Vec<String> = self
            .candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        match paths.len() {
            0 => format!("No candidate extensions for {}", self.id),
            1 => format!("{} not found", paths[0]),
            _ => format!("Neither {} found", paths.join(" nor ")),
        }
    }
}

/// Outcome of extension resolution.
#[derive(Debug, Clone, Default)]
pub struct ExtensionReport {
    /// Identifiers that resolved, in probe order
    pub map: ExtensionMap,
    /// Identifiers that did not resolve, in probe order
    pub missing: Vec<MissingImage>,
}

impl ExtensionReport {
    /// Number of resolved identifiers.
    pub fn found(&self) -> usize {
        self.map.len()
    }

    /// Resolved identifiers with the given extension.
    pub fn with_extension(&self, ext: ImageExt) -> Vec<&ImageId> {
        self.map.with_extension(ext)
    }

    /// One warning line per missing identifier.
    pub fn warnings(&self) -> Vec<String> {
        self.missing.iter().map(MissingImage::warning).collect()
    }
}

/// Resolve extensions on the real filesystem.
///
/// # Example
/// ```no_run
/// use packscan::resolve::{resolve_extensions, ResolveOptions};
///
/// let report = resolve_extensions(&ResolveOptions::new().with_count(3));
/// for warning in report.warnings() {
///     println!("Warning: {}", warning);
/// }
/// ```
pub fn resolve_extensions(options: &ResolveOptions) -> ExtensionReport {
    resolve_extensions_with(&FsProbe, options)
}

/// Resolve extensions through a custom probe.
pub fn resolve_extensions_with<P: FileProbe + ?Sized>(
    probe: &P,
    options: &ResolveOptions,
) -> ExtensionReport {
    let mut report = ExtensionReport::default();

    for n in options.range.clone() {
        let id = ImageId::numbered(&options.prefix, n);
        let candidates: Vec<(ImageExt, PathBuf)> = options
            .extensions
            .iter()
            .map(|ext| (*ext, options.images_dir.join(id.file_name(*ext))))
            .collect();

        let found = candidates
            .iter()
            .find(|(ext, path)| accept(probe, *ext, path, options.verify_content))
            .map(|(ext, _)| *ext);

        match found {
            Some(ext) => {
                report.map.insert(id, ext);
            }
            None => {
                let missing = MissingImage {
                    id,
                    candidates: candidates.into_iter().map(|(_, p)| p).collect(),
                };
                log::warn!("{}", missing.warning());
                report.missing.push(missing);
            }
        }
    }

    report
}

/// Whether a candidate file counts as present.
fn accept<P: FileProbe + ?Sized>(probe: &P, ext: ImageExt, path: &Path, verify: bool) -> bool {
    if !probe.exists(path) {
        return false;
    }
    if !verify {
        return true;
    }

    match probe.read_head(path, ImageExt::sniff_len()) {
        Ok(head) if head.starts_with(ext.magic()) => true,
        Ok(head) => {
            match ImageExt::sniff(&head) {
                Some(actual) => log::warn!(
                    "{} has {} content, skipping",
                    path.display(),
                    actual
                ),
                None => log::warn!("{} is not a recognized image, skipping", path.display()),
            }
            false
        }
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory probe: path -> file contents.
    #[derive(Default)]
    struct MemProbe {
        files: HashMap<PathBuf, Vec<u8>>,
    }

    impl MemProbe {
        fn with(mut self, path: &str, data: &[u8]) -> Self {
            self.files.insert(PathBuf::from(path), data.to_vec());
            self
        }
    }

    impl FileProbe for MemProbe {
        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn read_head(&self, path: &Path, len: usize) -> io::Result<Vec<u8>> {
            self.files
                .get(path)
                .map(|d| d[..d.len().min(len)].to_vec())
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
        }
    }

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0];
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_only_png_present() {
        let probe = MemProbe::default().with("images/image2.png", PNG);
        let report = resolve_extensions_with(&probe, &ResolveOptions::new().with_count(3));

        assert_eq!(report.found(), 1);
        assert_eq!(report.map.get("image2"), Some(ImageExt::Png));
        assert_eq!(
            report.warnings(),
            vec![
                format!(
                    "Neither {} nor {} found",
                    Path::new("images").join("image1.jpg").display(),
                    Path::new("images").join("image1.png").display()
                ),
                format!(
                    "Neither {} nor {} found",
                    Path::new("images").join("image3.jpg").display(),
                    Path::new("images").join("image3.png").display()
                ),
            ]
        );
    }

    #[test]
    fn test_prefers_first_extension() {
        let probe = MemProbe::default()
            .with("images/image1.jpg", JPEG)
            .with("images/image1.png", PNG);
        let report = resolve_extensions_with(&probe, &ResolveOptions::new().with_count(1));
        assert_eq!(report.map.get("image1"), Some(ImageExt::Jpg));

        let options = ResolveOptions::new()
            .with_count(1)
            .with_extensions(vec![ImageExt::Png, ImageExt::Jpg]);
        let report = resolve_extensions_with(&probe, &options);
        assert_eq!(report.map.get("image1"), Some(ImageExt::Png));
    }

    #[test]
    fn test_verify_skips_mislabelled_file() {
        let probe = MemProbe::default()
            .with("images/image1.jpg", PNG)
            .with("images/image1.png", PNG)
            .with("images/image2.jpg", b"garbage");
        let options = ResolveOptions::new().with_count(2).with_verify_content(true);
        let report = resolve_extensions_with(&probe, &options);

        assert_eq!(report.map.get("image1"), Some(ImageExt::Png));
        assert_eq!(report.map.get("image2"), None);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].id.as_str(), "image2");
    }

    #[test]
    fn test_empty_range() {
        let probe = MemProbe::default();
        #[allow(clippy::reversed_empty_ranges)]
        let options = ResolveOptions::new().with_range(5..=4);
        let report = resolve_extensions_with(&probe, &options);
        assert!(report.map.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_warning_single_candidate() {
        let missing = MissingImage {
            id: "image9".into(),
            candidates: vec![PathBuf::from("image9.png")],
        };
        assert_eq!(missing.warning(), "image9.png not found");
    }
}
