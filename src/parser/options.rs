//! Scanning options and configuration.

/// Default pattern for a block label line. Group 1 captures the label.
pub const DEFAULT_BLOCK_PATTERN: &str = r#"<p class="c9"><span[^>]*>(\d+)"#;

/// Default pattern for an image reference. Group 1 captures the identifier.
pub const DEFAULT_IMAGE_PATTERN: &str = r#"src="images/(image\d+)\.(jpg|png)""#;

/// Options for scanning markup.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Regex matching a block label; capture group 1 must be the integer label
    pub block_pattern: String,

    /// Regex matching an image reference; capture group 1 must be the identifier
    pub image_pattern: String,

    /// What to do when a block label appears a second time
    pub repeat_policy: RepeatPolicy,
}

impl ScanOptions {
    /// Create new scan options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the block label pattern.
    pub fn with_block_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.block_pattern = pattern.into();
        self
    }

    /// Set the image reference pattern.
    pub fn with_image_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.image_pattern = pattern.into();
        self
    }

    /// Set the repeated-label policy.
    pub fn with_repeat_policy(mut self, policy: RepeatPolicy) -> Self {
        self.repeat_policy = policy;
        self
    }

    /// Merge blocks whose label appears more than once.
    pub fn merge_repeated(mut self) -> Self {
        self.repeat_policy = RepeatPolicy::Merge;
        self
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            block_pattern: DEFAULT_BLOCK_PATTERN.to_string(),
            image_pattern: DEFAULT_IMAGE_PATTERN.to_string(),
            repeat_policy: RepeatPolicy::Reset,
        }
    }
}

/// Handling of a block label that reappears later in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatPolicy {
    /// The later block replaces the earlier one; earlier images are lost
    #[default]
    Reset,
    /// The later block's images are appended to the earlier block
    Merge,
}
