//! Run configuration
//!
//! All behavioral flags end up in one immutable [`ReportConfig`], built once
//! from command line / action inputs layered over `.bundle-diff.toml`:
//! - inputs win over the file
//! - the file wins over built-in defaults
//! - numeric inputs arrive as strings and are validated here

pub mod file;
pub mod loader;

pub use file::{ConfigFile, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;

use crate::error::BundleDiffError;
use crate::gate::AnnouncementGate;
use crate::groups::{AssetGroup, GroupExtensionLists};
use crate::report::DEFAULT_TITLE;
use std::path::PathBuf;

/// Raw, unvalidated inputs as supplied by the invoking environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInputs {
    /// Path to the base stats manifest
    pub base_stats_path: PathBuf,
    /// Path to the head stats manifest
    pub head_stats_path: PathBuf,
    /// Document extensions
    pub document_extensions: Option<String>,
    /// Script extensions
    pub script_extensions: Option<String>,
    /// Stylesheet extensions
    pub stylesheet_extensions: Option<String>,
    /// Image extensions
    pub image_extensions: Option<String>,
    /// Other extensions
    pub other_extensions: Option<String>,
    /// Byte threshold
    pub threshold: Option<String>,
    /// Increase announcement threshold (percent)
    pub announcement_percentage_threshold_increase: Option<String>,
    /// Decrease announcement threshold (percent)
    pub announcement_percentage_threshold_decrease: Option<String>,
    /// Comment heading
    pub comment_title: Option<String>,
    /// Per-asset breakdown requested
    pub detailed: bool,
    /// Unchanged assets requested in the breakdown
    pub all: bool,
}

/// Validated configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Path to the base stats manifest
    pub base_stats_path: PathBuf,
    /// Path to the head stats manifest
    pub head_stats_path: PathBuf,
    /// Extension lists per group
    pub extensions: GroupExtensionLists,
    /// Byte threshold for bigger/smaller classification (default 0)
    pub threshold: u64,
    /// Announcement thresholds (default: always announce)
    pub announcement: AnnouncementGate,
    /// Comment heading (default "Bundle difference")
    pub comment_title: String,
    /// Render the per-asset breakdown (default false)
    pub detailed: bool,
    /// Include unchanged assets in the breakdown (default false)
    pub all: bool,
}

impl ReportConfig {
    /// Configuration with defaults for everything but the two paths
    pub fn new(base_stats_path: impl Into<PathBuf>, head_stats_path: impl Into<PathBuf>) -> Self {
        Self {
            base_stats_path: base_stats_path.into(),
            head_stats_path: head_stats_path.into(),
            extensions: GroupExtensionLists::default(),
            threshold: 0,
            announcement: AnnouncementGate::default(),
            comment_title: DEFAULT_TITLE.to_string(),
            detailed: false,
            all: false,
        }
    }

    /// Validate `inputs` and layer them over `file`
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::config::{ConfigFile, RawInputs, ReportConfig};
    ///
    /// let inputs = RawInputs {
    ///     base_stats_path: "base.json".into(),
    ///     head_stats_path: "head.json".into(),
    ///     threshold: Some("10".to_string()),
    ///     ..RawInputs::default()
    /// };
    /// let config = ReportConfig::resolve(inputs, ConfigFile::default())?;
    /// assert_eq!(config.threshold, 10);
    /// assert_eq!(config.comment_title, "Bundle difference");
    /// # Ok::<(), bundle_diff::error::BundleDiffError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`BundleDiffError::InvalidNumber`] when a numeric input is not a
    /// finite number (or, for the byte threshold, not a whole byte count).
    pub fn resolve(inputs: RawInputs, file: ConfigFile) -> Result<Self, BundleDiffError> {
        let mut config = Self::new(inputs.base_stats_path, inputs.head_stats_path);

        let file_extensions = file.extensions.unwrap_or_default();
        let defaults = GroupExtensionLists::default();
        config.extensions = GroupExtensionLists {
            documents: inputs
                .document_extensions
                .or(file_extensions.documents)
                .unwrap_or(defaults.documents),
            scripts: inputs
                .script_extensions
                .or(file_extensions.scripts)
                .unwrap_or(defaults.scripts),
            stylesheets: inputs
                .stylesheet_extensions
                .or(file_extensions.stylesheets)
                .unwrap_or(defaults.stylesheets),
            images: inputs
                .image_extensions
                .or(file_extensions.images)
                .unwrap_or(defaults.images),
            others: inputs
                .other_extensions
                .or(file_extensions.others)
                .unwrap_or(defaults.others),
        };

        config.threshold = match parse_byte_count("threshold", inputs.threshold.as_deref())? {
            Some(bytes) => bytes,
            None => file.threshold.unwrap_or(0),
        };

        let file_announcement = file.announcement.unwrap_or_default();
        let increase = parse_percentage(
            "announcement_percentage_threshold_increase",
            inputs.announcement_percentage_threshold_increase.as_deref(),
        )?
        .or(file_announcement.increase);
        let decrease = parse_percentage(
            "announcement_percentage_threshold_decrease",
            inputs.announcement_percentage_threshold_decrease.as_deref(),
        )?
        .or(file_announcement.decrease);
        config.announcement = AnnouncementGate::new(increase, decrease);

        if let Some(title) = inputs
            .comment_title
            .filter(|t| !t.trim().is_empty())
            .or(file.comment_title)
        {
            config.comment_title = title;
        }

        config.detailed = inputs.detailed || file.detailed.unwrap_or(false);
        config.all = inputs.all || file.all.unwrap_or(false);

        log::debug!("resolved configuration: {:?}", config);
        Ok(config)
    }

    /// `all` followed by the built-in groups
    pub fn groups(&self) -> Vec<AssetGroup> {
        self.extensions.groups()
    }
}

/// Parse an optional percentage; blank input counts as unset
pub fn parse_percentage(option: &str, raw: Option<&str>) -> Result<Option<f64>, BundleDiffError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(BundleDiffError::InvalidNumber {
            option: option.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Parse an optional byte count; blank input counts as unset
///
/// Whole-valued decimals such as `"5.0"` are accepted.
pub fn parse_byte_count(option: &str, raw: Option<&str>) -> Result<Option<u64>, BundleDiffError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    if let Ok(bytes) = raw.parse::<u64>() {
        return Ok(Some(bytes));
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => {
            Ok(Some(value as u64))
        }
        _ => Err(BundleDiffError::InvalidNumber {
            option: option.to_string(),
            value: raw.to_string(),
        }),
    }
}
