//! Configuration file data structures

use serde::{Deserialize, Serialize};

/// Configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".bundle-diff.toml";

/// `.bundle-diff.toml` contents; every field is optional and is overridden
/// by command line flags or action inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// Extension lists per asset group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionSettings>,

    /// Byte threshold below which an asset counts as unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u64>,

    /// Announcement thresholds in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<AnnouncementSettings>,

    /// Comment heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_title: Option<String>,

    /// Include the per-asset breakdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed: Option<bool>,

    /// Include unchanged assets in the breakdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
}

/// `[extensions]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExtensionSettings {
    /// Document extensions, comma separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<String>,
    /// Script extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<String>,
    /// Stylesheet extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheets: Option<String>,
    /// Image extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    /// Other extensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others: Option<String>,
}

/// `[announcement]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AnnouncementSettings {
    /// Minimum increase (percent) worth a comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increase: Option<f64>,
    /// Minimum decrease (percent, magnitude) worth a comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decrease: Option<f64>,
}
