//! Asset groups
//!
//! A group is a named set of file extensions (documents, scripts, ...).
//! The report carries one diff per enabled group plus the `all` group,
//! which never filters.

use crate::diff::{DiffOptions, DiffResult, StatsDiff};
use crate::manifest::Asset;
use serde::Serialize;

/// Default extensions per built-in group
pub const DEFAULT_DOCUMENT_EXTENSIONS: &str = "html,htm";
/// Default script extensions
pub const DEFAULT_SCRIPT_EXTENSIONS: &str = "js,mjs,cjs";
/// Default stylesheet extensions
pub const DEFAULT_STYLESHEET_EXTENSIONS: &str = "css";
/// Default image extensions
pub const DEFAULT_IMAGE_EXTENSIONS: &str = "png,jpg,jpeg,gif,svg,webp,avif,ico";
/// The "others" group is disabled unless configured
pub const DEFAULT_OTHER_EXTENSIONS: &str = "";

/// Which assets a group covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupExtensions {
    /// Every asset
    All,
    /// Assets ending in one of these extensions
    Only(Vec<String>),
    /// Group disabled
    Skip,
}

impl GroupExtensions {
    /// Parse a comma separated extension list; empty input disables the group
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::groups::GroupExtensions;
    ///
    /// assert_eq!(
    ///     GroupExtensions::parse(" js, mjs "),
    ///     GroupExtensions::Only(vec!["js".to_string(), "mjs".to_string()])
    /// );
    /// assert_eq!(GroupExtensions::parse(""), GroupExtensions::Skip);
    /// ```
    pub fn parse(expression: &str) -> Self {
        let extensions: Vec<String> = expression
            .split(',')
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
            .map(str::to_string)
            .collect();

        if extensions.is_empty() {
            Self::Skip
        } else {
            Self::Only(extensions)
        }
    }
}

/// A named extension class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetGroup {
    /// Group name as shown in the report
    pub name: String,
    /// Extensions covered
    pub extensions: GroupExtensions,
}

impl AssetGroup {
    /// Create a group from a comma separated extension list
    pub fn new(name: impl Into<String>, expression: &str) -> Self {
        Self {
            name: name.into(),
            extensions: GroupExtensions::parse(expression),
        }
    }

    /// The unfiltered `all` group
    pub fn all() -> Self {
        Self {
            name: "all".to_string(),
            extensions: GroupExtensions::All,
        }
    }

    /// Diff options for this group, `None` when disabled
    pub fn diff_options(&self, threshold: u64) -> Option<DiffOptions> {
        let options = DiffOptions::new().with_threshold(threshold);
        match &self.extensions {
            GroupExtensions::All => Some(options),
            GroupExtensions::Only(extensions) => Some(options.with_extensions(extensions)),
            GroupExtensions::Skip => None,
        }
    }
}

/// Extension lists for the built-in groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupExtensionLists {
    /// Documents, e.g. `html`
    pub documents: String,
    /// Scripts, e.g. `js`
    pub scripts: String,
    /// Stylesheets, e.g. `css`
    pub stylesheets: String,
    /// Images, e.g. `png`
    pub images: String,
    /// Anything else worth tracking
    pub others: String,
}

impl Default for GroupExtensionLists {
    fn default() -> Self {
        Self {
            documents: DEFAULT_DOCUMENT_EXTENSIONS.to_string(),
            scripts: DEFAULT_SCRIPT_EXTENSIONS.to_string(),
            stylesheets: DEFAULT_STYLESHEET_EXTENSIONS.to_string(),
            images: DEFAULT_IMAGE_EXTENSIONS.to_string(),
            others: DEFAULT_OTHER_EXTENSIONS.to_string(),
        }
    }
}

impl GroupExtensionLists {
    /// `all` followed by the built-in groups, in report order
    pub fn groups(&self) -> Vec<AssetGroup> {
        vec![
            AssetGroup::all(),
            AssetGroup::new("documents", &self.documents),
            AssetGroup::new("scripts", &self.scripts),
            AssetGroup::new("stylesheets", &self.stylesheets),
            AssetGroup::new("images", &self.images),
            AssetGroup::new("others", &self.others),
        ]
    }
}

/// Diff of a single group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDiff {
    /// Group name
    pub group: String,
    /// Diff restricted to the group's assets
    pub result: DiffResult,
}

/// Diff every enabled group; disabled groups are left out
///
/// # Examples
///
/// ```
/// use bundle_diff::groups::{diff_groups, AssetGroup};
/// use bundle_diff::manifest::Asset;
///
/// let groups = vec![AssetGroup::all(), AssetGroup::new("styles", "css"), AssetGroup::new("none", "")];
/// let base = vec![Asset::new("a.js", 100), Asset::new("b.css", 100)];
/// let head = vec![Asset::new("a.js", 150), Asset::new("b.css", 50)];
///
/// let diffs = diff_groups(&groups, &base, &head, 0);
/// assert_eq!(diffs.len(), 2);
/// assert_eq!(diffs[0].result.total.diff, 0);
/// assert_eq!(diffs[1].result.total.diff, -50);
/// ```
pub fn diff_groups(
    groups: &[AssetGroup],
    base: &[Asset],
    head: &[Asset],
    threshold: u64,
) -> Vec<GroupDiff> {
    groups
        .iter()
        .filter_map(|group| {
            let options = group.diff_options(threshold)?;
            Some(GroupDiff {
                group: group.name.clone(),
                result: StatsDiff::new(options).compute(base, head),
            })
        })
        .collect()
}
