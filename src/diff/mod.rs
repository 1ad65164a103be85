//! Size diff between two asset lists
//!
//! Assets are matched by name. Each name present in either list lands in
//! exactly one of five categories (added, removed, bigger, smaller, same
//! size) and contributes to a single aggregate total.
//!
//! Percentages are `diff / old * 100`. A change from zero has no defined
//! percentage and is reported as `None` (rendered as "new"); zero to zero
//! is `Some(0.0)`.
//!
//! Byte arithmetic saturates: totals stop at `u64::MAX` and differences at
//! the `i64` range.

use crate::manifest::Asset;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Name used for the aggregate entry
pub const TOTAL_NAME: &str = "total";

/// Size change of one asset (or of the total)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    /// Asset name
    pub name: String,
    /// Size in the base snapshot (0 if added)
    pub old_size: u64,
    /// Size in the head snapshot (0 if removed)
    pub new_size: u64,
    /// `new_size - old_size`
    pub diff: i64,
    /// Change relative to `old_size`, `None` when growing from zero
    pub diff_percentage: Option<f64>,
}

impl DiffEntry {
    /// Create an entry, deriving `diff` and `diff_percentage`
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::diff::DiffEntry;
    ///
    /// let entry = DiffEntry::new("main.js", 1000, 1200);
    /// assert_eq!(entry.diff, 200);
    /// assert_eq!(entry.diff_percentage, Some(20.0));
    ///
    /// let added = DiffEntry::new("vendor.js", 0, 500);
    /// assert_eq!(added.diff_percentage, None);
    /// ```
    pub fn new(name: impl Into<String>, old_size: u64, new_size: u64) -> Self {
        let diff = signed_diff(old_size, new_size);
        Self {
            name: name.into(),
            old_size,
            new_size,
            diff,
            diff_percentage: diff_percentage(old_size, diff),
        }
    }
}

/// `new - old` as a signed byte count, saturating at the `i64` range
///
/// # Examples
///
/// ```
/// use bundle_diff::diff::signed_diff;
///
/// assert_eq!(signed_diff(1000, 1200), 200);
/// assert_eq!(signed_diff(0, u64::MAX), i64::MAX);
/// ```
pub fn signed_diff(old: u64, new: u64) -> i64 {
    let diff = i128::from(new) - i128::from(old);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}

fn saturating_total<'a>(sizes: impl Iterator<Item = &'a u64>) -> u64 {
    sizes.fold(0, |total, size| total.saturating_add(*size))
}

/// Percentage change relative to `old_size`
fn diff_percentage(old_size: u64, diff: i64) -> Option<f64> {
    if old_size == 0 {
        if diff == 0 {
            Some(0.0)
        } else {
            None
        }
    } else {
        Some(diff as f64 * 100.0 / old_size as f64)
    }
}

/// Category an asset falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Only in head
    Added,
    /// Only in base
    Removed,
    /// Grew by at least the threshold
    Bigger,
    /// Shrank by at least the threshold
    Smaller,
    /// Changed by less than the threshold
    SameSize,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Bigger => "bigger",
            Self::Smaller => "smaller",
            Self::SameSize => "unchanged",
        };
        f.write_str(label)
    }
}

/// Partition of all compared assets plus their aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffResult {
    /// Aggregate over every compared asset
    pub total: DiffEntry,
    /// Assets only present in head
    pub added: Vec<DiffEntry>,
    /// Assets only present in base
    pub removed: Vec<DiffEntry>,
    /// Assets that grew
    pub bigger: Vec<DiffEntry>,
    /// Assets that shrank
    pub smaller: Vec<DiffEntry>,
    /// Assets whose change is below the threshold
    pub same_size: Vec<DiffEntry>,
}

impl Default for DiffResult {
    fn default() -> Self {
        Self {
            total: DiffEntry::new(TOTAL_NAME, 0, 0),
            added: Vec::new(),
            removed: Vec::new(),
            bigger: Vec::new(),
            smaller: Vec::new(),
            same_size: Vec::new(),
        }
    }
}

impl DiffResult {
    /// All entries with their category, in report order
    pub fn entries(&self) -> impl Iterator<Item = (ChangeKind, &DiffEntry)> {
        tagged(ChangeKind::Added, &self.added)
            .chain(tagged(ChangeKind::Removed, &self.removed))
            .chain(tagged(ChangeKind::Bigger, &self.bigger))
            .chain(tagged(ChangeKind::Smaller, &self.smaller))
            .chain(tagged(ChangeKind::SameSize, &self.same_size))
    }

    /// Number of compared assets
    pub fn asset_count(&self) -> usize {
        self.added.len()
            + self.removed.len()
            + self.bigger.len()
            + self.smaller.len()
            + self.same_size.len()
    }
}

fn tagged(
    kind: ChangeKind,
    entries: &[DiffEntry],
) -> impl Iterator<Item = (ChangeKind, &DiffEntry)> {
    entries.iter().map(move |entry| (kind, entry))
}

/// Options controlling which assets are compared and how
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffOptions {
    extensions: Option<Vec<String>>,
    threshold: u64,
}

impl DiffOptions {
    /// Compare every asset, no threshold
    pub fn new() -> Self {
        Self::default()
    }

    /// Only compare assets whose name ends in `.<ext>` for one of `extensions`
    ///
    /// A leading dot is accepted and matching ignores case.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        self.extensions = Some(normalized);
        self
    }

    /// Changes smaller than `bytes` (in magnitude) count as same size
    pub fn with_threshold(mut self, bytes: u64) -> Self {
        self.threshold = bytes;
        self
    }

    fn matches(&self, name: &str) -> bool {
        match &self.extensions {
            None => true,
            Some(extensions) => {
                let name = name.to_lowercase();
                extensions.iter().any(|ext| {
                    name.len() > ext.len()
                        && name.ends_with(ext.as_str())
                        && name[..name.len() - ext.len()].ends_with('.')
                })
            }
        }
    }

    fn classify(&self, diff: i64) -> ChangeKind {
        if diff.unsigned_abs() < self.threshold || diff == 0 {
            ChangeKind::SameSize
        } else if diff > 0 {
            ChangeKind::Bigger
        } else {
            ChangeKind::Smaller
        }
    }
}

/// Diff engine
///
/// # Examples
///
/// ```
/// use bundle_diff::diff::{DiffOptions, StatsDiff};
/// use bundle_diff::manifest::Asset;
///
/// let base = vec![Asset::new("main.js", 1000)];
/// let head = vec![Asset::new("main.js", 1200), Asset::new("vendor.js", 500)];
///
/// let result = StatsDiff::new(DiffOptions::new()).compute(&base, &head);
/// assert_eq!(result.bigger[0].diff, 200);
/// assert_eq!(result.added[0].name, "vendor.js");
/// assert_eq!(result.total.diff, 700);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatsDiff {
    options: DiffOptions,
}

impl StatsDiff {
    /// Create a diff engine with the given options
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Compare `base` against `head`
    ///
    /// Removed and matched assets keep base order; added assets keep head
    /// order. A name repeated within one list only counts once (first wins).
    pub fn compute(&self, base: &[Asset], head: &[Asset]) -> DiffResult {
        let base_sizes = self.index(base);
        let head_sizes = self.index(head);

        let mut result = DiffResult::default();
        let mut seen: HashSet<&str> = HashSet::with_capacity(base_sizes.len() + head_sizes.len());

        for asset in base.iter().filter(|a| self.options.matches(&a.name)) {
            if !seen.insert(asset.name.as_str()) {
                continue;
            }
            match head_sizes.get(asset.name.as_str()) {
                None => result
                    .removed
                    .push(DiffEntry::new(asset.name.as_str(), asset.size, 0)),
                Some(&new_size) => {
                    let entry = DiffEntry::new(asset.name.as_str(), asset.size, new_size);
                    match self.options.classify(entry.diff) {
                        ChangeKind::Bigger => result.bigger.push(entry),
                        ChangeKind::Smaller => result.smaller.push(entry),
                        _ => result.same_size.push(entry),
                    }
                }
            }
        }

        for asset in head.iter().filter(|a| self.options.matches(&a.name)) {
            if base_sizes.contains_key(asset.name.as_str()) || !seen.insert(asset.name.as_str()) {
                continue;
            }
            result
                .added
                .push(DiffEntry::new(asset.name.as_str(), 0, asset.size));
        }

        result.total = DiffEntry::new(
            TOTAL_NAME,
            saturating_total(base_sizes.values()),
            saturating_total(head_sizes.values()),
        );

        log::debug!(
            "diff over {} assets: {} added, {} removed, {} bigger, {} smaller, {} same",
            result.asset_count(),
            result.added.len(),
            result.removed.len(),
            result.bigger.len(),
            result.smaller.len(),
            result.same_size.len()
        );

        result
    }

    /// Name → size for matching assets, first occurrence wins
    fn index<'a>(&self, assets: &'a [Asset]) -> HashMap<&'a str, u64> {
        let mut sizes = HashMap::with_capacity(assets.len());
        for asset in assets.iter().filter(|a| self.options.matches(&a.name)) {
            sizes.entry(asset.name.as_str()).or_insert(asset.size);
        }
        sizes
    }
}
