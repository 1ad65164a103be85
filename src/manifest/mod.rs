//! Build-stats manifests
//!
//! A manifest is the JSON stats file a bundler writes after a build. Two
//! shapes are accepted:
//! - a single build: `{ "assets": [{ "name", "size", ... }], "time": 1234 }`
//! - a multi build: `{ "children": [{ "assets": [...] }, ...] }`, of which
//!   the first child is used
//!
//! The shape is resolved once at load time; only the selected build is
//! then deserialized into a [`Snapshot`], so other children may be in any
//! form.

pub mod loader;

pub use loader::ManifestLoader;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Largest asset size accepted from a manifest, so that any size change
/// fits a signed 64-bit byte count
pub const MAX_ASSET_SIZE: u64 = i64::MAX as u64;

/// A single named build output with its size in bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Output file name, e.g. `main.3f2a1c.js`
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

impl Asset {
    /// Create an asset
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Which side of the comparison a manifest belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotRole {
    /// Target branch build
    Base,
    /// Pull request build
    Head,
}

impl fmt::Display for SnapshotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Head => f.write_str("head"),
        }
    }
}

/// Canonical view of one build: its assets, unique by name, and build time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    assets: Vec<Asset>,
    /// Build duration in milliseconds, when the bundler recorded it
    pub time: Option<u64>,
}

impl Snapshot {
    /// Build a snapshot; later duplicates of an asset name are dropped
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::manifest::{Asset, Snapshot};
    ///
    /// let snapshot = Snapshot::new(
    ///     vec![Asset::new("main.js", 10), Asset::new("main.js", 20)],
    ///     None,
    /// );
    /// assert_eq!(snapshot.assets().len(), 1);
    /// assert_eq!(snapshot.assets()[0].size, 10);
    /// ```
    pub fn new(assets: Vec<Asset>, time: Option<u64>) -> Self {
        let mut seen = HashSet::with_capacity(assets.len());
        let assets = assets
            .into_iter()
            .filter(|asset| seen.insert(asset.name.clone()))
            .collect();
        Self { assets, time }
    }

    /// Assets in manifest order
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BuildStats {
    assets: Vec<Asset>,
    #[serde(default)]
    time: Option<u64>,
}

impl From<BuildStats> for Snapshot {
    fn from(stats: BuildStats) -> Self {
        Snapshot::new(stats.assets, stats.time)
    }
}

/// The two manifest shapes; a multi build is tried first so that
/// `children` wins over any top-level asset list.
///
/// Only the shape is checked here. Builds stay raw JSON until
/// [`Manifest::into_snapshot`] picks one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Manifest {
    MultiBuild {
        #[serde(deserialize_with = "non_empty_children")]
        children: Vec<serde_json::Value>,
    },
    SingleBuild {
        assets: Vec<serde_json::Value>,
        #[serde(default)]
        time: serde_json::Value,
    },
}

impl Manifest {
    /// Deserialize the selected build: the first child, or the top level
    pub(crate) fn into_snapshot(self) -> Result<Snapshot, serde_json::Error> {
        let build = match self {
            Manifest::MultiBuild { children } => children.into_iter().next().unwrap_or_default(),
            Manifest::SingleBuild { assets, time } => {
                serde_json::json!({ "assets": assets, "time": time })
            }
        };
        BuildStats::deserialize(build).map(Snapshot::from)
    }
}

fn non_empty_children<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let children = Vec::<serde_json::Value>::deserialize(deserializer)?;
    if children.is_empty() {
        return Err(de::Error::invalid_length(0, &"at least one child build"));
    }
    Ok(children)
}
