//! Manifest loading

use super::{Manifest, Snapshot, SnapshotRole, MAX_ASSET_SIZE};
use crate::error::BundleDiffError;
use crate::infra::{FileSystem, RealFileSystem};
use serde::Deserialize;
use std::path::Path;

/// Loads stats manifests from disk into [`Snapshot`]s
pub struct ManifestLoader;

impl ManifestLoader {
    /// Load a manifest from the real filesystem
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_diff::manifest::{ManifestLoader, SnapshotRole};
    /// use std::path::Path;
    ///
    /// let base = ManifestLoader::load(Path::new("stats/base.json"), SnapshotRole::Base)?;
    /// println!("{} assets", base.assets().len());
    /// # Ok::<(), bundle_diff::error::BundleDiffError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// - [`BundleDiffError::ManifestNotFound`] if `path` does not exist
    /// - [`BundleDiffError::ManifestParse`] if it is not a stats manifest
    pub fn load(path: &Path, role: SnapshotRole) -> Result<Snapshot, BundleDiffError> {
        Self::load_with_fs(path, role, &RealFileSystem)
    }

    /// Load a manifest with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(
        path: &Path,
        role: SnapshotRole,
        fs: &FS,
    ) -> Result<Snapshot, BundleDiffError> {
        if !fs.exists(path) {
            return Err(BundleDiffError::ManifestNotFound {
                path: path.to_path_buf(),
                role: role.to_string(),
            });
        }

        let contents = fs
            .read_to_string(path)
            .map_err(|e| BundleDiffError::ManifestParse {
                path: path.to_path_buf(),
                reason: format!("cannot read file: {}", e),
            })?;

        let snapshot = Self::parse(&contents, path)?;
        log::debug!(
            "loaded {} manifest {}: {} assets, time {:?}",
            role,
            path.display(),
            snapshot.assets().len(),
            snapshot.time
        );
        Ok(snapshot)
    }

    /// Parse manifest contents; `path` is only used for error messages
    ///
    /// Asset sizes above [`MAX_ASSET_SIZE`] are rejected.
    pub fn parse(contents: &str, path: &Path) -> Result<Snapshot, BundleDiffError> {
        let value: serde_json::Value =
            serde_json::from_str(contents).map_err(|e| BundleDiffError::ManifestParse {
                path: path.to_path_buf(),
                reason: format!("invalid JSON: {}", e),
            })?;

        // untagged enums only report "no variant matched"; the precise reason
        // comes from deserializing the selected build below
        let manifest = Manifest::deserialize(value).map_err(|_| BundleDiffError::ManifestParse {
            path: path.to_path_buf(),
            reason: "expected an `assets` array or a non-empty `children` array of builds"
                .to_string(),
        })?;

        let snapshot = manifest
            .into_snapshot()
            .map_err(|e| BundleDiffError::ManifestParse {
                path: path.to_path_buf(),
                reason: format!("invalid build stats: {}", e),
            })?;

        if let Some(asset) = snapshot.assets().iter().find(|a| a.size > MAX_ASSET_SIZE) {
            return Err(BundleDiffError::ManifestParse {
                path: path.to_path_buf(),
                reason: format!(
                    "asset `{}` has size {} bytes, above the supported maximum of {}",
                    asset.name, asset.size, MAX_ASSET_SIZE
                ),
            });
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::infra::mock::MockFileSystem;
    use crate::manifest::Asset;

    #[test]
    fn test_load_missing_file_is_configuration_error() {
        let fs = MockFileSystem::new();
        let err = ManifestLoader::load_with_fs(Path::new("base.json"), SnapshotRole::Base, &fs)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("base stats file does not exist"));
    }

    #[test]
    fn test_load_valid_manifest() {
        let fs = MockFileSystem::new().with_file(
            "head.json",
            r#"{"assets": [{"name": "main.js", "size": 1200}, {"name": "vendor.js", "size": 500}]}"#,
        );
        let snapshot =
            ManifestLoader::load_with_fs(Path::new("head.json"), SnapshotRole::Head, &fs).unwrap();
        assert_eq!(
            snapshot.assets(),
            &[Asset::new("main.js", 1200), Asset::new("vendor.js", 500)]
        );
        assert_eq!(snapshot.time, None);
    }

    #[test]
    fn test_load_unreadable_file_is_parse_error() {
        let fs = MockFileSystem::new().with_unreadable("head.json");
        let err = ManifestLoader::load_with_fs(Path::new("head.json"), SnapshotRole::Head, &fs)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("cannot read file"));
    }

    #[test]
    fn test_parse_invalid_json_is_parse_error() {
        let err = ManifestLoader::parse("{not json", Path::new("x.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_parse_missing_asset_list_is_parse_error() {
        let err = ManifestLoader::parse(r#"{"version": "5.0.0"}"#, Path::new("x.json"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("`assets`"));
    }

    #[test]
    fn test_parse_asset_with_non_numeric_size_is_parse_error() {
        let err = ManifestLoader::parse(
            r#"{"assets": [{"name": "main.js", "size": "big"}]}"#,
            Path::new("x.json"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        let msg = err.to_string();
        assert!(msg.contains("invalid build stats"), "{}", msg);
        assert!(msg.contains("big"), "{}", msg);
    }

    #[test]
    fn test_parse_multi_build_ignores_malformed_later_children() {
        let snapshot = ManifestLoader::parse(
            r#"{"children": [{"assets": [{"name": "a.js", "size": 1}]}, {"errors": []}]}"#,
            Path::new("x.json"),
        )
        .unwrap();
        assert_eq!(snapshot.assets(), &[Asset::new("a.js", 1)]);
    }

    #[test]
    fn test_parse_size_at_supported_maximum_is_accepted() {
        let contents = format!(
            r#"{{"assets": [{{"name": "huge.bin", "size": {}}}]}}"#,
            MAX_ASSET_SIZE
        );
        let snapshot = ManifestLoader::parse(&contents, Path::new("x.json")).unwrap();
        assert_eq!(snapshot.assets()[0].size, MAX_ASSET_SIZE);
    }

    #[test]
    fn test_parse_size_above_supported_maximum_is_parse_error() {
        let contents = format!(
            r#"{{"assets": [{{"name": "huge.bin", "size": {}}}]}}"#,
            u64::MAX
        );
        let err = ManifestLoader::parse(&contents, Path::new("x.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("huge.bin"));
    }

    #[test]
    fn test_load_real_file_from_tempdir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("stats.json");
        std::fs::write(
            &path,
            r#"{"children": [{"assets": [{"name": "a.js", "size": 1}]}]}"#,
        )
        .unwrap();
        let snapshot = ManifestLoader::load(&path, SnapshotRole::Base).unwrap();
        assert_eq!(snapshot.assets(), &[Asset::new("a.js", 1)]);
    }
}
