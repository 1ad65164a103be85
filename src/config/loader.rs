//! Configuration file loading

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::BundleDiffError;
use crate::infra::{FileSystem, RealFileSystem};
use std::path::Path;

/// Handles loading `.bundle-diff.toml`
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from `.bundle-diff.toml` in the given directory
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_diff::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("threshold: {:?}", config.threshold);
    /// # Ok::<(), bundle_diff::error::BundleDiffError>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile, BundleDiffError> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(
        project_root: &Path,
        fs: &FS,
    ) -> Result<ConfigFile, BundleDiffError> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no {} in {}", CONFIG_FILE_NAME, project_root.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(BundleDiffError::Config {
                    path: config_path,
                    reason: format!("cannot read file: {}", e),
                });
            }
        };

        let config: ConfigFile =
            toml_edit::de::from_str(&contents).map_err(|e| BundleDiffError::Config {
                path: config_path.clone(),
                reason: e.to_string().trim().to_string(),
            })?;

        if let Some(announcement) = &config.announcement {
            for (name, value) in [
                ("announcement.increase", announcement.increase),
                ("announcement.decrease", announcement.decrease),
            ] {
                if let Some(value) = value.filter(|v| !v.is_finite()) {
                    return Err(BundleDiffError::InvalidNumber {
                        option: name.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        log::debug!("loaded {}", config_path.display());
        Ok(config)
    }

    /// Check if config file exists in the directory
    pub fn exists(project_root: &Path) -> bool {
        project_root.join(CONFIG_FILE_NAME).exists()
    }
}
