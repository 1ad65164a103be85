//! Command handlers for bundle-diff CLI
//!
//! `report` and `diff` share one pipeline: load both manifests, diff every
//! enabled asset group, gate on the overall total and render the comment.
//! They differ only in where the result goes.

pub mod completions;
pub mod diff;
pub mod report;

pub use completions::cmd_completions;
pub use diff::cmd_diff;
pub use report::{cmd_report, PublishTarget};

use crate::cli::ReportArgs;
use crate::config::{ConfigLoader, ReportConfig};
use crate::error::BundleDiffError;
use crate::gate::Announcement;
use crate::groups::diff_groups;
use crate::infra::{FileSystem, RealFileSystem};
use crate::manifest::{ManifestLoader, SnapshotRole};
use crate::report::{BuildTimeDiff, ReportData, ReportRenderer};

/// Output of the shared pipeline
#[derive(Debug, Clone)]
pub struct PreparedReport {
    /// Group diffs and build times
    pub data: ReportData,
    /// Gate decision on the overall total
    pub announcement: Announcement,
    /// Rendered markdown comment
    pub body: String,
}

/// Resolve the run configuration from command line options and the config file
pub fn load_config(args: &ReportArgs) -> Result<ReportConfig, BundleDiffError> {
    let file = ConfigLoader::load(&args.config_dir)?;
    ReportConfig::resolve(args.raw_inputs(), file)
}

/// Run the pipeline against the real filesystem
pub fn prepare_report(config: &ReportConfig) -> Result<PreparedReport, BundleDiffError> {
    prepare_report_with_fs(config, &RealFileSystem)
}

/// Run the pipeline with a custom filesystem implementation
///
/// Both manifests are loaded before anything is diffed, so a missing or
/// malformed head manifest fails the run just like a bad base manifest.
pub fn prepare_report_with_fs<FS: FileSystem>(
    config: &ReportConfig,
    fs: &FS,
) -> Result<PreparedReport, BundleDiffError> {
    let base = ManifestLoader::load_with_fs(&config.base_stats_path, SnapshotRole::Base, fs)?;
    let head = ManifestLoader::load_with_fs(&config.head_stats_path, SnapshotRole::Head, fs)?;

    let groups = diff_groups(
        &config.groups(),
        base.assets(),
        head.assets(),
        config.threshold,
    );
    let data = ReportData {
        groups,
        build_time: BuildTimeDiff::from_times(base.time, head.time),
    };

    let announcement = match data.overall() {
        Some(overall) => config.announcement.evaluate(&overall.total),
        None => Announcement::Publish,
    };

    let body = ReportRenderer::new(config.comment_title.as_str())
        .detailed(config.detailed)
        .include_unchanged(config.all)
        .render(&data);

    Ok(PreparedReport {
        data,
        announcement,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::gate::AnnouncementGate;
    use crate::infra::mock::MockFileSystem;

    fn fixture_fs() -> MockFileSystem {
        MockFileSystem::new()
            .with_file(
                "base.json",
                r#"{"time": 1000, "assets": [{"name": "main.js", "size": 1000}]}"#,
            )
            .with_file(
                "head.json",
                r#"{"time": 1200, "assets": [{"name": "main.js", "size": 1200}, {"name": "vendor.js", "size": 500}]}"#,
            )
    }

    #[test]
    fn test_pipeline_produces_report() {
        let config = ReportConfig::new("base.json", "head.json");
        let prepared = prepare_report_with_fs(&config, &fixture_fs()).unwrap();

        let overall = prepared.data.overall().unwrap();
        assert_eq!(overall.total.diff, 700);
        assert_eq!(overall.bigger[0].name, "main.js");
        assert_eq!(overall.added[0].name, "vendor.js");
        assert!(prepared.announcement.should_publish());
        assert!(prepared.body.starts_with("## Bundle difference"));
        assert!(prepared.body.contains("### Build time"));
    }

    #[test]
    fn test_pipeline_applies_gate_to_overall_total() {
        let mut config = ReportConfig::new("base.json", "head.json");
        config.announcement = AnnouncementGate::new(Some(100.0), None);
        let prepared = prepare_report_with_fs(&config, &fixture_fs()).unwrap();
        assert!(!prepared.announcement.should_publish());
    }

    #[test]
    fn test_missing_base_is_configuration_error() {
        let config = ReportConfig::new("missing.json", "head.json");
        let err = prepare_report_with_fs(&config, &fixture_fs()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("base"));
    }

    #[test]
    fn test_malformed_head_is_parse_error() {
        let fs = fixture_fs().with_file("broken.json", "{ not json");
        let config = ReportConfig::new("base.json", "broken.json");
        let err = prepare_report_with_fs(&config, &fs).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
