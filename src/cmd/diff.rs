//! Diff command implementation
//!
//! Handles the `bundle-diff diff` command, a local preview of the report:
//! markdown on stdout, or JSON for scripting.

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::{load_config, prepare_report, PreparedReport};
use crate::cli::ReportArgs;
use crate::fmt::{icon, CHART};
use crate::gate::Announcement;
use crate::groups::GroupDiff;
use crate::report::BuildTimeDiff;

/// Machine-readable diff output
#[derive(Debug, Serialize)]
pub struct DiffOutput<'a> {
    /// Whether the report would be posted
    pub announce: bool,
    /// Why it would not be posted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppressed_reason: Option<&'a str>,
    /// One diff per enabled group
    pub groups: &'a [GroupDiff],
    /// Build time comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_time: Option<BuildTimeDiff>,
}

impl<'a> From<&'a PreparedReport> for DiffOutput<'a> {
    fn from(prepared: &'a PreparedReport) -> Self {
        let suppressed_reason = match &prepared.announcement {
            Announcement::Publish => None,
            Announcement::Suppress(reason) => Some(reason.as_str()),
        };
        Self {
            announce: suppressed_reason.is_none(),
            suppressed_reason,
            groups: &prepared.data.groups,
            build_time: prepared.data.build_time,
        }
    }
}

/// Compare stats and print the report
///
/// # Examples
///
/// ```no_run
/// use bundle_diff::cli::ReportArgs;
/// use bundle_diff::cmd::cmd_diff;
///
/// let args = ReportArgs {
///     base_stats_path: "base-stats.json".into(),
///     head_stats_path: "head-stats.json".into(),
///     config_dir: ".".into(),
///     ..ReportArgs::default()
/// };
/// cmd_diff(&args, false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_diff(args: &ReportArgs, json: bool) -> Result<()> {
    let config = load_config(args)?;
    let prepared = prepare_report(&config)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&DiffOutput::from(&prepared))?
        );
        return Ok(());
    }

    eprintln!(
        "{} {} {} vs {}",
        icon(CHART),
        style("bundle-diff").bold(),
        config.base_stats_path.display(),
        config.head_stats_path.display()
    );
    if let Announcement::Suppress(reason) = &prepared.announcement {
        eprintln!("{}", style(format!("(would not be posted: {})", reason)).dim());
    }
    print!("{}", prepared.body);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::prepare_report_with_fs;
    use crate::config::ReportConfig;
    use crate::gate::AnnouncementGate;
    use crate::infra::mock::MockFileSystem;

    fn prepared(gate: AnnouncementGate) -> PreparedReport {
        let fs = MockFileSystem::new()
            .with_file("base.json", r#"{"assets": [{"name": "a.js", "size": 100}]}"#)
            .with_file("head.json", r#"{"assets": [{"name": "a.js", "size": 100}]}"#);
        let mut config = ReportConfig::new("base.json", "head.json");
        config.announcement = gate;
        prepare_report_with_fs(&config, &fs).unwrap()
    }

    #[test]
    fn test_json_output_shape() {
        let prepared = prepared(AnnouncementGate::default());
        let value = serde_json::to_value(DiffOutput::from(&prepared)).unwrap();

        assert_eq!(value["announce"], true);
        assert!(value.get("suppressed_reason").is_none());
        assert!(value.get("build_time").is_none());
        assert_eq!(value["groups"][0]["group"], "all");
        assert_eq!(value["groups"][0]["result"]["total"]["diff"], 0);
        assert_eq!(
            value["groups"][0]["result"]["same_size"][0]["name"],
            "a.js"
        );
    }

    #[test]
    fn test_json_output_reports_suppression() {
        let prepared = prepared(AnnouncementGate::new(Some(0.0), None));
        let value = serde_json::to_value(DiffOutput::from(&prepared)).unwrap();

        assert_eq!(value["announce"], false);
        assert!(value["suppressed_reason"].is_string());
    }
}
