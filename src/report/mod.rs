//! Report rendering
//!
//! Turns group diffs (and optionally build times) into the markdown body
//! of the pull request comment. Pure formatting, no I/O.

pub mod table;

use crate::diff::{signed_diff, ChangeKind, DiffResult};
use crate::fmt::{
    format_duration, format_duration_change, format_percentage, format_size, format_size_change,
};
use crate::groups::GroupDiff;
use serde::Serialize;
use table::{Align, MarkdownTable};

/// Default comment heading
pub const DEFAULT_TITLE: &str = "Bundle difference";

/// Build duration of both snapshots, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildTimeDiff {
    /// Base build time
    pub old_time: u64,
    /// Head build time
    pub new_time: u64,
}

impl BuildTimeDiff {
    /// Pair two optional build times; `None` unless both are known
    pub fn from_times(old_time: Option<u64>, new_time: Option<u64>) -> Option<Self> {
        Some(Self {
            old_time: old_time?,
            new_time: new_time?,
        })
    }

    /// `new_time - old_time`
    pub fn diff(&self) -> i64 {
        signed_diff(self.old_time, self.new_time)
    }
}

/// Everything that goes into one comment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    /// One diff per enabled group, `all` first
    pub groups: Vec<GroupDiff>,
    /// Build time comparison, when both manifests carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_time: Option<BuildTimeDiff>,
}

impl ReportData {
    /// The unfiltered diff (the `all` group), if present
    pub fn overall(&self) -> Option<&DiffResult> {
        self.groups
            .iter()
            .find(|g| g.group == "all")
            .map(|g| &g.result)
    }
}

/// Renders [`ReportData`] as markdown
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    title: String,
    detailed: bool,
    include_unchanged: bool,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl ReportRenderer {
    /// Renderer with the given heading; summary only
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detailed: false,
            include_unchanged: false,
        }
    }

    /// Add the per-asset breakdown
    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    /// List unchanged assets in the breakdown too
    pub fn include_unchanged(mut self, include: bool) -> Self {
        self.include_unchanged = include;
        self
    }

    /// Render the full comment body
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::groups::{diff_groups, AssetGroup};
    /// use bundle_diff::manifest::Asset;
    /// use bundle_diff::report::{ReportData, ReportRenderer};
    ///
    /// let base = vec![Asset::new("main.js", 1000)];
    /// let head = vec![Asset::new("main.js", 1200)];
    /// let data = ReportData {
    ///     groups: diff_groups(&[AssetGroup::all()], &base, &head, 0),
    ///     build_time: None,
    /// };
    ///
    /// let body = ReportRenderer::default().render(&data);
    /// assert!(body.starts_with("## Bundle difference"));
    /// assert!(body.contains("| all         | 1 kB     | 1.2 kB   | +200 B (+20.00%) |"));
    /// ```
    pub fn render(&self, data: &ReportData) -> String {
        let mut sections = vec![format!("## {}", self.title), self.summary_table(data)];

        if self.detailed {
            if let Some(overall) = data.overall() {
                sections.push(self.details_section(overall));
            }
        }

        if let Some(build_time) = data.build_time {
            sections.push(format!(
                "### Build time\n\n{}",
                build_time_table(&build_time).render()
            ));
        }

        let mut body = sections.join("\n");
        if !body.ends_with('\n') {
            body.push('\n');
        }
        body
    }

    fn summary_table(&self, data: &ReportData) -> String {
        let mut table = MarkdownTable::new(&[
            ("Asset group", Align::Left),
            ("Old size", Align::Left),
            ("New size", Align::Left),
            ("Diff", Align::Left),
        ]);

        for group in &data.groups {
            let total = &group.result.total;
            table.push_row(vec![
                group.group.clone(),
                format_size(total.old_size),
                format_size(total.new_size),
                format!(
                    "{} ({})",
                    format_size_change(total.diff),
                    format_percentage(total.diff_percentage)
                ),
            ]);
        }

        table.render()
    }

    fn details_section(&self, result: &DiffResult) -> String {
        let mut table = MarkdownTable::new(&[
            ("Asset", Align::Left),
            ("Status", Align::Left),
            ("Old size", Align::Right),
            ("New size", Align::Right),
            ("Diff", Align::Right),
            ("Diff %", Align::Right),
        ]);

        for (kind, entry) in result.entries() {
            if kind == ChangeKind::SameSize && !self.include_unchanged {
                continue;
            }
            table.push_row(vec![
                entry.name.clone(),
                kind.to_string(),
                format_size(entry.old_size),
                format_size(entry.new_size),
                format_size_change(entry.diff),
                format_percentage(entry.diff_percentage),
            ]);
        }

        let changed = result.asset_count() - result.same_size.len();
        let body = if table.is_empty() {
            "_No asset size changes._\n".to_string()
        } else {
            table.render()
        };

        format!(
            "<details>\n<summary>Asset details ({} changed, {} unchanged)</summary>\n\n{}\n</details>\n",
            changed,
            result.same_size.len(),
            body
        )
    }
}

fn build_time_table(build_time: &BuildTimeDiff) -> MarkdownTable {
    let mut table = MarkdownTable::new(&[
        ("Old time", Align::Left),
        ("New time", Align::Left),
        ("Diff", Align::Left),
    ]);
    table.push_row(vec![
        format_duration(build_time.old_time),
        format_duration(build_time.new_time),
        format_duration_change(build_time.diff()),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::{diff_groups, AssetGroup, GroupExtensionLists};
    use crate::manifest::Asset;

    fn sample_data() -> ReportData {
        let base = vec![
            Asset::new("main.js", 1_000),
            Asset::new("old.css", 300),
            Asset::new("same.js", 50),
        ];
        let head = vec![
            Asset::new("main.js", 1_200),
            Asset::new("vendor.js", 500),
            Asset::new("same.js", 50),
        ];
        ReportData {
            groups: diff_groups(&GroupExtensionLists::default().groups(), &base, &head, 0),
            build_time: None,
        }
    }

    #[test]
    fn test_summary_lists_enabled_groups() {
        let body = ReportRenderer::default().render(&sample_data());
        assert!(body.contains("| all "));
        assert!(body.contains("| scripts "));
        assert!(body.contains("| stylesheets "));
        assert!(!body.contains("| others "));
        assert!(!body.contains("<details>"));
    }

    #[test]
    fn test_custom_title_is_used() {
        let body = ReportRenderer::new("Size check").render(&sample_data());
        assert!(body.starts_with("## Size check\n"));
    }

    #[test]
    fn test_detailed_table_lists_changes_but_not_unchanged() {
        let body = ReportRenderer::default()
            .detailed(true)
            .render(&sample_data());
        assert!(body.contains("<details>"));
        assert!(body.contains("3 changed, 1 unchanged"));
        assert!(body.contains("| vendor.js | added "));
        assert!(body.contains("| old.css   | removed "));
        assert!(body.contains("new |"));
        assert!(!body.contains("| same.js"));
    }

    #[test]
    fn test_all_flag_includes_unchanged_assets() {
        let body = ReportRenderer::default()
            .detailed(true)
            .include_unchanged(true)
            .render(&sample_data());
        assert!(body.contains("| same.js   | unchanged "));
    }

    #[test]
    fn test_detailed_table_without_changes_says_so() {
        let assets = vec![Asset::new("a.js", 10)];
        let data = ReportData {
            groups: diff_groups(&[AssetGroup::all()], &assets, &assets, 0),
            build_time: None,
        };
        let body = ReportRenderer::default().detailed(true).render(&data);
        assert!(body.contains("_No asset size changes._"));
    }

    #[test]
    fn test_build_time_section_rendered_when_present() {
        let mut data = sample_data();
        data.build_time = BuildTimeDiff::from_times(Some(61_000), Some(59_500));
        let body = ReportRenderer::default().render(&data);
        assert!(body.contains("### Build time"));
        assert!(body.contains("| 1m 1s    | 59s 500ms | -1s 500ms |"));
    }

    #[test]
    fn test_build_time_requires_both_times() {
        assert!(BuildTimeDiff::from_times(Some(1), None).is_none());
        assert!(BuildTimeDiff::from_times(None, Some(1)).is_none());
        assert_eq!(BuildTimeDiff::from_times(Some(5), Some(3)).unwrap().diff(), -2);
        assert_eq!(
            BuildTimeDiff::from_times(Some(0), Some(u64::MAX)).unwrap().diff(),
            i64::MAX
        );
    }

    #[test]
    fn test_overall_finds_all_group() {
        let data = sample_data();
        assert_eq!(data.overall().unwrap().total.diff, 400);
    }
}
