#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! bundle-diff library
//!
//! This library compares the build stats of two builds and renders the
//! size difference as a markdown report. It backs the `bundle-diff` CLI
//! but can be used programmatically.
//!
//! # Basic Example
//!
//! Diffing two asset lists:
//!
//! ```
//! use bundle_diff::diff::{DiffOptions, StatsDiff};
//! use bundle_diff::manifest::Asset;
//!
//! let base = vec![Asset::new("main.js", 1000)];
//! let head = vec![Asset::new("main.js", 1200), Asset::new("vendor.js", 500)];
//!
//! let result = StatsDiff::new(DiffOptions::new()).compute(&base, &head);
//! assert_eq!(result.bigger[0].diff, 200);
//! assert_eq!(result.bigger[0].diff_percentage, Some(20.0));
//! assert_eq!(result.added[0].name, "vendor.js");
//! assert_eq!(result.total.diff, 700);
//! ```
//!
//! # Advanced Example: Gated Report
//!
//! Grouping by extension, deciding whether to announce, and rendering:
//!
//! ```
//! use bundle_diff::gate::AnnouncementGate;
//! use bundle_diff::groups::{diff_groups, GroupExtensionLists};
//! use bundle_diff::manifest::Asset;
//! use bundle_diff::report::{ReportData, ReportRenderer};
//!
//! let base = vec![Asset::new("app.js", 100), Asset::new("app.css", 100)];
//! let head = vec![Asset::new("app.js", 150), Asset::new("app.css", 50)];
//!
//! let data = ReportData {
//!     groups: diff_groups(&GroupExtensionLists::default().groups(), &base, &head, 0),
//!     build_time: None,
//! };
//!
//! // the overall total did not move, so a zero increase threshold suppresses it
//! let gate = AnnouncementGate::new(Some(0.0), None);
//! let overall = data.overall().unwrap();
//! assert!(!gate.evaluate(&overall.total).should_publish());
//!
//! let body = ReportRenderer::default().render(&data);
//! assert!(body.contains("| scripts "));
//! assert!(body.contains("+50 B (+50.00%)"));
//! ```

/// Command line interface definition
pub mod cli;
/// Command handlers for CLI operations
pub mod cmd;
/// Run configuration and the optional config file
pub mod config;
/// Review request the report is posted to
pub mod context;
/// Asset size diff engine
pub mod diff;
/// Error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Announcement thresholds
pub mod gate;
/// Extension-based asset groups
pub mod groups;
/// Infrastructure traits for filesystem and environment access
pub mod infra;
/// Build-stats manifest loading
pub mod manifest;
/// Comment publishing
pub mod publish;
/// Markdown report rendering
pub mod report;
