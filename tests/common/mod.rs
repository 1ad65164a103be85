//! Common test utilities and helpers
//!
//! Shared functionality for integration tests:
//! - Stats manifest fixtures written to temporary directories
//! - A preconfigured command for the `bundle-diff` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::StatsWorkspace;
//!
//! fn test_diff() {
//!     let workspace = StatsWorkspace::new().unwrap();
//!     common::bin().arg("diff").args(workspace.stats_args()).assert().success();
//! }
//! ```

pub mod fixtures;

use assert_cmd::Command;

/// Action inputs that would leak into the binary from a CI environment
const INHERITED_VARS: &[&str] = &[
    "INPUT_TOKEN",
    "INPUT_BASE_STATS_PATH",
    "INPUT_HEAD_STATS_PATH",
    "INPUT_DOCUMENT_EXTENSIONS",
    "INPUT_SCRIPT_EXTENSIONS",
    "INPUT_STYLESHEET_EXTENSIONS",
    "INPUT_IMAGE_EXTENSIONS",
    "INPUT_OTHER_EXTENSIONS",
    "INPUT_THRESHOLD",
    "INPUT_ANNOUNCEMENT_PERCENTAGE_THRESHOLD_INCREASE",
    "INPUT_ANNOUNCEMENT_PERCENTAGE_THRESHOLD_DECREASE",
    "INPUT_COMMENT_TITLE",
    "INPUT_DETAILED",
    "INPUT_ALL",
    "GITHUB_API_URL",
    "GITHUB_REPOSITORY",
    "GITHUB_EVENT_PATH",
];

/// The bundle-diff binary with a clean action environment
#[allow(dead_code)]
pub fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bundle-diff"));
    for var in INHERITED_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_EMOJI", "1");
    cmd
}
