//! Command line interface definition
//!
//! Every report option can also be supplied through the `INPUT_*`
//! environment variables GitHub Actions sets for action inputs, so the
//! binary runs unchanged as an action step.

use crate::config::RawInputs;
use crate::publish::DEFAULT_API_URL;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Bundle size difference reporter
///
/// bundle-diff compares the build stats of a base and a head build and
/// reports per-group size changes as a pull request comment.
#[derive(Parser, Debug)]
#[command(name = "bundle-diff", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    pub no_emoji: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare stats and post the report as a pull request comment
    Report {
        /// Shared report options
        #[command(flatten)]
        options: ReportArgs,

        /// Access token for the GitHub API
        #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Repository to comment on, as owner/repo (default: GITHUB_REPOSITORY)
        #[arg(long, value_name = "OWNER/REPO")]
        repository: Option<String>,

        /// Pull request number (default: read from the event payload)
        #[arg(long, value_name = "NUMBER")]
        pr: Option<u64>,

        /// GitHub API root
        #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Print the comment instead of posting it
        #[arg(short, long)]
        dry_run: bool,
    },

    /// Compare stats and print the report locally
    Diff {
        /// Shared report options
        #[command(flatten)]
        options: ReportArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by `report` and `diff`
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Path to the base build stats
    #[arg(long, env = "INPUT_BASE_STATS_PATH", value_name = "PATH")]
    pub base_stats_path: PathBuf,

    /// Path to the head build stats
    #[arg(long, env = "INPUT_HEAD_STATS_PATH", value_name = "PATH")]
    pub head_stats_path: PathBuf,

    /// Comma separated document extensions (empty disables the group)
    #[arg(long, env = "INPUT_DOCUMENT_EXTENSIONS", value_name = "LIST")]
    pub document_extensions: Option<String>,

    /// Comma separated script extensions
    #[arg(long, env = "INPUT_SCRIPT_EXTENSIONS", value_name = "LIST")]
    pub script_extensions: Option<String>,

    /// Comma separated stylesheet extensions
    #[arg(long, env = "INPUT_STYLESHEET_EXTENSIONS", value_name = "LIST")]
    pub stylesheet_extensions: Option<String>,

    /// Comma separated image extensions
    #[arg(long, env = "INPUT_IMAGE_EXTENSIONS", value_name = "LIST")]
    pub image_extensions: Option<String>,

    /// Comma separated extensions for the "others" group (disabled by default)
    #[arg(long, env = "INPUT_OTHER_EXTENSIONS", value_name = "LIST")]
    pub other_extensions: Option<String>,

    /// Size changes below this many bytes count as unchanged
    #[arg(long, env = "INPUT_THRESHOLD", value_name = "BYTES")]
    pub threshold: Option<String>,

    /// Do not comment when the total grows by less than this percentage
    #[arg(
        long,
        env = "INPUT_ANNOUNCEMENT_PERCENTAGE_THRESHOLD_INCREASE",
        value_name = "PCT",
        allow_hyphen_values = true
    )]
    pub announcement_percentage_threshold_increase: Option<String>,

    /// Do not comment when the total shrinks by less than this percentage
    #[arg(
        long,
        env = "INPUT_ANNOUNCEMENT_PERCENTAGE_THRESHOLD_DECREASE",
        value_name = "PCT",
        allow_hyphen_values = true
    )]
    pub announcement_percentage_threshold_decrease: Option<String>,

    /// Comment heading
    #[arg(long, env = "INPUT_COMMENT_TITLE", value_name = "TITLE")]
    pub comment_title: Option<String>,

    /// Include a per-asset breakdown
    #[arg(long, env = "INPUT_DETAILED")]
    pub detailed: bool,

    /// Include unchanged assets in the breakdown
    #[arg(long, env = "INPUT_ALL")]
    pub all: bool,

    /// Directory containing .bundle-diff.toml
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub config_dir: PathBuf,
}

impl ReportArgs {
    /// Unvalidated inputs for [`crate::config::ReportConfig::resolve`]
    pub fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            base_stats_path: self.base_stats_path.clone(),
            head_stats_path: self.head_stats_path.clone(),
            document_extensions: self.document_extensions.clone(),
            script_extensions: self.script_extensions.clone(),
            stylesheet_extensions: self.stylesheet_extensions.clone(),
            image_extensions: self.image_extensions.clone(),
            other_extensions: self.other_extensions.clone(),
            threshold: self.threshold.clone(),
            announcement_percentage_threshold_increase: self
                .announcement_percentage_threshold_increase
                .clone(),
            announcement_percentage_threshold_decrease: self
                .announcement_percentage_threshold_decrease
                .clone(),
            comment_title: self.comment_title.clone(),
            detailed: self.detailed,
            all: self.all,
        }
    }
}
