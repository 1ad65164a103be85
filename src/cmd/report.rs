//! Report command implementation
//!
//! Handles the `bundle-diff report` command: run the pipeline and post the
//! result as a comment on the pull request, unless the announcement gate
//! suppresses it.

use anyhow::Result;
use console::style;

use super::{load_config, prepare_report, PreparedReport};
use crate::cli::ReportArgs;
use crate::context::InvocationContext;
use crate::error::BundleDiffError;
use crate::fmt::{icon, CHECKMARK, INFO, ROCKET};
use crate::gate::Announcement;
use crate::publish::{GitHubPublisher, PublishedComment, Publisher};

/// Where and how to publish
#[derive(Debug, Clone, Default)]
pub struct PublishTarget {
    /// API token
    pub token: Option<String>,
    /// Explicit `owner/repo`
    pub repository: Option<String>,
    /// Explicit pull request number
    pub pr: Option<u64>,
    /// API root
    pub api_url: String,
}

/// Compare stats and comment on the pull request
///
/// With `dry_run` the comment is printed and nothing is posted; no token or
/// pull request is needed.
///
/// # Examples
///
/// ```no_run
/// use bundle_diff::cli::ReportArgs;
/// use bundle_diff::cmd::{cmd_report, PublishTarget};
///
/// let args = ReportArgs {
///     base_stats_path: "base-stats.json".into(),
///     head_stats_path: "head-stats.json".into(),
///     config_dir: ".".into(),
///     ..ReportArgs::default()
/// };
/// cmd_report(&args, &PublishTarget::default(), true)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - no token or pull request can be found (unless `dry_run`)
/// - either manifest is missing or malformed
/// - a numeric option is invalid
/// - the GitHub API rejects the comment
pub fn cmd_report(args: &ReportArgs, target: &PublishTarget, dry_run: bool) -> Result<()> {
    let config = load_config(args)?;

    if dry_run {
        let prepared = prepare_report(&config)?;
        print_announcement(&prepared.announcement);
        println!();
        print!("{}", prepared.body);
        return Ok(());
    }

    // resolve everything needed to publish before doing any work
    let token = target
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(BundleDiffError::MissingToken)?;
    let context = InvocationContext::resolve(target.repository.as_deref(), target.pr)?;
    let publisher = GitHubPublisher::new(token, &target.api_url)?;

    let prepared = prepare_report(&config)?;
    publish_report(&prepared, &context, &publisher)?;
    Ok(())
}

/// Post `prepared` unless the gate suppressed it
///
/// Returns the created comment, or `None` when suppressed.
pub fn publish_report<P: Publisher>(
    prepared: &PreparedReport,
    context: &InvocationContext,
    publisher: &P,
) -> Result<Option<PublishedComment>, BundleDiffError> {
    if let Announcement::Suppress(reason) = &prepared.announcement {
        println!(
            "{} Not commenting on {}: {}",
            icon(INFO),
            context,
            style(reason).dim()
        );
        return Ok(None);
    }

    println!("{} Commenting on {}", icon(ROCKET), style(context).bold());
    let comment = publisher.create_comment(context, &prepared.body)?;

    match &comment.html_url {
        Some(url) => println!("{} Comment created: {}", icon(CHECKMARK), url),
        None => println!("{} Comment created", icon(CHECKMARK)),
    }
    Ok(Some(comment))
}

fn print_announcement(announcement: &Announcement) {
    match announcement {
        Announcement::Publish => {
            println!("{} Dry run: this comment would be posted", icon(INFO))
        }
        Announcement::Suppress(reason) => println!(
            "{} Dry run: no comment would be posted ({})",
            icon(INFO),
            reason
        ),
    }
}
