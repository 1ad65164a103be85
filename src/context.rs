//! Invocation context
//!
//! Identifies the review request a report is posted to. Resolved once at
//! startup, either from explicit flags or from the GitHub Actions
//! environment (`GITHUB_REPOSITORY` plus the event payload at
//! `GITHUB_EVENT_PATH`), and then passed to the publisher.

use crate::error::BundleDiffError;
use crate::infra::{Environment, FileSystem, RealEnvironment, RealFileSystem};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Repository and issue / pull request number to comment on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationContext {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Issue or pull request number
    pub issue_number: u64,
}

impl fmt::Display for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.issue_number)
    }
}

impl InvocationContext {
    /// Build a context from an `owner/repo` slug and a number
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::context::InvocationContext;
    ///
    /// let ctx = InvocationContext::new("octo-org/web-app", 42)?;
    /// assert_eq!(ctx.owner, "octo-org");
    /// assert_eq!(ctx.to_string(), "octo-org/web-app#42");
    /// # Ok::<(), bundle_diff::error::BundleDiffError>(())
    /// ```
    pub fn new(repository: &str, issue_number: u64) -> Result<Self, BundleDiffError> {
        let (owner, repo) = split_repository(repository)?;
        if issue_number == 0 {
            return Err(BundleDiffError::MissingContext {
                reason: "pull request number must be positive".to_string(),
            });
        }
        Ok(Self {
            owner,
            repo,
            issue_number,
        })
    }

    /// Resolve from explicit values, falling back to the process environment
    pub fn resolve(repository: Option<&str>, number: Option<u64>) -> Result<Self, BundleDiffError> {
        Self::resolve_with(repository, number, &RealEnvironment, &RealFileSystem)
    }

    /// Resolve with custom environment and filesystem implementations
    ///
    /// Explicit values win. Otherwise the repository comes from
    /// `GITHUB_REPOSITORY` and the number from the event payload, looked up
    /// as `pull_request.number`, then `issue.number`, then `number`.
    pub fn resolve_with<E: Environment, FS: FileSystem>(
        repository: Option<&str>,
        number: Option<u64>,
        env: &E,
        fs: &FS,
    ) -> Result<Self, BundleDiffError> {
        let repository = match repository.filter(|r| !r.trim().is_empty()) {
            Some(r) => r.to_string(),
            None => env
                .var("GITHUB_REPOSITORY")
                .ok_or_else(|| BundleDiffError::MissingContext {
                    reason: "GITHUB_REPOSITORY is not set".to_string(),
                })?,
        };

        let number = match number {
            Some(n) => n,
            None => event_issue_number(env, fs)?,
        };

        let context = Self::new(&repository, number)?;
        log::debug!("invocation context: {}", context);
        Ok(context)
    }
}

fn split_repository(repository: &str) -> Result<(String, String), BundleDiffError> {
    match repository.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(BundleDiffError::MissingContext {
            reason: format!("'{}' is not of the form owner/repo", repository),
        }),
    }
}

fn event_issue_number<E: Environment, FS: FileSystem>(
    env: &E,
    fs: &FS,
) -> Result<u64, BundleDiffError> {
    let event_path = env
        .var("GITHUB_EVENT_PATH")
        .ok_or_else(|| BundleDiffError::MissingContext {
            reason: "GITHUB_EVENT_PATH is not set".to_string(),
        })?;

    let contents = fs
        .read_to_string(Path::new(&event_path))
        .map_err(|e| BundleDiffError::MissingContext {
            reason: format!("cannot read event payload {}: {}", event_path, e),
        })?;

    let payload: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| BundleDiffError::MissingContext {
            reason: format!("event payload {} is not valid JSON: {}", event_path, e),
        })?;

    ["/pull_request/number", "/issue/number", "/number"]
        .iter()
        .find_map(|pointer| payload.pointer(pointer).and_then(|v| v.as_u64()))
        .filter(|n| *n > 0)
        .ok_or_else(|| BundleDiffError::MissingContext {
            reason: "event payload has no pull request or issue number".to_string(),
        })
}
