//! Comment publishing
//!
//! One POST to the issues comments endpoint of the GitHub REST API. No
//! retries; any failure surfaces as [`BundleDiffError::Remote`]. A success
//! status means the comment exists, even when its response body is unreadable.

use crate::context::InvocationContext;
use crate::error::BundleDiffError;
use serde::Deserialize;

/// Default GitHub REST API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// A comment that was created
///
/// Both fields are empty when the API accepted the comment but returned a body
/// that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PublishedComment {
    /// Comment id
    #[serde(default)]
    pub id: Option<u64>,
    /// Browser URL of the comment
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Posts a report to a review request
pub trait Publisher {
    /// Create one comment with `body` on the issue or pull request in `context`
    fn create_comment(
        &self,
        context: &InvocationContext,
        body: &str,
    ) -> Result<PublishedComment, BundleDiffError>;
}

/// [`Publisher`] backed by the GitHub REST API
pub struct GitHubPublisher {
    client: reqwest::blocking::Client,
    token: String,
    api_url: String,
}

impl GitHubPublisher {
    /// Publisher for `api_url` (e.g. [`DEFAULT_API_URL`]) authenticated with `token`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bundle_diff::context::InvocationContext;
    /// use bundle_diff::publish::{GitHubPublisher, Publisher, DEFAULT_API_URL};
    ///
    /// let publisher = GitHubPublisher::new("ghp_xxxx", DEFAULT_API_URL)?;
    /// let context = InvocationContext::new("octo-org/web-app", 42)?;
    /// publisher.create_comment(&context, "## Bundle difference")?;
    /// # Ok::<(), bundle_diff::error::BundleDiffError>(())
    /// ```
    pub fn new(token: impl Into<String>, api_url: &str) -> Result<Self, BundleDiffError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(BundleDiffError::MissingToken);
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("bundle-diff/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BundleDiffError::Remote {
                status: None,
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn comments_url(&self, context: &InvocationContext) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_url, context.owner, context.repo, context.issue_number
        )
    }
}

impl Publisher for GitHubPublisher {
    fn create_comment(
        &self,
        context: &InvocationContext,
        body: &str,
    ) -> Result<PublishedComment, BundleDiffError> {
        let url = self.comments_url(context);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .map_err(|e| BundleDiffError::Remote {
                status: None,
                message: format!("request to {} failed: {}", url, e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(BundleDiffError::Remote {
                status: Some(status.as_u16()),
                message: format!("GitHub API returned {}: {}", status, detail.trim()),
            });
        }

        let comment = response
            .text()
            .map_err(|e| e.to_string())
            .and_then(|text| {
                serde_json::from_str::<PublishedComment>(&text).map_err(|e| e.to_string())
            })
            .unwrap_or_else(|e| {
                log::warn!("comment created ({}) but response body is unreadable: {}", status, e);
                PublishedComment::default()
            });

        match comment.id {
            Some(id) => log::info!("created comment {} on {}", id, context),
            None => log::info!("created comment on {}", context),
        }
        Ok(comment)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;

    /// Records comments instead of posting them
    #[derive(Default)]
    pub struct RecordingPublisher {
        pub comments: RefCell<Vec<(InvocationContext, String)>>,
        pub fail_with_status: Option<u16>,
    }

    impl Publisher for RecordingPublisher {
        fn create_comment(
            &self,
            context: &InvocationContext,
            body: &str,
        ) -> Result<PublishedComment, BundleDiffError> {
            if let Some(status) = self.fail_with_status {
                return Err(BundleDiffError::Remote {
                    status: Some(status),
                    message: "rejected".to_string(),
                });
            }
            let mut comments = self.comments.borrow_mut();
            comments.push((context.clone(), body.to_string()));
            Ok(PublishedComment {
                id: Some(comments.len() as u64),
                html_url: None,
            })
        }
    }
}
