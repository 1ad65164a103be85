//! Error types with contextual suggestions
//!
//! Every failure of a run maps onto one of four kinds:
//! - configuration errors (missing inputs, unresolvable review request)
//! - parse errors (unreadable or malformed manifests)
//! - validation errors (bad numeric options)
//! - remote errors (the hosting API call failed)
//!
//! # Examples
//!
//! ```
//! use bundle_diff::error::{BundleDiffError, ErrorKind};
//! use std::path::PathBuf;
//!
//! let err = BundleDiffError::ManifestNotFound {
//!     path: PathBuf::from("stats/base.json"),
//!     role: "base".to_string(),
//! };
//! assert_eq!(err.kind(), ErrorKind::Configuration);
//! assert_eq!(err.exit_code(), 66);
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error category shown to users and used for exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input missing or unresolvable
    Configuration,
    /// Manifest could not be read as structured data
    Parse,
    /// Numeric option could not be parsed as a finite number
    Validation,
    /// Hosting API call failed
    Remote,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration error",
            Self::Parse => "parse error",
            Self::Validation => "validation error",
            Self::Remote => "remote error",
        };
        f.write_str(name)
    }
}

/// bundle-diff errors
#[derive(Error, Debug)]
pub enum BundleDiffError {
    /// Manifest path does not exist
    #[error("{role} stats file does not exist: {path}")]
    ManifestNotFound {
        /// Path that was checked
        path: PathBuf,
        /// Which snapshot ("base" or "head")
        role: String,
    },

    /// Manifest exists but is not a usable stats file
    #[error("failed to parse stats file {path}: {reason}")]
    ManifestParse {
        /// Path of the manifest
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// No pull request could be resolved from the invoking environment
    #[error("cannot find the pull request to comment on: {reason}")]
    MissingContext {
        /// Why resolution failed
        reason: String,
    },

    /// Publishing requires an access token
    #[error("no access token provided for the hosting API")]
    MissingToken,

    /// Configuration file is present but invalid
    #[error("invalid configuration file {path}: {reason}")]
    Config {
        /// Path of the config file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Numeric option is not a finite number
    #[error("invalid value for {option}: '{value}' is not a finite number")]
    InvalidNumber {
        /// Option name
        option: String,
        /// Raw value supplied
        value: String,
    },

    /// Hosting API request failed
    #[error("failed to create comment: {message}")]
    Remote {
        /// HTTP status, if the server answered
        status: Option<u16>,
        /// Error detail
        message: String,
    },
}

impl BundleDiffError {
    /// Error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ManifestNotFound { .. }
            | Self::MissingContext { .. }
            | Self::MissingToken
            | Self::Config { .. } => ErrorKind::Configuration,
            Self::ManifestParse { .. } => ErrorKind::Parse,
            Self::InvalidNumber { .. } => ErrorKind::Validation,
            Self::Remote { .. } => ErrorKind::Remote,
        }
    }

    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bundle_diff::error::BundleDiffError;
    ///
    /// let error = BundleDiffError::MissingToken;
    /// assert!(error.suggestion().unwrap().contains("GITHUB_TOKEN"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ManifestNotFound { role, .. } => Some(format!(
                "Generate the {} stats first, e.g. `webpack --json > stats.json`, and check --{}-stats-path",
                role, role
            )),
            Self::ManifestParse { .. } => Some(
                "Stats must be JSON with an `assets` array or a `children` array of builds"
                    .to_string(),
            ),
            Self::MissingContext { .. } => Some(
                "Run on a pull_request event, or pass --repository owner/repo and --pr <number>"
                    .to_string(),
            ),
            Self::MissingToken => Some(
                "Pass --token or set INPUT_TOKEN (e.g. `token: ${{ secrets.GITHUB_TOKEN }}`)"
                    .to_string(),
            ),
            Self::Config { .. } => {
                Some("Check .bundle-diff.toml for typos and value types".to_string())
            }
            Self::InvalidNumber { option, .. } => {
                Some(format!("Provide a plain number for {}, e.g. 5 or 2.5", option))
            }
            Self::Remote { status, .. } => match status {
                Some(401) | Some(403) => Some(
                    "Check that the token is valid and has `pull-requests: write` permission"
                        .to_string(),
                ),
                Some(404) => Some("Check the repository name and pull request number".to_string()),
                _ => Some("Check network access to the GitHub API".to_string()),
            },
        }
    }

    /// Get appropriate exit code for this error (sysexits.h conventions).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ManifestNotFound { .. } => 66, // EX_NOINPUT
            Self::ManifestParse { .. } => 65,    // EX_DATAERR
            Self::MissingContext { .. } => 64,   // EX_USAGE
            Self::MissingToken => 64,            // EX_USAGE
            Self::Config { .. } => 78,           // EX_CONFIG
            Self::InvalidNumber { .. } => 64,    // EX_USAGE
            Self::Remote { .. } => 69,           // EX_UNAVAILABLE
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its kind, cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        let kind = error.downcast_ref::<BundleDiffError>().map(|e| e.kind());
        match kind {
            Some(kind) => output.push_str(&format!(
                "{} {}: {}\n",
                style("error:").red().bold(),
                kind,
                error
            )),
            None => output.push_str(&format!("{} {}\n", style("error:").red().bold(), error)),
        }

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(suggestion) = error
            .downcast_ref::<BundleDiffError>()
            .and_then(|e| e.suggestion())
        {
            output.push_str(&format!(
                "\n{} {}\n",
                style("help:").cyan().bold(),
                suggestion
            ));
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(err) = error.downcast_ref::<BundleDiffError>() {
            err.exit_code()
        } else {
            1
        }
    }
}
