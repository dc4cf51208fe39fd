//! Error type shared by every command.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Remediation attached to a 404 from a project lookup.
pub const HINT_PROJECT_MISSING: &str = "check that the specified project exists";
/// Remediation attached to a 400 from a connection update.
pub const HINT_CONNECTION_CATEGORY: &str = "check that the category is correct";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("no configuration found at {path}; run `fmeflow login` first")]
    ConfigMissing { path: PathBuf },
    #[error("configuration at {path} is invalid: {reason}; run `fmeflow login` again")]
    ConfigMalformed { path: PathBuf, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{}", status_text(.status, .message, .hint))]
    Status {
        status: u16,
        message: String,
        body: Option<Value>,
        hint: Option<String>,
    },
    #[error("failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{path}: {source}")]
    LocalIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write output: {0}")]
    Output(std::io::Error),
    #[error("task did not succeed: {0}")]
    TaskFailed(String),
    #[error("{operation} is not available on the {version} API")]
    Unsupported {
        operation: &'static str,
        version: &'static str,
    },
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::ref_option)]
fn status_text(status: &u16, message: &str, hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!("{message} (HTTP {status}): {hint}"),
        None => format!("{message} (HTTP {status})"),
    }
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::LocalIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn task_failed(message: impl Into<String>) -> Self {
        Self::TaskFailed(message.into())
    }

    /// A lookup the client resolved itself found nothing.
    pub fn not_found(message: impl Into<String>, hint: &str) -> Self {
        Self::Status {
            status: 404,
            message: message.into(),
            body: None,
            hint: Some(hint.to_string()),
        }
    }

    /// Attach `hint` when this is a `Status` error with the given code.
    #[must_use]
    pub fn hint_on(self, code: u16, hint: &str) -> Self {
        match self {
            Self::Status {
                status,
                message,
                body,
                hint: None,
            } if status == code => Self::Status {
                status,
                message,
                body,
                hint: Some(hint.to_string()),
            },
            other => other,
        }
    }

    /// Replace the message of a `Status` error with the given code.
    #[must_use]
    pub fn reword_on(self, code: u16, text: &str) -> Self {
        match self {
            Self::Status {
                status, body, hint, ..
            } if status == code => Self::Status {
                status,
                message: text.to_string(),
                body,
                hint,
            },
            other => other,
        }
    }

    /// HTTP status of a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// JSON error body returned by the server, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Output(err)
    }
}
