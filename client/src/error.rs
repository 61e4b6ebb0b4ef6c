use std::time::Duration;

use thiserror::Error;

/// Coarse classification of a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    HttpStatus,
    Format,
    Semantic,
}

/// Every way a submission can fail. The `Display` text is what the user sees,
/// so it never carries transport detail or raw bodies; use `{:?}` for logs.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Network error: unable to reach the prediction service")]
    Network(#[source] reqwest::Error),

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("{}", status_message(.status, .message))]
    HttpStatus { status: u16, message: Option<String> },

    #[error("Unexpected response format")]
    UnexpectedFormat {
        content_type: Option<String>,
        body: String,
    },

    #[error("Failed to parse response")]
    Parse {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("{}", .0.as_deref().unwrap_or("No prediction available"))]
    Semantic(Option<String>),
}

impl SubmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmitError::Network(_) | SubmitError::Timeout(_) => ErrorKind::Network,
            SubmitError::HttpStatus { .. } => ErrorKind::HttpStatus,
            SubmitError::UnexpectedFormat { .. } | SubmitError::Parse { .. } => ErrorKind::Format,
            SubmitError::Semantic(_) => ErrorKind::Semantic,
        }
    }

    /// Text rendered to the output element.
    pub fn user_message(&self) -> String {
        format!("{ERROR_PREFIX}{self}")
    }
}

pub const ERROR_PREFIX: &str = "Error: ";

fn status_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("HTTP error! status: {status}"),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected NAME=VALUE, got {0:?}")]
pub struct FieldParseError(pub String);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid {key} value {value:?}: {reason}")]
    InvalidVar {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
