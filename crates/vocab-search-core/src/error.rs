//! Error types and exit codes for vocab-search
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Backend/data error (transport, status or decode failures)
//!
//! Unresolved aliases and selection uris are not errors of this type; they
//! are recorded as [`UnresolvedReference`]s and never abort a batch.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Exit codes for the vocab-search binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Backend/data error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that propagate out of gateway, lookup and configuration calls
#[derive(Error, Debug)]
pub enum SearchBarError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("invalid endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    // Backend errors (exit code 3)
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl SearchBarError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl fmt::Display) -> Self {
        SearchBarError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an endpoint that could not be turned into a URL
    pub fn invalid_endpoint(url: impl fmt::Display, reason: impl fmt::Display) -> Self {
        SearchBarError::InvalidEndpoint {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SearchBarError::UsageError(_)
            | SearchBarError::InvalidValue { .. }
            | SearchBarError::InvalidEndpoint { .. } => ExitCode::Usage,

            SearchBarError::Http { .. }
            | SearchBarError::Status { .. }
            | SearchBarError::Decode { .. } => ExitCode::Data,

            SearchBarError::Io(_)
            | SearchBarError::Json(_)
            | SearchBarError::Toml(_)
            | SearchBarError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            SearchBarError::UsageError(_) => "usage_error",
            SearchBarError::InvalidValue { .. } => "invalid_value",
            SearchBarError::InvalidEndpoint { .. } => "invalid_endpoint",
            SearchBarError::Http { .. } => "http_error",
            SearchBarError::Status { .. } => "http_status",
            SearchBarError::Decode { .. } => "decode_error",
            SearchBarError::Io(_) => "io_error",
            SearchBarError::Json(_) => "json_error",
            SearchBarError::Toml(_) => "toml_error",
            SearchBarError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for vocab-search operations
pub type Result<T> = std::result::Result<T, SearchBarError>;

/// Which kind of reference could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Dataset,
    Vocabulary,
    Selection,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Dataset => write!(f, "dataset"),
            ReferenceKind::Vocabulary => write!(f, "vocab"),
            ReferenceKind::Selection => write!(f, "selection"),
        }
    }
}

/// A non-fatal lookup miss: an alias or selected uri that the backend does
/// not know within the active scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedReference {
    pub kind: ReferenceKind,
    pub identifier: String,
    pub message: String,
}

impl UnresolvedReference {
    pub fn scope(kind: ReferenceKind, identifier: &str) -> Self {
        Self {
            kind,
            identifier: identifier.to_string(),
            message: format!(
                "{kind} \"{identifier}\" was not found as a {kind} uri or alias of a {kind}"
            ),
        }
    }

    pub fn selection(uri: &str) -> Self {
        Self {
            kind: ReferenceKind::Selection,
            identifier: uri.to_string(),
            message: format!(
                "The initial selected uri \"{uri}\" was not found or was not part of the specified source datasets and vocabs."
            ),
        }
    }
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(
            SearchBarError::UsageError("bad".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            SearchBarError::Status {
                url: "http://x".into(),
                status: 500
            }
            .exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            SearchBarError::Other("x".into()).exit_code(),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_to_json_envelope() {
        let err = SearchBarError::invalid_value("page size", 0);
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 2);
        assert_eq!(json["error"]["type"], "invalid_value");
        assert_eq!(json["error"]["message"], "invalid page size: 0");
    }

    #[test]
    fn test_unresolved_scope_message() {
        let miss = UnresolvedReference::scope(ReferenceKind::Vocabulary, "unesco");
        assert_eq!(
            miss.to_string(),
            "vocab \"unesco\" was not found as a vocab uri or alias of a vocab"
        );
        assert_eq!(miss.identifier, "unesco");
    }
}
