//! Errors surfaced by the device client.
//!
//! Every variant carries plain strings so the error is `Clone` and can travel
//! inside a GUI `Message`.

use thiserror::Error;

/// Coarse grouping shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Auth,
    Parse,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Network => "Network error",
            ErrorKind::Auth => "Auth error",
            ErrorKind::Parse => "Parse error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Network(String),
    #[error("device answered HTTP {0}")]
    Status(u16),
    #[error("device rejected the password")]
    Auth,
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("device rejected the request ({})", describe_result(*.code))]
    Rejected { code: i64 },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Auth => ErrorKind::Auth,
            ApiError::Parse(_) => ErrorKind::Parse,
            // A rejection is a well-formed "no" from the device; it belongs
            // with the other communication failures.
            ApiError::Timeout
            | ApiError::Network(_)
            | ApiError::Status(_)
            | ApiError::Rejected { .. } => ErrorKind::Network,
        }
    }

    /// One line for the status bar, e.g. "Auth error: device rejected the password".
    pub fn user_message(&self) -> String {
        format!("{}: {self}", self.kind().label())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ApiError::Timeout;
        }
        if let Some(status) = e.status() {
            return ApiError::Status(status.as_u16());
        }
        if e.is_decode() {
            return ApiError::Parse(e.to_string());
        }
        ApiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}

/// OpenSprinkler `{"result": n}` codes.
pub(crate) fn describe_result(code: i64) -> String {
    let what = match code {
        1 => "success",
        2 => "unauthorized",
        3 => "mismatch",
        16 => "data missing",
        17 => "out of range",
        18 => "data format error",
        19 => "RF code error",
        32 => "page not found",
        48 => "not permitted",
        _ => "unknown",
    };
    format!("code {code}: {what}")
}
