//! Outcome type returned by every repository operation.

use std::fmt;

pub(crate) const UNEXPECTED_PREFIX: &str = "An unexpected error occurred: ";
pub(crate) const UNKNOWN_ERROR: &str = "Unknown error";

/// A user-facing error text that is never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorMessage(String);

impl ErrorMessage {
    /// Wrap `message`; a blank input becomes the generic unexpected-error text
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self(format!("{UNEXPECTED_PREFIX}{UNKNOWN_ERROR}"))
        } else {
            Self(message)
        }
    }

    /// Fallback used when an HTTP failure carries no usable text
    pub fn http_status(status: u16) -> Self {
        Self(format!("Error: HTTP {status}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ErrorMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ErrorMessage {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ErrorMessage {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl std::error::Error for ErrorMessage {}

/// Success with a fully mapped value, or a human-readable error.
///
/// Callers must handle both arms; there is no third state.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResult<T> {
    Success(T),
    Error(ErrorMessage),
}

impl<T> NetworkResult<T> {
    pub fn error(message: impl Into<ErrorMessage>) -> Self {
        NetworkResult::Error(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NetworkResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, NetworkResult::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            NetworkResult::Success(data) => Some(data),
            NetworkResult::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            NetworkResult::Error(message) => Some(message.as_str()),
            NetworkResult::Success(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            NetworkResult::Success(data) => Some(data),
            NetworkResult::Error(_) => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> NetworkResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            NetworkResult::Success(data) => NetworkResult::Success(f(data)),
            NetworkResult::Error(message) => NetworkResult::Error(message),
        }
    }

    pub fn into_std(self) -> Result<T, ErrorMessage> {
        match self {
            NetworkResult::Success(data) => Ok(data),
            NetworkResult::Error(message) => Err(message),
        }
    }
}
