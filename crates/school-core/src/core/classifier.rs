//! Converts a failed API call into exactly one user-facing message.
//!
//! Precedence, first match wins:
//! 1. no response reached the server -> fixed network message
//! 2. structured body with a non-blank `detail` -> verbatim
//! 3. structured body with a non-blank `message` -> verbatim
//! 4. any other HTTP failure -> `Error: HTTP <status>`
//! 5. everything else -> `An unexpected error occurred: <text>`
//!
//! Empty-response and client-side validation failures carry their own
//! message and bypass the precedence list.

use crate::core::result::{ErrorMessage, UNEXPECTED_PREFIX, UNKNOWN_ERROR};
use crate::error::ApiError;
use serde::Deserialize;
use serde_json::Value;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error: Check your internet connection";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkConnection,
    Server,
    Validation,
    Authentication,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
}

/// Classify `error` raised by `operation`, logging the raw details.
pub fn classify(operation: &str, error: &ApiError) -> ClassifiedError {
    match error {
        ApiError::Transport { endpoint, message } => {
            log::warn!("{operation}: no response from {endpoint}: {message}");
            ClassifiedError {
                kind: ErrorKind::NetworkConnection,
                message: ErrorMessage::new(NETWORK_ERROR_MESSAGE),
            }
        }
        ApiError::Http {
            status,
            endpoint,
            body,
        } => {
            log::warn!(
                "{operation}: HTTP {status} from {endpoint}, body: {}",
                body.as_deref().unwrap_or("<empty>")
            );
            classify_http(*status, body.as_deref())
        }
        ApiError::EmptyResponse { endpoint, message } => {
            log::warn!("{operation}: empty response from {endpoint}");
            ClassifiedError {
                kind: ErrorKind::Server,
                message: ErrorMessage::new(message.as_str()),
            }
        }
        ApiError::Validation(validation) => {
            log::info!("{operation}: rejected before sending: {validation}");
            ClassifiedError {
                kind: ErrorKind::Validation,
                message: ErrorMessage::new(validation.message.as_str()),
            }
        }
        ApiError::Unexpected { message } => {
            log::error!(
                "{operation}: unexpected failure: {}",
                message.as_deref().unwrap_or(UNKNOWN_ERROR)
            );
            unexpected(message.as_deref())
        }
        other => {
            log::error!("{operation}: unexpected failure: {other}");
            unexpected(Some(&other.to_string()))
        }
    }
}

fn classify_http(status: u16, body: Option<&str>) -> ClassifiedError {
    let structured = body.and_then(structured_message);

    let kind = match (status, &structured) {
        (401 | 403, _) => ErrorKind::Authentication,
        (_, Some(_)) => ErrorKind::Validation,
        _ => ErrorKind::Server,
    };

    let message = structured
        .map(ErrorMessage::new)
        .unwrap_or_else(|| ErrorMessage::http_status(status));

    ClassifiedError { kind, message }
}

/// Extract the server-provided text from an error body, preferring `detail`
/// over `message`. Blank values count as absent.
pub fn structured_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    detail_text(parsed.detail).or_else(|| non_blank_string(parsed.message))
}

fn detail_text(detail: Option<Value>) -> Option<String> {
    match detail? {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        // FastAPI-style validation list: [{"loc": [...], "msg": "..."}]
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .filter(|msg| !msg.trim().is_empty())
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

fn non_blank_string(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        _ => None,
    }
}

fn unexpected(text: Option<&str>) -> ClassifiedError {
    let text = text
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(UNKNOWN_ERROR);
    ClassifiedError {
        kind: ErrorKind::Unknown,
        message: ErrorMessage::new(format!("{UNEXPECTED_PREFIX}{text}")),
    }
}
