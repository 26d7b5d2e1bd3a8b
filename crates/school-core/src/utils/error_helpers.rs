use crate::error::ApiError;
use std::io;
use std::path::Path;

/// Helper functions for standardizing error conversions across the codebase.
/// Convert reqwest errors raised before a complete response arrived.
pub fn convert_request_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert a failure to read the body of a response whose status already
/// arrived. The server answered, so this is never a connection problem: a
/// failure status keeps its code, a success becomes an unexpected error.
pub fn convert_body_error(
    status: u16,
    error: impl std::fmt::Display,
    endpoint: &str,
) -> ApiError {
    if (200..300).contains(&status) {
        ApiError::Unexpected {
            message: Some(format!("Failed to read response from {endpoint}: {error}")),
        }
    } else {
        ApiError::Http {
            status,
            endpoint: endpoint.to_string(),
            body: None,
        }
    }
}

/// Convert JSON deserialization errors to ApiError with endpoint context
pub fn convert_json_error(error: serde_json::Error, endpoint: &str) -> ApiError {
    ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: format!("JSON parse error: {}", error),
    }
}

/// Convert IO errors to ApiError with the offending path
pub fn convert_io_error(error: io::Error, path: &Path) -> ApiError {
    ApiError::FileIo {
        path: path.to_string_lossy().to_string(),
        source: error,
    }
}

/// Build the error for a success status that carried no payload
pub fn empty_response_error(endpoint: &str, message: &str) -> ApiError {
    ApiError::EmptyResponse {
        endpoint: endpoint.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_json_error() {
        let json_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let api_error = convert_json_error(json_error, "/students/1");

        match api_error {
            ApiError::Decode { endpoint, message } => {
                assert_eq!(endpoint, "/students/1");
                assert!(message.starts_with("JSON parse error"));
            }
            _ => panic!("Expected Decode error"),
        }
    }

    #[test]
    fn test_convert_io_error() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let api_error = convert_io_error(io_error, Path::new("/tmp/Receipts/r.pdf"));

        match api_error {
            ApiError::FileIo { path, source } => {
                assert_eq!(path, "/tmp/Receipts/r.pdf");
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected FileIo error"),
        }
    }

    #[test]
    fn test_body_read_failure_is_not_a_network_error() {
        use crate::core::classifier::{NETWORK_ERROR_MESSAGE, classify};

        let api_error = convert_body_error(502, "connection reset", "/finance/payments");
        assert!(matches!(
            api_error,
            ApiError::Http { status: 502, body: None, .. }
        ));
        assert_eq!(
            classify("list_payments", &api_error).message.as_str(),
            "Error: HTTP 502"
        );

        let api_error = convert_body_error(200, "connection reset", "/finance/payments");
        let message = classify("list_payments", &api_error).message.into_string();
        assert_ne!(message, NETWORK_ERROR_MESSAGE);
        assert_eq!(
            message,
            "An unexpected error occurred: Failed to read response from /finance/payments: connection reset"
        );
    }

    #[test]
    fn test_empty_response_error() {
        let api_error = empty_response_error("/auth/me", "No user data received");
        match api_error {
            ApiError::EmptyResponse { endpoint, message } => {
                assert_eq!(endpoint, "/auth/me");
                assert_eq!(message, "No user data received");
            }
            _ => panic!("Expected EmptyResponse error"),
        }
    }
}
