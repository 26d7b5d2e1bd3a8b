//! One repository per API area.
//!
//! Every public operation goes through [`run`], so callers only ever see a
//! [`NetworkResult`]: transport and HTTP failures are classified, and a
//! panic inside an operation is caught and reported as an unexpected error.

pub mod attendance;
pub mod auth;
pub mod class;
pub mod fee;
pub mod fee_structure;
pub mod payment;
pub mod receipt;
pub mod report;
pub mod student;

pub use attendance::AttendanceRepository;
pub use auth::AuthRepository;
pub use class::ClassRepository;
pub use fee::FeeRepository;
pub use fee_structure::FeeStructureRepository;
pub use payment::PaymentRepository;
pub use receipt::ReceiptRepository;
pub use report::ReportRepository;
pub use student::StudentRepository;

use crate::core::classifier::classify;
use crate::core::result::NetworkResult;
use crate::error::ApiError;
use crate::utils::error_helpers::empty_response_error;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Execute one repository operation and fold every exit path into a
/// [`NetworkResult`].
pub(crate) async fn run<T, F>(operation: &'static str, future: F) -> NetworkResult<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let outcome = match AssertUnwindSafe(future).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => Err(ApiError::Unexpected {
            message: panic_message(payload.as_ref()),
        }),
    };

    match outcome {
        Ok(value) => {
            log::debug!("{operation}: succeeded");
            NetworkResult::Success(value)
        }
        Err(error) => NetworkResult::Error(classify(operation, &error).message),
    }
}

/// Unwrap a decoded body, turning an absent payload into the operation's
/// empty-response error.
pub(crate) fn require<T>(value: Option<T>, endpoint: &str, message: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| empty_response_error(endpoint, message))
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::NETWORK_ERROR_MESSAGE;

    #[tokio::test]
    async fn test_run_wraps_success() {
        let result = run("noop", async { Ok::<_, ApiError>(7) }).await;
        assert_eq!(result, NetworkResult::Success(7));
    }

    #[tokio::test]
    async fn test_run_classifies_errors() {
        let result: NetworkResult<()> = run("noop", async {
            Err(ApiError::Transport {
                endpoint: "/x".to_string(),
                message: "dns failure".to_string(),
            })
        })
        .await;
        assert_eq!(result.error_message(), Some(NETWORK_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_run_catches_panics() {
        let result: NetworkResult<u32> = run("explodes", async {
            let values: Vec<u32> = Vec::new();
            if values.is_empty() {
                panic!("mapping blew up");
            }
            Ok(values[0])
        })
        .await;
        assert_eq!(
            result.error_message(),
            Some("An unexpected error occurred: mapping blew up")
        );
    }

    #[test]
    fn test_require_reports_empty_response() {
        let err = require::<u32>(None, "/students/1", "No student data received").unwrap_err();
        match err {
            ApiError::EmptyResponse { endpoint, message } => {
                assert_eq!(endpoint, "/students/1");
                assert_eq!(message, "No student data received");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(require(Some(1), "/x", "unused").unwrap(), 1);
    }
}
