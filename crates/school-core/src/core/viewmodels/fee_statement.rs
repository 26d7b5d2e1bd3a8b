use crate::core::domain::FeeStatement;
use crate::core::repositories::FeeRepository;
use crate::core::state::{LoadState, StateHolder};

/// Shown instead of the transaction table when a statement has no rows
pub const NO_TRANSACTIONS_MESSAGE: &str = "No transactions found";

#[derive(Debug)]
pub struct FeeStatementViewModel {
    repository: FeeRepository,
    statement: StateHolder<FeeStatement>,
}

impl FeeStatementViewModel {
    pub fn new(repository: FeeRepository) -> Self {
        Self {
            repository,
            statement: StateHolder::new(),
        }
    }

    pub fn statement(&self) -> &StateHolder<FeeStatement> {
        &self.statement
    }

    pub async fn load_statement(&self, student_id: i64) -> LoadState<FeeStatement> {
        self.statement
            .run(self.repository.fee_statement(student_id))
            .await
    }

    /// True only for a loaded statement without transactions
    pub fn has_no_transactions(&self) -> bool {
        is_empty_statement(&self.statement.state())
    }
}

/// Same check on a state the screen already holds
pub fn is_empty_statement(state: &LoadState<FeeStatement>) -> bool {
    state
        .data()
        .is_some_and(|statement| !statement.has_transactions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repositories::test_support::signed_in_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_empty_statement_predicate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/finance/students/2/statement"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "student_id": 2, "total_fees": 0, "total_paid": 0, "balance": 0, "transactions": []
            })))
            .mount(&server)
            .await;

        let view_model = FeeStatementViewModel::new(FeeRepository::new(signed_in_client(&server)));
        assert!(!view_model.has_no_transactions());

        let state = view_model.load_statement(2).await;
        assert!(state.is_loaded());
        assert!(view_model.has_no_transactions());
    }

    #[tokio::test]
    async fn test_error_state_is_not_empty_statement() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/finance/students/2/statement"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let view_model = FeeStatementViewModel::new(FeeRepository::new(signed_in_client(&server)));
        let state = view_model.load_statement(2).await;

        assert_eq!(state.error(), Some("Error: HTTP 500"));
        assert!(!is_empty_statement(&state));
    }
}
