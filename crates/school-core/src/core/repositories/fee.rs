use super::{require, run};
use crate::api::client::ApiClient;
use crate::api::models::FeeStatementDto;
use crate::core::domain::FeeStatement;
use crate::core::result::NetworkResult;
use crate::error::ApiError;
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct FeeRepository {
    client: ApiClient,
}

impl FeeRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Charges, payments and running balance for one student
    pub async fn fee_statement(&self, student_id: i64) -> NetworkResult<FeeStatement> {
        run("fee_statement", self.try_fee_statement(student_id)).await
    }

    async fn try_fee_statement(&self, student_id: i64) -> Result<FeeStatement, ApiError> {
        let endpoint = format!("/finance/students/{student_id}/statement");
        let request = self.client.build_request(Method::GET, &endpoint);
        let dto: Option<FeeStatementDto> = self.client.fetch(request, &endpoint).await?;
        Ok(FeeStatement::from(require(dto, &endpoint, "No fee statement received")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::TransactionKind;
    use crate::core::repositories::test_support::signed_in_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fee_statement_maps_transactions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/finance/students/1/statement"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "student_id": 1,
                "student_name": "Amina Okello",
                "total_fees": "45000.00",
                "total_paid": 30000,
                "balance": 15000,
                "transactions": [
                    {"id": 1, "date": "2024-01-08", "description": "Term 1 tuition", "type": "CHARGE", "amount": 45000},
                    {"id": 2, "date": "2024-01-20", "description": "M-Pesa", "type": "payment", "amount": 30000, "balance": 15000}
                ]
            })))
            .mount(&server)
            .await;

        let statement = FeeRepository::new(signed_in_client(&server))
            .fee_statement(1)
            .await
            .into_std()
            .unwrap();

        assert!((statement.total_fees - 45000.0).abs() < f64::EPSILON);
        assert!(statement.has_transactions());
        assert_eq!(statement.transactions[0].kind, TransactionKind::Charge);
        assert_eq!(statement.transactions[1].balance, Some(15000.0));
    }

    #[tokio::test]
    async fn test_fee_statement_without_transactions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/finance/students/2/statement"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "student_id": 2, "total_fees": 0, "total_paid": 0, "balance": 0
            })))
            .mount(&server)
            .await;

        let statement = FeeRepository::new(signed_in_client(&server))
            .fee_statement(2)
            .await
            .into_std()
            .unwrap();
        assert!(!statement.has_transactions());
    }

    #[tokio::test]
    async fn test_fee_statement_accepts_string_running_balance() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/finance/students/3/statement"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "student_id": 3,
                "total_fees": "45000.00",
                "total_paid": "30000.00",
                "balance": "15000.00",
                "transactions": [
                    {"id": 7, "date": "2024-02-01", "type": "payment", "amount": "30000.00", "balance": "15000.00"},
                    {"id": 8, "date": "2024-02-02", "type": "charge", "amount": "500", "balance": null}
                ]
            })))
            .mount(&server)
            .await;

        let statement = FeeRepository::new(signed_in_client(&server))
            .fee_statement(3)
            .await
            .into_std()
            .unwrap();

        assert_eq!(statement.transactions[0].balance, Some(15000.0));
        assert_eq!(statement.transactions[1].balance, None);
    }
}
