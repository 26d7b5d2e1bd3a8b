use super::{require, run};
use crate::api::client::ApiClient;
use crate::api::models::{
    CollectionReportDto, DateRange, FinanceDashboardDto, OutstandingBalanceDto,
};
use crate::core::domain::{CollectionReport, FinanceDashboard, OutstandingBalance};
use crate::core::result::NetworkResult;
use crate::error::ApiError;
use reqwest::Method;

const DASHBOARD_ENDPOINT: &str = "/finance/reports/dashboard";
const COLLECTIONS_ENDPOINT: &str = "/finance/reports/collections";
const OUTSTANDING_ENDPOINT: &str = "/finance/reports/outstanding";

/// Finance reports. Sections missing from a report body default to empty.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    client: ApiClient,
}

impl ReportRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn finance_dashboard(&self) -> NetworkResult<FinanceDashboard> {
        run("finance_dashboard", self.try_finance_dashboard()).await
    }

    pub async fn collection_report(&self, range: DateRange) -> NetworkResult<CollectionReport> {
        run("collection_report", self.try_collection_report(range)).await
    }

    pub async fn outstanding_balances(
        &self,
        class_id: Option<i64>,
    ) -> NetworkResult<Vec<OutstandingBalance>> {
        run("outstanding_balances", self.try_outstanding_balances(class_id)).await
    }

    async fn try_finance_dashboard(&self) -> Result<FinanceDashboard, ApiError> {
        let request = self.client.build_request(Method::GET, DASHBOARD_ENDPOINT);
        let dto: Option<FinanceDashboardDto> =
            self.client.fetch(request, DASHBOARD_ENDPOINT).await?;
        Ok(FinanceDashboard::from(require(
            dto,
            DASHBOARD_ENDPOINT,
            "No dashboard data received",
        )?))
    }

    async fn try_collection_report(&self, range: DateRange) -> Result<CollectionReport, ApiError> {
        let request = self
            .client
            .build_request(Method::GET, COLLECTIONS_ENDPOINT)
            .query(&range);
        let dto: Option<CollectionReportDto> =
            self.client.fetch(request, COLLECTIONS_ENDPOINT).await?;
        Ok(CollectionReport::from(require(
            dto,
            COLLECTIONS_ENDPOINT,
            "No collection report received",
        )?))
    }

    async fn try_outstanding_balances(
        &self,
        class_id: Option<i64>,
    ) -> Result<Vec<OutstandingBalance>, ApiError> {
        let mut request = self.client.build_request(Method::GET, OUTSTANDING_ENDPOINT);
        if let Some(class_id) = class_id {
            request = request.query(&[("class_id", class_id)]);
        }
        let dtos: Option<Vec<OutstandingBalanceDto>> =
            self.client.fetch(request, OUTSTANDING_ENDPOINT).await?;
        let dtos = require(dtos, OUTSTANDING_ENDPOINT, "No outstanding balances received")?;
        Ok(dtos.into_iter().map(OutstandingBalance::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::PaymentMethod;
    use crate::core::repositories::test_support::signed_in_client;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_dashboard_with_partial_sections() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/finance/reports/dashboard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "summary": {"total_expected": "900000", "total_collected": 600000, "pending_verifications": 4},
                "collections_by_method": [{"method": "MOBILE_MONEY", "total": 250000, "count": 40}]
            })))
            .mount(&server)
            .await;

        let dashboard = ReportRepository::new(signed_in_client(&server))
            .finance_dashboard()
            .await
            .into_std()
            .unwrap();

        assert!((dashboard.summary.total_expected - 900000.0).abs() < f64::EPSILON);
        assert_eq!(dashboard.summary.pending_verifications, 4);
        assert_eq!(
            dashboard.collections_by_method[0].method,
            PaymentMethod::MobileMoney
        );
        assert!(dashboard.monthly_collections.is_empty());
        assert!(dashboard.recent_payments.is_empty());
    }

    #[tokio::test]
    async fn test_collection_report_sends_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/finance/reports/collections"))
            .and(query_param("from", "2024-01-01"))
            .and(query_param("to", "2024-03-31"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "from": "2024-01-01", "to": "2024-03-31", "total_collected": 1500, "payment_count": 2,
                "entries": [{"date": "2024-01-20", "amount": 1500, "count": 2}]
            })))
            .mount(&server)
            .await;

        let report = ReportRepository::new(signed_in_client(&server))
            .collection_report(DateRange {
                from: NaiveDate::from_ymd_opt(2024, 1, 1),
                to: NaiveDate::from_ymd_opt(2024, 3, 31),
            })
            .await
            .into_std()
            .unwrap();
        assert_eq!(report.payment_count, 2);
        assert_eq!(report.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_outstanding_balances_filtered_by_class() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/finance/reports/outstanding"))
            .and(query_param("class_id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"student_id": 1, "student_name": "Amina Okello", "balance": "15000.50"}
            ])))
            .mount(&server)
            .await;

        let balances = ReportRepository::new(signed_in_client(&server))
            .outstanding_balances(Some(3))
            .await
            .into_std()
            .unwrap();
        assert!((balances[0].balance - 15000.5).abs() < f64::EPSILON);
    }
}
