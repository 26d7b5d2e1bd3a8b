use super::{require, run};
use crate::api::client::ApiClient;
use crate::api::models::{BankSlip, PaymentDto, PaymentQuery, PaymentSubmission, PaymentVerification};
use crate::core::domain::Payment;
use crate::core::result::NetworkResult;
use crate::error::{ApiError, ValidationError};
use crate::utils::error_helpers::convert_json_error;
use crate::utils::validation::validate_amount;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

const PAYMENTS_ENDPOINT: &str = "/finance/payments";

#[derive(Debug, Clone)]
pub struct PaymentRepository {
    client: ApiClient,
}

impl PaymentRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Record a payment. With a bank slip the body is multipart
    /// (`payment_data` JSON part plus `bank_slip` file part), otherwise JSON.
    /// Non-positive amounts are rejected before any request is made.
    pub async fn submit_payment(
        &self,
        submission: PaymentSubmission,
        bank_slip: Option<BankSlip>,
    ) -> NetworkResult<Payment> {
        run("submit_payment", self.try_submit_payment(submission, bank_slip)).await
    }

    pub async fn verify_payment(
        &self,
        payment_id: i64,
        verification: PaymentVerification,
    ) -> NetworkResult<Payment> {
        run("verify_payment", self.try_verify_payment(payment_id, verification)).await
    }

    pub async fn list_payments(&self, query: PaymentQuery) -> NetworkResult<Vec<Payment>> {
        run("list_payments", self.try_list_payments(query)).await
    }

    pub async fn get_payment(&self, payment_id: i64) -> NetworkResult<Payment> {
        run("get_payment", self.try_get_payment(payment_id)).await
    }

    async fn try_submit_payment(
        &self,
        submission: PaymentSubmission,
        bank_slip: Option<BankSlip>,
    ) -> Result<Payment, ApiError> {
        validate_amount(submission.amount)?;

        let request = self.client.build_request(Method::POST, PAYMENTS_ENDPOINT);
        let request = match bank_slip {
            Some(slip) => request.multipart(payment_form(&submission, slip)?),
            None => request.json(&submission),
        };

        let dto: Option<PaymentDto> = self.client.fetch(request, PAYMENTS_ENDPOINT).await?;
        let payment = Payment::from(require(dto, PAYMENTS_ENDPOINT, "No payment data received")?);
        log::info!(
            "Payment {} submitted for student {} ({})",
            payment.id,
            payment.student_id,
            payment.status
        );
        Ok(payment)
    }

    async fn try_verify_payment(
        &self,
        payment_id: i64,
        verification: PaymentVerification,
    ) -> Result<Payment, ApiError> {
        let endpoint = format!("{PAYMENTS_ENDPOINT}/{payment_id}/verify");
        let request = self
            .client
            .build_request(Method::POST, &endpoint)
            .json(&verification);
        let dto: Option<PaymentDto> = self.client.fetch(request, &endpoint).await?;
        Ok(Payment::from(require(dto, &endpoint, "No payment data received")?))
    }

    async fn try_list_payments(&self, query: PaymentQuery) -> Result<Vec<Payment>, ApiError> {
        let request = self
            .client
            .build_request(Method::GET, PAYMENTS_ENDPOINT)
            .query(&query);
        let dtos: Option<Vec<PaymentDto>> = self.client.fetch(request, PAYMENTS_ENDPOINT).await?;
        let dtos = require(dtos, PAYMENTS_ENDPOINT, "No payments data received")?;
        Ok(dtos.into_iter().map(Payment::from).collect())
    }

    async fn try_get_payment(&self, payment_id: i64) -> Result<Payment, ApiError> {
        let endpoint = format!("{PAYMENTS_ENDPOINT}/{payment_id}");
        let request = self.client.build_request(Method::GET, &endpoint);
        let dto: Option<PaymentDto> = self.client.fetch(request, &endpoint).await?;
        Ok(Payment::from(require(dto, &endpoint, "No payment data received")?))
    }
}

fn payment_form(submission: &PaymentSubmission, slip: BankSlip) -> Result<Form, ApiError> {
    let payment_data =
        serde_json::to_string(submission).map_err(|e| convert_json_error(e, PAYMENTS_ENDPOINT))?;

    let slip_part = Part::bytes(slip.bytes)
        .file_name(slip.file_name)
        .mime_str(&slip.content_type)
        .map_err(|_| {
            ValidationError::new(
                "bank_slip",
                format!("Unsupported bank slip type '{}'", slip.content_type),
            )
        })?;

    Ok(Form::new()
        .text("payment_data", payment_data)
        .part("bank_slip", slip_part))
}
