use super::{require, run};
use crate::api::client::ApiClient;
use crate::api::models::ReceiptDto;
use crate::core::domain::{DownloadedReceipt, Receipt};
use crate::core::result::NetworkResult;
use crate::error::ApiError;
use crate::utils::file::{receipt_file_path, write_file_atomically};
use reqwest::Method;
use std::path::PathBuf;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Receipt lookup, generation and PDF download.
///
/// PDFs are written to `<base_dir>/Receipts/receipt_<number>.pdf`.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    client: ApiClient,
    base_dir: PathBuf,
}

impl ReceiptRepository {
    pub fn new(client: ApiClient, base_dir: PathBuf) -> Self {
        Self { client, base_dir }
    }

    pub async fn get_receipt(&self, payment_id: i64) -> NetworkResult<Receipt> {
        run("get_receipt", self.try_receipt(Method::GET, payment_id)).await
    }

    /// Issue a receipt for a verified payment
    pub async fn generate_receipt(&self, payment_id: i64) -> NetworkResult<Receipt> {
        run("generate_receipt", self.try_receipt(Method::POST, payment_id)).await
    }

    /// Fetch the PDF and write it to local storage. Nothing is written when
    /// the request fails or the body is empty.
    pub async fn download_receipt(&self, receipt: &Receipt) -> NetworkResult<DownloadedReceipt> {
        run("download_receipt", self.try_download_receipt(receipt)).await
    }

    async fn try_receipt(&self, method: Method, payment_id: i64) -> Result<Receipt, ApiError> {
        let endpoint = format!("/finance/payments/{payment_id}/receipt");
        let request = self.client.build_request(method, &endpoint);
        let dto: Option<ReceiptDto> = self.client.fetch(request, &endpoint).await?;
        Ok(Receipt::from(require(dto, &endpoint, "No receipt data received")?))
    }

    async fn try_download_receipt(&self, receipt: &Receipt) -> Result<DownloadedReceipt, ApiError> {
        let endpoint = format!("/finance/receipts/{}/pdf", receipt.id);
        let request = self
            .client
            .build_request(Method::GET, &endpoint)
            .header(reqwest::header::ACCEPT, PDF_CONTENT_TYPE);
        let response = self.client.send(request, &endpoint).await?;
        let bytes = require(response.into_bytes(), &endpoint, "Receipt file is empty")?;

        let path = receipt_file_path(&self.base_dir, &receipt.receipt_number);
        write_file_atomically(&path, &bytes).await?;
        log::info!("Receipt {} saved to {}", receipt.receipt_number, path.display());

        Ok(DownloadedReceipt {
            receipt_id: receipt.id,
            path,
            content_type: PDF_CONTENT_TYPE,
            size_bytes: bytes.len(),
        })
    }
}
