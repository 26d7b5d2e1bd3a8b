use crate::core::domain::{DownloadedReceipt, Receipt};
use crate::core::repositories::ReceiptRepository;
use crate::core::state::{LoadState, StateHolder};

#[derive(Debug)]
pub struct ReceiptViewModel {
    repository: ReceiptRepository,
    receipt: StateHolder<Receipt>,
    download: StateHolder<DownloadedReceipt>,
}

impl ReceiptViewModel {
    pub fn new(repository: ReceiptRepository) -> Self {
        Self {
            repository,
            receipt: StateHolder::new(),
            download: StateHolder::new(),
        }
    }

    pub fn receipt(&self) -> &StateHolder<Receipt> {
        &self.receipt
    }

    pub fn download(&self) -> &StateHolder<DownloadedReceipt> {
        &self.download
    }

    pub async fn load_receipt(&self, payment_id: i64) -> LoadState<Receipt> {
        self.receipt.run(self.repository.get_receipt(payment_id)).await
    }

    pub async fn generate_receipt(&self, payment_id: i64) -> LoadState<Receipt> {
        self.receipt
            .run(self.repository.generate_receipt(payment_id))
            .await
    }

    pub async fn download_receipt(&self, receipt: &Receipt) -> LoadState<DownloadedReceipt> {
        self.download
            .run(self.repository.download_receipt(receipt))
            .await
    }

    /// Look up the receipt for `payment_id`, then download its PDF. Stops at
    /// the first failure, leaving the download screen untouched.
    pub async fn fetch_and_download(&self, payment_id: i64) -> LoadState<DownloadedReceipt> {
        match self.load_receipt(payment_id).await {
            LoadState::Loaded(receipt) => self.download_receipt(&receipt).await,
            LoadState::Error(message) => LoadState::Error(message),
            LoadState::Idle | LoadState::Loading => LoadState::Idle,
        }
    }
}
