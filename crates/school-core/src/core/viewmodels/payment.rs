use crate::api::models::{BankSlip, PaymentQuery, PaymentSubmission, PaymentVerification};
use crate::core::domain::Payment;
use crate::core::repositories::PaymentRepository;
use crate::core::state::{LoadState, StateHolder};

/// Payment submission, history and bursar verification screens
#[derive(Debug)]
pub struct PaymentViewModel {
    repository: PaymentRepository,
    submission: StateHolder<Payment>,
    history: StateHolder<Vec<Payment>>,
    detail: StateHolder<Payment>,
    verification: StateHolder<Payment>,
}

impl PaymentViewModel {
    pub fn new(repository: PaymentRepository) -> Self {
        Self {
            repository,
            submission: StateHolder::new(),
            history: StateHolder::new(),
            detail: StateHolder::new(),
            verification: StateHolder::new(),
        }
    }

    pub fn submission(&self) -> &StateHolder<Payment> {
        &self.submission
    }

    pub fn history(&self) -> &StateHolder<Vec<Payment>> {
        &self.history
    }

    pub fn detail(&self) -> &StateHolder<Payment> {
        &self.detail
    }

    pub fn verification(&self) -> &StateHolder<Payment> {
        &self.verification
    }

    pub async fn submit_payment(
        &self,
        submission: PaymentSubmission,
        bank_slip: Option<BankSlip>,
    ) -> LoadState<Payment> {
        self.submission
            .run(self.repository.submit_payment(submission, bank_slip))
            .await
    }

    pub async fn load_payments(&self, query: PaymentQuery) -> LoadState<Vec<Payment>> {
        self.history.run(self.repository.list_payments(query)).await
    }

    pub async fn load_payment(&self, payment_id: i64) -> LoadState<Payment> {
        self.detail.run(self.repository.get_payment(payment_id)).await
    }

    pub async fn verify_payment(
        &self,
        payment_id: i64,
        verification: PaymentVerification,
    ) -> LoadState<Payment> {
        self.verification
            .run(self.repository.verify_payment(payment_id, verification))
            .await
    }
}
