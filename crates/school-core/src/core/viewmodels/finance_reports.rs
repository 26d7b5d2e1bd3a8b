use crate::api::models::DateRange;
use crate::core::domain::{CollectionReport, FinanceDashboard, OutstandingBalance};
use crate::core::repositories::ReportRepository;
use crate::core::state::{LoadState, StateHolder};

#[derive(Debug)]
pub struct FinanceReportsViewModel {
    repository: ReportRepository,
    dashboard: StateHolder<FinanceDashboard>,
    collections: StateHolder<CollectionReport>,
    outstanding: StateHolder<Vec<OutstandingBalance>>,
}

impl FinanceReportsViewModel {
    pub fn new(repository: ReportRepository) -> Self {
        Self {
            repository,
            dashboard: StateHolder::new(),
            collections: StateHolder::new(),
            outstanding: StateHolder::new(),
        }
    }

    pub fn dashboard(&self) -> &StateHolder<FinanceDashboard> {
        &self.dashboard
    }

    pub fn collections(&self) -> &StateHolder<CollectionReport> {
        &self.collections
    }

    pub fn outstanding(&self) -> &StateHolder<Vec<OutstandingBalance>> {
        &self.outstanding
    }

    pub async fn load_dashboard(&self) -> LoadState<FinanceDashboard> {
        self.dashboard.run(self.repository.finance_dashboard()).await
    }

    pub async fn load_collections(&self, range: DateRange) -> LoadState<CollectionReport> {
        self.collections
            .run(self.repository.collection_report(range))
            .await
    }

    pub async fn load_outstanding(&self, class_id: Option<i64>) -> LoadState<Vec<OutstandingBalance>> {
        self.outstanding
            .run(self.repository.outstanding_balances(class_id))
            .await
    }

    /// Refresh every report section concurrently
    pub async fn load_all(&self, range: DateRange) {
        tokio::join!(
            self.load_dashboard(),
            self.load_collections(range),
            self.load_outstanding(None),
        );
    }
}
