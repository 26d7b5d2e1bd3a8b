//! Per-screen view-models.
//!
//! Each view-model owns one [`StateHolder`](crate::core::state::StateHolder)
//! per screen resource and exposes one async method per user action. An
//! action publishes `Loading`, awaits a single repository operation and
//! publishes exactly one terminal state, which it also returns.

pub mod attendance;
pub mod fee_statement;
pub mod fee_structure;
pub mod finance_reports;
pub mod login;
pub mod payment;
pub mod receipt;
pub mod students;

pub use attendance::AttendanceViewModel;
pub use fee_statement::{FeeStatementViewModel, NO_TRANSACTIONS_MESSAGE};
pub use fee_structure::FeeStructureViewModel;
pub use finance_reports::FinanceReportsViewModel;
pub use login::LoginViewModel;
pub use payment::PaymentViewModel;
pub use receipt::ReceiptViewModel;
pub use students::StudentsViewModel;
