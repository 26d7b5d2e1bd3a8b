//! # school-core
//!
//! Client core for the school management API.
//!
//! Every server call is a repository operation that returns a
//! [`NetworkResult`](core::result::NetworkResult): either the decoded value or
//! a single user-facing message produced by the error classifier. Screens are
//! driven by view-models that publish [`LoadState`](core::state::LoadState)
//! transitions through watch channels.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use school_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> school_core::Result<()> {
//!     let config = Config::load(None)?;
//!     let session = SessionContext::load(Arc::new(KeyringTokenStore::new("default")))?;
//!     let client = ApiClient::new("http://localhost:8000".to_string(), session)?;
//!
//!     let login = LoginViewModel::new(AuthRepository::new(client.clone()));
//!     login.login("bursar@school.ac", "secret").await;
//!
//!     let statements = FeeStatementViewModel::new(FeeRepository::new(client));
//!     if let LoadState::Error(message) = statements.load_statement(4).await {
//!         eprintln!("{message}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         View-models                 │  StateHolder per screen resource
//! ├─────────────────────────────────────┤
//! │         Repositories                │  NetworkResult<T>, classified errors
//! ├─────────────────────────────────────┤
//! │         API Layer                   │  HTTP client, wire DTOs
//! ├─────────────────────────────────────┤
//! │         Storage Layer               │  Config, keyring tokens, session
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Validation, files, error helpers
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Commonly used types in one import.
///
/// ```rust,ignore
/// use school_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::AppError;

    pub use crate::api::client::ApiClient;

    pub use crate::core::classifier::{ErrorKind, NETWORK_ERROR_MESSAGE};
    pub use crate::core::repositories::{
        AttendanceRepository, AuthRepository, ClassRepository, FeeRepository,
        FeeStructureRepository, PaymentRepository, ReceiptRepository, ReportRepository,
        StudentRepository,
    };
    pub use crate::core::result::{ErrorMessage, NetworkResult};
    pub use crate::core::state::{LoadState, StateHolder};
    pub use crate::core::viewmodels::{
        AttendanceViewModel, FeeStatementViewModel, FeeStructureViewModel,
        FinanceReportsViewModel, LoginViewModel, PaymentViewModel, ReceiptViewModel,
        StudentsViewModel,
    };

    pub use crate::storage::config::Config;
    pub use crate::storage::credentials::{KeyringTokenStore, MemoryTokenStore, TokenStore};
    pub use crate::storage::session::SessionContext;

    pub use std::sync::Arc;
}

/// API layer - HTTP client and wire models.
///
/// - [`api::client`]: request building, bearer auth, status handling
/// - [`api::models`]: request bodies, query strings and response DTOs
pub mod api;

/// Result wrapper, error classifier, domain entities, repositories,
/// CRUD service traits, screen state and view-models.
pub mod core;

/// Storage layer - configuration and session persistence.
///
/// - [`storage::config`]: TOML configuration
/// - [`storage::credentials`]: keyring and in-memory token stores
/// - [`storage::session`]: the shared session context
pub mod storage;

pub mod utils;

/// Error handling - typed errors with severity levels and troubleshooting
/// hints.
pub mod error;

/// `school_core::Result<T>` for fallible set-up code outside repositories
pub type Result<T> = std::result::Result<T, AppError>;
