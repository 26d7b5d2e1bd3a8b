use crate::cli::command_handlers::{
    AttendanceHandler, AuthHandler, ConfigHandler, FeeHandler, FeeStructureHandler,
    PaymentHandler, ReceiptHandler, ReportHandler, StudentHandler,
};
use crate::cli::main_types::Commands;
use crate::cli::render::TableDisplay;
use school_core::api::client::ApiClient;
use school_core::core::repositories::{
    AttendanceRepository, AuthRepository, ClassRepository, FeeRepository,
    FeeStructureRepository, PaymentRepository, ReceiptRepository, ReportRepository,
    StudentRepository,
};
use school_core::core::viewmodels::{
    AttendanceViewModel, FeeStatementViewModel, FeeStructureViewModel, FinanceReportsViewModel,
    LoginViewModel, PaymentViewModel, ReceiptViewModel, StudentsViewModel,
};
use school_core::error::{AppError, ConfigError};
use school_core::storage::config::Config;
use school_core::storage::credentials::KeyringTokenStore;
use school_core::storage::session::SessionContext;
use std::path::PathBuf;
use std::sync::Arc;

const KEYRING_PROFILE: &str = "default";

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    api_url: Option<String>,
}

impl Dispatcher {
    pub fn new(config: Config, config_path: Option<PathBuf>, api_url: Option<String>) -> Self {
        Self {
            config,
            config_path,
            api_url,
        }
    }

    // CLI argument (or SCHOOL_API_URL through clap) > config file
    fn get_api_url(&self) -> Result<String, AppError> {
        self.api_url
            .clone()
            .filter(|url| !url.is_empty())
            .or_else(|| self.config.get_api_url())
            .ok_or_else(|| {
                ConfigError::MissingField {
                    field: "api_url".to_string(),
                    hint: "Use 'school-cli config set --url <url>' or set SCHOOL_API_URL"
                        .to_string(),
                }
                .into()
            })
    }

    // Keyring failures should not block commands that work signed out
    fn load_session() -> SessionContext {
        match SessionContext::load(Arc::new(KeyringTokenStore::new(KEYRING_PROFILE))) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Could not restore session from keyring: {e}");
                SessionContext::new(Arc::new(KeyringTokenStore::new(KEYRING_PROFILE)))
            }
        }
    }

    fn create_client(&self) -> Result<ApiClient, AppError> {
        let url = self.get_api_url()?;
        log::debug!("Using API at {url}");
        Ok(ApiClient::new(url, Self::load_session())?)
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        let display = TableDisplay::new();

        match command {
            Commands::Config { command } => {
                ConfigHandler::new().handle(command, self.config.clone(), self.config_path.clone())
            }
            Commands::Auth { command } => {
                let client = self.create_client()?;
                AuthHandler::new(LoginViewModel::new(AuthRepository::new(client)))
                    .handle(command, &display)
                    .await
            }
            Commands::Students { command } => {
                let client = self.create_client()?;
                StudentHandler::new(StudentsViewModel::new(StudentRepository::new(client)))
                    .handle(command, &display)
                    .await
            }
            Commands::Classes { command } => {
                self.attendance_handler()?
                    .handle_classes(command, &display)
                    .await
            }
            Commands::Attendance { command } => {
                self.attendance_handler()?.handle(command, &display).await
            }
            Commands::Fees { command } => {
                let client = self.create_client()?;
                FeeHandler::new(FeeStatementViewModel::new(FeeRepository::new(client)))
                    .handle(command, &display)
                    .await
            }
            Commands::Payments { command } => {
                let client = self.create_client()?;
                PaymentHandler::new(PaymentViewModel::new(PaymentRepository::new(client)))
                    .handle(command, &display)
                    .await
            }
            Commands::Receipts { command } => {
                let client = self.create_client()?;
                let base_dir = self.config.receipts_base_dir()?;
                ReceiptHandler::new(ReceiptViewModel::new(ReceiptRepository::new(
                    client, base_dir,
                )))
                .handle(command, &display)
                .await
            }
            Commands::Reports { command } => {
                let client = self.create_client()?;
                ReportHandler::new(FinanceReportsViewModel::new(ReportRepository::new(client)))
                    .handle(command, &display)
                    .await
            }
            Commands::FeeStructures { command } => {
                let client = self.create_client()?;
                FeeStructureHandler::new(FeeStructureViewModel::new(FeeStructureRepository::new(
                    client,
                )))
                .handle(command, &display)
                .await
            }
        }
    }

    fn attendance_handler(&self) -> Result<AttendanceHandler, AppError> {
        let client = self.create_client()?;
        Ok(AttendanceHandler::new(AttendanceViewModel::new(
            AttendanceRepository::new(client.clone()),
            ClassRepository::new(client),
        )))
    }
}
