use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ValidationError: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Cli(#[from] CliError),
}

/// Failures raised by the terminal front end
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    /// A repository operation ended in its error state; the text is already
    /// user-facing
    #[error("{0}")]
    OperationFailed(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {endpoint} failed before a response arrived: {message}")]
    Transport { endpoint: String, message: String },
    #[error("HTTP error: {status} at {endpoint}")]
    Http {
        status: u16,
        endpoint: String,
        body: Option<String>,
    },
    #[error("Empty response from {endpoint}")]
    EmptyResponse { endpoint: String, message: String },
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("HTTP client initialisation failed: {0}")]
    ClientInit(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Session storage failed: {0}")]
    Session(#[from] StorageError),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Operation aborted: {}", .message.as_deref().unwrap_or("Unknown error"))]
    Unexpected { message: Option<String> },
}

/// Client-side input rejection. Displays as the bare message so it can be
/// shown to the user unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Token store lock poisoned")]
    LockPoisoned,
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, hint: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Api(api_error) => match api_error {
                ApiError::Http {
                    status: 401 | 403, ..
                } => ErrorSeverity::High,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::Transport { .. } => ErrorSeverity::Medium,
                ApiError::ClientInit(_) => ErrorSeverity::Critical,
                ApiError::Validation(_) => ErrorSeverity::Low,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::Cli(CliError::InvalidArguments(_)) => ErrorSeverity::Low,
            AppError::Cli(CliError::OperationFailed(_)) => ErrorSeverity::Medium,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Http {
                status: 401 | 403, ..
            }) => Some("Run 'school-cli auth login' and try again".to_string()),
            AppError::Api(ApiError::Transport { .. }) => {
                Some("Check your internet connection and the configured API URL".to_string())
            }
            AppError::Config(ConfigError::MissingField { hint, .. }) => Some(hint.clone()),
            AppError::Storage(StorageError::KeyringError(_)) => {
                Some("Make sure the OS keyring service is available".to_string())
            }
            _ => None,
        }
    }
}
