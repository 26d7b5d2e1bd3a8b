use super::{require, run};
use crate::api::client::ApiClient;
use crate::api::models::{
    LoginRequest, LoginResponseDto, RefreshTokenRequest, RegisterRequest, TokenResponseDto, UserDto,
};
use crate::core::domain::{AuthTokens, LoginResponse, User};
use crate::core::result::NetworkResult;
use crate::error::{ApiError, ValidationError};
use crate::storage::session::SessionTokens;
use crate::utils::error_helpers::empty_response_error;
use crate::utils::validation::{validate_email, validate_required};
use reqwest::Method;

const LOGIN_ENDPOINT: &str = "/auth/login";
const REGISTER_ENDPOINT: &str = "/auth/register";
const REFRESH_ENDPOINT: &str = "/auth/refresh";
const ME_ENDPOINT: &str = "/auth/me";

/// Authentication calls plus the token side effects that follow them
#[derive(Debug, Clone)]
pub struct AuthRepository {
    client: ApiClient,
}

impl AuthRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Sign in and persist the returned tokens. On failure the existing
    /// session is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> NetworkResult<LoginResponse> {
        run("login", self.try_login(email, password)).await
    }

    /// Create an account; the server signs the new user in directly.
    pub async fn register(&self, registration: RegisterRequest) -> NetworkResult<LoginResponse> {
        run("register", self.try_register(registration)).await
    }

    /// Exchange the stored refresh token for a new access token. A 401 means
    /// the refresh token is no longer valid and the session is cleared.
    pub async fn refresh_token(&self) -> NetworkResult<AuthTokens> {
        run("refresh_token", self.try_refresh_token()).await
    }

    pub async fn current_user(&self) -> NetworkResult<User> {
        run("current_user", self.try_current_user()).await
    }

    /// Local sign-out; no request is made.
    pub async fn logout(&self) -> NetworkResult<()> {
        run("logout", async { self.try_logout() }).await
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        validate_required("email", email)?;
        validate_required("password", password)?;

        let request = self
            .client
            .build_request(Method::POST, LOGIN_ENDPOINT)
            .json(&LoginRequest {
                email: email.trim().to_string(),
                password: password.to_string(),
            });
        let dto: Option<LoginResponseDto> = self.client.fetch(request, LOGIN_ENDPOINT).await?;
        let response = LoginResponse::from(require(dto, LOGIN_ENDPOINT, "No login data received")?);

        self.persist_login(&response, LOGIN_ENDPOINT)?;
        log::info!("Signed in as user {}", response.user.id);
        Ok(response)
    }

    async fn try_register(&self, registration: RegisterRequest) -> Result<LoginResponse, ApiError> {
        validate_email(registration.email.trim())?;
        validate_required("password", &registration.password)?;
        validate_required("full_name", &registration.full_name)?;

        let request = self
            .client
            .build_request(Method::POST, REGISTER_ENDPOINT)
            .json(&registration);
        let dto: Option<LoginResponseDto> = self.client.fetch(request, REGISTER_ENDPOINT).await?;
        let response =
            LoginResponse::from(require(dto, REGISTER_ENDPOINT, "No registration data received")?);

        self.persist_login(&response, REGISTER_ENDPOINT)?;
        log::info!("Registered user {}", response.user.id);
        Ok(response)
    }

    async fn try_refresh_token(&self) -> Result<AuthTokens, ApiError> {
        let refresh_token = self.client.session().refresh_token().ok_or_else(|| {
            ValidationError::new("refresh_token", "Not signed in: no refresh token available")
        })?;

        let request = self
            .client
            .build_request(Method::POST, REFRESH_ENDPOINT)
            .json(&RefreshTokenRequest { refresh_token });
        let dto: Option<TokenResponseDto> = match self.client.fetch(request, REFRESH_ENDPOINT).await {
            Ok(dto) => dto,
            Err(error @ ApiError::Http { status: 401, .. }) => {
                log::warn!("Refresh token rejected, clearing session");
                if let Err(clear_error) = self.client.session().clear() {
                    log::error!("Failed to clear session: {clear_error}");
                }
                return Err(error);
            }
            Err(error) => return Err(error),
        };

        let tokens = AuthTokens::from(require(dto, REFRESH_ENDPOINT, "No token data received")?);
        if tokens.access_token.trim().is_empty() {
            return Err(empty_response_error(REFRESH_ENDPOINT, "No access token received"));
        }

        self.client.session().store_tokens(&SessionTokens {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            user_id: None,
        })?;
        Ok(tokens)
    }

    async fn try_current_user(&self) -> Result<User, ApiError> {
        let request = self.client.build_request(Method::GET, ME_ENDPOINT);
        let dto: Option<UserDto> = self.client.fetch(request, ME_ENDPOINT).await?;
        Ok(User::from(require(dto, ME_ENDPOINT, "No user data received")?))
    }

    fn try_logout(&self) -> Result<(), ApiError> {
        self.client.session().clear()?;
        log::info!("Signed out");
        Ok(())
    }

    fn persist_login(&self, response: &LoginResponse, endpoint: &str) -> Result<(), ApiError> {
        if response.access_token.trim().is_empty() {
            return Err(empty_response_error(endpoint, "No access token received"));
        }
        self.client.session().replace_tokens(&SessionTokens {
            access_token: response.access_token.clone(),
            refresh_token: response.refresh_token.clone(),
            user_id: Some(response.user.id),
        })?;
        Ok(())
    }
}
