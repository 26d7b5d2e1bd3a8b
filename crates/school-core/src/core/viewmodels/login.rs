use crate::api::models::RegisterRequest;
use crate::core::domain::{AuthTokens, User};
use crate::core::repositories::AuthRepository;
use crate::core::result::NetworkResult;
use crate::core::state::{LoadState, StateHolder};

/// Sign-in, registration and session screens
#[derive(Debug)]
pub struct LoginViewModel {
    repository: AuthRepository,
    user: StateHolder<User>,
    refresh: StateHolder<AuthTokens>,
}

impl LoginViewModel {
    pub fn new(repository: AuthRepository) -> Self {
        Self {
            repository,
            user: StateHolder::new(),
            refresh: StateHolder::new(),
        }
    }

    /// Signed-in user, populated by login, registration or `load_current_user`
    pub fn user(&self) -> &StateHolder<User> {
        &self.user
    }

    pub fn refresh(&self) -> &StateHolder<AuthTokens> {
        &self.refresh
    }

    pub async fn login(&self, email: &str, password: &str) -> LoadState<User> {
        self.user
            .run(async {
                self.repository
                    .login(email, password)
                    .await
                    .map(|response| response.user)
            })
            .await
    }

    pub async fn register(&self, registration: RegisterRequest) -> LoadState<User> {
        self.user
            .run(async {
                self.repository
                    .register(registration)
                    .await
                    .map(|response| response.user)
            })
            .await
    }

    pub async fn load_current_user(&self) -> LoadState<User> {
        self.user.run(self.repository.current_user()).await
    }

    pub async fn refresh_session(&self) -> LoadState<AuthTokens> {
        self.refresh.run(self.repository.refresh_token()).await
    }

    /// Clear the local session; the user screen returns to `Idle`.
    pub async fn logout(&self) -> NetworkResult<()> {
        let result = self.repository.logout().await;
        if result.is_success() {
            self.user.reset();
            self.refresh.reset();
        }
        result
    }
}
