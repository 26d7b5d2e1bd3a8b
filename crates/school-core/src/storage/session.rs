//! Session context shared by the API client and repositories.
//!
//! Loaded once at start-up from a [`TokenStore`], updated when
//! login/register/refresh succeed, cleared on logout or when the server
//! rejects the refresh token.

use super::Result;
use super::credentials::{MemoryTokenStore, TokenKey, TokenStore};
use std::sync::{Arc, PoisonError, RwLock};

/// Tokens and identity of the signed-in user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user_id: Option<i64>,
}

/// Tokens returned by a successful authentication call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    state: Arc<RwLock<Session>>,
    store: Arc<dyn TokenStore>,
}

impl SessionContext {
    /// Empty session backed by `store`; nothing is read from it
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Session::default())),
            store,
        }
    }

    /// Restore a previously persisted session
    pub fn load(store: Arc<dyn TokenStore>) -> Result<Self> {
        let session = Session {
            access_token: store.load(TokenKey::AccessToken)?,
            refresh_token: store.load(TokenKey::RefreshToken)?,
            user_id: store
                .load(TokenKey::UserId)?
                .and_then(|id| id.parse::<i64>().ok()),
        };

        Ok(Self {
            state: Arc::new(RwLock::new(session)),
            store,
        })
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    pub fn snapshot(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.snapshot().access_token
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.snapshot().refresh_token
    }

    pub fn user_id(&self) -> Option<i64> {
        self.snapshot().user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Persist tokens, then publish them to in-memory readers. A storage
    /// failure leaves the in-memory session untouched.
    pub fn store_tokens(&self, tokens: &SessionTokens) -> Result<()> {
        self.store
            .save(TokenKey::AccessToken, &tokens.access_token)?;
        if let Some(refresh) = &tokens.refresh_token {
            self.store.save(TokenKey::RefreshToken, refresh)?;
        }
        if let Some(user_id) = tokens.user_id {
            self.store.save(TokenKey::UserId, &user_id.to_string())?;
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.access_token = Some(tokens.access_token.clone());
        if tokens.refresh_token.is_some() {
            state.refresh_token = tokens.refresh_token.clone();
        }
        if tokens.user_id.is_some() {
            state.user_id = tokens.user_id;
        }
        Ok(())
    }

    /// Install the session of a newly authenticated user. Unlike
    /// [`store_tokens`](Self::store_tokens), keys missing from `tokens` are
    /// deleted rather than carried over from the previous user.
    pub fn replace_tokens(&self, tokens: &SessionTokens) -> Result<()> {
        self.store
            .save(TokenKey::AccessToken, &tokens.access_token)?;
        match &tokens.refresh_token {
            Some(refresh) => self.store.save(TokenKey::RefreshToken, refresh)?,
            None => self.store.delete(TokenKey::RefreshToken)?,
        }
        match tokens.user_id {
            Some(user_id) => self.store.save(TokenKey::UserId, &user_id.to_string())?,
            None => self.store.delete(TokenKey::UserId)?,
        }

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Session {
            access_token: Some(tokens.access_token.clone()),
            refresh_token: tokens.refresh_token.clone(),
            user_id: tokens.user_id,
        };
        Ok(())
    }

    /// Forget every token. The in-memory session is cleared even when the
    /// backing store fails, so requests stop carrying the stale token.
    pub fn clear(&self) -> Result<()> {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Session::default();

        for key in TokenKey::ALL {
            self.store.delete(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> SessionTokens {
        SessionTokens {
            access_token: "access-1".to_string(),
            refresh_token: Some("refresh-1".to_string()),
            user_id: Some(42),
        }
    }

    #[test]
    fn test_store_tokens_persists_and_publishes() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = SessionContext::new(store.clone());
        assert!(!session.is_authenticated());

        session.store_tokens(&tokens()).expect("store tokens");

        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), Some(42));
        assert_eq!(
            store.load(TokenKey::RefreshToken).unwrap(),
            Some("refresh-1".to_string())
        );
        assert_eq!(store.load(TokenKey::UserId).unwrap(), Some("42".to_string()));
    }

    #[test]
    fn test_access_only_update_keeps_refresh_token() {
        let session = SessionContext::in_memory();
        session.store_tokens(&tokens()).expect("store tokens");

        session
            .store_tokens(&SessionTokens {
                access_token: "access-2".to_string(),
                refresh_token: None,
                user_id: None,
            })
            .expect("store access token");

        let snapshot = session.snapshot();
        assert_eq!(snapshot.access_token.as_deref(), Some("access-2"));
        assert_eq!(snapshot.refresh_token.as_deref(), Some("refresh-1"));
        assert_eq!(snapshot.user_id, Some(42));
    }

    #[test]
    fn test_replace_tokens_drops_previous_refresh_token() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = SessionContext::new(store.clone());
        session.store_tokens(&tokens()).expect("store tokens");

        session
            .replace_tokens(&SessionTokens {
                access_token: "user-b-access".to_string(),
                refresh_token: None,
                user_id: Some(99),
            })
            .expect("replace tokens");

        assert_eq!(
            session.snapshot(),
            Session {
                access_token: Some("user-b-access".to_string()),
                refresh_token: None,
                user_id: Some(99),
            }
        );
        assert_eq!(store.load(TokenKey::RefreshToken).unwrap(), None);
        assert_eq!(store.load(TokenKey::UserId).unwrap(), Some("99".to_string()));
    }

    #[test]
    fn test_load_restores_persisted_session() {
        let store = Arc::new(MemoryTokenStore::with_entries([
            (TokenKey::AccessToken, "a".to_string()),
            (TokenKey::RefreshToken, "r".to_string()),
            (TokenKey::UserId, "7".to_string()),
        ]));

        let session = SessionContext::load(store).expect("load session");
        assert_eq!(
            session.snapshot(),
            Session {
                access_token: Some("a".to_string()),
                refresh_token: Some("r".to_string()),
                user_id: Some(7),
            }
        );
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = SessionContext::new(store.clone());
        session.store_tokens(&tokens()).expect("store tokens");

        session.clear().expect("clear");

        assert_eq!(session.snapshot(), Session::default());
        for key in TokenKey::ALL {
            assert_eq!(store.load(key).unwrap(), None);
        }
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionContext::in_memory();
        let other = session.clone();
        session.store_tokens(&tokens()).expect("store tokens");
        assert_eq!(other.access_token().as_deref(), Some("access-1"));
    }
}
