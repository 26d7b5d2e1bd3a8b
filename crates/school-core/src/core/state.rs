//! Observable screen state shared by every view-model.

use crate::core::result::NetworkResult;
use std::future::Future;
use tokio::sync::watch;

/// Loading state for a single screen resource.
///
/// Transitions are `Idle -> Loading -> (Loaded | Error)`; any terminal state
/// may go back to `Loading` when the user retries.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Request succeeded with mapped data
    Loaded(T),
    /// Request failed; message is ready for display
    Error(String),
}

impl<T> LoadState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Error(_))
    }

    /// Get reference to loaded data if available
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Get error message if in error state
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T> From<NetworkResult<T>> for LoadState<T> {
    fn from(result: NetworkResult<T>) -> Self {
        match result {
            NetworkResult::Success(data) => LoadState::Loaded(data),
            NetworkResult::Error(message) => LoadState::Error(message.into_string()),
        }
    }
}

/// Single-writer holder of a [`LoadState`], observable through
/// [`watch::Receiver`]s.
///
/// Concurrent `run` calls are not serialised: whichever operation finishes
/// last decides the published state.
#[derive(Debug)]
pub struct StateHolder<T> {
    sender: watch::Sender<LoadState<T>>,
}

impl<T> Default for StateHolder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateHolder<T> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(LoadState::Idle);
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.sender.subscribe()
    }

    pub fn set(&self, state: LoadState<T>) {
        self.sender.send_replace(state);
    }

    /// Back to `Idle`, e.g. after the screen consumed a one-shot result
    pub fn reset(&self) {
        self.set(LoadState::Idle);
    }
}

impl<T: Clone> StateHolder<T> {
    pub fn state(&self) -> LoadState<T> {
        self.sender.borrow().clone()
    }

    /// Publish `Loading`, await `operation`, then publish and return its
    /// terminal state.
    pub async fn run<F>(&self, operation: F) -> LoadState<T>
    where
        F: Future<Output = NetworkResult<T>>,
    {
        self.set(LoadState::Loading);
        let next = LoadState::from(operation.await);
        self.set(next.clone());
        next
    }
}
