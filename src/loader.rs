use std::future::Future;

use crate::api::ApiError;

/// LoadState
///
/// What a view knows about one piece of remote data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loaded(T),
    Failed(String),
}

/// Loader
///
/// The one data-loading abstraction shared by every page view: it owns a fetch
/// closure and exposes `load`, `reload`, `data` and `error`.
///
/// ```ignore
/// let mut queue = Loader::new(|| api.pending_applications(&session.token));
/// queue.load().await;
/// let (applications, error) = queue.into_parts();
/// ```
pub struct Loader<T, F> {
    fetch: F,
    state: LoadState<T>,
}

impl<T, F, Fut> Loader<T, F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            state: LoadState::Idle,
        }
    }

    /// Fetches unless data is already loaded. A previous failure is retried.
    pub async fn load(&mut self) -> &LoadState<T> {
        if !matches!(self.state, LoadState::Loaded(_)) {
            self.fetch_now().await;
        }
        &self.state
    }

    /// Always refetches, e.g. after a write changed the list.
    pub async fn reload(&mut self) -> &LoadState<T> {
        self.fetch_now().await;
        &self.state
    }

    async fn fetch_now(&mut self) {
        // A failed reload drops the stale data instead of showing it next to the error.
        self.state = match (self.fetch)().await {
            Ok(data) => LoadState::Loaded(data),
            Err(error) => LoadState::Failed(error.to_string()),
        };
    }
}

impl<T, F> Loader<T, F> {
    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }
}

impl<T: Default, F> Loader<T, F> {
    /// Hands the outcome to a view: the data (or its empty default) and the
    /// error banner text, if any.
    pub fn into_parts(self) -> (T, Option<String>) {
        match self.state {
            LoadState::Loaded(data) => (data, None),
            LoadState::Failed(message) => (T::default(), Some(message)),
            LoadState::Idle => (T::default(), None),
        }
    }
}
