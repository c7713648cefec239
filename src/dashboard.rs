use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::errors::FetchError;
use crate::fetch::SnapshotSource;
use crate::models::{DashboardSnapshot, DashboardViewState};

/// Owns the fetch lifecycle for the dashboard view. All mutation of the view
/// state happens here; consumers read a clone or watch for transitions.
/// Cloning is cheap and clones share the same state.
///
/// Every fetch cycle gets a monotonically increasing token. A response is only
/// installed while its token is still the latest, so an old request resolving
/// after a newer `initiate_fetch` can never clobber the newer result.
pub struct Dashboard<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    source: S,
    latest_token: AtomicU64,
    tx: watch::Sender<DashboardViewState>,
}

impl<S> Clone for Dashboard<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SnapshotSource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        let (tx, _rx) = watch::channel(DashboardViewState::Loading);
        Self {
            inner: Arc::new(Inner {
                source,
                latest_token: AtomicU64::new(0),
                tx,
            }),
        }
    }

    /// Current view state, synchronously. Never blocks.
    pub fn current_state(&self) -> DashboardViewState {
        self.inner.tx.borrow().clone()
    }

    /// Receiver that resolves after every state transition, so the rendering
    /// layer can re-render without polling.
    pub fn subscribe(&self) -> watch::Receiver<DashboardViewState> {
        self.inner.tx.subscribe()
    }

    /// Starts a fetch cycle: resets to Loading and hands back the token the
    /// eventual response must present to [`Self::apply_response`].
    pub fn begin_fetch(&self) -> u64 {
        let token = self.inner.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.tx.send_replace(DashboardViewState::Loading);
        token
    }

    /// Installs the outcome of the fetch cycle identified by `token`, unless a
    /// newer cycle has started in the meantime.
    pub fn apply_response(&self, token: u64, result: Result<DashboardSnapshot, FetchError>) {
        let inner = &self.inner;
        inner.tx.send_if_modified(|state| {
            if token != inner.latest_token.load(Ordering::SeqCst) {
                debug!(token, "discarding stale dashboard response");
                return false;
            }
            *state = match result {
                Ok(snapshot) => {
                    info!(token, "dashboard snapshot loaded");
                    DashboardViewState::Ready { snapshot }
                }
                Err(err) => {
                    error!(token, "dashboard fetch failed: {err}");
                    DashboardViewState::Failed {
                        message: err.to_string(),
                        cause: err.cause(),
                    }
                }
            };
            true
        });
    }

    /// Kicks off a full fetch in the background and returns immediately. Safe
    /// to call repeatedly; each call supersedes the one before it. There is no
    /// automatic retry: a failure stays until the next call.
    pub fn initiate_fetch(&self)
    where
        S: 'static,
    {
        let token = self.begin_fetch();
        let dashboard = self.clone();
        tokio::spawn(async move {
            let result = dashboard.inner.source.fetch_snapshot().await;
            dashboard.apply_response(token, result);
        });
    }
}
