// File: crates/graph-core/src/loader.rs
// Summary: Single-flight, memoized loader for the charting library with Idle/Loading/Loaded/Errored states.
// Notes:
// - Construct one loader at startup and share it by `Arc`; it lives until the process exits.
// - Loaded and Errored are terminal. Recovery is a full reload, never an in-process retry.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::LoaderSettings;
use crate::error::LoadFailure;
use crate::reload::Reload;

/// Retrieves the charting capability. Supplied by the host; the loader does
/// not know where the library comes from.
#[async_trait]
pub trait LibraryFetcher: Send + Sync + 'static {
    type Handle: Send + Sync + 'static;

    async fn fetch(&self) -> Result<Self::Handle, LoadFailure>;
}

pub enum LoadState<H> {
    Idle,
    Loading,
    Loaded(Arc<H>),
    Errored(LoadFailure),
}

impl<H> LoadState<H> {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Errored(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn handle(&self) -> Option<&Arc<H>> {
        match self {
            Self::Loaded(h) => Some(h),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            Self::Errored(e) => Some(e),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Errored(_) => "errored",
        }
    }
}

// Manual impls: cloning shares the handle, so `H` itself needs neither Clone nor Debug.
impl<H> Clone for LoadState<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Loading => Self::Loading,
            Self::Loaded(h) => Self::Loaded(Arc::clone(h)),
            Self::Errored(e) => Self::Errored(e.clone()),
        }
    }
}

impl<H> fmt::Debug for LoadState<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Errored(e) => f.debug_tuple("Errored").field(e).finish(),
            other => f.write_str(other.name()),
        }
    }
}

pub struct ChartLibraryLoader<F: LibraryFetcher> {
    fetcher: Arc<F>,
    state: Arc<watch::Sender<LoadState<F::Handle>>>,
    reload: Arc<dyn Reload>,
    timeout: Option<Duration>,
}

impl<F: LibraryFetcher> ChartLibraryLoader<F> {
    pub fn new(fetcher: F, reload: Arc<dyn Reload>) -> Self {
        let (tx, _) = watch::channel(LoadState::Idle);
        Self { fetcher: Arc::new(fetcher), state: Arc::new(tx), reload, timeout: None }
    }

    pub fn with_settings(mut self, settings: &LoaderSettings) -> Self {
        self.timeout = settings.timeout();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Current state, without starting a load.
    pub fn state(&self) -> LoadState<F::Handle> {
        self.state.borrow().clone()
    }

    /// Observe transitions (e.g. to show a spinner while `Loading`).
    pub fn subscribe(&self) -> watch::Receiver<LoadState<F::Handle>> {
        self.state.subscribe()
    }

    /// Start the load if nobody has, then wait for it to settle.
    ///
    /// Concurrent callers share one fetch. Once settled the result is
    /// memoized: `Loaded` returns at once, `Errored` returns the same
    /// failure without fetching again. The returned state is always
    /// `Loaded` or `Errored`.
    ///
    /// Dropping the returned future only drops this caller's interest; the
    /// fetch keeps running and still settles the shared state.
    pub async fn ensure_loaded(&self) -> LoadState<F::Handle> {
        let mut rx = self.state.subscribe();
        if self.begin() {
            self.spawn_fetch();
        } else {
            debug!(state = rx.borrow().name(), "joining chart library load");
        }
        rx.wait_for(LoadState::is_settled)
            .await
            .map(|settled| settled.clone())
            .unwrap_or(LoadState::Errored(LoadFailure::Abandoned))
    }

    /// Full reload of the hosting process. The only recovery from `Errored`.
    pub fn recover(&self) {
        info!(state = self.state.borrow().name(), "reloading to recover chart library");
        self.reload.reload();
    }

    /// Idle -> Loading, atomically. True for exactly one caller.
    fn begin(&self) -> bool {
        let mut started = false;
        self.state.send_if_modified(|state| {
            if matches!(state, LoadState::Idle) {
                *state = LoadState::Loading;
                started = true;
            }
            started
        });
        started
    }

    fn spawn_fetch(&self) {
        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);
        let timeout = self.timeout;
        info!(timeout_secs = timeout.map(|t| t.as_secs()), "loading chart library");

        tokio::spawn(async move {
            // Inner task so a panicking fetcher still settles the state.
            let fetch = tokio::spawn(async move {
                match timeout {
                    Some(limit) => tokio::time::timeout(limit, fetcher.fetch())
                        .await
                        .unwrap_or(Err(LoadFailure::Timeout { secs: limit.as_secs() })),
                    None => fetcher.fetch().await,
                }
            });

            let settled = match fetch.await {
                Ok(Ok(handle)) => {
                    info!("chart library loaded");
                    LoadState::Loaded(Arc::new(handle))
                }
                Ok(Err(failure)) => {
                    warn!(error = %failure, "chart library failed to load");
                    LoadState::Errored(failure)
                }
                Err(join) => {
                    let failure = if join.is_panic() {
                        LoadFailure::Panicked
                    } else {
                        LoadFailure::Abandoned
                    };
                    warn!(error = %failure, "chart library fetch task ended abnormally");
                    LoadState::Errored(failure)
                }
            };
            state.send_replace(settled);
        });
    }
}
