//! Service worker event dispatch
//!
//! The host forwards its worker lifecycle and fetch events here; the offline
//! cache does the work.

use boxbreath_cache::{CacheError, FetchError, Lifecycle, OfflineCache};
use boxbreath_hal::{CacheStorage, Network, Request, Response};

use crate::config::AppConfig;

/// Events delivered by the host to the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// New version installed
    Install,
    /// New version took over
    Activate,
    /// Page issued a request
    Fetch(Request),
}

/// Reply to a worker event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerReply {
    /// Lifecycle step finished; the host should skip waiting / claim clients
    Done,
    /// Lifecycle step failed; the host still moves on
    Failed(CacheError),
    /// Respond to the page with this response
    Respond(Response),
    /// Let the host perform the request normally
    PassThrough,
    /// Request failed with no fallback
    NetworkError(FetchError),
}

/// Service worker for one deployed version
pub struct ServiceWorker<S, N> {
    cache: OfflineCache<S, N>,
}

impl<S: CacheStorage, N: Network> ServiceWorker<S, N> {
    pub fn new(storage: S, network: N, config: &AppConfig) -> Self {
        Self {
            cache: OfflineCache::new(
                storage,
                network,
                config.cache_version.clone(),
                config.manifest.clone(),
            ),
        }
    }

    pub fn cache(&self) -> &OfflineCache<S, N> {
        &self.cache
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.cache.lifecycle()
    }

    /// Handle one host event
    pub async fn dispatch(&mut self, event: WorkerEvent) -> WorkerReply {
        match event {
            WorkerEvent::Install => {
                let result = self.cache.install().await;
                // Skip waiting even when pre-caching failed
                info!("Install finished, skipping wait");
                lifecycle_reply(result)
            }
            WorkerEvent::Activate => {
                let result = self.cache.activate().await;
                info!("Claiming clients");
                lifecycle_reply(result)
            }
            WorkerEvent::Fetch(request) => match self.cache.handle_fetch(&request).await {
                Ok(outcome) => outcome
                    .into_response()
                    .map_or(WorkerReply::PassThrough, WorkerReply::Respond),
                Err(e) => WorkerReply::NetworkError(e),
            },
        }
    }
}

fn lifecycle_reply(result: Result<usize, CacheError>) -> WorkerReply {
    match result {
        Ok(_) => WorkerReply::Done,
        Err(e) => WorkerReply::Failed(e),
    }
}
