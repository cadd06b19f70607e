//! Offline cache lifecycle
//!
//! ```text
//!   Installing ──install()──▶ Installed ──activate()──▶ Activated
//! ```
//!
//! Install pre-caches the app shell into the current version's bucket.
//! Activation drops every other bucket. Fetches are served cache-first for
//! the lifetime of the worker.

use alloc::string::String;
use alloc::vec::Vec;

use boxbreath_hal::{
    CacheStorage, Method, Network, NetworkError, Request, Response, ResponseKind, StorageError,
};

use crate::manifest::{CacheVersion, Manifest};

/// Worker lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Created, shell not yet cached
    Installing,
    /// Install step finished (successfully or not)
    Installed,
    /// Stale buckets dropped, clients claimed
    Activated,
}

/// Errors from install and activate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CacheError {
    /// Fetching a shell asset failed
    Network(NetworkError),
    /// A shell asset came back with a non-2xx status
    BadStatus(u16),
    /// Cache storage failed
    Storage(StorageError),
}

impl core::fmt::Display for CacheError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CacheError::Network(e) => write!(f, "shell fetch failed: {}", e),
            CacheError::BadStatus(status) => write!(f, "shell fetch returned status {}", status),
            CacheError::Storage(e) => write!(f, "cache storage failed: {}", e),
        }
    }
}

impl From<StorageError> for CacheError {
    fn from(e: StorageError) -> Self {
        CacheError::Storage(e)
    }
}

impl From<NetworkError> for CacheError {
    fn from(e: NetworkError) -> Self {
        CacheError::Network(e)
    }
}

/// Errors returned to the page for an intercepted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Network failed and no fallback applied
    Network(NetworkError),
}

impl core::fmt::Display for FetchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FetchError::Network(e) => write!(f, "fetch failed: {}", e),
        }
    }
}

/// How an intercepted request was answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Not a GET; the host handles it normally
    PassThrough,
    /// Served from cache without touching the network
    Cached(Response),
    /// Served from the network (and stored if cacheable)
    Network(Response),
    /// Network failed; cached main page served to a navigation
    Fallback(Response),
}

impl FetchOutcome {
    /// The response to hand back, if the worker answered the request
    pub fn into_response(self) -> Option<Response> {
        match self {
            FetchOutcome::PassThrough => None,
            FetchOutcome::Cached(r) | FetchOutcome::Network(r) | FetchOutcome::Fallback(r) => Some(r),
        }
    }
}

/// Versioned cache-first asset cache
pub struct OfflineCache<S, N> {
    storage: S,
    network: N,
    version: CacheVersion,
    bucket: String,
    manifest: Manifest,
    lifecycle: Lifecycle,
    clients_claimed: bool,
}

impl<S: CacheStorage, N: Network> OfflineCache<S, N> {
    pub fn new(storage: S, network: N, version: CacheVersion, manifest: Manifest) -> Self {
        let bucket = version.bucket_name();
        Self {
            storage,
            network,
            version,
            bucket,
            manifest,
            lifecycle: Lifecycle::Installing,
            clients_claimed: false,
        }
    }

    pub fn version(&self) -> &CacheVersion {
        &self.version
    }

    /// Bucket owned by the current version
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Check if open pages are controlled by this version
    pub fn clients_claimed(&self) -> bool {
        self.clients_claimed
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    /// Pre-cache the app shell
    ///
    /// All or nothing: if any asset cannot be fetched, or storing one fails,
    /// the bucket is left without shell entries. The worker moves to
    /// [`Lifecycle::Installed`] either way.
    pub async fn install(&mut self) -> Result<usize, CacheError> {
        info!("Installing cache {}", self.bucket.as_str());

        let result = self.precache().await;
        match &result {
            Ok(count) => info!("Pre-cached {} shell assets", count),
            Err(e) => error!("Pre-cache failed: {}", e),
        }

        // Move on regardless; a failed install retries on the next deployment
        self.lifecycle = Lifecycle::Installed;
        result
    }

    async fn precache(&mut self) -> Result<usize, CacheError> {
        let mut fetched: Vec<(&str, Response)> = Vec::with_capacity(self.manifest.shell().len());
        for url in self.manifest.shell() {
            let response = self.network.fetch(&Request::get(url)).await?;
            if !response.is_ok() {
                warn!("Shell asset {} returned {}", url.as_str(), response.status);
                return Err(CacheError::BadStatus(response.status));
            }
            fetched.push((url.as_str(), response));
        }

        let created = !self.storage.buckets().await?.contains(&self.bucket);
        self.storage.open(&self.bucket).await?;

        let mut written: Vec<&str> = Vec::with_capacity(fetched.len());
        for (url, response) in fetched {
            if let Err(e) = self.storage.put(&self.bucket, url, response).await {
                Self::roll_back(&mut self.storage, &self.bucket, created, &written).await;
                return Err(e.into());
            }
            written.push(url);
        }

        Ok(written.len())
    }

    /// Undo a partial shell write
    ///
    /// A bucket this install created is dropped whole. Otherwise, or if the
    /// drop fails, only the entries written by this install are removed.
    async fn roll_back(storage: &mut S, bucket: &str, created: bool, written: &[&str]) {
        if created {
            match storage.delete(bucket).await {
                Ok(_) => {
                    debug!("Dropped partial bucket {}", bucket);
                    return;
                }
                Err(e) => warn!("Failed to drop partial bucket {}: {}", bucket, e),
            }
        }

        for url in written {
            if let Err(e) = storage.remove(bucket, url).await {
                warn!("Rollback of {} failed: {}", *url, e);
            }
        }
    }

    /// Drop every bucket but the current one and claim open clients
    ///
    /// Returns the number of buckets deleted.
    pub async fn activate(&mut self) -> Result<usize, CacheError> {
        if self.lifecycle == Lifecycle::Installing {
            warn!("Activating before install finished");
        }

        let result = self.drop_stale_buckets().await;
        match &result {
            Ok(count) => info!("Activated {}, removed {} stale buckets", self.bucket.as_str(), count),
            Err(e) => error!("Stale bucket cleanup failed: {}", e),
        }

        self.lifecycle = Lifecycle::Activated;
        self.clients_claimed = true;
        result
    }

    async fn drop_stale_buckets(&mut self) -> Result<usize, CacheError> {
        let mut deleted = 0;
        for name in self.storage.buckets().await? {
            if name == self.bucket {
                continue;
            }
            debug!("Deleting stale bucket {}", name.as_str());
            if self.storage.delete(&name).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    /// Answer an intercepted request
    ///
    /// Non-GET requests pass through. GETs are served from any bucket first;
    /// a miss goes to the network and a plain same-origin 200 is stored in
    /// the current bucket. If the network fails, navigations get the cached
    /// fallback page.
    pub async fn handle_fetch(&mut self, request: &Request) -> Result<FetchOutcome, FetchError> {
        if request.method != Method::Get {
            trace!("Pass through {}", request.url.as_str());
            return Ok(FetchOutcome::PassThrough);
        }

        match self.storage.match_any(&request.url).await {
            Ok(Some(response)) => {
                debug!("Cache hit {}", request.url.as_str());
                return Ok(FetchOutcome::Cached(response));
            }
            Ok(None) => {}
            // Treat an unreadable cache as a miss
            Err(e) => warn!("Cache lookup failed for {}: {}", request.url.as_str(), e),
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if Self::is_cacheable(&response) {
                    debug!("Caching {}", request.url.as_str());
                    if let Err(e) = self.storage.put(&self.bucket, &request.url, response.clone()).await {
                        warn!("Failed to cache {}: {}", request.url.as_str(), e);
                    }
                }
                Ok(FetchOutcome::Network(response))
            }
            Err(e) => {
                if request.is_navigation() {
                    if let Some(page) = self.fallback_page().await {
                        debug!("Offline, serving fallback for {}", request.url.as_str());
                        return Ok(FetchOutcome::Fallback(page));
                    }
                }
                warn!("Fetch failed for {}: {}", request.url.as_str(), e);
                Err(FetchError::Network(e))
            }
        }
    }

    async fn fallback_page(&mut self) -> Option<Response> {
        match self.storage.match_any(self.manifest.fallback()).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Fallback lookup failed: {}", e);
                None
            }
        }
    }

    /// Only complete same-origin responses are stored
    fn is_cacheable(response: &Response) -> bool {
        response.status == 200 && response.kind == ResponseKind::Basic
    }
}
