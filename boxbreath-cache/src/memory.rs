//! In-memory cache storage
//!
//! A [`CacheStorage`] backend kept entirely in RAM. Hosts that have their
//! own persistent key-value medium can save it with [`MemoryStorage::snapshot`]
//! and bring it back with [`MemoryStorage::restore`].

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use boxbreath_hal::{CacheStorage, Response, StorageError};
use serde::{Deserialize, Serialize};

/// Magic number for snapshot validation ("BXCS")
const SNAPSHOT_MAGIC: u32 = 0x4258_4353;

/// Current snapshot format version
const SNAPSHOT_VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Bucket {
    name: String,
    entries: Vec<(String, Response)>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    magic: u32,
    version: u8,
    buckets: Vec<Bucket>,
}

/// RAM-backed cache storage
///
/// Buckets keep creation order; entries keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    buckets: Vec<Bucket>,
    /// Maximum entries across all buckets, if limited
    entry_limit: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses puts beyond `limit` entries in total
    pub fn with_entry_limit(limit: usize) -> Self {
        Self {
            buckets: Vec::new(),
            entry_limit: Some(limit),
        }
    }

    /// Total entries across all buckets
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all buckets, oldest first
    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.name.as_str())
    }

    /// Look up an entry in one bucket
    pub fn get(&self, bucket: &str, url: &str) -> Option<&Response> {
        self.bucket(bucket)?
            .entries
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, r)| r)
    }

    /// Serialize every bucket to a postcard byte image
    pub fn snapshot(&self) -> Result<Vec<u8>, StorageError> {
        let snapshot = Snapshot {
            magic: SNAPSHOT_MAGIC,
            version: SNAPSHOT_VERSION,
            buckets: self.buckets.clone(),
        };
        postcard::to_allocvec(&snapshot).map_err(|_| StorageError::Backend)
    }

    /// Rebuild storage from a snapshot
    pub fn restore(bytes: &[u8]) -> Result<Self, StorageError> {
        let snapshot: Snapshot = postcard::from_bytes(bytes).map_err(|_| StorageError::Corrupted)?;

        if snapshot.magic != SNAPSHOT_MAGIC || snapshot.version != SNAPSHOT_VERSION {
            return Err(StorageError::Corrupted);
        }

        Ok(Self {
            buckets: snapshot.buckets,
            entry_limit: None,
        })
    }

    fn bucket(&self, name: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.name == name)
    }

    fn bucket_mut(&mut self, name: &str) -> Option<&mut Bucket> {
        self.buckets.iter_mut().find(|b| b.name == name)
    }
}

impl CacheStorage for MemoryStorage {
    async fn open(&mut self, bucket: &str) -> Result<(), StorageError> {
        if self.bucket(bucket).is_none() {
            self.buckets.push(Bucket {
                name: bucket.to_string(),
                entries: Vec::new(),
            });
        }
        Ok(())
    }

    async fn buckets(&mut self) -> Result<Vec<String>, StorageError> {
        Ok(self.buckets.iter().map(|b| b.name.clone()).collect())
    }

    async fn delete(&mut self, bucket: &str) -> Result<bool, StorageError> {
        let before = self.buckets.len();
        self.buckets.retain(|b| b.name != bucket);
        Ok(self.buckets.len() != before)
    }

    async fn match_any(&mut self, url: &str) -> Result<Option<Response>, StorageError> {
        Ok(self
            .buckets
            .iter()
            .flat_map(|b| b.entries.iter())
            .find(|(u, _)| u == url)
            .map(|(_, r)| r.clone()))
    }

    async fn put(&mut self, bucket: &str, url: &str, response: Response) -> Result<(), StorageError> {
        let total = self.len();
        let limit = self.entry_limit;
        let Some(target) = self.bucket_mut(bucket) else {
            return Err(StorageError::NoSuchBucket);
        };

        if let Some((_, existing)) = target.entries.iter_mut().find(|(u, _)| u == url) {
            *existing = response;
            return Ok(());
        }

        if limit.is_some_and(|max| total >= max) {
            return Err(StorageError::QuotaExceeded);
        }

        target.entries.push((url.to_string(), response));
        Ok(())
    }

    async fn remove(&mut self, bucket: &str, url: &str) -> Result<bool, StorageError> {
        let Some(target) = self.bucket_mut(bucket) else {
            return Ok(false);
        };
        let before = target.entries.len();
        target.entries.retain(|(u, _)| u != url);
        Ok(target.entries.len() != before)
    }
}
