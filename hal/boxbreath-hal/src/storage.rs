//! Cache storage abstractions
//!
//! Provides a trait for persistent key-response storage split into named
//! buckets. Keys are request URLs; a bucket name usually carries the
//! deployment version so stale generations can be dropped as a whole.

use alloc::string::String;
use alloc::vec::Vec;

use crate::http::Response;

/// Errors from cache storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Backend refused or failed the operation
    Backend,
    /// Bucket does not exist
    NoSuchBucket,
    /// Storage quota exceeded
    QuotaExceeded,
    /// Stored data corrupted or invalid
    Corrupted,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageError::Backend => f.write_str("storage backend failure"),
            StorageError::NoSuchBucket => f.write_str("no such cache bucket"),
            StorageError::QuotaExceeded => f.write_str("storage quota exceeded"),
            StorageError::Corrupted => f.write_str("stored data corrupted"),
        }
    }
}

/// Cache storage trait
///
/// Implementations should handle:
/// - Bucket creation on first open
/// - Keeping bucket order stable (creation order) for lookups across buckets
/// - Replacing an existing entry on `put` with the same URL
pub trait CacheStorage {
    /// Open a bucket, creating it if it does not exist
    fn open(&mut self, bucket: &str) -> impl core::future::Future<Output = Result<(), StorageError>>;

    /// List bucket names in creation order
    fn buckets(&mut self) -> impl core::future::Future<Output = Result<Vec<String>, StorageError>>;

    /// Delete a bucket and every entry in it
    ///
    /// Returns `true` if the bucket existed.
    fn delete(&mut self, bucket: &str) -> impl core::future::Future<Output = Result<bool, StorageError>>;

    /// Look up a URL in every bucket, oldest first
    fn match_any(&mut self, url: &str) -> impl core::future::Future<Output = Result<Option<Response>, StorageError>>;

    /// Store a response under a URL in the given bucket
    fn put(
        &mut self,
        bucket: &str,
        url: &str,
        response: Response,
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;

    /// Remove a single entry from a bucket
    ///
    /// Returns `true` if the entry existed.
    fn remove(&mut self, bucket: &str, url: &str) -> impl core::future::Future<Output = Result<bool, StorageError>>;
}
