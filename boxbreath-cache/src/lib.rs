//! Offline asset cache for the Boxbreath app shell
//!
//! Keeps the assets needed to render the app in a version-tagged bucket:
//!
//! - Install pre-caches the whole shell or nothing
//! - Activation deletes buckets left by earlier versions
//! - Fetches are answered cache-first, with a cached main page for offline
//!   navigations
//!
//! Storage and network access go through the `boxbreath-hal` traits;
//! [`memory::MemoryStorage`] is a RAM backend with postcard snapshots.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod manifest;
pub mod memory;
pub mod worker;

pub use manifest::{CacheVersion, Manifest, ManifestError};
pub use memory::MemoryStorage;
pub use worker::{CacheError, FetchError, FetchOutcome, Lifecycle, OfflineCache};
