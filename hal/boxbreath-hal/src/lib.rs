//! Boxbreath Platform Abstraction Layer
//!
//! This crate defines the host capabilities the offline asset cache relies
//! on. A browser service worker, a native shell, or an in-memory test double
//! can implement them and run the same cache logic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  boxbreath-cache / boxbreath-app        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  boxbreath-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ cache storage │       │    network    │
//! │   backend     │       │    fetcher    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::CacheStorage`] - Persistent key-response cache buckets
//! - [`fetch::Network`] - Network fetch

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod fetch;
pub mod http;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use fetch::{Network, NetworkError};
pub use http::{Method, Request, RequestMode, Response, ResponseKind};
pub use storage::{CacheStorage, StorageError};
