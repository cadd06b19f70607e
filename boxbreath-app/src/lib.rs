//! Boxbreath coordination layer
//!
//! Wires the board-agnostic breathing logic and the offline cache to a host:
//!
//! ```text
//!  host page ──Input──▶ ┌──────────────┐ ◀──tick── run_ticker
//!  platform ──Event───▶ │run_controller│
//!                       └──────┬───────┘
//!                              ▼
//!                     Session (controller + surface + wake lock)
//!
//!  host worker ──WorkerEvent──▶ ServiceWorker ──▶ OfflineCache
//! ```
//!
//! The host supplies the executor, the [`Surface`](boxbreath_core::traits::Surface)
//! and [`WakeLock`](boxbreath_core::traits::WakeLock) implementations and the
//! cache storage and network backends.

#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod channels;
pub mod config;
pub mod controls;
pub mod session;
pub mod tasks;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use channels::Channels;
pub use config::{load_default, parse_config, AppConfig};
pub use controls::{Command, Controls, Input};
pub use session::{PlatformEvent, Session};
pub use worker::{ServiceWorker, WorkerEvent, WorkerReply};
