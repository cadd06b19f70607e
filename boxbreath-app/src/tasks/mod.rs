//! Async tasks
//!
//! Each task runs on the host's executor and communicates via channels and
//! signals. Tasks are plain generic async functions; the host spawns or
//! joins them.

pub mod controller;
pub mod tick;

pub use controller::run_controller;
pub use tick::run_ticker;
