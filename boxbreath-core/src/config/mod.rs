//! Configuration types
//!
//! Host-agnostic configuration structures; the coordination layer fills them
//! from TOML.

pub mod types;

pub use types::*;
