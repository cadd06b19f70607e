//! Board-agnostic core logic for the box breathing timer
//!
//! This crate contains all breathing-cycle logic that does not depend on a
//! specific host:
//!
//! - Host capability traits (surface, stay-awake grant)
//! - Session state machine and phase timing
//! - Visual cue geometry
//! - Display formatting and rendering
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod cue;
pub mod cycle;
pub mod display;
pub mod traits;
