//! Breathing cycle state machine
//!
//! Drives the repeating inhale/hold/exhale/wait cycle. The controller is
//! explicit, finite, and deterministic: time only advances through
//! [`CycleController::tick_total`] and [`CycleController::tick_phase`],
//! which the host calls once per second.

pub mod controller;
pub mod events;
pub mod phase;
pub mod session;

pub use controller::CycleController;
pub use events::{Event, StopReason};
pub use phase::{Phase, PHASE_COUNT};
pub use session::{RunningSession, Session, Stage, TimerSlot};
