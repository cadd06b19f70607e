//! Events emitted by the cycle controller

use super::phase::Phase;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopReason {
    /// Operator pressed stop (or the host tore the session down)
    Operator,
    /// Time limit reached and an exhale just completed
    LimitReached,
}

/// Events produced by controller operations
///
/// The host reacts to these: page switches, cue animation, stay-awake grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Session created; the first phase follows after the transition delay
    Started {
        /// Total time limit (seconds), `None` for unlimited
        time_limit_s: Option<u32>,
    },
    /// A new phase began
    PhaseStarted {
        phase: Phase,
        /// Phase length (seconds); the cue animation lasts exactly this long
        duration_s: u16,
    },
    /// Session ended
    Stopped(StopReason),
}

impl Event {
    /// Check if this event ends the session
    pub fn ends_session(&self) -> bool {
        matches!(self, Event::Stopped(_))
    }
}
