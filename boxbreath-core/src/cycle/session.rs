//! Session state
//!
//! A session exists only while the exercise runs. All fields are private to
//! the crate; the controller is the only writer.

use super::phase::Phase;

/// State of a recurring one-second timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerSlot {
    /// Not scheduled; ticks are ignored
    #[default]
    Cleared,
    /// Firing once per second
    Armed,
}

impl TimerSlot {
    pub fn is_armed(self) -> bool {
        self == TimerSlot::Armed
    }
}

/// Where a running session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Started, waiting out the UI transition delay
    GetReady,
    /// Cycling through phases
    Breathing,
}

/// A running exercise
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunningSession {
    pub(crate) stage: Stage,
    /// Phase length, latched at start
    pub(crate) phase_duration_s: u16,
    /// Total time limit (seconds), `None` for unlimited
    pub(crate) time_limit_s: Option<u32>,
    /// Index of the next phase to begin; only increases
    pub(crate) phase_cursor: u32,
    /// Seconds left in the current phase, within `0..=phase_duration_s`
    pub(crate) remaining_phase_s: u16,
    /// Seconds since the first phase began
    pub(crate) elapsed_total_s: u32,
    pub(crate) phase_timer: TimerSlot,
    pub(crate) total_timer: TimerSlot,
}

impl RunningSession {
    pub(crate) fn new(phase_duration_s: u16, time_limit_s: Option<u32>) -> Self {
        Self {
            stage: Stage::GetReady,
            phase_duration_s,
            time_limit_s,
            phase_cursor: 0,
            remaining_phase_s: 0,
            elapsed_total_s: 0,
            phase_timer: TimerSlot::Cleared,
            total_timer: TimerSlot::Cleared,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn phase_duration_s(&self) -> u16 {
        self.phase_duration_s
    }

    pub fn time_limit_s(&self) -> Option<u32> {
        self.time_limit_s
    }

    pub fn phase_cursor(&self) -> u32 {
        self.phase_cursor
    }

    pub fn remaining_phase_s(&self) -> u16 {
        self.remaining_phase_s
    }

    pub fn elapsed_total_s(&self) -> u32 {
        self.elapsed_total_s
    }

    pub fn phase_timer(&self) -> TimerSlot {
        self.phase_timer
    }

    pub fn total_timer(&self) -> TimerSlot {
        self.total_timer
    }

    /// Phase currently shown (the one before the cursor)
    pub fn current_phase(&self) -> Option<Phase> {
        match self.stage {
            Stage::GetReady => None,
            Stage::Breathing => Some(Phase::from_cursor(self.phase_cursor.wrapping_sub(1))),
        }
    }

    /// Check if the time limit has been reached
    pub fn limit_reached(&self) -> bool {
        self.time_limit_s
            .is_some_and(|limit| self.elapsed_total_s >= limit)
    }
}

/// Exercise session: either nothing is running or exactly one session is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Session {
    #[default]
    Idle,
    Running(RunningSession),
}

impl Session {
    pub fn is_running(&self) -> bool {
        matches!(self, Session::Running(_))
    }

    pub fn running(&self) -> Option<&RunningSession> {
        match self {
            Session::Running(run) => Some(run),
            Session::Idle => None,
        }
    }
}
