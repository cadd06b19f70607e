//! Breathing phases

/// Number of phases in one cycle
pub const PHASE_COUNT: usize = 4;

/// One stage of the breathing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
    Wait,
}

impl Phase {
    /// Phases in cycle order
    pub const ALL: [Phase; PHASE_COUNT] = [Phase::Inhale, Phase::Hold, Phase::Exhale, Phase::Wait];

    /// Map a phase cursor to its phase (cursor mod 4)
    pub fn from_cursor(cursor: u32) -> Self {
        Self::ALL[(cursor % PHASE_COUNT as u32) as usize]
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Phase::Inhale => "inhale",
            Phase::Hold => "hold",
            Phase::Exhale => "exhale",
            Phase::Wait => "wait",
        }
    }
}
