//! Configuration type definitions

use heapless::{String, Vec};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum preset buttons
pub const MAX_PRESETS: usize = 6;

/// Phase duration selected on first load (seconds)
pub const DEFAULT_PHASE_DURATION_S: u16 = 4;

/// Upper end of the duration slider (seconds)
pub const DEFAULT_MAX_PHASE_DURATION_S: u16 = 10;

/// Delay between pressing start and the first phase (ms)
///
/// Roughly matches the page transition to the exercise view.
pub const DEFAULT_TRANSITION_DELAY_MS: u32 = 500;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Phase duration is zero or above the slider maximum
    PhaseDurationOutOfRange,
    /// Slider maximum is zero
    MaxPhaseDurationZero,
    /// No preset buttons configured
    NoPresets,
    /// More presets than fit on the home page
    TooManyPresets,
    /// Preset with a zero time limit
    PresetLimitZero,
    /// Label longer than [`MAX_LABEL_LEN`]
    LabelTooLong,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::PhaseDurationOutOfRange => f.write_str("phase duration out of range"),
            ConfigError::MaxPhaseDurationZero => f.write_str("maximum phase duration must be positive"),
            ConfigError::NoPresets => f.write_str("at least one preset is required"),
            ConfigError::TooManyPresets => f.write_str("too many presets"),
            ConfigError::PresetLimitZero => f.write_str("preset time limit must be positive"),
            ConfigError::LabelTooLong => f.write_str("label too long"),
        }
    }
}

/// A preset button bound to a fixed total time limit
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Preset {
    /// Button label
    pub label: String<MAX_LABEL_LEN>,
    /// Session time limit (seconds)
    pub limit_s: u32,
}

impl Preset {
    /// Create a preset, failing if the label does not fit
    pub fn new(label: &str, limit_s: u32) -> Result<Self, ConfigError> {
        let label = String::try_from(label).map_err(|_| ConfigError::LabelTooLong)?;
        Ok(Self { label, limit_s })
    }
}

/// Breathing exercise configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BreathingConfig {
    /// Initial phase duration (seconds)
    pub phase_duration_s: u16,
    /// Slider maximum (seconds); the minimum is always 1
    pub max_phase_duration_s: u16,
    /// UI transition delay before the first phase (ms)
    pub transition_delay_ms: u32,
    /// Preset buttons
    pub presets: Vec<Preset, MAX_PRESETS>,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        let mut presets = Vec::new();
        for (label, limit_s) in [("1 min", 60), ("3 min", 180), ("5 min", 300)] {
            if let Ok(preset) = Preset::new(label, limit_s) {
                let _ = presets.push(preset);
            }
        }
        Self {
            phase_duration_s: DEFAULT_PHASE_DURATION_S,
            max_phase_duration_s: DEFAULT_MAX_PHASE_DURATION_S,
            transition_delay_ms: DEFAULT_TRANSITION_DELAY_MS,
            presets,
        }
    }
}

impl BreathingConfig {
    /// Check a phase duration against the slider range
    pub fn check_phase_duration(&self, duration_s: u16) -> Result<u16, ConfigError> {
        if duration_s == 0 || duration_s > self.max_phase_duration_s {
            return Err(ConfigError::PhaseDurationOutOfRange);
        }
        Ok(duration_s)
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_phase_duration_s == 0 {
            return Err(ConfigError::MaxPhaseDurationZero);
        }
        self.check_phase_duration(self.phase_duration_s)?;
        if self.presets.is_empty() {
            return Err(ConfigError::NoPresets);
        }
        if self.presets.iter().any(|p| p.limit_s == 0) {
            return Err(ConfigError::PresetLimitZero);
        }
        Ok(())
    }

    /// Get a preset's time limit by button index
    pub fn preset_limit(&self, index: usize) -> Option<u32> {
        self.presets.get(index).map(|p| p.limit_s)
    }
}
