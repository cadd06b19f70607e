//! Home page controls
//!
//! Maps raw UI inputs (slider, buttons) to session commands.

use core::ops::RangeInclusive;

use boxbreath_core::config::BreathingConfig;

/// Raw input from the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// Duration slider moved to a value (seconds)
    Slider(u16),
    /// Preset button pressed (index into the configured presets)
    Preset(usize),
    /// "No limit" start button pressed
    Unlimited,
    /// Stop button pressed
    Stop,
}

/// Command for the session coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set the phase duration for the next session
    Configure(u16),
    /// Start a session with an optional time limit (seconds)
    Start(Option<u32>),
    /// Stop the session
    Stop,
}

/// Control mapping for one configuration
pub struct Controls<'a> {
    config: &'a BreathingConfig,
}

impl<'a> Controls<'a> {
    pub fn new(config: &'a BreathingConfig) -> Self {
        Self { config }
    }

    /// Values the duration slider offers
    pub fn slider_range(&self) -> RangeInclusive<u16> {
        1..=self.config.max_phase_duration_s
    }

    /// Translate an input into a command
    ///
    /// Slider values are clamped into range. Unknown preset buttons map to
    /// nothing.
    pub fn map(&self, input: Input) -> Option<Command> {
        match input {
            Input::Slider(value) => {
                let range = self.slider_range();
                Some(Command::Configure(value.clamp(*range.start(), *range.end())))
            }
            Input::Preset(index) => self
                .config
                .preset_limit(index)
                .map(|limit_s| Command::Start(Some(limit_s))),
            Input::Unlimited => Some(Command::Start(None)),
            Input::Stop => Some(Command::Stop),
        }
    }
}
