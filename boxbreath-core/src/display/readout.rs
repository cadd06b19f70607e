//! Display readout and renderer

use heapless::String;

use super::format::{format_clock, format_countdown, CLOCK_LEN, COUNTDOWN_LEN};
use crate::cycle::{Event, Phase};

/// Maximum phase label length
pub const LABEL_LEN: usize = 16;

/// Label shown during the transition delay
pub const GET_READY_LABEL: &str = "Get Ready...";

/// Label shown after a session ends
pub const STOPPED_LABEL: &str = "Stopped";

/// Which page is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    /// Duration slider and start buttons
    #[default]
    Home,
    /// Running exercise
    Exercise,
}

/// Everything the page shows, as text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readout {
    pub page: Page,
    pub phase_label: String<LABEL_LEN>,
    pub phase_timer: String<COUNTDOWN_LEN>,
    pub total_time: String<CLOCK_LEN>,
}

impl Default for Readout {
    fn default() -> Self {
        Self {
            page: Page::Home,
            phase_label: String::new(),
            phase_timer: String::new(),
            total_time: format_clock(0),
        }
    }
}

/// Renderer for building readouts
///
/// Tracks whether anything changed since the host last pushed the readout.
#[derive(Debug, Clone)]
pub struct Renderer {
    readout: Readout,
    dirty: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            readout: Readout::default(),
            dirty: true,
        }
    }

    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    /// Check and clear the changed flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    /// Exercise page with the "get ready" prompt and a zeroed clock
    pub fn render_started(&mut self) {
        self.readout.page = Page::Exercise;
        self.set_label(GET_READY_LABEL);
        self.readout.phase_timer.clear();
        self.readout.total_time = format_clock(0);
        self.dirty = true;
    }

    /// Phase name and full countdown
    pub fn render_phase(&mut self, phase: Phase, remaining_s: u16) {
        self.set_label(phase.name());
        self.render_countdown(remaining_s);
    }

    pub fn render_countdown(&mut self, remaining_s: u16) {
        let timer = format_countdown(remaining_s);
        if timer != self.readout.phase_timer {
            self.readout.phase_timer = timer;
            self.dirty = true;
        }
    }

    pub fn render_total(&mut self, elapsed_s: u32) {
        let clock = format_clock(elapsed_s);
        if clock != self.readout.total_time {
            self.readout.total_time = clock;
            self.dirty = true;
        }
    }

    /// Back to the home page; the clock keeps the last elapsed time
    pub fn render_stopped(&mut self) {
        self.readout.page = Page::Home;
        self.set_label(STOPPED_LABEL);
        self.readout.phase_timer.clear();
        self.dirty = true;
    }

    /// Render the display change an event implies
    pub fn render_event(&mut self, event: &Event) {
        match *event {
            Event::Started { .. } => self.render_started(),
            Event::PhaseStarted { phase, duration_s } => self.render_phase(phase, duration_s),
            Event::Stopped(_) => self.render_stopped(),
        }
    }

    fn set_label(&mut self, text: &str) {
        self.readout.phase_label.clear();
        let _ = self.readout.phase_label.push_str(text);
        self.dirty = true;
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
