//! Visual cue geometry
//!
//! A marker travels around the edge of a square, one edge per phase:
//!
//! ```text
//!   TopLeft ──── hold ────▶ TopRight
//!      ▲                       │
//!    inhale                 exhale
//!      │                       ▼
//!  BottomLeft ◀─── wait ─── BottomRight
//! ```
//!
//! Positions are expressed in permille of the box size with the origin at
//! the bottom-left corner and y pointing up.

use crate::cycle::Phase;

/// Full extent of the box in position units
pub const EXTENT: u16 = 1000;

/// A corner of the square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Corner {
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
}

impl Corner {
    /// Resting position before the first phase
    pub const HOME: Corner = Corner::BottomLeft;

    /// Position in permille, origin bottom-left, y up
    pub fn position(self) -> (u16, u16) {
        match self {
            Corner::BottomLeft => (0, 0),
            Corner::TopLeft => (0, EXTENT),
            Corner::TopRight => (EXTENT, EXTENT),
            Corner::BottomRight => (EXTENT, 0),
        }
    }

    /// Screen translation in pixels from the bottom-left corner
    ///
    /// Screen y grows downward, so upper corners have a negative y.
    pub fn translate(self, width_px: i32, height_px: i32) -> (i32, i32) {
        match self {
            Corner::BottomLeft => (0, 0),
            Corner::TopLeft => (0, -height_px),
            Corner::TopRight => (width_px, -height_px),
            Corner::BottomRight => (width_px, 0),
        }
    }
}

/// One marker animation: a single edge traversed at constant speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CueAnimation {
    pub from: Corner,
    pub to: Corner,
    /// Matches the phase duration exactly
    pub duration_ms: u32,
}

impl CueAnimation {
    /// Animation for a phase lasting `duration_s` seconds
    pub fn for_phase(phase: Phase, duration_s: u16) -> Self {
        let (from, to) = match phase {
            Phase::Inhale => (Corner::BottomLeft, Corner::TopLeft),
            Phase::Hold => (Corner::TopLeft, Corner::TopRight),
            Phase::Exhale => (Corner::TopRight, Corner::BottomRight),
            Phase::Wait => (Corner::BottomRight, Corner::BottomLeft),
        };
        Self {
            from,
            to,
            duration_ms: duration_s as u32 * 1000,
        }
    }

    /// Linearly interpolated marker position `elapsed_ms` into the animation
    pub fn position_at(&self, elapsed_ms: u32) -> (u16, u16) {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.to.position();
        }
        let (x0, y0) = self.from.position();
        let (x1, y1) = self.to.position();
        let lerp = |a: u16, b: u16| -> u16 {
            let a = a as i64;
            let b = b as i64;
            (a + (b - a) * elapsed_ms as i64 / self.duration_ms as i64) as u16
        };
        (lerp(x0, x1), lerp(y0, y1))
    }
}

/// Primitive operations applied to the marker by the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CueStep {
    /// Turn off the position transition so the next move snaps
    DisableTransition,
    /// Turn on a linear position transition of the given length
    EnableTransition { duration_ms: u32 },
    /// Move the marker to a corner
    MoveTo(Corner),
    /// Commit pending style changes for one frame before continuing
    Reflow,
}

/// Steps that snap the marker home without an animated slide back
///
/// The transition stays disabled for exactly one committed frame; the next
/// [`animate_steps`] turns it on again.
pub fn reset_steps() -> [CueStep; 3] {
    [
        CueStep::DisableTransition,
        CueStep::MoveTo(Corner::HOME),
        CueStep::Reflow,
    ]
}

/// Steps that start an edge animation
pub fn animate_steps(animation: CueAnimation) -> [CueStep; 2] {
    [
        CueStep::EnableTransition {
            duration_ms: animation.duration_ms,
        },
        CueStep::MoveTo(animation.to),
    ]
}
