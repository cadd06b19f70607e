//! Display surface trait

use crate::cue::{animate_steps, reset_steps, CueAnimation, CueStep};
use crate::display::{Page, Readout};

/// Errors that can occur while updating the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Element missing from the host's display tree
    ElementMissing,
    /// Host rejected the update
    Rejected,
}

impl core::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SurfaceError::ElementMissing => f.write_str("display element missing"),
            SurfaceError::Rejected => f.write_str("display update rejected"),
        }
    }
}

/// Trait for the host display
///
/// The surface is a dumb sink: it shows text and moves the cue marker.
/// All timing and state decisions stay in the controller.
pub trait Surface {
    /// Switch between the home and exercise pages
    fn show_page(&mut self, page: Page) -> Result<(), SurfaceError>;

    /// Set the phase label text
    fn set_phase_label(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Set the phase countdown text
    fn set_phase_timer(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Set the total elapsed time text
    fn set_total_time(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Apply one cue marker step
    fn cue(&mut self, step: CueStep) -> Result<(), SurfaceError>;
}

/// Helper trait for pushing whole readouts and cue sequences
pub trait SurfaceExt: Surface {
    /// Push every field of a readout
    fn draw_readout(&mut self, readout: &Readout) -> Result<(), SurfaceError> {
        self.show_page(readout.page)?;
        self.set_phase_label(&readout.phase_label)?;
        self.set_phase_timer(&readout.phase_timer)?;
        self.set_total_time(&readout.total_time)
    }

    /// Snap the marker home without animating the way back
    fn reset_cue(&mut self) -> Result<(), SurfaceError> {
        for step in reset_steps() {
            self.cue(step)?;
        }
        Ok(())
    }

    /// Start the marker along one edge
    fn animate_cue(&mut self, animation: CueAnimation) -> Result<(), SurfaceError> {
        for step in animate_steps(animation) {
            self.cue(step)?;
        }
        Ok(())
    }
}

// Blanket implementation for all Surface types
impl<T: Surface> SurfaceExt for T {}
