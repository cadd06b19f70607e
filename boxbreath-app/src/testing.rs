//! Host doubles for unit tests

use boxbreath_core::cue::CueStep;
use boxbreath_core::display::Page;
use boxbreath_core::traits::{Surface, SurfaceError, WakeLock, WakeLockError};
use embedded_hal_async::delay::DelayNs;

/// Surface that keeps the last value of every element
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub page: Option<Page>,
    pub label: String,
    pub timer: String,
    pub total: String,
    pub steps: Vec<CueStep>,
    /// Fail every update
    pub fail: bool,
}

impl RecordingSurface {
    fn check(&self) -> Result<(), SurfaceError> {
        if self.fail {
            return Err(SurfaceError::Rejected);
        }
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn show_page(&mut self, page: Page) -> Result<(), SurfaceError> {
        self.check()?;
        self.page = Some(page);
        Ok(())
    }

    fn set_phase_label(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.check()?;
        self.label = text.into();
        Ok(())
    }

    fn set_phase_timer(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.check()?;
        self.timer = text.into();
        Ok(())
    }

    fn set_total_time(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.check()?;
        self.total = text.into();
        Ok(())
    }

    fn cue(&mut self, step: CueStep) -> Result<(), SurfaceError> {
        self.check()?;
        self.steps.push(step);
        Ok(())
    }
}

/// Wake lock that hands out numbered sentinels
#[derive(Debug, Default)]
pub struct FakeWakeLock {
    pub unsupported: bool,
    pub request_error: Option<WakeLockError>,
    pub release_error: Option<WakeLockError>,
    pub requested: u32,
    pub released: u32,
    pub last_released: Option<u32>,
}

impl WakeLock for FakeWakeLock {
    type Sentinel = u32;

    fn is_supported(&self) -> bool {
        !self.unsupported
    }

    async fn request(&mut self) -> Result<u32, WakeLockError> {
        self.requested += 1;
        match self.request_error {
            Some(e) => Err(e),
            None => Ok(self.requested),
        }
    }

    async fn release(&mut self, sentinel: u32) -> Result<(), WakeLockError> {
        if let Some(e) = self.release_error {
            return Err(e);
        }
        self.released += 1;
        self.last_released = Some(sentinel);
        Ok(())
    }
}

/// Delay that returns immediately and records what was asked for
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
