//! Communication channels
//!
//! Connects the host's event sources, the tick task and the controller loop.
//! Everything runs on one executor, so the channels use `NoopRawMutex`.

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::controls::Input;
use crate::session::PlatformEvent;

/// Channel capacity for page inputs
const INPUT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for platform notifications
const PLATFORM_CHANNEL_SIZE: usize = 4;

/// Seconds that may queue up while the controller is busy
pub const TICK_BACKLOG: usize = 8;

/// Channels shared by the controller loop, the tick task and the host
///
/// `G` is the wake lock's grant sentinel carried by release notices.
pub struct Channels<G> {
    /// Slider and button inputs from the page
    pub input: Channel<NoopRawMutex, Input, INPUT_CHANNEL_SIZE>,
    /// Visibility changes and grant releases
    pub platform: Channel<NoopRawMutex, PlatformEvent<G>, PLATFORM_CHANNEL_SIZE>,
    /// One entry per elapsed second; every second is handled, even late
    pub tick: Channel<NoopRawMutex, (), TICK_BACKLOG>,
    /// Restart the tick period (first phase begins)
    pub tick_reset: Signal<NoopRawMutex, ()>,
}

impl<G> Channels<G> {
    pub const fn new() -> Self {
        Self {
            input: Channel::new(),
            platform: Channel::new(),
            tick: Channel::new(),
            tick_reset: Signal::new(),
        }
    }
}

impl<G> Default for Channels<G> {
    fn default() -> Self {
        Self::new()
    }
}
