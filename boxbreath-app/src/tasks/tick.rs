//! Tick task
//!
//! Queues one tick per second for the controller. Ticks are counted, not
//! merged, so a busy controller catches up on every second it missed. The
//! controller restarts the period when the first phase begins, so every
//! phase gets whole seconds.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use crate::channels::Channels;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Tick task - queues a tick every second
pub async fn run_ticker<G>(channels: &Channels<G>) -> ! {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        match select(ticker.next(), channels.tick_reset.wait()).await {
            Either::First(()) => {
                if channels.tick.try_send(()).is_err() {
                    warn!("Tick backlog full, second dropped");
                }
            }
            Either::Second(()) => {
                trace!("Tick period restarted");
                ticker.reset();
            }
        }
    }
}
