//! Main controller task
//!
//! Coordinates the breathing session. Receives page inputs, ticks and
//! platform notifications, one at a time, and updates the surface.

use embassy_futures::select::{select3, Either3};
use embedded_hal_async::delay::DelayNs;

use boxbreath_core::cycle::Event;
use boxbreath_core::traits::{Surface, WakeLock};

use crate::channels::Channels;
use crate::controls::{Controls, Input};
use crate::session::Session;

/// Controller task - main coordination loop
///
/// `delay` times the pause between start and the first phase.
pub async fn run_controller<W, S, D>(session: &mut Session<W, S>, channels: &Channels<W::Sentinel>, delay: &mut D) -> !
where
    W: WakeLock,
    S: Surface,
    D: DelayNs,
{
    info!("Controller task started");

    // Initial home page
    session.flush();

    loop {
        step(session, channels, delay).await;
    }
}

/// Wait for the next input, tick or platform event and handle it
pub async fn step<W, S, D>(session: &mut Session<W, S>, channels: &Channels<W::Sentinel>, delay: &mut D)
where
    W: WakeLock,
    S: Surface,
    D: DelayNs,
{
    match select3(
        channels.input.receive(),
        channels.tick.receive(),
        channels.platform.receive(),
    )
    .await
    {
        Either3::First(input) => handle_input(session, channels, delay, input).await,

        Either3::Second(()) => {
            if let Some(event) = session.second().await {
                trace!("Tick event: {:?}", event);
            }
        }

        Either3::Third(event) => session.platform_event(event).await,
    }
}

async fn handle_input<W, S, D>(
    session: &mut Session<W, S>,
    channels: &Channels<W::Sentinel>,
    delay: &mut D,
    input: Input,
) where
    W: WakeLock,
    S: Surface,
    D: DelayNs,
{
    debug!("Input: {:?}", input);

    let Some(command) = Controls::new(session.config()).map(input) else {
        warn!("Input not mapped: {:?}", input);
        return;
    };

    if let Some(Event::Started { .. }) = session.apply(command).await {
        // Let the page transition finish; queued inputs wait until after
        delay.delay_ms(session.config().transition_delay_ms).await;

        // Phase ticks count from the first phase
        channels.tick.clear();
        channels.tick_reset.signal(());
        session.begin_cycle();
    }
}
