//! Session coordinator
//!
//! Owns the cycle controller together with the host capabilities it drives:
//! the display surface and the stay-awake grant. Controller events become
//! surface updates and grant requests here. Host failures are logged and
//! never reach the caller.

use boxbreath_core::config::BreathingConfig;
use boxbreath_core::cue::CueAnimation;
use boxbreath_core::cycle::{CycleController, Event, StopReason};
use boxbreath_core::display::{Readout, Renderer};
use boxbreath_core::traits::{Surface, SurfaceExt, WakeLock};

use crate::controls::Command;

/// Notifications from the host platform
///
/// `G` is the wake lock's grant sentinel, so a release notice names the
/// grant it is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent<G> {
    /// Page visibility changed
    VisibilityChanged { visible: bool },
    /// Host released this grant, on its own or after our release
    WakeLockReleased(G),
}

/// A breathing session with its display and stay-awake grant
pub struct Session<W: WakeLock, S: Surface> {
    controller: CycleController,
    renderer: Renderer,
    wake_lock: W,
    /// Grant currently held, at most one
    grant: Option<W::Sentinel>,
    surface: S,
}

impl<W: WakeLock, S: Surface> Session<W, S> {
    pub fn new(config: BreathingConfig, wake_lock: W, surface: S) -> Self {
        Self {
            controller: CycleController::new(config),
            renderer: Renderer::new(),
            wake_lock,
            grant: None,
            surface,
        }
    }

    pub fn controller(&self) -> &CycleController {
        &self.controller
    }

    pub fn config(&self) -> &BreathingConfig {
        self.controller.config()
    }

    pub fn readout(&self) -> &Readout {
        self.renderer.readout()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn wake_lock(&self) -> &W {
        &self.wake_lock
    }

    /// Check if a stay-awake grant is held
    pub fn holds_grant(&self) -> bool {
        self.grant.is_some()
    }

    /// Apply a command from the controls
    ///
    /// Returns the controller event it produced. After [`Event::Started`]
    /// the caller waits out the transition delay, then calls
    /// [`begin_cycle`](Self::begin_cycle).
    pub async fn apply(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::Configure(duration_s) => {
                self.configure(duration_s);
                None
            }
            Command::Start(time_limit_s) => self.start(time_limit_s).await,
            Command::Stop => Some(self.stop().await),
        }
    }

    /// Set the phase duration for the next session
    pub fn configure(&mut self, duration_s: u16) {
        match self.controller.configure(duration_s) {
            Ok(()) => debug!("Phase duration set to {}s", duration_s),
            Err(e) => warn!("Phase duration {} rejected: {}", duration_s, e),
        }
    }

    /// Start a session and request the stay-awake grant
    pub async fn start(&mut self, time_limit_s: Option<u32>) -> Option<Event> {
        let Some(event) = self.controller.start(time_limit_s) else {
            debug!("Already running, start ignored");
            return None;
        };

        info!(
            "Starting session: {}s phases, limit {:?}",
            self.controller.phase_duration_s(),
            time_limit_s
        );

        self.show(event);
        self.flush();
        self.acquire_grant().await;
        Some(event)
    }

    /// Enter the first phase after the transition delay
    pub fn begin_cycle(&mut self) -> Option<Event> {
        let event = self.controller.begin_cycle()?;
        self.show(event);
        self.flush();
        Some(event)
    }

    /// Stop the session and release the grant
    ///
    /// Safe while idle.
    pub async fn stop(&mut self) -> Event {
        let event = self.controller.stop();
        self.finish(event).await;
        event
    }

    /// Advance one second: total time first, then the phase countdown
    pub async fn second(&mut self) -> Option<Event> {
        if !self.controller.is_running() {
            return None;
        }

        self.controller.tick_total();
        self.renderer.render_total(self.controller.elapsed_total_s());

        let event = self.controller.tick_phase();
        match event {
            Some(stopped @ Event::Stopped(_)) => self.finish(stopped).await,
            Some(next) => self.show(next),
            None => self
                .renderer
                .render_countdown(self.controller.remaining_phase_s()),
        }

        self.flush();
        event
    }

    /// React to a platform notification
    pub async fn platform_event(&mut self, event: PlatformEvent<W::Sentinel>) {
        match event {
            PlatformEvent::VisibilityChanged { visible } => {
                trace!("Visibility changed: {}", visible);
                if visible && self.grant.is_none() && self.controller.is_running() {
                    debug!("Page visible again, re-acquiring wake lock");
                    self.acquire_grant().await;
                }
            }
            PlatformEvent::WakeLockReleased(sentinel) => {
                // Notices for earlier grants may arrive after a new one was taken
                if self.grant.as_ref() == Some(&sentinel) {
                    self.grant = None;
                    info!("Wake lock released by platform");
                } else {
                    debug!("Release notice for a stale grant ignored");
                }
            }
        }
    }

    /// Push the readout to the surface if anything changed
    pub fn flush(&mut self) {
        if !self.renderer.take_dirty() {
            return;
        }
        if let Err(e) = self.surface.draw_readout(self.renderer.readout()) {
            warn!("Display update failed: {}", e);
        }
    }

    async fn finish(&mut self, event: Event) {
        if let Event::Stopped(reason) = event {
            match reason {
                StopReason::LimitReached => info!("Time limit reached, ending on exhale"),
                StopReason::Operator => info!("Session stopped"),
            }
        }
        self.release_grant().await;
        self.show(event);
        self.flush();
    }

    /// Render an event and move the cue marker to match
    fn show(&mut self, event: Event) {
        self.renderer.render_event(&event);

        let cue = match event {
            Event::Started { .. } | Event::Stopped(_) => self.surface.reset_cue(),
            Event::PhaseStarted { phase, duration_s } => {
                trace!("Phase {} for {}s", phase.name(), duration_s);
                self.surface
                    .animate_cue(CueAnimation::for_phase(phase, duration_s))
            }
        };
        if let Err(e) = cue {
            warn!("Cue update failed: {}", e);
        }
    }

    async fn acquire_grant(&mut self) {
        if !self.wake_lock.is_supported() {
            info!("Wake lock not supported on this host");
            return;
        }
        match self.wake_lock.request().await {
            Ok(sentinel) => {
                info!("Wake lock acquired");
                self.grant = Some(sentinel);
            }
            Err(e) => warn!("Wake lock request failed: {}", e),
        }
    }

    async fn release_grant(&mut self) {
        // Cleared whether or not the release succeeds
        let Some(sentinel) = self.grant.take() else {
            return;
        };
        match self.wake_lock.release(sentinel).await {
            Ok(()) => info!("Wake lock released"),
            Err(e) => warn!("Wake lock release failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeWakeLock, RecordingSurface};
    use boxbreath_core::cue::{Corner, CueStep};
    use boxbreath_core::cycle::Phase;
    use boxbreath_core::display::Page;
    use boxbreath_core::traits::WakeLockError;
    use embassy_futures::block_on;

    fn session() -> Session<FakeWakeLock, RecordingSurface> {
        Session::new(
            BreathingConfig::default(),
            FakeWakeLock::default(),
            RecordingSurface::default(),
        )
    }

    fn started(time_limit_s: Option<u32>) -> Session<FakeWakeLock, RecordingSurface> {
        let mut session = session();
        block_on(session.start(time_limit_s));
        session.begin_cycle();
        session
    }

    #[test]
    fn test_start_shows_get_ready_and_takes_grant() {
        let mut session = session();
        let event = block_on(session.start(None));

        assert_eq!(event, Some(Event::Started { time_limit_s: None }));
        assert!(session.holds_grant());
        assert_eq!(session.surface().page, Some(Page::Exercise));
        assert_eq!(session.surface().label, "Get Ready...");
        assert_eq!(session.surface().total, "00:00");
        assert_eq!(
            session.surface().steps,
            [
                CueStep::DisableTransition,
                CueStep::MoveTo(Corner::BottomLeft),
                CueStep::Reflow
            ]
        );
    }

    #[test]
    fn test_begin_cycle_animates_inhale() {
        let session = started(None);

        assert_eq!(session.surface().label, "inhale");
        assert_eq!(session.surface().timer, "4");
        assert_eq!(
            session.surface().steps[3..],
            [
                CueStep::EnableTransition { duration_ms: 4000 },
                CueStep::MoveTo(Corner::TopLeft)
            ]
        );
    }

    #[test]
    fn test_countdown_display() {
        let mut session = started(None);

        block_on(session.second());
        assert_eq!(session.surface().timer, "3");
        assert_eq!(session.surface().total, "00:01");

        for _ in 0..3 {
            block_on(session.second());
        }
        assert_eq!(session.surface().label, "hold");
        assert_eq!(session.surface().timer, "4");
        assert_eq!(session.surface().total, "00:04");
    }

    #[test]
    fn test_limit_stops_on_exhale_and_releases_grant() {
        let mut session = started(Some(10));

        let mut stop = None;
        for s in 1..=12 {
            if let Some(Event::Stopped(reason)) = block_on(session.second()) {
                stop = Some((s, reason));
            }
        }

        assert_eq!(stop, Some((12, StopReason::LimitReached)));
        assert!(!session.holds_grant());
        assert_eq!(session.wake_lock().released, 1);
        assert_eq!(session.surface().page, Some(Page::Home));
        assert_eq!(session.surface().label, "Stopped");
        assert_eq!(session.surface().timer, "");
        assert_eq!(session.surface().total, "00:12");
        assert_eq!(
            session.surface().steps.last(),
            Some(&CueStep::Reflow)
        );
    }

    #[test]
    fn test_ticks_ignored_while_idle() {
        let mut session = session();
        assert_eq!(block_on(session.second()), None);
        assert_eq!(session.controller().elapsed_total_s(), 0);
    }

    #[test]
    fn test_start_while_running_ignored() {
        let mut session = started(None);
        block_on(session.second());

        assert_eq!(block_on(session.apply(Command::Start(Some(60)))), None);
        assert_eq!(session.wake_lock().requested, 1);
        assert_eq!(session.controller().elapsed_total_s(), 1);
    }

    #[test]
    fn test_stop_while_idle_is_harmless() {
        let mut session = session();
        let event = block_on(session.stop());

        assert_eq!(event, Event::Stopped(StopReason::Operator));
        assert!(!session.controller().is_running());
        assert_eq!(session.wake_lock().released, 0);
    }

    #[test]
    fn test_grant_failures_are_not_fatal() {
        let mut session = Session::new(
            BreathingConfig::default(),
            FakeWakeLock {
                request_error: Some(WakeLockError::NotAllowed),
                ..Default::default()
            },
            RecordingSurface::default(),
        );

        assert!(block_on(session.start(None)).is_some());
        assert!(session.controller().is_running());
        assert!(!session.holds_grant());
    }

    #[test]
    fn test_release_failure_still_clears_grant() {
        let mut session = Session::new(
            BreathingConfig::default(),
            FakeWakeLock {
                release_error: Some(WakeLockError::ReleaseFailed),
                ..Default::default()
            },
            RecordingSurface::default(),
        );
        block_on(session.start(None));
        assert!(session.holds_grant());

        block_on(session.stop());
        assert!(!session.holds_grant());
    }

    #[test]
    fn test_unsupported_wake_lock_skipped() {
        let mut session = Session::new(
            BreathingConfig::default(),
            FakeWakeLock {
                unsupported: true,
                ..Default::default()
            },
            RecordingSurface::default(),
        );
        block_on(session.start(None));
        assert_eq!(session.wake_lock().requested, 0);
    }

    #[test]
    fn test_visibility_reacquires_revoked_grant() {
        let mut session = started(None);
        block_on(session.platform_event(PlatformEvent::WakeLockReleased(1)));
        assert!(!session.holds_grant());

        // Hidden: nothing to do
        block_on(session.platform_event(PlatformEvent::VisibilityChanged { visible: false }));
        assert_eq!(session.wake_lock().requested, 1);

        block_on(session.platform_event(PlatformEvent::VisibilityChanged { visible: true }));
        assert!(session.holds_grant());
        assert_eq!(session.wake_lock().requested, 2);

        // Already held: no second request
        block_on(session.platform_event(PlatformEvent::VisibilityChanged { visible: true }));
        assert_eq!(session.wake_lock().requested, 2);
    }

    #[test]
    fn test_late_release_notice_keeps_new_grant() {
        let mut session = started(None);
        block_on(session.stop());

        // Second session starts before the first grant's notice is handled
        block_on(session.start(None));
        session.begin_cycle();
        block_on(session.platform_event(PlatformEvent::WakeLockReleased(1)));
        assert!(session.holds_grant());

        block_on(session.stop());
        assert!(!session.holds_grant());
        assert_eq!(session.wake_lock().requested, 2);
        assert_eq!(session.wake_lock().released, 2);
        assert_eq!(session.wake_lock().last_released, Some(2));
    }

    #[test]
    fn test_visibility_while_idle_does_nothing() {
        let mut session = session();
        block_on(session.platform_event(PlatformEvent::VisibilityChanged { visible: true }));
        assert_eq!(session.wake_lock().requested, 0);
    }

    #[test]
    fn test_configure_applies_to_next_session() {
        let mut session = started(None);
        block_on(session.apply(Command::Configure(6)));
        assert_eq!(session.controller().remaining_phase_s(), 4);

        block_on(session.stop());
        block_on(session.start(None));
        session.begin_cycle();
        assert_eq!(session.surface().timer, "6");
        assert_eq!(session.controller().current_phase(), Some(Phase::Inhale));
    }

    #[test]
    fn test_surface_errors_are_not_fatal() {
        let mut session = Session::new(
            BreathingConfig::default(),
            FakeWakeLock::default(),
            RecordingSurface {
                fail: true,
                ..Default::default()
            },
        );
        block_on(session.start(None));
        session.begin_cycle();
        block_on(session.second());
        assert_eq!(session.controller().remaining_phase_s(), 3);
    }
}
