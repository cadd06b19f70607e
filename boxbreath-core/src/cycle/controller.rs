//! Breathing cycle controller
//!
//! Owns the session and is the only place it is mutated. The host calls
//! `tick_total` then `tick_phase` once per second while the corresponding
//! timers are armed, and reacts to the returned [`Event`]s.

use super::events::{Event, StopReason};
use super::phase::Phase;
use super::session::{RunningSession, Session, Stage, TimerSlot};
use crate::config::{BreathingConfig, ConfigError};

/// Breathing cycle controller
///
/// Tracks the configured phase duration for the next session and the
/// current session, if any.
#[derive(Debug, Clone)]
pub struct CycleController {
    config: BreathingConfig,
    /// Duration applied by the next `start`
    phase_duration_s: u16,
    session: Session,
}

impl CycleController {
    /// Create an idle controller
    pub fn new(config: BreathingConfig) -> Self {
        Self {
            phase_duration_s: config.phase_duration_s,
            config,
            session: Session::Idle,
        }
    }

    pub fn config(&self) -> &BreathingConfig {
        &self.config
    }

    /// Phase duration the next session will use
    pub fn phase_duration_s(&self) -> u16 {
        self.phase_duration_s
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Phase currently shown, if breathing
    pub fn current_phase(&self) -> Option<Phase> {
        self.session.running().and_then(RunningSession::current_phase)
    }

    /// Seconds left in the current phase (0 when idle)
    pub fn remaining_phase_s(&self) -> u16 {
        self.session
            .running()
            .map(RunningSession::remaining_phase_s)
            .unwrap_or(0)
    }

    /// Seconds since the first phase began (0 when idle)
    pub fn elapsed_total_s(&self) -> u32 {
        self.session
            .running()
            .map(RunningSession::elapsed_total_s)
            .unwrap_or(0)
    }

    /// Set the phase duration for the next session
    ///
    /// A running session keeps the duration it was started with.
    pub fn configure(&mut self, phase_duration_s: u16) -> Result<(), ConfigError> {
        self.phase_duration_s = self.config.check_phase_duration(phase_duration_s)?;
        Ok(())
    }

    /// Start a session
    ///
    /// Returns `None` without touching the running session if one exists.
    /// Otherwise the session waits in [`Stage::GetReady`] until
    /// [`begin_cycle`](Self::begin_cycle).
    pub fn start(&mut self, time_limit_s: Option<u32>) -> Option<Event> {
        if self.session.is_running() {
            return None;
        }
        self.session = Session::Running(RunningSession::new(self.phase_duration_s, time_limit_s));
        Some(Event::Started { time_limit_s })
    }

    /// Begin the first phase once the transition delay has elapsed
    ///
    /// Arms the total timer and enters phase 0 (inhale).
    pub fn begin_cycle(&mut self) -> Option<Event> {
        let Session::Running(run) = &mut self.session else {
            return None;
        };
        if run.stage != Stage::GetReady {
            return None;
        }
        run.stage = Stage::Breathing;
        run.total_timer = TimerSlot::Armed;
        Some(Self::advance_phase(run))
    }

    /// Stop the session
    ///
    /// Safe to call while idle; always reports [`StopReason::Operator`] so the
    /// host resets its display and releases the stay-awake grant.
    pub fn stop(&mut self) -> Event {
        self.finish(StopReason::Operator)
    }

    /// One second of the phase countdown
    pub fn tick_phase(&mut self) -> Option<Event> {
        let Session::Running(run) = &mut self.session else {
            return None;
        };
        if !run.phase_timer.is_armed() {
            return None;
        }

        run.remaining_phase_s = run.remaining_phase_s.saturating_sub(1);
        if run.remaining_phase_s > 0 {
            return None;
        }

        // Phase that just ended
        let completed = Phase::from_cursor(run.phase_cursor.wrapping_sub(1));

        // Never cut a cycle short: only an exhale completion may end it
        if run.limit_reached() && completed == Phase::Exhale {
            return Some(self.finish(StopReason::LimitReached));
        }

        Some(Self::advance_phase(run))
    }

    /// One second of total elapsed time
    pub fn tick_total(&mut self) {
        if let Session::Running(run) = &mut self.session {
            if run.total_timer.is_armed() {
                run.elapsed_total_s = run.elapsed_total_s.saturating_add(1);
            }
        }
    }

    /// Enter the phase under the cursor and move the cursor on
    fn advance_phase(run: &mut RunningSession) -> Event {
        let phase = Phase::from_cursor(run.phase_cursor);
        run.remaining_phase_s = run.phase_duration_s;
        run.phase_timer = TimerSlot::Armed;
        run.phase_cursor = run.phase_cursor.wrapping_add(1);

        Event::PhaseStarted {
            phase,
            duration_s: run.phase_duration_s,
        }
    }

    /// Drop the session, clearing both timers with it
    fn finish(&mut self, reason: StopReason) -> Event {
        self.session = Session::Idle;
        Event::Stopped(reason)
    }
}

impl Default for CycleController {
    fn default() -> Self {
        Self::new(BreathingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Advance one second the way the host does: total first, then phase
    fn second(ctrl: &mut CycleController) -> Option<Event> {
        ctrl.tick_total();
        ctrl.tick_phase()
    }

    fn started(limit: Option<u32>, duration_s: u16) -> CycleController {
        let mut ctrl = CycleController::default();
        ctrl.configure(duration_s).unwrap();
        ctrl.start(limit);
        ctrl.begin_cycle();
        ctrl
    }

    #[test]
    fn test_controller_creation() {
        let ctrl = CycleController::default();
        assert!(!ctrl.is_running());
        assert_eq!(ctrl.phase_duration_s(), 4);
        assert_eq!(ctrl.elapsed_total_s(), 0);
        assert_eq!(ctrl.current_phase(), None);
    }

    #[test]
    fn test_start_waits_for_begin() {
        let mut ctrl = CycleController::default();
        let event = ctrl.start(Some(60));
        assert_eq!(event, Some(Event::Started { time_limit_s: Some(60) }));
        assert!(ctrl.is_running());
        assert_eq!(ctrl.current_phase(), None);

        // Ticks before the cycle begins are ignored
        assert_eq!(second(&mut ctrl), None);
        assert_eq!(ctrl.elapsed_total_s(), 0);

        let event = ctrl.begin_cycle();
        assert_eq!(
            event,
            Some(Event::PhaseStarted {
                phase: Phase::Inhale,
                duration_s: 4
            })
        );
        assert_eq!(ctrl.current_phase(), Some(Phase::Inhale));
        assert_eq!(ctrl.remaining_phase_s(), 4);

        // Second begin is a no-op
        assert_eq!(ctrl.begin_cycle(), None);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut ctrl = started(None, 4);
        second(&mut ctrl);
        second(&mut ctrl);
        let before = ctrl.session().clone();

        assert_eq!(ctrl.start(Some(5)), None);
        assert_eq!(ctrl.session(), &before);
    }

    #[test]
    fn test_phase_order() {
        let mut ctrl = started(None, 2);
        let mut phases = vec![ctrl.current_phase().unwrap()];
        for _ in 0..8 {
            if let Some(Event::PhaseStarted { phase, .. }) = second(&mut ctrl) {
                phases.push(phase);
            }
        }
        assert_eq!(
            phases,
            [
                Phase::Inhale,
                Phase::Hold,
                Phase::Exhale,
                Phase::Wait,
                Phase::Inhale
            ]
        );
    }

    #[test]
    fn test_countdown() {
        let mut ctrl = started(None, 3);
        assert_eq!(ctrl.remaining_phase_s(), 3);
        second(&mut ctrl);
        assert_eq!(ctrl.remaining_phase_s(), 2);
        second(&mut ctrl);
        assert_eq!(ctrl.remaining_phase_s(), 1);
        // Reaching zero immediately rolls into the next phase
        second(&mut ctrl);
        assert_eq!(ctrl.remaining_phase_s(), 3);
        assert_eq!(ctrl.current_phase(), Some(Phase::Hold));
    }

    #[test]
    fn test_end_on_exhale_example() {
        // d = 4, L = 10: first exhale completion at/after 10s is at 12s
        let mut ctrl = started(Some(10), 4);
        let mut stopped_at = None;
        for s in 1..=40 {
            if let Some(Event::Stopped(reason)) = second(&mut ctrl) {
                assert_eq!(reason, StopReason::LimitReached);
                stopped_at = Some(s);
                break;
            }
        }
        assert_eq!(stopped_at, Some(12));
        assert!(!ctrl.is_running());
    }

    #[test]
    fn test_limit_inside_wait_runs_to_next_exhale() {
        // d = 4, L = 13: 12s exhale is too early, next exhale ends at 28s
        let mut ctrl = started(Some(13), 4);
        let mut stopped_at = None;
        for s in 1..=40 {
            if second(&mut ctrl).is_some_and(|e| e.ends_session()) {
                stopped_at = Some(s);
                break;
            }
        }
        assert_eq!(stopped_at, Some(28));
    }

    #[test]
    fn test_limit_on_boundary_stops_there() {
        let mut ctrl = started(Some(12), 4);
        let stop = (1..=12).find_map(|s| second(&mut ctrl).filter(Event::ends_session).map(|_| s));
        assert_eq!(stop, Some(12));
    }

    #[test]
    fn test_stop_clears_session() {
        let mut ctrl = started(None, 4);
        second(&mut ctrl);

        assert_eq!(ctrl.stop(), Event::Stopped(StopReason::Operator));
        assert!(!ctrl.is_running());
        assert_eq!(ctrl.elapsed_total_s(), 0);

        // Timers are gone with the session
        assert_eq!(second(&mut ctrl), None);
    }

    #[test]
    fn test_stop_while_idle() {
        let mut ctrl = CycleController::default();
        assert_eq!(ctrl.stop(), Event::Stopped(StopReason::Operator));
        assert_eq!(ctrl.stop(), Event::Stopped(StopReason::Operator));
        assert_eq!(ctrl.session(), &Session::Idle);
    }

    #[test]
    fn test_configure_latched_at_start() {
        let mut ctrl = started(None, 4);
        ctrl.configure(7).unwrap();

        // Running session keeps its duration
        for _ in 0..4 {
            second(&mut ctrl);
        }
        assert_eq!(ctrl.remaining_phase_s(), 4);

        // Next session picks it up
        ctrl.stop();
        ctrl.start(None);
        ctrl.begin_cycle();
        assert_eq!(ctrl.remaining_phase_s(), 7);
    }

    #[test]
    fn test_configure_rejects_out_of_range() {
        let mut ctrl = CycleController::default();
        assert_eq!(ctrl.configure(0), Err(ConfigError::PhaseDurationOutOfRange));
        assert_eq!(ctrl.configure(11), Err(ConfigError::PhaseDurationOutOfRange));
        assert_eq!(ctrl.phase_duration_s(), 4);
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut ctrl = started(None, 2);
        for _ in 0..5 {
            second(&mut ctrl);
        }
        ctrl.stop();
        ctrl.start(None);
        ctrl.begin_cycle();

        let run = ctrl.session().running().unwrap();
        assert_eq!(run.elapsed_total_s(), 0);
        assert_eq!(run.phase_cursor(), 1);
        assert_eq!(ctrl.current_phase(), Some(Phase::Inhale));
    }
}
