//! Flight session state machine.
//!
//! The session counts whole seconds. It has no clock of its own - the caller
//! (normally [`FlightController`](super::FlightController)) invokes `tick()`
//! once per elapsed second while the session is running.
//!
//! ## State Transitions
//!
//! ```text
//! Running <-> Paused
//!    |          |
//!    +----+-----+
//!         v
//!   Ended(Completed | Aborted)
//! ```
//!
//! `Ended` is terminal. The transition into it happens at most once, and it
//! is the only place a [`FlightEvent::Ended`] is produced, so a session can
//! never be finalized twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plan::FlightPlan;
use crate::events::FlightEvent;
use crate::history::{FlightRecord, FlightStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "status")]
pub enum SessionState {
    Running,
    Paused,
    Ended(FlightStatus),
}

#[derive(Debug, Clone)]
pub struct FlightSession {
    plan: FlightPlan,
    state: SessionState,
    total_secs: u64,
    remaining_secs: u64,
    started_at: DateTime<Utc>,
    /// Set on the transition into `Ended`.
    ended_at: Option<DateTime<Utc>>,
}

impl FlightSession {
    /// Start a session for `plan`.
    ///
    /// A plan with zero countable seconds lands immediately, in which case
    /// the returned event is already `Ended`.
    pub fn depart(plan: FlightPlan) -> (Self, FlightEvent) {
        let total_secs = plan.total_secs();
        let started_at = Utc::now();
        let mut session = Self {
            plan,
            state: SessionState::Running,
            total_secs,
            remaining_secs: total_secs,
            started_at,
            ended_at: None,
        };

        if total_secs == 0 {
            let event = session.finish(FlightStatus::Completed);
            return (session, event);
        }

        let event = FlightEvent::Departed {
            origin: session.plan.origin.clone(),
            destination: session.plan.destination.clone(),
            total_secs,
            at: started_at,
        };
        (session, event)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn plan(&self) -> &FlightPlan {
        &self.plan
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.state, SessionState::Ended(_))
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// 0.0 .. 1.0 share of the flight already flown.
    pub fn progress(&self) -> f64 {
        progress_fraction(self.remaining_secs, self.total_secs)
    }

    /// The finalized record, once the session has ended.
    pub fn record(&self) -> Option<FlightRecord> {
        let SessionState::Ended(status) = self.state else {
            return None;
        };
        let ended_at = self.ended_at?;
        Some(self.build_record(status, ended_at))
    }

    pub fn snapshot(&self) -> FlightEvent {
        FlightEvent::Snapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Count one elapsed second. Only meaningful while running.
    pub fn tick(&mut self) -> Option<FlightEvent> {
        if self.state != SessionState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.finish(FlightStatus::Completed));
        }
        Some(FlightEvent::Ticked {
            remaining_secs: self.remaining_secs,
            progress: self.progress(),
        })
    }

    pub fn pause(&mut self) -> Option<FlightEvent> {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::Paused;
                Some(FlightEvent::Paused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<FlightEvent> {
        match self.state {
            SessionState::Paused => {
                self.state = SessionState::Running;
                Some(FlightEvent::Resumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn toggle_pause(&mut self) -> Option<FlightEvent> {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            SessionState::Ended(_) => None,
        }
    }

    /// End the flight early.
    pub fn abort(&mut self) -> Option<FlightEvent> {
        match self.state {
            SessionState::Running | SessionState::Paused => {
                Some(self.finish(FlightStatus::Aborted))
            }
            SessionState::Ended(_) => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Callers must only invoke this from a non-ended state.
    fn finish(&mut self, status: FlightStatus) -> FlightEvent {
        debug_assert!(!self.is_ended());
        self.state = SessionState::Ended(status);
        // Wall clocks can step backwards; a record never ends before it starts.
        let ended_at = Utc::now().max(self.started_at);
        self.ended_at = Some(ended_at);
        tracing::debug!(
            status = status.as_str(),
            remaining_secs = self.remaining_secs,
            "flight session ended"
        );
        FlightEvent::Ended {
            record: self.build_record(status, ended_at),
        }
    }

    fn build_record(&self, status: FlightStatus, ended_at: DateTime<Utc>) -> FlightRecord {
        FlightRecord {
            origin: self.plan.origin.clone(),
            destination: self.plan.destination.clone(),
            duration_minutes: self.plan.duration_minutes,
            started_at: self.started_at,
            ended_at,
            status,
        }
    }
}

/// Elapsed share of a countdown, clamped to `[0, 1]`.
///
/// A zero-length countdown is complete by definition.
pub fn progress_fraction(remaining_secs: u64, total_secs: u64) -> f64 {
    if total_secs == 0 {
        return 1.0;
    }
    (1.0 - remaining_secs as f64 / total_secs as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plan(minutes: f64) -> FlightPlan {
        FlightPlan::from_route(Some("LHR"), Some("DXB"), Some(&minutes.to_string()))
    }

    fn ended_record(event: Option<FlightEvent>) -> FlightRecord {
        match event {
            Some(FlightEvent::Ended { record }) => record,
            other => panic!("Expected Ended, got {other:?}"),
        }
    }

    #[test]
    fn departs_running_with_full_countdown() {
        let (session, event) = FlightSession::depart(plan(25.0));
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.remaining_secs(), 1500);
        assert_eq!(session.progress(), 0.0);
        assert!(matches!(event, FlightEvent::Departed { total_secs: 1500, .. }));
    }

    #[test]
    fn zero_duration_lands_immediately() {
        let (mut session, event) = FlightSession::depart(plan(0.0));
        assert_eq!(session.state(), SessionState::Ended(FlightStatus::Completed));
        let record = ended_record(Some(event));
        assert_eq!(record.status, FlightStatus::Completed);
        assert_eq!(session.progress(), 1.0);

        assert!(session.tick().is_none());
        assert!(session.abort().is_none());
        assert!(session.toggle_pause().is_none());
    }

    #[test]
    fn tick_counts_down_to_completion() {
        let (mut session, _) = FlightSession::depart(plan(0.05)); // 3s
        assert!(matches!(session.tick(), Some(FlightEvent::Ticked { remaining_secs: 2, .. })));
        assert!(matches!(session.tick(), Some(FlightEvent::Ticked { remaining_secs: 1, .. })));
        let record = ended_record(session.tick());
        assert_eq!(record.status, FlightStatus::Completed);
        assert_eq!(session.remaining_secs(), 0);
        assert!(record.started_at <= record.ended_at);

        assert!(session.tick().is_none());
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn pause_freezes_countdown() {
        let (mut session, _) = FlightSession::depart(plan(1.0));
        session.tick();
        session.tick();
        assert!(matches!(session.pause(), Some(FlightEvent::Paused { remaining_secs: 58, .. })));
        for _ in 0..10 {
            assert!(session.tick().is_none());
        }
        assert_eq!(session.remaining_secs(), 58);

        assert!(session.resume().is_some());
        session.tick();
        assert_eq!(session.remaining_secs(), 57);
    }

    #[test]
    fn toggle_pause_alternates() {
        let (mut session, _) = FlightSession::depart(plan(1.0));
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Paused);
        session.toggle_pause();
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn redundant_pause_and_resume_are_noops() {
        let (mut session, _) = FlightSession::depart(plan(1.0));
        assert!(session.resume().is_none());
        assert!(session.pause().is_some());
        assert!(session.pause().is_none());
    }

    #[test]
    fn abort_from_paused_records_aborted() {
        let (mut session, _) = FlightSession::depart(plan(10.0));
        session.tick();
        session.pause();
        let record = ended_record(session.abort());
        assert_eq!(record.status, FlightStatus::Aborted);
        assert_eq!(record.duration_minutes, 10.0);
        assert_eq!(session.record(), Some(record));
    }

    #[test]
    fn ended_is_terminal() {
        let (mut session, _) = FlightSession::depart(plan(10.0));
        session.abort();
        assert!(session.abort().is_none());
        assert!(session.pause().is_none());
        assert!(session.resume().is_none());
        assert!(session.tick().is_none());
        assert_eq!(session.state(), SessionState::Ended(FlightStatus::Aborted));
    }

    #[test]
    fn record_is_none_while_flying() {
        let (session, _) = FlightSession::depart(plan(10.0));
        assert!(session.record().is_none());
    }

    #[test]
    fn ended_event_carries_the_session_record() {
        let (mut session, _) = FlightSession::depart(plan(10.0));
        session.tick();
        let record = ended_record(session.abort());
        assert_eq!(session.record(), Some(record.clone()));
        assert_eq!(record.status, FlightStatus::Aborted);
        assert!(record.ended_at >= record.started_at);
    }

    #[test]
    fn snapshot_reports_progress() {
        let (mut session, _) = FlightSession::depart(plan(1.0));
        for _ in 0..30 {
            session.tick();
        }
        match session.snapshot() {
            FlightEvent::Snapshot {
                state,
                remaining_secs,
                total_secs,
                progress,
                ..
            } => {
                assert_eq!(state, SessionState::Running);
                assert_eq!(remaining_secs, 30);
                assert_eq!(total_secs, 60);
                assert!((progress - 0.5).abs() < f64::EPSILON);
            }
            _ => panic!("Expected Snapshot"),
        }
    }

    #[test]
    fn progress_fraction_edges() {
        assert_eq!(progress_fraction(0, 100), 1.0);
        assert_eq!(progress_fraction(100, 100), 0.0);
        assert_eq!(progress_fraction(0, 0), 1.0);
        assert_eq!(progress_fraction(250, 100), 0.0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Tick,
        Toggle,
        Abort,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![8 => Just(Op::Tick), 2 => Just(Op::Toggle), 1 => Just(Op::Abort)]
    }

    proptest! {
        #[test]
        fn at_most_one_ended_event(secs in 0u64..40, ops in proptest::collection::vec(op(), 0..120)) {
            let (mut session, first) = FlightSession::depart(plan(secs as f64 / 60.0));
            let mut ended = usize::from(first.is_ended());
            let mut last_remaining = session.remaining_secs();

            for op in ops {
                let was_running = session.is_running();
                let event = match op {
                    Op::Tick => session.tick(),
                    Op::Toggle => session.toggle_pause(),
                    Op::Abort => session.abort(),
                };
                if event.as_ref().is_some_and(FlightEvent::is_ended) {
                    ended += 1;
                }
                let remaining = session.remaining_secs();
                prop_assert!(remaining <= last_remaining);
                if !was_running {
                    prop_assert_eq!(remaining, last_remaining);
                }
                last_remaining = remaining;
            }

            prop_assert!(ended <= 1);
            prop_assert_eq!(ended == 1, session.is_ended());
            let p = session.progress();
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
