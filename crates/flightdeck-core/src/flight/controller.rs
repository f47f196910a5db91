//! Flight controller: drives a [`FlightSession`] and finalizes it.
//!
//! Finalization runs on the session's single transition into `Ended`:
//! the record is appended to the [`FlightLog`], then the [`Navigator`] is
//! told to leave the flight screen. A storage failure is logged and does
//! not stop the navigation.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use super::plan::FlightPlan;
use super::session::FlightSession;
use crate::events::FlightEvent;
use crate::history::{FlightLog, FlightRecord};
use crate::storage::KeyValueStore;

/// The one-shot "leave the flight screen" side effect.
pub trait Navigator {
    fn leave(&mut self, record: &FlightRecord);
}

/// Navigator for callers with nowhere to go.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn leave(&mut self, _record: &FlightRecord) {}
}

/// User input accepted while a flight is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightCommand {
    Pause,
    Resume,
    TogglePause,
    /// End the flight early.
    End,
}

pub struct FlightController<S, N> {
    session: FlightSession,
    log: FlightLog<S>,
    navigator: N,
}

impl<S: KeyValueStore, N: Navigator> FlightController<S, N> {
    /// Tick cadence of [`fly`](Self::fly).
    pub const TICK: Duration = Duration::from_secs(1);

    /// Start a flight. Zero-length plans are finalized before this returns.
    pub fn depart(plan: FlightPlan, store: S, navigator: N) -> (Self, FlightEvent) {
        let (session, event) = FlightSession::depart(plan);
        let mut controller = Self {
            session,
            log: FlightLog::new(store),
            navigator,
        };
        controller.settle(&event);
        (controller, event)
    }

    pub fn session(&self) -> &FlightSession {
        &self.session
    }

    pub fn log(&self) -> &FlightLog<S> {
        &self.log
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn tick(&mut self) -> Option<FlightEvent> {
        let event = self.session.tick();
        self.settle_opt(event)
    }

    pub fn pause(&mut self) -> Option<FlightEvent> {
        self.session.pause()
    }

    pub fn resume(&mut self) -> Option<FlightEvent> {
        self.session.resume()
    }

    pub fn toggle_pause(&mut self) -> Option<FlightEvent> {
        self.session.toggle_pause()
    }

    /// End the flight early.
    pub fn end(&mut self) -> Option<FlightEvent> {
        let event = self.session.abort();
        self.settle_opt(event)
    }

    pub fn apply(&mut self, command: FlightCommand) -> Option<FlightEvent> {
        match command {
            FlightCommand::Pause => self.pause(),
            FlightCommand::Resume => self.resume(),
            FlightCommand::TogglePause => self.toggle_pause(),
            FlightCommand::End => self.end(),
        }
    }

    /// Run the flight until it ends or the command channel closes.
    ///
    /// A one-second interval is armed only while the session is running and
    /// dropped as soon as it isn't. A closed channel means the flight view
    /// went away: the loop returns `None` and nothing is recorded.
    pub async fn fly<F>(
        &mut self,
        mut commands: mpsc::Receiver<FlightCommand>,
        mut on_event: F,
    ) -> Option<FlightRecord>
    where
        F: FnMut(&FlightEvent),
    {
        let mut ticker: Option<Interval> = None;
        loop {
            if self.session.is_ended() {
                return self.session.record();
            }

            match (self.session.is_running(), ticker.is_some()) {
                (true, false) => ticker = Some(arm(Self::TICK)),
                (false, true) => ticker = None,
                _ => {}
            }

            let event = tokio::select! {
                _ = next_tick(&mut ticker) => self.tick(),
                command = commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => {
                        tracing::debug!(
                            remaining_secs = self.session.remaining_secs(),
                            "flight view closed before landing"
                        );
                        return None;
                    }
                },
            };

            if let Some(event) = event {
                on_event(&event);
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn settle_opt(&mut self, event: Option<FlightEvent>) -> Option<FlightEvent> {
        if let Some(event) = &event {
            self.settle(event);
        }
        event
    }

    fn settle(&mut self, event: &FlightEvent) {
        if let FlightEvent::Ended { record } = event {
            self.finalize(record);
        }
    }

    fn finalize(&mut self, record: &FlightRecord) {
        match self.log.append(record) {
            Ok(len) => tracing::info!(
                origin = %record.origin,
                destination = %record.destination,
                status = record.status.as_str(),
                history_len = len,
                "flight saved"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to save flight"),
        }
        self.navigator.leave(record);
    }
}

/// First tick fires one full period after arming.
fn arm(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
