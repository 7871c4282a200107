//! Deterministic driver over virtual time

use std::time::Duration;

use crate::session::{Effect, Effects, GameSession, Input, Notice, Snapshot};
use crate::timer::TimerToken;

#[derive(Debug, Clone, Copy)]
struct Ticker {
    token: TimerToken,
    due: Duration,
    period: Duration,
}

/// Runs a session against a virtual clock that only moves on `advance`.
///
/// Hosts with their own frame loop (tests, the Python binding) call
/// `advance` with the elapsed time; every tick or delay that falls due in
/// that window is delivered in deadline order.
#[derive(Debug)]
pub struct SimulatedDriver {
    session: GameSession,
    now: Duration,
    ticker: Option<Ticker>,
    delay: Option<(TimerToken, Duration)>,
    notices: Vec<Notice>,
}

impl SimulatedDriver {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            now: Duration::ZERO,
            ticker: None,
            delay: None,
            notices: Vec::new(),
        }
    }

    pub fn send(&mut self, input: Input) {
        let effects = self.session.handle(input);
        self.apply(effects);
    }

    pub fn start_game(&mut self) {
        self.send(Input::StartGame);
    }

    pub fn reset_game(&mut self) {
        self.send(Input::ResetGame);
    }

    pub fn select_number(&mut self, number: u32) {
        self.send(Input::Select(number));
    }

    /// Move the clock forward, firing whatever falls due
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;
        loop {
            let tick = self.ticker.filter(|t| t.due <= target);
            let delay = self.delay.filter(|(_, due)| *due <= target);
            let input = match (tick, delay) {
                (None, None) => break,
                (Some(ticker), Some((_, due))) if ticker.due < due => self.fire_tick(ticker),
                (_, Some((token, due))) => {
                    self.now = due;
                    self.delay = None;
                    Input::DelayElapsed(token)
                }
                (Some(ticker), None) => self.fire_tick(ticker),
            };
            self.send(input);
        }
        self.now = target;
    }

    fn fire_tick(&mut self, ticker: Ticker) -> Input {
        self.now = ticker.due;
        self.ticker = Some(Ticker {
            due: ticker.due + ticker.period,
            ..ticker
        });
        Input::Tick(ticker.token)
    }

    fn apply(&mut self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::StartTicker { token, period } => {
                    self.ticker = Some(Ticker {
                        token,
                        due: self.now + period,
                        period,
                    })
                }
                Effect::StopTicker => self.ticker = None,
                Effect::ScheduleDelay { token, after } => self.delay = Some((token, self.now + after)),
                Effect::CancelDelay => self.delay = None,
                Effect::Notify(notice) => self.notices.push(notice),
            }
        }
    }

    /// Virtual time since the driver was created
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[inline]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Notices emitted since the last drain, oldest first
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }
}
