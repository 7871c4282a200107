//! Session state machine
//!
//! `GameSession` owns the state, the number pool and both timers. Every
//! command returns the effects it produced; a driver turns those into real
//! or simulated timer events and feeds them back with their tokens.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use std::time::Duration;

use crate::config::GameConfig;
use crate::error::Result;
use crate::pool::{build_test_set, generate_pool, sample_memory_set, NumberPool};
use crate::scoring::{estimate_iq, level_points};
use crate::timer::{Countdown, CountdownStep, Delay, TimerToken};

use super::{Notice, NoticeCategory, Phase, SessionState, Snapshot};

/// Countdown granularity
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Events a session consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    StartGame,
    ResetGame,
    Select(u32),
    /// One second of the countdown elapsed
    Tick(TimerToken),
    /// The transition delay fired
    DelayElapsed(TimerToken),
}

/// What a driver must do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Input::Tick(token)` every `period`, replacing any ticker
    StartTicker { token: TimerToken, period: Duration },
    StopTicker,
    /// Deliver `Input::DelayElapsed(token)` once after `after`
    ScheduleDelay { token: TimerToken, after: Duration },
    CancelDelay,
    Notify(Notice),
}

pub type Effects = SmallVec<[Effect; 4]>;

/// Action held by the transition delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Failed run: back to level 1
    ResetToReady,
    NextLevel,
    Finish,
}

#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    pool: NumberPool,
    state: SessionState,
    countdown: Countdown,
    delay: Delay<Transition>,
    rng: StdRng,
}

impl GameSession {
    /// Validate `config` and build a session in `Ready`
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pool = generate_pool(config.pool_size);
        let state = SessionState::new(&config);
        Ok(Self {
            config,
            pool,
            state,
            countdown: Countdown::new(),
            delay: Delay::new(),
            rng,
        })
    }

    pub fn handle(&mut self, input: Input) -> Effects {
        match input {
            Input::StartGame => self.start_game(),
            Input::ResetGame => self.reset_game(),
            Input::Select(number) => self.select_number(number),
            Input::Tick(token) => self.on_tick(token),
            Input::DelayElapsed(token) => self.on_delay(token),
        }
    }

    /// Begin level 1. Ignored outside `Ready`.
    pub fn start_game(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.state.phase != Phase::Ready {
            debug!("start ignored in {} phase", self.state.phase);
            return effects;
        }
        self.begin_level(1, &mut effects);
        effects
    }

    /// Cancel all timers and return to a fresh `Ready` state
    pub fn reset_game(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.reset_into(&mut effects);
        effects
    }

    /// Player clicked `number` on the recall board
    pub fn select_number(&mut self, number: u32) -> Effects {
        let mut effects = Effects::new();
        if self.state.phase != Phase::Test {
            debug!("selection {} ignored in {} phase", number, self.state.phase);
            return effects;
        }
        if self.delay.is_pending() {
            debug!("selection {} ignored while a transition is pending", number);
            return effects;
        }
        if !self.state.test.contains(number) {
            debug!("selection {} is not on the board", number);
            return effects;
        }
        if !self.state.selections.insert(number) {
            trace!("selection {} repeated", number);
            return effects;
        }

        if !self.state.memory.contains(number) {
            self.state.wrong_attempts += 1;
            let wrong = self.state.wrong_attempts;
            let max = self.config.max_wrong_attempts;
            debug!("wrong pick {} ({}/{})", number, wrong, max);
            if wrong >= max {
                self.schedule_failure(
                    "Oops! Too many wrong attempts. Try again!",
                    NoticeCategory::Error,
                    &mut effects,
                );
            } else {
                effects.push(self.notify(
                    format!("Careful! {} attempts left", max - wrong),
                    NoticeCategory::Warning,
                ));
            }
            return effects;
        }

        if self.state.selections.covers(&self.state.memory) {
            self.complete_level(&mut effects);
        } else {
            effects.push(self.notify("Correct! Keep going!", NoticeCategory::Success));
        }
        effects
    }

    /// One second of the phase countdown elapsed
    pub fn on_tick(&mut self, token: TimerToken) -> Effects {
        let mut effects = Effects::new();
        match self.countdown.tick(token) {
            CountdownStep::Stale => trace!("stale tick {:?}", token),
            CountdownStep::Running(left) => self.state.time_left = left,
            CountdownStep::Expired => {
                self.state.time_left = 0;
                effects.push(Effect::StopTicker);
                match self.state.phase {
                    Phase::Memorize => self.begin_recall(&mut effects),
                    Phase::Test => self.recall_expired(&mut effects),
                    phase => debug!("countdown expired in {} phase", phase),
                }
            }
        }
        effects
    }

    /// The transition delay fired
    pub fn on_delay(&mut self, token: TimerToken) -> Effects {
        let mut effects = Effects::new();
        let Some(transition) = self.delay.fire(token) else {
            trace!("stale delay {:?}", token);
            return effects;
        };
        match transition {
            Transition::ResetToReady => self.reset_into(&mut effects),
            Transition::NextLevel if self.state.level < self.config.max_level => {
                self.begin_level(self.state.level + 1, &mut effects)
            }
            Transition::NextLevel | Transition::Finish => self.finish(&mut effects),
        }
        effects
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.config, self.delay.is_pending())
    }

    #[inline]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn pool(&self) -> &NumberPool {
        &self.pool
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Token the next countdown tick must carry
    #[inline]
    pub fn countdown_token(&self) -> Option<TimerToken> {
        self.countdown.token()
    }

    /// Token and action of the pending delay
    pub fn pending_transition(&self) -> Option<(TimerToken, Transition)> {
        self.delay.token().zip(self.delay.pending().copied())
    }
}

// ============================================================================
// Transitions
// ============================================================================

impl GameSession {
    fn notify(&self, text: impl Into<String>, category: NoticeCategory) -> Effect {
        Effect::Notify(Notice::new(text, category, self.config.notice_duration()))
    }

    fn reset_into(&mut self, effects: &mut Effects) {
        self.countdown.cancel();
        self.delay.cancel();
        effects.push(Effect::StopTicker);
        effects.push(Effect::CancelDelay);
        self.state = SessionState::new(&self.config);
        info!("session reset");
        effects.push(self.notify("Ready for a new challenge? Let's go!", NoticeCategory::Info));
    }

    fn begin_level(&mut self, level: u32, effects: &mut Effects) {
        self.delay.cancel();
        let count = self.config.memory_count(level);
        self.state.level = level;
        self.state.phase = Phase::Memorize;
        self.state.wrong_attempts = 0;
        self.state.selections.clear();
        self.state.test = Default::default();
        self.state.memory = sample_memory_set(&self.pool, count, &mut self.rng);

        let seconds = self.config.memorize_seconds;
        let token = self.countdown.start(seconds);
        self.state.time_left = seconds;
        info!("level {}: memorize {} numbers", level, self.state.memory.len());

        effects.push(Effect::StartTicker {
            token,
            period: TICK_PERIOD,
        });
        effects.push(self.notify(
            format!("Level {}: Memorize {} numbers!", level, self.state.memory.len()),
            NoticeCategory::Info,
        ));
    }

    fn begin_recall(&mut self, effects: &mut Effects) {
        let level = self.state.level;
        let options = self.config.options_count(level);
        self.state.test = build_test_set(&self.state.memory, &self.pool, options, &mut self.rng);
        self.state.selections.clear();
        self.state.phase = Phase::Test;

        let seconds = self.config.recall_seconds(level);
        let token = self.countdown.start(seconds);
        self.state.time_left = seconds;
        info!(
            "level {}: recall {} of {} options in {}s",
            level,
            self.state.memory.len(),
            self.state.test.len(),
            seconds
        );

        effects.push(Effect::StartTicker {
            token,
            period: TICK_PERIOD,
        });
        effects.push(self.notify(
            format!("Now select the {} numbers you memorized!", self.state.memory.len()),
            NoticeCategory::Info,
        ));
    }

    fn recall_expired(&mut self, effects: &mut Effects) {
        if self.state.selections.covers(&self.state.memory) {
            self.complete_level(effects);
        } else {
            info!("level {}: recall time ran out", self.state.level);
            self.schedule_failure("Almost there! Try again!", NoticeCategory::Warning, effects);
        }
    }

    fn schedule_failure(&mut self, text: &str, category: NoticeCategory, effects: &mut Effects) {
        self.countdown.cancel();
        effects.push(Effect::StopTicker);
        effects.push(self.notify(text, category));
        self.schedule(Transition::ResetToReady, effects);
    }

    fn complete_level(&mut self, effects: &mut Effects) {
        self.countdown.cancel();
        effects.push(Effect::StopTicker);

        let level = self.state.level;
        self.state.score = self.state.score.saturating_add(level_points(level));
        let iq = estimate_iq(level, self.state.score, &mut self.rng);
        self.state.iq_score = Some(iq);
        self.state.phase = Phase::LevelComplete;
        info!(
            "level {} complete: score {}, memory iq {}",
            level, self.state.score, iq
        );

        if level >= self.config.max_level {
            effects.push(self.notify("Perfect! You've completed the game!", NoticeCategory::Success));
            self.schedule(Transition::Finish, effects);
        } else {
            effects.push(self.notify(
                format!("Great job! Level {} complete!", level),
                NoticeCategory::Success,
            ));
            self.schedule(Transition::NextLevel, effects);
        }
    }

    fn finish(&mut self, effects: &mut Effects) {
        self.countdown.cancel();
        self.delay.cancel();
        self.state.phase = Phase::Complete;
        info!("game complete: score {}", self.state.score);
        effects.push(self.notify(
            "Congratulations! You've mastered all levels!",
            NoticeCategory::Success,
        ));
    }

    fn schedule(&mut self, transition: Transition, effects: &mut Effects) {
        let token = self.delay.schedule(transition);
        effects.push(Effect::ScheduleDelay {
            token,
            after: self.config.transition_delay(),
        });
    }
}
