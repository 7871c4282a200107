use log::{debug, info};
use tokio::sync::mpsc::*;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};

use crate::error::{RecallError, Result};
use crate::session::{Effect, Effects, GameSession, Input, Notice, Snapshot};
use crate::timer::TimerToken;

/// Commands a collaborator can send to a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartGame,
    ResetGame,
    Select(u32),
    Shutdown,
}

/// Published after every event that reaches the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Notice(Notice),
    Snapshot(Snapshot),
}

/// Cloneable command side of a live session
#[derive(Debug, Clone)]
pub struct Commands {
    tx: UnboundedSender<Command>,
}

impl Commands {
    pub fn send(&self, command: Command) -> Result<()> {
        self.tx.send(command).map_err(|_| RecallError::SessionClosed)
    }

    pub fn start_game(&self) -> Result<()> {
        self.send(Command::StartGame)
    }

    pub fn reset_game(&self) -> Result<()> {
        self.send(Command::ResetGame)
    }

    pub fn select_number(&self, number: u32) -> Result<()> {
        self.send(Command::Select(number))
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }
}

/// Handle to a session running on its own task
#[derive(Debug)]
pub struct SessionHandle {
    commands: Commands,
    updates: UnboundedReceiver<Update>,
    task: JoinHandle<GameSession>,
}

impl SessionHandle {
    #[inline]
    pub fn commands(&self) -> &Commands {
        &self.commands
    }

    /// Next update, or `None` once the session task has ended
    pub async fn next_update(&mut self) -> Option<Update> {
        self.updates.recv().await
    }

    /// Stop the task and take the session back
    pub async fn shutdown(self) -> Result<GameSession> {
        let _ = self.commands.shutdown();
        self.task.await.map_err(|_| RecallError::SessionClosed)
    }

    /// Split into the command side and the update stream
    pub fn into_parts(self) -> (Commands, UnboundedReceiver<Update>) {
        (self.commands, self.updates)
    }
}

/// Owns one session in wall-clock time.
///
/// A single task holds the session, so commands and timer events are
/// handled one at a time and never race. Timers are just deadlines in this
/// task; stopping one means forgetting its deadline.
pub struct SessionRunner {
    session: GameSession,
    commands: UnboundedReceiver<Command>,
    updates: UnboundedSender<Update>,
    ticker: Option<(TimerToken, Instant, Duration)>,
    delay: Option<(TimerToken, Instant)>,
    last: Option<Snapshot>,
}

impl SessionRunner {
    /// Spawn `session` onto the current tokio runtime
    pub fn spawn(session: GameSession) -> SessionHandle {
        let (command_tx, command_rx) = unbounded_channel();
        let (update_tx, update_rx) = unbounded_channel();
        let runner = Self {
            session,
            commands: command_rx,
            updates: update_tx,
            ticker: None,
            delay: None,
            last: None,
        };
        SessionHandle {
            commands: Commands { tx: command_tx },
            updates: update_rx,
            task: tokio::spawn(runner.run()),
        }
    }

    async fn run(mut self) -> GameSession {
        info!("session runner started");
        self.publish();
        loop {
            let idle = Instant::now() + Duration::from_secs(86_400);
            let tick_at = self.ticker.map(|(_, at, _)| at).unwrap_or(idle);
            let delay_at = self.delay.map(|(_, at)| at).unwrap_or(idle);
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::StartGame) => self.dispatch(Input::StartGame),
                    Some(Command::ResetGame) => self.dispatch(Input::ResetGame),
                    Some(Command::Select(number)) => self.dispatch(Input::Select(number)),
                    Some(Command::Shutdown) | None => break,
                },
                _ = sleep_until(tick_at), if self.ticker.is_some() => {
                    if let Some((token, at, period)) = self.ticker {
                        self.ticker = Some((token, at + period, period));
                        self.dispatch(Input::Tick(token));
                    }
                },
                _ = sleep_until(delay_at), if self.delay.is_some() => {
                    if let Some((token, _)) = self.delay.take() {
                        self.dispatch(Input::DelayElapsed(token));
                    }
                },
            }
        }
        self.ticker = None;
        self.delay = None;
        info!("session runner stopped");
        self.session
    }

    fn dispatch(&mut self, input: Input) {
        let effects = self.session.handle(input);
        self.apply(effects);
        self.publish();
    }

    fn apply(&mut self, effects: Effects) {
        let now = Instant::now();
        for effect in effects {
            match effect {
                Effect::StartTicker { token, period } => {
                    self.ticker = Some((token, now + period, period))
                }
                Effect::StopTicker => self.ticker = None,
                Effect::ScheduleDelay { token, after } => self.delay = Some((token, now + after)),
                Effect::CancelDelay => self.delay = None,
                Effect::Notify(notice) => {
                    // Nobody listening is fine
                    let _ = self.updates.send(Update::Notice(notice));
                }
            }
        }
    }

    /// Send a snapshot if anything visible changed
    fn publish(&mut self) {
        let snapshot = self.session.snapshot();
        if self.last.as_ref() == Some(&snapshot) {
            return;
        }
        debug!(
            "{} level {} score {} time {}s",
            snapshot.phase, snapshot.level, snapshot.score, snapshot.time_left
        );
        let _ = self.updates.send(Update::Snapshot(snapshot.clone()));
        self.last = Some(snapshot);
    }
}
