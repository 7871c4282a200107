//! Session state and the snapshot handed to collaborators

use ahash::AHashSet;
use serde::Serialize;
use std::fmt;

use crate::config::GameConfig;
use crate::pool::{MemorySet, TestSet};

/// Current mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Ready,
    Memorize,
    Test,
    LevelComplete,
    Complete,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Memorize => "memorize",
            Phase::Test => "test",
            Phase::LevelComplete => "level_complete",
            Phase::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numbers picked during recall, in click order, without repeats
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    order: Vec<u32>,
    seen: AHashSet<u32>,
}

impl SelectionSet {
    /// Record a pick; false if it was already picked
    pub fn insert(&mut self, number: u32) -> bool {
        if !self.seen.insert(number) {
            return false;
        }
        self.order.push(number);
        true
    }

    #[inline]
    pub fn contains(&self, number: u32) -> bool {
        self.seen.contains(&number)
    }

    /// True once every memory number has been picked
    pub fn covers(&self, memory: &MemorySet) -> bool {
        memory.values().iter().all(|n| self.seen.contains(n))
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }

    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Authoritative state of one session. Only the state machine mutates it.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub level: u32,
    pub score: u32,
    pub phase: Phase,
    pub wrong_attempts: u32,
    pub time_left: u32,
    pub iq_score: Option<u32>,
    pub memory: MemorySet,
    pub test: TestSet,
    pub selections: SelectionSet,
}

impl SessionState {
    /// Fresh state in `Ready`
    pub fn new(config: &GameConfig) -> Self {
        Self {
            level: 1,
            score: 0,
            phase: Phase::Ready,
            wrong_attempts: 0,
            time_left: config.memorize_seconds,
            iq_score: None,
            memory: MemorySet::default(),
            test: TestSet::default(),
            selections: SelectionSet::default(),
        }
    }
}

/// A recall pick as shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub number: u32,
    pub correct: bool,
}

/// Read-only view of a session for rendering.
///
/// `memory_numbers` is filled only while memorizing; `test_numbers` and
/// `selections` only during recall and the level-complete pause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub level: u32,
    pub max_level: u32,
    pub score: u32,
    pub time_left: u32,
    pub wrong_attempts: u32,
    pub max_wrong_attempts: u32,
    pub memory_numbers: Vec<u32>,
    pub test_numbers: Vec<u32>,
    pub selections: Vec<Selection>,
    pub iq_score: Option<u32>,
    /// A delayed transition is pending; input is ignored until it fires
    pub awaiting_transition: bool,
}

impl Snapshot {
    pub(crate) fn capture(state: &SessionState, config: &GameConfig, awaiting: bool) -> Self {
        let memory_numbers = if state.phase == Phase::Memorize {
            state.memory.values().to_vec()
        } else {
            Vec::new()
        };
        let recall_visible = matches!(state.phase, Phase::Test | Phase::LevelComplete);
        let (test_numbers, selections) = if recall_visible {
            (
                state.test.values().to_vec(),
                state
                    .selections
                    .values()
                    .iter()
                    .map(|&number| Selection {
                        number,
                        correct: state.memory.contains(number),
                    })
                    .collect(),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        Self {
            phase: state.phase,
            level: state.level,
            max_level: config.max_level,
            score: state.score,
            time_left: state.time_left,
            wrong_attempts: state.wrong_attempts,
            max_wrong_attempts: config.max_wrong_attempts,
            memory_numbers,
            test_numbers,
            selections,
            iq_score: state.iq_score,
            awaiting_transition: awaiting,
        }
    }
}
