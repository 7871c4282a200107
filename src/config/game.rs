use crate::error::{RecallError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunable constants for a game session.
///
/// Every field has a default matching the classic game, so a partial JSON
/// document only needs to name the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pool holds the numbers `1..=pool_size`
    pub pool_size: u32,
    /// Last playable level
    pub max_level: u32,
    /// Memory set size at level 1
    pub base_memory_count: usize,
    /// Extra memory numbers per level
    pub memory_increment: usize,
    /// Recall options shown at level 1
    pub base_options: usize,
    /// Extra recall options per level
    pub options_increment: usize,
    /// Wrong picks that end the run
    pub max_wrong_attempts: u32,
    /// Length of the memorize window
    pub memorize_seconds: u32,
    /// Recall window is this many seconds times the level
    pub recall_seconds_per_level: u32,
    /// Pause before a level transition or failure reset
    pub transition_delay_ms: u64,
    /// How long a collaborator should keep a notice on screen
    pub notice_duration_ms: u64,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pool_size: 100,
            max_level: 10,
            base_memory_count: 5,
            memory_increment: 2,
            base_options: 20,
            options_increment: 5,
            max_wrong_attempts: 3,
            memorize_seconds: 20,
            recall_seconds_per_level: 20,
            transition_delay_ms: 1000,
            notice_duration_ms: 2000,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check that every level is playable with these numbers
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(RecallError::InvalidConfig("pool_size must be positive".into()));
        }
        if self.max_level == 0 {
            return Err(RecallError::InvalidConfig("max_level must be positive".into()));
        }
        if self.base_memory_count == 0 {
            return Err(RecallError::InvalidConfig(
                "base_memory_count must be positive".into(),
            ));
        }
        if self.max_wrong_attempts == 0 {
            return Err(RecallError::InvalidConfig(
                "max_wrong_attempts must be positive".into(),
            ));
        }
        if self.memorize_seconds == 0 || self.recall_seconds_per_level == 0 {
            return Err(RecallError::InvalidConfig(
                "phase timers must be at least one second".into(),
            ));
        }
        for level in 1..=self.max_level {
            let memory = self.memory_count(level);
            let options = self.options_count(level);
            if options < memory {
                return Err(RecallError::InvalidConfig(format!(
                    "level {} shows {} options for {} memory numbers",
                    level, options, memory
                )));
            }
        }
        Ok(())
    }

    /// Memory set size for a level, `5 + 2 × (level − 1)` by default
    #[inline]
    pub fn memory_count(&self, level: u32) -> usize {
        let steps = level.saturating_sub(1) as usize;
        self.base_memory_count
            .saturating_add(steps.saturating_mul(self.memory_increment))
    }

    /// Recall option count for a level, `20 + 5 × (level − 1)` by default
    #[inline]
    pub fn options_count(&self, level: u32) -> usize {
        let steps = level.saturating_sub(1) as usize;
        self.base_options
            .saturating_add(steps.saturating_mul(self.options_increment))
    }

    #[inline]
    pub fn recall_seconds(&self, level: u32) -> u32 {
        self.recall_seconds_per_level.saturating_mul(level.max(1))
    }

    #[inline]
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    #[inline]
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }
}
