//! Python bindings via PyO3
//!
//! A Python front-end renders snapshots and forwards clicks. `Session`
//! runs on a virtual clock the caller advances from its own frame loop;
//! `spawn_session` runs in wall-clock time on the shared tokio runtime and
//! hands back an awaitable update stream.

mod session;

pub use session::*;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use pyo3::prelude::*;
use std::sync::Arc;

use crate::config::{deserialize_game_config, GameConfig};
use crate::runtime::SessionRunner;
use crate::session::GameSession;

// ============================================================================
// Cached Configuration
// ============================================================================

/// Global cached configuration
static CACHED_CONFIG: OnceCell<Arc<RwLock<GameConfig>>> = OnceCell::new();

/// Cached config, or defaults, with an optional seed override
fn session_config(seed: Option<u64>) -> GameConfig {
    let mut config = CACHED_CONFIG
        .get()
        .map(|cached| cached.read().clone())
        .unwrap_or_default();
    if seed.is_some() {
        config.seed = seed;
    }
    config
}

// ============================================================================
// Python Functions
// ============================================================================

/// Set the game configuration used by new sessions
///
/// # Arguments
/// * `config` - Dict (or object) with any subset of the config fields;
///   `None` restores the defaults
///
/// # Raises
/// ValueError if the config is malformed or leaves a level unplayable
#[pyfunction]
#[pyo3(signature = (config=None))]
fn init_config(config: Option<&Bound<'_, PyAny>>) -> PyResult<()> {
    let parsed = match config {
        Some(obj) => deserialize_game_config(obj)?,
        None => GameConfig::default(),
    };

    // If already initialized, update the config
    if let Some(existing) = CACHED_CONFIG.get() {
        *existing.write() = parsed;
    } else {
        let _ = CACHED_CONFIG.set(Arc::new(RwLock::new(parsed)));
    }
    Ok(())
}

/// Check if config is initialized
#[pyfunction]
fn is_config_initialized() -> bool {
    CACHED_CONFIG.get().is_some()
}

/// Start a session that runs in real time
///
/// # Returns
/// A LiveSession whose `next_update()` is awaitable
#[pyfunction]
#[pyo3(signature = (seed=None))]
fn spawn_session(seed: Option<u64>) -> PyResult<LiveSession> {
    let session = GameSession::new(session_config(seed))?;
    let _guard = pyo3_async_runtimes::tokio::get_runtime().enter();
    let (commands, updates) = SessionRunner::spawn(session).into_parts();
    Ok(LiveSession::new(commands, updates))
}

// ============================================================================
// Python Module Definition
// ============================================================================

#[pymodule]
fn number_recall_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(is_config_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(spawn_session, m)?)?;
    m.add_class::<Session>()?;
    m.add_class::<LiveSession>()?;
    Ok(())
}
