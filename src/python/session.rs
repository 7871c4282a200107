//! Session PyClasses for the Python-Rust boundary

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;

use crate::runtime::{Commands, SimulatedDriver, Update};
use crate::session::{GameSession, Notice, Snapshot};

use super::session_config;

// ============================================================================
// Dict Conversion
// ============================================================================

fn snapshot_to_dict<'py>(py: Python<'py>, snapshot: &Snapshot) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("phase", snapshot.phase.as_str())?;
    dict.set_item("level", snapshot.level)?;
    dict.set_item("max_level", snapshot.max_level)?;
    dict.set_item("score", snapshot.score)?;
    dict.set_item("time_left", snapshot.time_left)?;
    dict.set_item("wrong_attempts", snapshot.wrong_attempts)?;
    dict.set_item("max_wrong_attempts", snapshot.max_wrong_attempts)?;
    dict.set_item("memory_numbers", PyList::new(py, &snapshot.memory_numbers)?)?;
    dict.set_item("test_numbers", PyList::new(py, &snapshot.test_numbers)?)?;

    let selections = PyList::empty(py);
    for selection in &snapshot.selections {
        let item = PyDict::new(py);
        item.set_item("number", selection.number)?;
        item.set_item("correct", selection.correct)?;
        selections.append(item)?;
    }
    dict.set_item("selections", selections)?;
    dict.set_item("iq_score", snapshot.iq_score)?;
    dict.set_item("awaiting_transition", snapshot.awaiting_transition)?;
    Ok(dict)
}

fn notice_to_dict<'py>(py: Python<'py>, notice: &Notice) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("text", &notice.text)?;
    dict.set_item("category", notice.category.as_str())?;
    dict.set_item("duration_ms", notice.duration.as_millis() as u64)?;
    Ok(dict)
}

// ============================================================================
// Session PyClass
// ============================================================================

/// Session on a caller-driven clock
///
/// The front-end calls `advance(ms)` from its frame loop; timers fire
/// inside that call.
#[pyclass]
pub struct Session {
    driver: SimulatedDriver,
}

#[pymethods]
impl Session {
    #[new]
    #[pyo3(signature = (seed=None))]
    fn py_new(seed: Option<u64>) -> PyResult<Self> {
        let session = GameSession::new(session_config(seed))?;
        Ok(Self {
            driver: SimulatedDriver::new(session),
        })
    }

    // ------------------------------------------------------------------------
    // Getter Properties
    // ------------------------------------------------------------------------

    #[getter]
    fn phase(&self) -> &'static str {
        self.driver.session().phase().as_str()
    }

    #[getter]
    fn level(&self) -> u32 {
        self.driver.session().state().level
    }

    #[getter]
    fn score(&self) -> u32 {
        self.driver.session().state().score
    }

    #[getter]
    fn time_left(&self) -> u32 {
        self.driver.session().state().time_left
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    fn start_game(&mut self) {
        self.driver.start_game();
    }

    fn reset_game(&mut self) {
        self.driver.reset_game();
    }

    fn select_number(&mut self, number: u32) {
        self.driver.select_number(number);
    }

    /// Move the session clock forward by `ms` milliseconds
    fn advance(&mut self, ms: u64) {
        self.driver.advance(Duration::from_millis(ms));
    }

    // ------------------------------------------------------------------------
    // State Access
    // ------------------------------------------------------------------------

    fn snapshot(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        Ok(snapshot_to_dict(py, &self.driver.snapshot())?.into_any().unbind())
    }

    /// Notices since the last call, oldest first
    fn drain_notices(&mut self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let list = PyList::empty(py);
        for notice in self.driver.drain_notices() {
            list.append(notice_to_dict(py, &notice)?)?;
        }
        Ok(list.into_any().unbind())
    }
}

// ============================================================================
// LiveSession PyClass
// ============================================================================

/// Session running in real time on the tokio runtime
///
/// Commands return immediately; `await session.next_update()` yields
/// `{"kind": "snapshot" | "notice", ...}` dicts, or `None` once closed.
#[pyclass]
pub struct LiveSession {
    commands: Commands,
    updates: Arc<Mutex<UnboundedReceiver<Update>>>,
}

impl LiveSession {
    pub(crate) fn new(commands: Commands, updates: UnboundedReceiver<Update>) -> Self {
        Self {
            commands,
            updates: Arc::new(Mutex::new(updates)),
        }
    }
}

#[pymethods]
impl LiveSession {
    fn start_game(&self) -> PyResult<()> {
        Ok(self.commands.start_game()?)
    }

    fn reset_game(&self) -> PyResult<()> {
        Ok(self.commands.reset_game()?)
    }

    fn select_number(&self, number: u32) -> PyResult<()> {
        Ok(self.commands.select_number(number)?)
    }

    fn close(&self) -> PyResult<()> {
        Ok(self.commands.shutdown()?)
    }

    fn next_update<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        let updates = self.updates.clone();
        pyo3_async_runtimes::tokio::future_into_py(py, async move {
            let update = updates.lock().await.recv().await;
            Python::attach(|py| -> PyResult<Py<PyAny>> {
                let dict = match update {
                    Some(Update::Snapshot(snapshot)) => {
                        let dict = snapshot_to_dict(py, &snapshot)?;
                        dict.set_item("kind", "snapshot")?;
                        dict
                    }
                    Some(Update::Notice(notice)) => {
                        let dict = notice_to_dict(py, &notice)?;
                        dict.set_item("kind", "notice")?;
                        dict
                    }
                    None => return Ok(py.None()),
                };
                Ok(dict.into_any().unbind())
            })
        })
    }
}
