//! Configuration module for game tuning
//!
//! Configuration is read from JSON documents, or from Python dicts when the
//! `python` feature is enabled.

mod game;

#[cfg(test)]
mod property_tests;

pub use game::*;

#[cfg(feature = "python")]
pub use python::deserialize_game_config;

#[cfg(feature = "python")]
mod python {
    use super::GameConfig;
    use pyo3::types::{PyAnyMethods, PyDict, PyDictMethods};
    use pyo3::Bound;

    /// Helper to get optional attribute from either dict or object
    fn get_attr_opt<'py>(
        obj: &Bound<'py, pyo3::PyAny>,
        name: &str,
    ) -> Option<Bound<'py, pyo3::PyAny>> {
        if let Ok(dict) = obj.downcast::<PyDict>() {
            dict.get_item(name).ok().flatten()
        } else {
            obj.getattr(name).ok()
        }
    }

    macro_rules! override_field {
        ($obj:expr, $config:ident . $field:ident) => {
            if let Some(value) = get_attr_opt($obj, stringify!($field)) {
                if !value.is_none() {
                    $config.$field = value.extract()?;
                }
            }
        };
    }

    /// Deserialize a game config from a Python dict or object.
    /// Missing keys keep their defaults.
    pub fn deserialize_game_config(obj: &Bound<'_, pyo3::PyAny>) -> pyo3::PyResult<GameConfig> {
        let mut config = GameConfig::default();
        override_field!(obj, config.pool_size);
        override_field!(obj, config.max_level);
        override_field!(obj, config.base_memory_count);
        override_field!(obj, config.memory_increment);
        override_field!(obj, config.base_options);
        override_field!(obj, config.options_increment);
        override_field!(obj, config.max_wrong_attempts);
        override_field!(obj, config.memorize_seconds);
        override_field!(obj, config.recall_seconds_per_level);
        override_field!(obj, config.transition_delay_ms);
        override_field!(obj, config.notice_duration_ms);
        override_field!(obj, config.seed);
        config.validate()?;
        Ok(config)
    }
}
