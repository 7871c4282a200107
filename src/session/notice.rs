use serde::{Serialize, Serializer};
use std::time::Duration;

/// Tone of an advisory message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeCategory {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeCategory::Info => "info",
            NoticeCategory::Success => "success",
            NoticeCategory::Warning => "warning",
            NoticeCategory::Error => "error",
        }
    }
}

/// Transient message for a popup collaborator.
///
/// Display is best effort; nothing in the session waits on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub text: String,
    pub category: NoticeCategory,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

impl Notice {
    pub fn new(text: impl Into<String>, category: NoticeCategory, duration: Duration) -> Self {
        Self {
            text: text.into(),
            category,
            duration,
        }
    }
}
