use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures surfaced to the host page. Taps outside a running session are not
/// errors; they are ignored by the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DanceError {
    #[error("unknown difficulty '{0}' (expected easy, medium, hard or expert)")]
    UnknownDifficulty(String),
    #[error("difficulty can only change between sessions")]
    SessionInProgress,
    #[error("unknown share target '{0}' (expected twitter, download or copy)")]
    UnknownShareTarget(String),
    #[error("invalid rules: {0}")]
    InvalidRules(String),
}

impl From<DanceError> for JsValue {
    fn from(err: DanceError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
