//! Adapter errors and their mapping to JavaScript.

use minigame_core::GameError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while binding the game to the page.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required element is missing from the page.
    #[error("Element not found: {0}")]
    MissingElement(String),

    /// A DOM call threw.
    #[error("DOM error: {0}")]
    Dom(String),

    /// The game rejected a value.
    #[error(transparent)]
    Game(#[from] GameError),

    /// JSON encoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Wrap a thrown JavaScript value.
    #[must_use]
    pub fn dom(value: &JsValue) -> Self {
        Self::Dom(js_message(value))
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text of a thrown JavaScript value.
#[must_use]
pub fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
