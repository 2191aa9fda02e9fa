use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while binding the game to the host page.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no global window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("canvas `{0}` has no 2d context")]
    NoContext(String),
    #[error("element `{0}` is not a {1}")]
    WrongElement(String, &'static str),
    #[error("game already started")]
    AlreadyStarted,
    #[error("game not started")]
    NotStarted,
    #[error("browser call failed: {0}")]
    Js(String),
    #[cfg(feature = "serde_json")]
    #[error("invalid game config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
