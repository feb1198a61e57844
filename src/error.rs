use thiserror::Error;

pub type SceneResult<T> = Result<T, SceneError>;

/// Failures of the interaction layer. None of them end the session.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A named node the room expects is not in the loaded scene
    #[error("scene node missing: {0}")]
    AssetMissing(String),

    #[error("scene load failed: {0}")]
    LoadFailure(String),

    /// The browser refused to start background audio
    #[error("playback blocked: {0}")]
    PlaybackBlocked(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<SceneError> for wasm_bindgen::JsValue {
    fn from(err: SceneError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
