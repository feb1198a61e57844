use crate::config::RoomConfig;
use crate::error::{SceneError, SceneResult};
use crate::model::{SceneManifest, SceneModel};

/// Fetch the room manifest over HTTP and build the scene
#[cfg(target_arch = "wasm32")]
pub async fn load_scene(config: &RoomConfig) -> SceneResult<SceneModel> {
    use gloo_net::http::Request;

    let url = config.scene_url.as_str();
    tracing::info!(%url, "loading scene");
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| SceneError::LoadFailure(e.to_string()))?;
    if !resp.ok() {
        return Err(SceneError::LoadFailure(format!("{url}: HTTP {}", resp.status())));
    }
    let text = resp
        .text()
        .await
        .map_err(|e| SceneError::LoadFailure(e.to_string()))?;
    build_scene(&text, config)
}

/// Read the room manifest from disk and build the scene
#[cfg(not(target_arch = "wasm32"))]
pub async fn load_scene(config: &RoomConfig) -> SceneResult<SceneModel> {
    let path = config.scene_url.as_str();
    tracing::info!(%path, "loading scene");
    let text = std::fs::read_to_string(path)
        .map_err(|e| SceneError::LoadFailure(format!("{path}: {e}")))?;
    build_scene(&text, config)
}

pub fn build_scene(text: &str, config: &RoomConfig) -> SceneResult<SceneModel> {
    let manifest = SceneManifest::from_json(text)
        .map_err(|e| SceneError::LoadFailure(format!("bad scene manifest: {e}")))?;
    Ok(SceneModel::from_manifest(manifest, config))
}
