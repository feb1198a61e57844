use std::collections::HashMap;

use crate::config::RoomConfig;
use crate::model::hotspot::names;
use crate::model::{Camera, Hotspot, HotspotKind, LinkTarget, Pose, SceneModel};
use crate::utils::Viewport;

use super::input::TargetPath;

/// What a resolved hotspot asks the app to do
#[derive(Debug, Clone, PartialEq)]
pub enum HotspotAction {
    OpenUrl { url: String, target: LinkTarget },
    ToggleTheme,
    Focus(Pose),
}

/// Maps clicks on the canvas to named hotspots
#[derive(Debug, Default)]
pub struct HotspotRouter {
    hotspots: HashMap<String, Hotspot>,
    exempt: Vec<String>,
}

impl HotspotRouter {
    /// Build the name lookup once from the loaded scene
    pub fn from_scene(scene: &SceneModel, config: &RoomConfig) -> Self {
        let mut hotspots = HashMap::new();
        for node in scene.nodes() {
            let name = node.name.as_str();
            let hotspot = if name == names::SWITCH || name == names::SWITCH_BOARD {
                Hotspot::theme_toggle(name)
            } else if name == names::PROJECT || names::is_social(name) {
                // Per-node URLs are filled in at resolve time
                Hotspot::link(name, None)
            } else if let Some(pose) = config.focus_overrides.get(name).copied().or(node.focus) {
                Hotspot::focus(name, pose)
            } else {
                continue;
            };
            hotspots.insert(name.to_string(), hotspot);
        }
        tracing::debug!(count = hotspots.len(), "hotspots registered");
        Self { hotspots, exempt: config.exempt_selectors.clone() }
    }

    pub fn hotspot(&self, name: &str) -> Option<&Hotspot> {
        self.hotspots.get(name)
    }

    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }

    /// Every hotspot under the click, nearest first. Empty if the click came
    /// from exempt overlay UI.
    pub fn resolve_all(
        &self,
        x: f32,
        y: f32,
        target: &TargetPath,
        viewport: Viewport,
        camera: &Camera,
        scene: &SceneModel,
    ) -> Vec<Hotspot> {
        if target.is_within_any(&self.exempt) {
            tracing::trace!("click on exempt overlay ignored");
            return Vec::new();
        }
        if self.hotspots.is_empty() {
            return Vec::new();
        }

        let ray = camera.screen_ray(x, y, viewport);
        scene
            .intersect(&ray)
            .into_iter()
            .filter_map(|hit| {
                let node = &scene.nodes()[hit.node];
                let mut hotspot = self.hotspots.get(&node.name)?.clone();
                if hotspot.kind == HotspotKind::ExternalLink {
                    hotspot.target_url = node.url.clone();
                }
                Some(hotspot)
            })
            .collect()
    }

    /// Nearest hotspot under the click
    pub fn resolve(
        &self,
        x: f32,
        y: f32,
        target: &TargetPath,
        viewport: Viewport,
        camera: &Camera,
        scene: &SceneModel,
    ) -> Option<Hotspot> {
        self.resolve_all(x, y, target, viewport, camera, scene).into_iter().next()
    }

    /// Actions for every hotspot along the ray, not just the nearest one
    pub fn route(
        &self,
        x: f32,
        y: f32,
        target: &TargetPath,
        viewport: Viewport,
        camera: &Camera,
        scene: &SceneModel,
    ) -> Vec<HotspotAction> {
        self.resolve_all(x, y, target, viewport, camera, scene)
            .iter()
            .filter_map(action_for)
            .collect()
    }
}

fn action_for(hotspot: &Hotspot) -> Option<HotspotAction> {
    match hotspot.kind {
        HotspotKind::ExternalLink => {
            let url = hotspot.target_url.clone()?;
            let target = if names::is_social(&hotspot.name) { LinkTarget::Blank } else { LinkTarget::Default };
            Some(HotspotAction::OpenUrl { url, target })
        }
        HotspotKind::ThemeToggle => Some(HotspotAction::ToggleTheme),
        HotspotKind::InternalFocus => hotspot.focus_pose.map(HotspotAction::Focus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SceneManifest;
    use glam::Vec3;

    const VIEWPORT: Viewport = Viewport { width: 800.0, height: 600.0 };

    // Camera at the origin looking down -Z; everything is stacked on the center ray
    const ROOM: &str = r#"{
        "nodes": [
            { "name": "Switch", "min": [-0.1, -0.1, -2.1], "max": [0.1, 0.1, -1.9] },
            { "name": "linkedin", "min": [-0.2, -0.2, -4.2], "max": [0.2, 0.2, -3.8],
              "url": "https://www.linkedin.com/in/example" },
            { "name": "project", "min": [-0.2, -0.2, -6.2], "max": [0.2, 0.2, -5.8] },
            { "name": "about", "min": [-0.2, -0.2, -8.2], "max": [0.2, 0.2, -7.8],
              "focus": { "position": [0.1, 0.2, 0.5], "rotation": [-1.5, 0.0, 1.5] } },
            { "name": "Wall", "min": [-5, -5, -11], "max": [5, 5, -10] }
        ]
    }"#;

    fn setup() -> (HotspotRouter, Camera, SceneModel) {
        let config = RoomConfig::default();
        let scene = SceneModel::from_manifest(SceneManifest::from_json(ROOM).unwrap(), &config);
        let camera = Camera::new(Pose::new(Vec3::ZERO, Vec3::ZERO), 75.0, VIEWPORT, 0.01, 1000.0);
        (HotspotRouter::from_scene(&scene, &config), camera, scene)
    }

    #[test]
    fn test_lookup_built_from_named_nodes() {
        let (router, _, _) = setup();
        assert_eq!(router.len(), 4, "Wall is not interactive");
        assert_eq!(router.hotspot("Switch").unwrap().kind, HotspotKind::ThemeToggle);
        assert_eq!(router.hotspot("about").unwrap().kind, HotspotKind::InternalFocus);
    }

    #[test]
    fn test_resolve_nearest() {
        let (router, cam, scene) = setup();
        let hit = router.resolve(400.0, 300.0, &TargetPath::default(), VIEWPORT, &cam, &scene);
        assert_eq!(hit.map(|h| h.name), Some("Switch".to_string()));
    }

    #[test]
    fn test_resolve_misses() {
        let (router, cam, scene) = setup();
        assert!(router.resolve(5.0, 5.0, &TargetPath::default(), VIEWPORT, &cam, &scene).is_none());
    }

    #[test]
    fn test_exempt_region_blocks_pick() {
        let (router, cam, scene) = setup();
        let target = TargetPath::new(["#close-icon", "#close-btn"]);
        assert!(router.resolve(400.0, 300.0, &target, VIEWPORT, &cam, &scene).is_none());
        assert!(router.route(400.0, 300.0, &target, VIEWPORT, &cam, &scene).is_empty());
    }

    #[test]
    fn test_stacked_hotspots_all_dispatch() {
        let (router, cam, scene) = setup();
        let actions = router.route(400.0, 300.0, &TargetPath::default(), VIEWPORT, &cam, &scene);
        assert_eq!(
            actions,
            vec![
                HotspotAction::ToggleTheme,
                HotspotAction::OpenUrl {
                    url: "https://www.linkedin.com/in/example".to_string(),
                    target: LinkTarget::Blank,
                },
                HotspotAction::Focus(Pose::new(Vec3::new(0.1, 0.2, 0.5), Vec3::new(-1.5, 0.0, 1.5))),
            ],
            "project without a url opens nothing"
        );
    }

    #[test]
    fn test_resolve_before_load_is_none() {
        let router = HotspotRouter::default();
        let cam = Camera::new(Pose::new(Vec3::ZERO, Vec3::ZERO), 75.0, VIEWPORT, 0.01, 1000.0);
        let scene = SceneModel::default();
        assert!(router.resolve(400.0, 300.0, &TargetPath::default(), VIEWPORT, &cam, &scene).is_none());
    }

    #[test]
    fn test_mobile_focus_override() {
        let config = RoomConfig::mobile();
        let scene = SceneModel::from_manifest(SceneManifest::from_json(ROOM).unwrap(), &config);
        let router = HotspotRouter::from_scene(&scene, &config);
        let pose = router.hotspot("about").unwrap().focus_pose.unwrap();
        assert_eq!(pose.position, Vec3::new(0.09, 0.23, 0.51));
    }
}
