use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::RoomConfig;
use crate::error::{SceneError, SceneResult};
use crate::utils::{Aabb, Ray};

use super::camera::Pose;
use super::hotspot::names;
use super::theme::{TextColors, Theme};

/// Light names owned by the room rig
pub mod lights {
    pub const AMBIENT: &str = "ambient";
    pub const ROOM: &str = "room";
    pub const LAMP: &str = "lamp";
    pub const FANS: [&str; 5] = ["fan1", "fan2", "fan3", "fan4", "fan5"];
    /// Fan light whose reach changes with the theme
    pub const FAN_GLOW: &str = "fan5";
    pub const ACCENTS: [&str; 5] = ["accent1", "accent2", "accent3", "accent4", "accent5"];
    /// Accents driven by the theme; the fifth stays off
    pub const THEMED_ACCENTS: [&str; 4] = ["accent1", "accent2", "accent3", "accent4"];
}

/// One node entry of a scene manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeManifest {
    pub name: String,
    pub min: Vec3,
    pub max: Vec3,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub focus: Option<Pose>,
    /// Continuous rotation in rad/s (fan blades)
    #[serde(default)]
    pub spin: Option<Vec3>,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

/// Declarative description of the room as exported next to the model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneManifest {
    #[serde(default)]
    pub nodes: Vec<NodeManifest>,
}

impl SceneManifest {
    pub fn from_json(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub name: String,
    pub bounds: Aabb,
    pub rotation: Vec3,
    pub visible: bool,
    #[serde(skip)]
    pub url: Option<String>,
    #[serde(skip)]
    pub focus: Option<Pose>,
    #[serde(skip)]
    pub spin: Option<Vec3>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Reach of a point light, 0 for ambient
    pub distance: f32,
}

impl Light {
    pub fn point(hex: u32, intensity: f32, distance: f32, position: Vec3) -> Self {
        Self { position, color: rgb(hex), intensity, distance }
    }
}

/// Hex color to linear 0..1 components
pub fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMesh {
    pub text: String,
    pub colors: TextColors,
}

/// A ray hit on a named node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub node: usize,
    pub distance: f32,
}

/// The room as the interaction layer sees it: named pickable nodes, the light rig
/// and the intro text. The renderer mirrors this state every frame.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SceneModel {
    nodes: Vec<SceneNode>,
    lights: BTreeMap<String, Light>,
    texts: BTreeMap<String, TextMesh>,
}

impl SceneModel {
    pub fn from_manifest(manifest: SceneManifest, config: &RoomConfig) -> Self {
        let scale = config.scene_scale;
        let nodes = manifest
            .nodes
            .into_iter()
            .map(|n| SceneNode {
                bounds: Aabb::new(n.min, n.max).scaled(scale),
                name: n.name,
                rotation: Vec3::ZERO,
                visible: n.visible,
                url: n.url,
                focus: n.focus,
                spin: n.spin,
            })
            .collect();

        let mut scene = Self { nodes, ..Default::default() };
        scene.add_light_rig();
        if let Err(err) = scene.add_lamp_light() {
            tracing::warn!("{err}, lamp light skipped");
        }
        for intro in &config.intro {
            let colors = Theme::Light.targets().title;
            scene.texts.insert(intro.name.to_string(), TextMesh { text: intro.text.clone(), colors });
        }
        if scene.node(names::SWITCH).is_none() {
            tracing::warn!("{}, theme switch will not rotate", SceneError::AssetMissing(names::SWITCH.into()));
        }
        tracing::info!(nodes = scene.nodes.len(), lights = scene.lights.len(), "scene ready");
        scene
    }

    fn add_light_rig(&mut self) {
        let ambient = Light { position: Vec3::ZERO, color: rgb(0xfff8e1), intensity: 0.6, distance: 0.0 };
        self.lights.insert(lights::AMBIENT.into(), ambient);
        self.lights.insert(lights::ROOM.into(), Light::point(0xfff8e1, 2.5, 10.0, Vec3::new(0.3, 2.0, 0.5)));

        let fans = [
            (0xff0000, 0.2, Vec3::new(0.0, 0.29, -0.29)),
            (0x00ff00, 0.12, Vec3::new(-0.15, 0.29, -0.29)),
            (0x00ff00, 0.2, Vec3::new(0.21, 0.29, -0.29)),
            (0x00ff00, 0.2, Vec3::new(0.21, 0.19, -0.29)),
            (0x00ff00, 0.05, Vec3::new(0.21, 0.08, -0.29)),
        ];
        for (name, (hex, distance, pos)) in lights::FANS.iter().zip(fans) {
            self.lights.insert(name.to_string(), Light::point(hex, 30.0, distance, pos));
        }

        let accents = [
            Vec3::new(-0.2, 0.6, 0.24),
            Vec3::new(-0.2, 0.6, 0.42),
            Vec3::new(-0.2, 0.6, 0.01),
            Vec3::new(-0.2, 0.6, -0.14),
            Vec3::new(1.2, 1.0, -0.14),
        ];
        for (name, pos) in lights::ACCENTS.iter().zip(accents) {
            self.lights.insert(name.to_string(), Light::point(0xff0000, 0.0, 1.1, pos));
        }
    }

    fn add_lamp_light(&mut self) -> SceneResult<()> {
        let lamp = self
            .node(names::LAMP)
            .ok_or_else(|| SceneError::AssetMissing(names::LAMP.into()))?;
        let light = Light::point(0xffd700, 0.5, 3.0, lamp.bounds.center());
        self.lights.insert(lights::LAMP.into(), light);
        Ok(())
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }

    pub fn light(&self, name: &str) -> Option<&Light> {
        self.lights.get(name)
    }

    pub fn light_mut(&mut self, name: &str) -> Option<&mut Light> {
        self.lights.get_mut(name)
    }

    pub fn text(&self, name: &str) -> Option<&TextMesh> {
        self.texts.get(name)
    }

    pub fn text_mut(&mut self, name: &str) -> Option<&mut TextMesh> {
        self.texts.get_mut(name)
    }

    /// Show or hide every node matching `pred`
    pub fn set_visible_where(&mut self, visible: bool, pred: impl Fn(&SceneNode) -> bool) {
        for node in self.nodes.iter_mut().filter(|n| pred(n)) {
            node.visible = visible;
        }
    }

    /// All visible nodes hit by `ray`, nearest first.
    /// Hidden nodes are deliberately not pickable, unlike a three.js raycast.
    pub fn intersect(&self, ray: &Ray) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.visible)
            .filter_map(|(i, n)| n.bounds.intersect(ray).map(|distance| Intersection { node: i, distance }))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Advance continuously spinning nodes. Returns true if anything moved.
    pub fn spin(&mut self, dt: f32) -> bool {
        let mut moved = false;
        for node in &mut self.nodes {
            if let Some(speed) = node.spin {
                node.rotation = wrap_angles(node.rotation + speed * dt);
                moved = true;
            }
        }
        moved
    }
}

fn wrap_angles(v: Vec3) -> Vec3 {
    let tau = std::f32::consts::TAU;
    Vec3::new(v.x.rem_euclid(tau), v.y.rem_euclid(tau), v.z.rem_euclid(tau))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = r#"{
        "nodes": [
            { "name": "Switch", "min": [-0.1, -0.1, -2.1], "max": [0.1, 0.1, -1.9] },
            { "name": "Lamp", "min": [0.5, 0.0, 0.5], "max": [0.7, 0.4, 0.7] },
            { "name": "linkedin", "min": [-0.2, -0.2, -4.2], "max": [0.2, 0.2, -3.8],
              "url": "https://www.linkedin.com/", "visible": false },
            { "name": "fan_blades", "min": [0.5, 0.5, 0.5], "max": [0.6, 0.6, 0.6], "spin": [0.0, 0.0, 3.0] }
        ]
    }"#;

    fn scene() -> SceneModel {
        let manifest = SceneManifest::from_json(ROOM).expect("fixture parses");
        SceneModel::from_manifest(manifest, &RoomConfig::default())
    }

    #[test]
    fn test_manifest_defaults() {
        let scene = scene();
        assert!(scene.node("Switch").unwrap().visible, "nodes default to visible");
        assert!(!scene.node("linkedin").unwrap().visible);
        assert_eq!(scene.node("linkedin").unwrap().url.as_deref(), Some("https://www.linkedin.com/"));
    }

    #[test]
    fn test_light_rig_and_lamp() {
        let scene = scene();
        assert_eq!(scene.light(lights::ROOM).unwrap().intensity, 2.5);
        assert_eq!(scene.light(lights::AMBIENT).unwrap().intensity, 0.6);
        let lamp = scene.light(lights::LAMP).expect("lamp light follows the Lamp node");
        assert!(lamp.position.abs_diff_eq(Vec3::new(0.6, 0.2, 0.6), 1e-6));
        assert_eq!(scene.text("title").unwrap().colors, Theme::Light.targets().title);
    }

    #[test]
    fn test_missing_lamp_is_skipped() {
        let manifest = SceneManifest::from_json(r#"{ "nodes": [] }"#).unwrap();
        let scene = SceneModel::from_manifest(manifest, &RoomConfig::default());
        assert!(scene.light(lights::LAMP).is_none());
        assert!(scene.light(lights::ROOM).is_some(), "the rest of the rig still loads");
    }

    #[test]
    fn test_bad_manifest_is_json_error() {
        let err = SceneManifest::from_json("{ nodes: ").unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
    }

    #[test]
    fn test_intersect_skips_hidden_nodes() {
        let mut scene = scene();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit_names: Vec<&str> = scene.intersect(&ray).iter().map(|h| scene.nodes()[h.node].name.as_str()).collect();
        assert_eq!(hit_names, vec!["Switch"]);

        scene.set_visible_where(true, |n| names::is_social(&n.name));
        let hit_names: Vec<&str> = scene.intersect(&ray).iter().map(|h| scene.nodes()[h.node].name.as_str()).collect();
        assert_eq!(hit_names, vec!["Switch", "linkedin"], "hits come back nearest first");
    }

    #[test]
    fn test_mobile_scale_shrinks_bounds() {
        let manifest = SceneManifest::from_json(ROOM).unwrap();
        let scene = SceneModel::from_manifest(manifest, &RoomConfig::mobile());
        let lamp = scene.node("Lamp").unwrap();
        assert!(lamp.bounds.max.abs_diff_eq(Vec3::new(0.665, 0.38, 0.665), 1e-6));
    }

    #[test]
    fn test_spin_advances_fans_only() {
        let mut scene = scene();
        assert!(scene.spin(0.5));
        assert!((scene.node("fan_blades").unwrap().rotation.z - 1.5).abs() < 1e-6);
        assert_eq!(scene.node("Switch").unwrap().rotation, Vec3::ZERO);
    }
}
