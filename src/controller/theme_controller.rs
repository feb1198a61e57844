use glam::Vec3;

use crate::model::hotspot::names;
use crate::model::scene::lights;
use crate::model::{SceneModel, Theme, TweenSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightChannel {
    Intensity,
    Distance,
}

type ScalarKey = (&'static str, LightChannel);

/// Owns the current theme and animates the light rig towards its targets
pub struct ThemeController {
    theme: Theme,
    tween_duration: f32,
    colors: TweenSet<&'static str, Vec3>,
    scalars: TweenSet<ScalarKey, f32>,
}

impl ThemeController {
    pub fn new(tween_duration: f32) -> Self {
        Self {
            theme: Theme::default(),
            tween_duration,
            colors: TweenSet::default(),
            scalars: TweenSet::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_animating(&self) -> bool {
        !self.colors.is_empty() || !self.scalars.is_empty()
    }

    /// Where a light channel is heading, if it is animating
    pub fn intensity_target(&self, light: &'static str) -> Option<f32> {
        self.scalars.target(&(light, LightChannel::Intensity))
    }

    pub fn switch_theme(&mut self, theme: Theme, scene: &mut SceneModel) {
        tracing::debug!(?theme, "switching theme");
        self.theme = theme;
        let targets = theme.targets();

        match scene.node_mut(names::SWITCH) {
            Some(switch) => switch.rotation.z = targets.switch_rotation_z,
            None => tracing::debug!("no switch node to rotate"),
        }

        // Text colors snap, they do not tween
        if let Some(title) = scene.text_mut("title") {
            title.colors = targets.title;
        }
        if let Some(subtitle) = scene.text_mut("subtitle") {
            subtitle.colors = targets.subtitle;
        }

        let d = self.tween_duration;
        self.tween_color(scene, lights::ROOM, targets.room_color, d);
        self.tween_color(scene, lights::AMBIENT, targets.ambient_color, d);
        self.tween_scalar(scene, lights::ROOM, LightChannel::Intensity, targets.room_intensity, d);
        self.tween_scalar(scene, lights::AMBIENT, LightChannel::Intensity, targets.ambient_intensity, d);
        self.tween_scalar(scene, lights::FAN_GLOW, LightChannel::Distance, targets.fan_glow_distance, d);
        for accent in lights::THEMED_ACCENTS {
            self.tween_scalar(scene, accent, LightChannel::Intensity, targets.accent_intensity, d);
        }
    }

    /// Bring the room light back to full strength, unless the room is dark
    pub fn restore_room_light(&mut self, scene: &SceneModel, duration: f32) {
        if self.theme == Theme::Dark {
            return;
        }
        let target = Theme::Light.targets().room_intensity;
        self.tween_scalar(scene, lights::ROOM, LightChannel::Intensity, target, duration);
    }

    fn tween_color(&mut self, scene: &SceneModel, light: &'static str, to: Vec3, duration: f32) {
        if let Some(current) = scene.light(light) {
            self.colors.to(light, current.color, to, duration);
        }
    }

    fn tween_scalar(&mut self, scene: &SceneModel, light: &'static str, channel: LightChannel, to: f32, duration: f32) {
        if let Some(current) = scene.light(light) {
            let from = match channel {
                LightChannel::Intensity => current.intensity,
                LightChannel::Distance => current.distance,
            };
            self.scalars.to((light, channel), from, to, duration);
        }
    }

    /// Advance light tweens and write them into the scene. Returns true if anything changed.
    pub fn update(&mut self, dt: f32, scene: &mut SceneModel) -> bool {
        if !self.is_animating() {
            return false;
        }
        for (name, color) in self.colors.advance(dt) {
            if let Some(light) = scene.light_mut(name) {
                light.color = color;
            }
        }
        for ((name, channel), value) in self.scalars.advance(dt) {
            if let Some(light) = scene.light_mut(name) {
                match channel {
                    LightChannel::Intensity => light.intensity = value,
                    LightChannel::Distance => light.distance = value,
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoomConfig;
    use crate::model::SceneManifest;

    fn scene() -> SceneModel {
        let manifest = SceneManifest::from_json(
            r#"{ "nodes": [ { "name": "Switch", "min": [0, 0, 0], "max": [0.1, 0.1, 0.1] } ] }"#,
        )
        .unwrap();
        SceneModel::from_manifest(manifest, &RoomConfig::default())
    }

    fn settle(ctrl: &mut ThemeController, scene: &mut SceneModel) {
        for _ in 0..20 {
            ctrl.update(0.1, scene);
        }
        assert!(!ctrl.is_animating(), "tweens should have finished");
    }

    #[test]
    fn test_dark_theme_targets_reached() {
        let mut scene = scene();
        let mut ctrl = ThemeController::new(0.5);
        ctrl.switch_theme(Theme::Dark, &mut scene);

        assert_eq!(ctrl.theme(), Theme::Dark);
        assert_eq!(ctrl.intensity_target(lights::ROOM), Some(1.5));
        let rot = scene.node(names::SWITCH).unwrap().rotation.z;
        assert_eq!(rot, std::f32::consts::PI / 7.0, "switch flips immediately");
        assert_eq!(scene.text("title").unwrap().colors.face, Vec3::splat(8.0));

        settle(&mut ctrl, &mut scene);
        let room = scene.light(lights::ROOM).unwrap();
        assert_eq!(room.intensity, 1.5);
        assert_eq!(room.color, Theme::Dark.targets().room_color);
        assert_eq!(scene.light(lights::FAN_GLOW).unwrap().distance, 0.07);
        assert_eq!(scene.light("accent4").unwrap().intensity, 0.6);
        assert_eq!(scene.light("accent5").unwrap().intensity, 0.0, "fifth accent is not themed");
    }

    #[test]
    fn test_switch_theme_is_idempotent() {
        for theme in [Theme::Light, Theme::Dark] {
            let mut once = scene();
            let mut ctrl = ThemeController::new(0.5);
            ctrl.switch_theme(theme, &mut once);
            settle(&mut ctrl, &mut once);

            let mut twice = once.clone();
            ctrl.switch_theme(theme, &mut twice);
            settle(&mut ctrl, &mut twice);

            assert_eq!(format!("{once:?}"), format!("{twice:?}"), "{theme:?} applied twice drifted");
            assert_eq!(ctrl.theme(), theme);
        }
    }

    #[test]
    fn test_missing_switch_is_not_fatal() {
        let mut scene = SceneModel::from_manifest(SceneManifest::default(), &RoomConfig::default());
        let mut ctrl = ThemeController::new(0.5);
        ctrl.switch_theme(Theme::Dark, &mut scene);
        settle(&mut ctrl, &mut scene);
        assert_eq!(scene.light(lights::AMBIENT).unwrap().intensity, 0.3);
    }

    #[test]
    fn test_restore_room_light_respects_dark() {
        let mut scene = scene();
        let mut ctrl = ThemeController::new(0.5);
        ctrl.switch_theme(Theme::Dark, &mut scene);
        settle(&mut ctrl, &mut scene);

        ctrl.restore_room_light(&scene, 1.5);
        assert!(!ctrl.is_animating(), "dark room keeps its dim light");

        ctrl.switch_theme(Theme::Light, &mut scene);
        ctrl.restore_room_light(&scene, 1.5);
        assert_eq!(ctrl.intensity_target(lights::ROOM), Some(2.5));
    }
}
