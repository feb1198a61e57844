use serde::Serialize;

use crate::config::RoomConfig;
use crate::model::hotspot::names;
use crate::model::{Camera, LinkTarget, Pose, SceneModel, Theme};
use crate::utils::Viewport;

use super::camera_controller::{CameraController, InteractionState};
use super::hotspot_router::{HotspotAction, HotspotRouter};
use super::input::{DragState, InputEvent, MouseButton, TargetPath, UiButton};
use super::theme_controller::ThemeController;

/// Side effects for the page around the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    OpenUrl { url: String, target: LinkTarget },
    SetBodyTheme(Theme),
    ShowCloseButton(bool),
    SetContactMenuOpen(bool),
    PlayAudio,
    PauseAudio,
    ResizeRenderer(Viewport),
}

/// Pixels a press may travel and still count as a click rather than a drag
const CLICK_SLOP_PX: f32 = 4.0;

/// Per-frame state handed to the renderer
#[derive(Serialize)]
pub struct FrameState<'a> {
    pub theme: Theme,
    pub camera: Pose,
    pub aspect: f32,
    pub viewport: Viewport,
    pub scene: &'a SceneModel,
}

/// Owns the scene, the camera and the three controllers.
/// Only constructed once the scene has loaded.
pub struct AppController {
    scene: SceneModel,
    camera: Camera,
    viewport: Viewport,
    theme: ThemeController,
    camera_ctrl: CameraController,
    router: HotspotRouter,
    drag: DragState,
    drag_travel: f32,
    /// Camera or viewport changed by input since the last frame
    dirty: bool,
}

impl AppController {
    pub fn new(config: &RoomConfig, scene: SceneModel, viewport: Viewport) -> Self {
        let camera = Camera::new(config.default_pose, config.fov_y_deg, viewport, config.z_near, config.z_far);
        let router = HotspotRouter::from_scene(&scene, config);
        Self {
            theme: ThemeController::new(config.tween_duration),
            camera_ctrl: CameraController::new(config),
            router,
            camera,
            viewport,
            scene,
            drag: DragState::default(),
            drag_travel: 0.0,
            dirty: false,
        }
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn theme_controller(&self) -> &ThemeController {
        &self.theme
    }

    pub fn camera_controller(&self) -> &CameraController {
        &self.camera_ctrl
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.camera_ctrl.interaction_state()
    }

    pub fn frame_state(&self) -> FrameState<'_> {
        FrameState {
            theme: self.theme(),
            camera: self.camera.pose(),
            aspect: self.camera.aspect,
            viewport: self.viewport,
            scene: &self.scene,
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<UiEffect> {
        match event {
            InputEvent::Click { x, y, target } => self.click(x, y, &target),
            InputEvent::MouseDown { button: MouseButton::Left, x, y } => {
                self.drag.press(x, y);
                self.drag_travel = 0.0;
                Vec::new()
            }
            InputEvent::MouseDown { .. } => Vec::new(),
            InputEvent::MouseMove { x, y } => {
                if let Some((dx, dy)) = self.drag.moved(x, y) {
                    self.drag_travel += dx.abs() + dy.abs();
                    self.dirty |= self.camera_ctrl.orbit(&mut self.camera, dx, dy, self.viewport.height);
                }
                Vec::new()
            }
            InputEvent::MouseUp { .. } => {
                self.drag.release();
                Vec::new()
            }
            InputEvent::MouseWheel { delta_y } => {
                self.dirty |= self.camera_ctrl.zoom(&mut self.camera, delta_y);
                Vec::new()
            }
            InputEvent::Resize(viewport) => self.resize(viewport),
            InputEvent::Button(UiButton::Logo) | InputEvent::Button(UiButton::Close) => self.reset_camera(),
            // Handled by the session's overlay state, loaded or not
            InputEvent::Button(UiButton::Contact | UiButton::PlayPause) => Vec::new(),
        }
    }

    fn click(&mut self, x: f32, y: f32, target: &TargetPath) -> Vec<UiEffect> {
        // The click that ends an orbit drag is not a pick
        if self.drag_travel > CLICK_SLOP_PX {
            self.drag_travel = 0.0;
            return Vec::new();
        }

        let actions = self.router.route(x, y, target, self.viewport, &self.camera, &self.scene);
        // Decided once per click: two toggle nodes on one ray agree on the outcome
        let next_theme = self.theme.theme().toggled();

        let mut effects = Vec::new();
        for action in actions {
            match action {
                HotspotAction::OpenUrl { url, target } => {
                    tracing::info!(%url, "opening link");
                    effects.push(UiEffect::OpenUrl { url, target });
                }
                HotspotAction::ToggleTheme => {
                    self.theme.switch_theme(next_theme, &mut self.scene);
                    effects.push(UiEffect::SetBodyTheme(next_theme));
                }
                HotspotAction::Focus(pose) => {
                    self.camera_ctrl.focus(&self.camera, pose);
                    self.scene.set_visible_where(true, |n| names::is_social(&n.name));
                    effects.push(UiEffect::ShowCloseButton(true));
                }
            }
        }
        effects
    }

    pub fn reset_camera(&mut self) -> Vec<UiEffect> {
        self.camera_ctrl.reset(&self.camera, &mut self.scene, &mut self.theme);
        vec![UiEffect::ShowCloseButton(false)]
    }

    pub fn resize(&mut self, viewport: Viewport) -> Vec<UiEffect> {
        self.viewport = viewport;
        self.camera.set_aspect(viewport);
        self.dirty = true;
        vec![UiEffect::ResizeRenderer(viewport)]
    }

    /// One frame tick. Returns true if anything the renderer shows changed.
    pub fn update(&mut self, dt: f32) -> bool {
        let lights = self.theme.update(dt, &mut self.scene);
        let camera = self.camera_ctrl.update(dt, &mut self.camera);
        let spin = self.scene.spin(dt);
        let input = std::mem::take(&mut self.dirty);
        lights || camera || spin || input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::scene::lights;
    use crate::model::SceneManifest;
    use glam::Vec3;

    // From the default pose the screen center looks at the origin region, so
    // stack nodes on that center ray
    fn app_with(nodes: &str) -> AppController {
        let config = RoomConfig::default();
        let manifest = SceneManifest::from_json(&format!(r#"{{ "nodes": [ {nodes} ] }}"#)).unwrap();
        let scene = SceneModel::from_manifest(manifest, &config);
        AppController::new(&config, scene, Viewport::new(800.0, 600.0))
    }

    fn on_center_ray(distance: f32, half: f32) -> (Vec3, Vec3) {
        let pose = RoomConfig::default().default_pose;
        let cam = Camera::new(pose, 75.0, Viewport::new(800.0, 600.0), 0.01, 1000.0);
        let p = cam.position + cam.forward() * distance;
        (p - Vec3::splat(half), p + Vec3::splat(half))
    }

    fn node(name: &str, distance: f32, extra: &str) -> String {
        let (min, max) = on_center_ray(distance, 0.03);
        format!(
            r#"{{ "name": "{name}", "min": [{}, {}, {}], "max": [{}, {}, {}] {extra} }}"#,
            min.x, min.y, min.z, max.x, max.y, max.z
        )
    }

    fn center_click() -> InputEvent {
        InputEvent::Click { x: 400.0, y: 300.0, target: TargetPath::default() }
    }

    fn run(app: &mut AppController, seconds: f32) {
        let steps = (seconds * 60.0).ceil() as usize;
        for _ in 0..steps {
            app.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_click_light_switch_goes_dark() {
        let mut app = app_with(&node("Switch", 0.5, ""));
        assert_eq!(app.theme(), Theme::Light);

        let effects = app.handle(center_click());
        assert_eq!(effects, vec![UiEffect::SetBodyTheme(Theme::Dark)]);
        assert_eq!(app.theme(), Theme::Dark);
        assert_eq!(app.scene().node("Switch").unwrap().rotation.z, std::f32::consts::PI / 7.0);
        assert_eq!(app.theme_controller().intensity_target(lights::ROOM), Some(1.5));

        run(&mut app, 1.0);
        assert_eq!(app.scene().light(lights::ROOM).unwrap().intensity, 1.5);
    }

    #[test]
    fn test_stacked_toggle_and_link_both_fire() {
        let nodes = [
            node("Switch", 0.4, ""),
            node("instagram", 0.6, r#", "url": "https://instagram.com/example""#),
        ]
        .join(",");
        let mut app = app_with(&nodes);
        let effects = app.handle(center_click());
        assert_eq!(
            effects,
            vec![
                UiEffect::SetBodyTheme(Theme::Dark),
                UiEffect::OpenUrl { url: "https://instagram.com/example".to_string(), target: LinkTarget::Blank },
            ]
        );
    }

    #[test]
    fn test_two_toggle_nodes_on_one_ray_agree() {
        let nodes = [node("SwitchBoard", 0.4, ""), node("Switch", 0.5, "")].join(",");
        let mut app = app_with(&nodes);
        app.handle(center_click());
        assert_eq!(app.theme(), Theme::Dark, "both hits switch to the same theme");
    }

    #[test]
    fn test_click_inside_overlay_does_nothing() {
        let mut app = app_with(&node("Switch", 0.5, ""));
        let effects = app.handle(InputEvent::Click {
            x: 400.0,
            y: 300.0,
            target: TargetPath::new(["#projects-menu"]),
        });
        assert!(effects.is_empty());
        assert_eq!(app.theme(), Theme::Light);
    }

    #[test]
    fn test_focus_then_quick_reset_lands_home() {
        let focus = r#", "focus": { "position": [0.09, 0.23, 0.51], "rotation": [-1.57, 0.0, 1.57] }"#;
        let mut app = app_with(&[node("about", 0.5, focus), node("discord", 3.0, "")].join(","));

        let effects = app.handle(center_click());
        assert_eq!(effects, vec![UiEffect::ShowCloseButton(true)]);
        assert!(!app.interaction_state().controls_enabled);

        app.update(0.01);
        let effects = app.handle(InputEvent::Button(UiButton::Close));
        assert_eq!(effects, vec![UiEffect::ShowCloseButton(false)]);
        assert!(!app.scene().node("discord").unwrap().visible, "socials hidden on reset");

        run(&mut app, 2.0);
        assert_eq!(app.camera().pose(), RoomConfig::default().default_pose);
        assert!(app.interaction_state().controls_enabled);
    }

    #[test]
    fn test_drag_orbits_and_suppresses_click() {
        let mut app = app_with(&node("Switch", 0.5, ""));
        let before = app.camera().position;
        app.handle(InputEvent::MouseDown { button: MouseButton::Left, x: 400.0, y: 300.0 });
        app.handle(InputEvent::MouseMove { x: 430.0, y: 300.0 });
        app.handle(InputEvent::MouseUp { target: TargetPath::default() });
        assert_ne!(app.camera().position, before, "drag should orbit");

        assert!(app.handle(center_click()).is_empty(), "release after a drag is not a pick");
        assert_eq!(app.theme(), Theme::Light);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut app = app_with("");
        let vp = Viewport::new(1600.0, 400.0);
        assert_eq!(app.handle(InputEvent::Resize(vp)), vec![UiEffect::ResizeRenderer(vp)]);
        assert_eq!(app.camera().aspect, 4.0);
        assert!(app.update(1.0 / 60.0), "resize must reach the renderer");
        assert!(!app.update(1.0 / 60.0), "and only once");
        assert_eq!(app.frame_state().viewport, vp);
    }

    #[test]
    fn test_orbit_and_zoom_mark_frame_changed() {
        // No spinning nodes, so only input can change the frame
        let mut app = app_with(&node("Switch", 0.5, ""));
        assert!(!app.update(1.0 / 60.0));

        app.handle(InputEvent::MouseDown { button: MouseButton::Left, x: 400.0, y: 300.0 });
        app.handle(InputEvent::MouseMove { x: 450.0, y: 300.0 });
        assert!(app.update(1.0 / 60.0), "orbit drag must reach the renderer");
        assert!(!app.update(1.0 / 60.0));

        app.handle(InputEvent::MouseWheel { delta_y: 100.0 });
        assert!(app.update(1.0 / 60.0), "zoom must reach the renderer");
    }

    #[test]
    fn test_frame_state_serializes() {
        let app = app_with(&node("Switch", 0.5, ""));
        let json = serde_json::to_string(&app.frame_state()).unwrap();
        assert!(json.contains(r#""theme":"light""#), "{json}");
        assert!(json.contains("Switch"));
    }
}
