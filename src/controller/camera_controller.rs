use glam::Vec3;

use crate::config::RoomConfig;
use crate::model::hotspot::names;
use crate::model::{Camera, Pose, SceneModel, Tween};

use super::orbit::OrbitControls;
use super::theme_controller::ThemeController;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraState {
    Idle,
    Transitioning { elapsed: f32 },
}

/// Snapshot of what input the camera currently accepts.
/// `controls_enabled` is never true while a transition is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionState {
    pub controls_enabled: bool,
    pub transition_in_flight: bool,
}

/// Flies the camera between poses and gates free orbiting
pub struct CameraController {
    default_pose: Pose,
    focus_pose: Option<Pose>,
    duration: f32,
    state: CameraState,
    position: Option<Tween<Vec3>>,
    rotation: Option<Tween<Vec3>>,
    pub orbit_controls: OrbitControls,
}

impl CameraController {
    pub fn new(config: &RoomConfig) -> Self {
        Self {
            default_pose: config.default_pose,
            focus_pose: None,
            duration: config.transition_duration,
            state: CameraState::Idle,
            position: None,
            rotation: None,
            orbit_controls: OrbitControls::new(config.orbit.clone()),
        }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn default_pose(&self) -> Pose {
        self.default_pose
    }

    /// Pose of the last focus call, cleared on reset
    pub fn focus_pose(&self) -> Option<Pose> {
        self.focus_pose
    }

    pub fn interaction_state(&self) -> InteractionState {
        let in_flight = matches!(self.state, CameraState::Transitioning { .. });
        InteractionState { controls_enabled: !in_flight, transition_in_flight: in_flight }
    }

    /// Start flying to `pose`. A transition already in flight is replaced,
    /// starting from wherever the camera is now.
    pub fn focus(&mut self, camera: &Camera, pose: Pose) {
        if let CameraState::Transitioning { .. } = self.state {
            tracing::debug!("camera transition overridden");
        }
        self.position = Some(Tween::new(camera.position, pose.position, self.duration));
        self.rotation = Some(Tween::new(camera.rotation, pose.rotation, self.duration));
        self.state = CameraState::Transitioning { elapsed: 0.0 };
        self.focus_pose = Some(pose);
    }

    /// Fly home, hide the social icons and bring the room light back
    pub fn reset(&mut self, camera: &Camera, scene: &mut SceneModel, theme: &mut ThemeController) {
        tracing::debug!("camera reset");
        self.focus(camera, self.default_pose);
        self.focus_pose = None;
        scene.set_visible_where(false, |n| names::is_social(&n.name));
        theme.restore_room_light(scene, self.duration);
    }

    /// Advance the transition. Returns true if the camera moved.
    pub fn update(&mut self, dt: f32, camera: &mut Camera) -> bool {
        let CameraState::Transitioning { elapsed } = self.state else {
            return false;
        };

        if let Some(tween) = self.position.as_mut() {
            camera.position = tween.advance(dt);
        }
        if let Some(tween) = self.rotation.as_mut() {
            camera.rotation = tween.advance(dt);
        }

        let elapsed = elapsed + dt.max(0.0);
        if elapsed >= self.duration {
            self.state = CameraState::Idle;
            self.position = None;
            self.rotation = None;
            tracing::debug!("camera transition finished, orbit enabled");
        } else {
            self.state = CameraState::Transitioning { elapsed };
        }
        true
    }

    /// Orbit drag. Rejected while a transition is in flight.
    pub fn orbit(&self, camera: &mut Camera, dx: f32, dy: f32, viewport_height: f32) -> bool {
        if !self.interaction_state().controls_enabled {
            return false;
        }
        self.orbit_controls.rotate(camera, dx, dy, viewport_height);
        true
    }

    /// Wheel zoom. Rejected while a transition is in flight.
    pub fn zoom(&self, camera: &mut Camera, delta_y: f32) -> bool {
        if !self.interaction_state().controls_enabled {
            return false;
        }
        self.orbit_controls.zoom(camera, delta_y);
        true
    }
}
