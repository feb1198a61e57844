use std::collections::HashMap;
use std::f32::consts::PI;

use glam::Vec3;

use crate::model::hotspot::names;
use crate::model::Pose;

/// Viewports at or below this width get the mobile profile
pub const MOBILE_BREAKPOINT_PX: u32 = 992;

/// OrbitControls limits
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitLimits {
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub rotate_speed: f32,
    pub zoom_scale: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            min_distance: 0.9,
            max_distance: 1.6,
            min_azimuth: 0.2,
            max_azimuth: PI * 0.78,
            min_polar: 0.3,
            max_polar: PI / 2.0,
            rotate_speed: 1.0,
            zoom_scale: 0.95,
        }
    }
}

/// DOM hooks the overlay talks to
#[derive(Debug, Clone)]
pub struct DomIds {
    pub canvas_selector: String,
    pub loader: String,
    pub logo: String,
    pub close_button: String,
    pub contact_button: String,
    pub contact_menu: String,
    pub contact_dropdown: String,
    pub contact_dropdown_open_class: String,
    pub play_pause: String,
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            canvas_selector: ".experience-canvas".to_string(),
            loader: "loader-wrapper".to_string(),
            logo: "logo".to_string(),
            close_button: "close-btn".to_string(),
            contact_button: "contact-btn".to_string(),
            contact_menu: ".contact-menu".to_string(),
            contact_dropdown: ".contact-menu__dropdown".to_string(),
            contact_dropdown_open_class: "contact-menu__dropdown--open".to_string(),
            play_pause: "playPauseBtn".to_string(),
        }
    }
}

/// Intro text shown on the wall
#[derive(Debug, Clone)]
pub struct IntroText {
    pub name: &'static str,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct RoomConfig {
    pub default_pose: Pose,
    pub fov_y_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Camera fly-to duration in seconds
    pub transition_duration: f32,
    /// Duration used for theme light tweens
    pub tween_duration: f32,
    pub orbit: OrbitLimits,
    pub scene_scale: f32,
    /// Focus poses that replace the ones in the scene manifest
    pub focus_overrides: HashMap<String, Pose>,
    /// Selectors of overlay UI that must not click through to the scene
    pub exempt_selectors: Vec<String>,
    pub dom: DomIds,
    pub scene_url: String,
    pub audio_url: String,
    pub play_icon: String,
    pub pause_icon: String,
    pub intro: Vec<IntroText>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            default_pose: Pose::new(
                Vec3::new(1.009028643133046, 0.5463638814987481, 0.4983449671971262),
                Vec3::new(-0.8313297556598935, 0.9383399492446749, 0.7240714481613063),
            ),
            fov_y_deg: 75.0,
            z_near: 0.01,
            z_far: 1000.0,
            transition_duration: 1.5,
            tween_duration: 0.5,
            orbit: OrbitLimits::default(),
            scene_scale: 1.0,
            focus_overrides: HashMap::new(),
            exempt_selectors: vec!["#close-btn".to_string(), "#projects-menu".to_string()],
            dom: DomIds::default(),
            scene_url: "models/room.json".to_string(),
            audio_url: "/music.mp3".to_string(),
            play_icon: "/play.png".to_string(),
            pause_icon: "/pause.png".to_string(),
            intro: vec![
                IntroText { name: "title", text: "ITS LAKSH".to_string() },
                IntroText { name: "subtitle", text: "Web Designer / Developer / AI Expert".to_string() },
            ],
        }
    }
}

impl RoomConfig {
    /// Small screens: shrink the room, tighten the orbit, closer focus shots
    pub fn mobile() -> Self {
        let mut config = Self::default();
        config.scene_scale = 0.95;
        config.orbit.max_distance = 1.5;
        config.orbit.max_azimuth = PI * 0.75;
        config.focus_overrides.insert(
            names::ABOUT.to_string(),
            Pose::new(Vec3::new(0.09, 0.23, 0.51), Vec3::new(-1.57, 0.0, 1.57)),
        );
        config.focus_overrides.insert(
            names::PROJECTS.to_string(),
            Pose::new(Vec3::new(1.1, 0.82, 0.5), Vec3::new(0.0, 0.0, 1.55)),
        );
        config
    }

    pub fn for_viewport_width(width: u32) -> Self {
        if width <= MOBILE_BREAKPOINT_PX { Self::mobile() } else { Self::default() }
    }
}
