use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Class put on `<body>` for the overlay chrome
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
        }
    }

    pub fn targets(self) -> &'static ThemeTargets {
        match self {
            Theme::Light => &LIGHT_TARGETS,
            Theme::Dark => &DARK_TARGETS,
        }
    }
}

/// Front face and extruded side color of a text mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextColors {
    pub face: Vec3,
    pub side: Vec3,
}

/// Everything a theme switch drives
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeTargets {
    pub switch_rotation_z: f32,
    pub room_color: Vec3,
    pub room_intensity: f32,
    pub ambient_color: Vec3,
    pub ambient_intensity: f32,
    pub fan_glow_distance: f32,
    pub accent_intensity: f32,
    pub title: TextColors,
    pub subtitle: TextColors,
}

const INK: Vec3 = Vec3::new(0.09019607843137255, 0.12156862745098039, 0.15294117647058825);

pub static LIGHT_TARGETS: ThemeTargets = ThemeTargets {
    switch_rotation_z: 0.0,
    room_color: Vec3::ONE,
    room_intensity: 2.5,
    ambient_color: Vec3::ONE,
    ambient_intensity: 0.6,
    fan_glow_distance: 0.05,
    accent_intensity: 0.0,
    title: TextColors { face: INK, side: Vec3::ONE },
    subtitle: TextColors { face: INK, side: Vec3::ONE },
};

// Text values above 1.0 are intentional: the text glows under the dim dark rig
pub static DARK_TARGETS: ThemeTargets = ThemeTargets {
    switch_rotation_z: std::f32::consts::PI / 7.0,
    room_color: Vec3::new(0.27254901960784313, 0.23137254901960785, 0.6862745098039216),
    room_intensity: 1.5,
    ambient_color: Vec3::new(0.17254901960784313, 0.23137254901960785, 0.6862745098039216),
    ambient_intensity: 0.3,
    fan_glow_distance: 0.07,
    accent_intensity: 0.6,
    title: TextColors { face: Vec3::splat(8.0), side: Vec3::splat(5.0) },
    subtitle: TextColors { face: Vec3::splat(8.0), side: Vec3::splat(5.0) },
};
