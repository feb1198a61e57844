use std::f32::consts::TAU;

use glam::Vec3;

use crate::config::OrbitLimits;
use crate::model::Camera;

/// Free-look around a fixed target, clamped like the room's OrbitControls
pub struct OrbitControls {
    pub limits: OrbitLimits,
}

/// Radius, azimuth (from +Z towards +X) and polar angle (from +Y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub azimuth: f32,
    pub polar: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius < 1e-6 {
            return Self { radius: 0.0, azimuth: 0.0, polar: 0.0 };
        }
        Self {
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.radius * sin_polar * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * sin_polar * self.azimuth.cos(),
        )
    }
}

impl OrbitControls {
    pub fn new(limits: OrbitLimits) -> Self {
        Self { limits }
    }

    fn clamp(&self, mut s: Spherical) -> Spherical {
        let l = &self.limits;
        s.azimuth = s.azimuth.clamp(l.min_azimuth, l.max_azimuth);
        s.polar = s.polar.clamp(l.min_polar, l.max_polar).max(1e-6);
        s.radius = s.radius.clamp(l.min_distance, l.max_distance);
        s
    }

    fn apply(&self, camera: &mut Camera, s: Spherical) {
        camera.position = self.limits.target + self.clamp(s).to_offset();
        camera.look_at(self.limits.target);
    }

    /// Drag by a pixel delta; a drag across the full viewport height is one turn
    pub fn rotate(&self, camera: &mut Camera, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let mut s = Spherical::from_offset(camera.position - self.limits.target);
        s.azimuth -= TAU * dx / h * self.limits.rotate_speed;
        s.polar -= TAU * dy / h * self.limits.rotate_speed;
        self.apply(camera, s);
    }

    /// Wheel dolly, positive delta moves away from the target
    pub fn zoom(&self, camera: &mut Camera, delta_y: f32) {
        if delta_y == 0.0 {
            return;
        }
        let mut s = Spherical::from_offset(camera.position - self.limits.target);
        if delta_y > 0.0 {
            s.radius /= self.limits.zoom_scale;
        } else {
            s.radius *= self.limits.zoom_scale;
        }
        self.apply(camera, s);
    }
}
