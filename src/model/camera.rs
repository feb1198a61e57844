use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::utils::{Ray, Viewport};

/// Camera position + Euler XYZ rotation snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Pose {
    pub const fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }
}

/// Perspective camera, -Z forward in its local frame
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(pose: Pose, fov_y_deg: f32, viewport: Viewport, z_near: f32, z_far: f32) -> Self {
        Self {
            position: pose.position,
            rotation: pose.rotation,
            fov_y: fov_y_deg.to_radians(),
            aspect: viewport.aspect(),
            z_near,
            z_far,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.position = pose.position;
        self.rotation = pose.rotation;
    }

    pub fn set_aspect(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Turn the camera towards `target`, keeping +Y up
    pub fn look_at(&mut self, target: Vec3) {
        let view = Mat4::look_at_rh(self.position, target, Vec3::Y);
        let (_, rot, _) = view.inverse().to_scale_rotation_translation();
        let (x, y, z) = rot.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far);
        proj * self.view()
    }

    /// Ray from the eye through a screen pixel
    pub fn screen_ray(&self, screen_x: f32, screen_y: f32, viewport: Viewport) -> Ray {
        let (nx, ny) = viewport.to_ndc(screen_x, screen_y);
        Ray::from_ndc(nx, ny, self.view_proj().inverse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_camera() -> Camera {
        Camera::new(Pose::new(Vec3::ZERO, Vec3::ZERO), 75.0, Viewport::new(800.0, 600.0), 0.01, 1000.0)
    }

    #[test]
    fn test_center_ray_follows_forward() {
        let cam = origin_camera();
        let ray = cam.screen_ray(400.0, 300.0, Viewport::new(800.0, 600.0));
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-4), "dir was {:?}", ray.direction);
        assert!(ray.origin.z < 0.0 && ray.origin.z > -0.02, "ray should start at the near plane");
    }

    #[test]
    fn test_top_left_ray_points_up_left() {
        let cam = origin_camera();
        let ray = cam.screen_ray(0.0, 0.0, Viewport::new(800.0, 600.0));
        assert!(ray.direction.x < 0.0 && ray.direction.y > 0.0 && ray.direction.z < 0.0);
    }

    #[test]
    fn test_look_at_faces_target() {
        let mut cam = origin_camera();
        cam.position = Vec3::new(1.0, 0.5, 0.5);
        cam.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!(cam.forward().abs_diff_eq(expected, 1e-4), "forward was {:?}", cam.forward());
    }
}
