use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Canvas size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 { self.width / self.height } else { 1.0 }
    }

    /// Screen pixel (0,0 = top left) to normalized device coordinates
    pub fn to_ndc(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        ((screen_x / w) * 2.0 - 1.0, -(screen_y / h) * 2.0 + 1.0)
    }
}

/// A ray in world space, direction normalized
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalize_or_zero() }
    }

    /// Unproject a normalized device coordinate through the inverse view-projection
    pub fn from_ndc(ndc_x: f32, ndc_y: f32, inv_view_proj: Mat4) -> Self {
        // glam perspective_rh maps depth to 0..1
        let near = unproject(Vec4::new(ndc_x, ndc_y, 0.0, 1.0), inv_view_proj);
        let far = unproject(Vec4::new(ndc_x, ndc_y, 1.0, 1.0), inv_view_proj);
        Self::new(near, far - near)
    }
}

fn unproject(point: Vec4, inv_view_proj: Mat4) -> Vec3 {
    let p = inv_view_proj * point;
    if p.w.abs() < 1e-10 { p.truncate() } else { p.truncate() / p.w }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min: min.min(max), max: min.max(max) }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }

    /// Slab test. Returns the entry distance along the ray, 0 when the origin is inside.
    /// Boxes behind the origin, or only touching it, are misses.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir.abs() < 1e-12 {
                // Parallel to this slab
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        if t_max <= 0.0 || t_min >= t_max {
            return None;
        }
        Some(t_min)
    }
}
