use std::collections::HashMap;
use std::hash::Hash;

use glam::Vec3;

/// Values that can be interpolated by a [`Tween`]
pub trait Animatable: Copy {
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Animatable for Vec3 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

/// Quadratic ease-out
pub fn power1_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv
}

/// Timed interpolation of one property from a start value to a target
#[derive(Debug, Clone, Copy)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
    pub duration: f32,
    pub elapsed: f32,
}

impl<T: Animatable> Tween<T> {
    pub fn new(from: T, to: T, duration: f32) -> Self {
        Self { from, to, duration: duration.max(0.0), elapsed: 0.0 }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp_to(self.to, power1_out(self.elapsed / self.duration))
    }

    pub fn advance(&mut self, dt: f32) -> T {
        self.elapsed += dt.max(0.0);
        self.value()
    }
}

/// Tweens keyed by the property they drive. Starting a tween on a busy key
/// replaces the running one.
#[derive(Debug, Clone)]
pub struct TweenSet<K, T> {
    active: HashMap<K, Tween<T>>,
}

impl<K: Eq + Hash + Clone, T: Animatable> Default for TweenSet<K, T> {
    fn default() -> Self {
        Self { active: HashMap::new() }
    }
}

impl<K: Eq + Hash + Clone, T: Animatable> TweenSet<K, T> {
    pub fn to(&mut self, key: K, from: T, to: T, duration: f32) {
        self.active.insert(key, Tween::new(from, to, duration));
    }

    pub fn target(&self, key: &K) -> Option<T> {
        self.active.get(key).map(|t| t.to)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Advance every tween and return the current values. Finished tweens
    /// report their final value once and are dropped.
    pub fn advance(&mut self, dt: f32) -> Vec<(K, T)> {
        let values: Vec<(K, T)> = self
            .active
            .iter_mut()
            .map(|(k, tween)| (k.clone(), tween.advance(dt)))
            .collect();
        self.active.retain(|_, tween| !tween.is_finished());
        values
    }
}
