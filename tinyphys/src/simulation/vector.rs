//! 2D vector type used throughout the engine
//!
//! `NVec2` is a plain nalgebra vector, so add/sub/scale/negate/dot,
//! `norm` and `norm_squared` come for free. The [`Planar`] trait adds the
//! handful of 2D-only operations nalgebra does not provide, plus a
//! normalize that never divides by zero.

use std::f64::consts::PI;

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// 2D-specific helpers on top of nalgebra's [`Vector2`]
pub trait Planar: Sized {
    /// Build a vector from a length and an angle measured from +x
    fn from_polar(magnitude: f64, angle: f64) -> Self;

    /// z-component of the 3D cross product
    fn cross2(&self, other: &Self) -> f64;

    /// Unit vector in the same direction, zero vector for zero input
    fn normalized_or_zero(&self) -> Self;

    /// In-place version of [`Planar::normalized_or_zero`]; a zero vector is left untouched
    fn normalize_or_zero_mut(&mut self);

    /// Counter-clockwise rotation by `angle` radians
    fn rotated(&self, angle: f64) -> Self;

    /// Angle from the positive x-axis, in (-pi, pi]
    fn heading(&self) -> f64;

    /// Signed angle from `self` to `other`
    fn angle_to(&self, other: &Self) -> f64;

    /// Euclidean distance between two points
    fn distance_to(&self, other: &Self) -> f64;
}

impl Planar for NVec2 {
    fn from_polar(magnitude: f64, angle: f64) -> Self {
        NVec2::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    fn cross2(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    fn normalized_or_zero(&self) -> Self {
        // try_normalize only fails when |v| <= min_norm, i.e. exactly zero here
        self.try_normalize(0.0).unwrap_or_else(NVec2::zeros)
    }

    fn normalize_or_zero_mut(&mut self) {
        let mag = self.norm();
        if mag != 0.0 {
            *self /= mag;
        }
    }

    fn rotated(&self, angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        NVec2::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    fn heading(&self) -> f64 {
        // atan2(-0.0, x < 0) is -pi
        let angle = self.y.atan2(self.x);
        if angle == -PI { PI } else { angle }
    }

    fn angle_to(&self, other: &Self) -> f64 {
        self.cross2(other).atan2(self.dot(other))
    }

    fn distance_to(&self, other: &Self) -> f64 {
        (self - other).norm()
    }
}
