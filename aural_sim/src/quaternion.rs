//! Unit quaternion for receiver orientation.

use glam::DQuat;

use crate::{handedness::Handedness, point::Point};

/// A unit quaternion used to transform a world-space direction into
/// receiver-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion(DQuat);

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion(DQuat::IDENTITY);

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn from_axis_angle(axis: Point, angle: f64) -> Self {
        let axis = axis.as_dvec3().normalize_or_zero();
        Self(DQuat::from_axis_angle(axis, angle))
    }

    /// Compose `self` followed by `other`: `other * self` in quaternion
    /// multiplication order, i.e. applying the result rotates as if `self`
    /// were applied first, then `other`.
    pub fn compose(&self, other: &Quaternion) -> Quaternion {
        Quaternion(other.0 * self.0)
    }

    pub fn inverse(&self) -> Quaternion {
        Quaternion(self.0.inverse())
    }

    /// Rotate a point by this quaternion, honoring handedness: a
    /// left-handed frame rotates by the conjugate/inverse instead.
    pub fn rotate_point(&self, p: Point, handedness: Handedness) -> Point {
        let v = p.as_dvec3();
        let rotated = match handedness {
            Handedness::Right => self.0 * v,
            Handedness::Left => self.0.inverse() * v,
        };
        Point::from_dvec3(rotated)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_does_not_rotate() {
        let p = Point::new(1.0, 2.0, 3.0);
        let q = Quaternion::identity();
        let rotated = q.rotate_point(p, Handedness::Right);
        assert!((rotated.x() - p.x()).abs() < 1e-12);
        assert!((rotated.y() - p.y()).abs() < 1e-12);
        assert!((rotated.z() - p.z()).abs() < 1e-12);
    }

    #[test]
    fn inverse_undoes_rotation() {
        let q = Quaternion::from_axis_angle(Point::new(0.0, 0.0, 1.0), 1.234);
        let p = Point::new(1.0, 0.0, 0.0);
        let rotated = q.rotate_point(p, Handedness::Right);
        let back = q.inverse().rotate_point(rotated, Handedness::Right);
        assert!((back.x() - p.x()).abs() < 1e-9);
        assert!((back.y() - p.y()).abs() < 1e-9);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let q = Quaternion::from_axis_angle(Point::new(0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_2);
        let p = Point::new(1.0, 0.0, 0.0);
        let rotated = q.rotate_point(p, Handedness::Right);
        assert!(rotated.x().abs() < 1e-9);
        assert!((rotated.y() - 1.0).abs() < 1e-9);
    }
}
