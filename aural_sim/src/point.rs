//! 3D position / direction vector.

use glam::DVec3;

use crate::{handedness::Handedness, quaternion::Quaternion};

/// A 3-tuple of real coordinates, in meters. Used both for absolute
/// positions and for direction/offset vectors (the original library reuses
/// the same "Triplet" type for both; this crate keeps that simplification,
/// per the original's `Triplet == Point` convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(DVec3);

impl Point {
    pub const ORIGIN: Point = Point(DVec3::ZERO);

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.0.distance(other.0)
    }

    #[inline]
    pub fn dot(&self, other: &Point) -> f64 {
        self.0.dot(other.0)
    }

    #[inline]
    pub fn cross(&self, other: &Point) -> Point {
        Point(self.0.cross(other.0))
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.0.length()
    }

    /// Horizontal azimuth in radians, measured from the +x axis toward +y,
    /// in `(-pi, pi]`. Used as `phi` by the ambisonic and trigonometric
    /// directivities.
    #[inline]
    pub fn azimuth(&self) -> f64 {
        self.0.y.atan2(self.0.x)
    }

    /// Polar (elevation) angle from the +z axis, in `[0, pi]`.
    #[inline]
    pub fn polar(&self) -> f64 {
        let r = self.norm();
        if r == 0.0 { 0.0 } else { (self.0.z / r).acos() }
    }

    /// Rotate around `axis` (need not be normalized) by `angle` radians.
    /// `handedness` flips the effective sign of the rotation, since a
    /// positive angle means opposite things in right- vs left-handed frames.
    pub fn rotate_axis_angle(&self, axis: Point, angle: f64, handedness: Handedness) -> Point {
        let signed_angle = match handedness {
            Handedness::Right => angle,
            Handedness::Left => -angle,
        };
        let axis = axis.0.normalize_or_zero();
        let rotation = glam::DQuat::from_axis_angle(axis, signed_angle);
        Point(rotation * self.0)
    }

    /// Rotate by a unit quaternion, honoring handedness.
    pub fn rotate_quaternion(&self, q: &Quaternion, handedness: Handedness) -> Point {
        q.rotate_point(*self, handedness)
    }

    pub(crate) fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    pub(crate) fn from_dvec3(v: DVec3) -> Self {
        Self(v)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point(self.0 - rhs.0)
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point(self.0 + rhs.0)
    }
}
