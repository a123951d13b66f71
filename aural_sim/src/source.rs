//! Positioned point emitter.

use crate::{point::Point, quaternion::Quaternion};

/// A point source in the simulated scene: a position, and an optional
/// orientation for directional emitters. Stateless with respect to audio —
/// all per-sample behavior lives in the [`PropagationLine`](crate::propagation_line::PropagationLine)
/// connecting it to a receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source {
    position: Point,
    orientation: Option<Quaternion>,
}

impl Source {
    pub fn new(position: Point) -> Self {
        Self { position, orientation: None }
    }

    pub fn with_orientation(position: Point, orientation: Quaternion) -> Self {
        Self { position, orientation: Some(orientation) }
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> Option<Quaternion> {
        self.orientation
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_orientation(&mut self, orientation: Option<Quaternion>) {
        self.orientation = orientation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_source_has_no_orientation() {
        let s = Source::new(Point::new(1.0, 2.0, 3.0));
        assert!(s.orientation().is_none());
        assert_eq!(s.position(), Point::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn set_position_updates_in_place() {
        let mut s = Source::new(Point::ORIGIN);
        s.set_position(Point::new(1.0, 0.0, 0.0));
        assert_eq!(s.position(), Point::new(1.0, 0.0, 0.0));
    }
}
