//! Rectangular (cuboid) room geometry: image-source positions, first-order
//! reflection points, and per-wall absorption filters (spec §4.6).

use aural_buffer::{Filter, FirFilter};
use aural_core::Sample;

use crate::point::Point;

/// The six walls of a cuboid room, in the canonical order the spec fixes
/// for wall-filter vectors and ISM attenuation products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    X1,
    X2,
    Y1,
    Y2,
    Z1,
    Z2,
}

impl Wall {
    pub const CANONICAL_ORDER: [Wall; 6] = [Wall::X1, Wall::X2, Wall::Y1, Wall::Y2, Wall::Z1, Wall::Z2];
}

/// An axis-aligned box room: three positive dimensions, an origin corner,
/// and one absorption filter per wall in [`Wall::CANONICAL_ORDER`].
#[derive(Debug, Clone)]
pub struct CuboidRoom<S: Sample> {
    dimensions: Point,
    origin: Point,
    wall_filters: [FirFilter<S>; 6],
}

impl<S: Sample> CuboidRoom<S> {
    /// Build a room with the given (x, y, z) dimensions, an origin corner,
    /// and six wall-filter prototypes in canonical order.
    pub fn new(dimensions: Point, origin: Point, wall_filters: [FirFilter<S>; 6]) -> Self {
        assert!(
            dimensions.x() > 0.0 && dimensions.y() > 0.0 && dimensions.z() > 0.0,
            "room dimensions must be strictly positive"
        );
        Self { dimensions, origin, wall_filters }
    }

    /// A room with unit-gain (non-absorbing) walls, each carrying a single
    /// coefficient `gain`.
    pub fn rigid(dimensions: Point, origin: Point, gain: S) -> Self {
        let filters = std::array::from_fn(|_| FirFilter::from_coefficients(vec![gain]));
        Self::new(dimensions, origin, filters)
    }

    #[inline]
    pub fn dimensions(&self) -> Point {
        self.dimensions
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn wall_filter(&self, wall: Wall) -> &FirFilter<S> {
        &self.wall_filters[wall as usize]
    }

    pub fn wall_filter_mut(&mut self, wall: Wall) -> &mut FirFilter<S> {
        &mut self.wall_filters[wall as usize]
    }

    /// Image of `source` mirrored `mx`/`my`/`mz` lattice periods and
    /// `px`/`py`/`pz` parity flips across each axis: the full lattice of
    /// mirror images the image-source method enumerates.
    pub fn image_source_position(&self, source: Point, mx: i32, my: i32, mz: i32, px: bool, py: bool, pz: bool) -> Point {
        let parity = |p: bool, s: f64| if p { -s } else { s };
        Point::new(
            parity(px, source.x()) + 2.0 * mx as f64 * self.dimensions.x(),
            parity(py, source.y()) + 2.0 * my as f64 * self.dimensions.y(),
            parity(pz, source.z()) + 2.0 * mz as f64 * self.dimensions.z(),
        )
    }

    /// Intersection of the line from `observer` to the first-order image of
    /// `source` across `wall`, with that wall's plane.
    pub fn reflection_point(&self, wall: Wall, source: Point, observer: Point) -> Point {
        let (mx, my, mz, px, py, pz) = match wall {
            Wall::X1 => (0, 0, 0, true, false, false),
            Wall::X2 => (1, 0, 0, true, false, false),
            Wall::Y1 => (0, 0, 0, false, true, false),
            Wall::Y2 => (0, 1, 0, false, true, false),
            Wall::Z1 => (0, 0, 0, false, false, true),
            Wall::Z2 => (0, 0, 1, false, false, true),
        };
        let image = self.image_source_position(source, mx, my, mz, px, py, pz);
        let plane = match wall {
            Wall::X1 => 0.0,
            Wall::X2 => self.dimensions.x(),
            Wall::Y1 => 0.0,
            Wall::Y2 => self.dimensions.y(),
            Wall::Z1 => 0.0,
            Wall::Z2 => self.dimensions.z(),
        };
        let axis = match wall {
            Wall::X1 | Wall::X2 => 0,
            Wall::Y1 | Wall::Y2 => 1,
            Wall::Z1 | Wall::Z2 => 2,
        };
        let d = observer - image;
        let dc = d_component(d, axis);
        let t = if dc == 0.0 { 0.0 } else { (plane - d_component(image, axis)) / dc };
        Point::new(image.x() + t * d.x(), image.y() + t * d.y(), image.z() + t * d.z())
    }

    /// The six first-order reflection points between `source` and `observer`,
    /// one per wall, in canonical order.
    pub fn get_boundary_points(&self, source: Point, observer: Point) -> [Point; 6] {
        std::array::from_fn(|i| self.reflection_point(Wall::CANONICAL_ORDER[i], source, observer))
    }

    /// The six wall-filter prototypes in canonical order.
    pub fn get_boundary_filters(&self) -> &[FirFilter<S>; 6] {
        &self.wall_filters
    }

    /// Whether `p` lies strictly inside the room, `wall_distance` away from
    /// every wall.
    pub fn is_point_in_room(&self, p: Point, wall_distance: f64) -> bool {
        p.x() > wall_distance
            && p.x() < self.dimensions.x() - wall_distance
            && p.y() > wall_distance
            && p.y() < self.dimensions.y() - wall_distance
            && p.z() > wall_distance
            && p.z() < self.dimensions.z() - wall_distance
    }

    /// Sabine reverberation-time estimate in seconds. Advisory: assumes each
    /// wall filter is a single-tap broadband gain; a caller with frequency-
    /// dependent absorption must supply its own `Aᵢ·αᵢ` sum instead.
    pub fn sabine_rt60(&self) -> f64 {
        let volume = self.dimensions.x() * self.dimensions.y() * self.dimensions.z();
        let areas = [
            self.dimensions.y() * self.dimensions.z(),
            self.dimensions.y() * self.dimensions.z(),
            self.dimensions.x() * self.dimensions.z(),
            self.dimensions.x() * self.dimensions.z(),
            self.dimensions.x() * self.dimensions.y(),
            self.dimensions.x() * self.dimensions.y(),
        ];
        let total_absorption: f64 = self
            .wall_filters
            .iter()
            .zip(areas)
            .map(|(f, area)| {
                let beta = f.coefficients().first().copied().unwrap_or(S::ONE).to_f64();
                let alpha = 1.0 - beta * beta;
                area * alpha
            })
            .sum();
        if total_absorption <= 0.0 {
            return f64::INFINITY;
        }
        0.161 * volume / total_absorption
    }
}

fn d_component(d: Point, axis: usize) -> f64 {
    [d.x(), d.y(), d.z()][axis]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonpositive_dimensions() {
        let result = std::panic::catch_unwind(|| {
            CuboidRoom::<f64>::rigid(Point::new(0.0, 1.0, 1.0), Point::ORIGIN, 1.0)
        });
        assert!(result.is_err());
    }

    #[test]
    fn image_source_identity_at_zero_lattice_and_no_parity() {
        let room = CuboidRoom::<f64>::rigid(Point::new(4.0, 3.0, 2.5), Point::ORIGIN, 1.0);
        let s = Point::new(1.0, 1.0, 1.0);
        let image = room.image_source_position(s, 0, 0, 0, false, false, false);
        assert_eq!(image, s);
    }

    #[test]
    fn image_source_reflects_across_x1_with_px_true() {
        let room = CuboidRoom::<f64>::rigid(Point::new(4.0, 3.0, 2.5), Point::ORIGIN, 1.0);
        let s = Point::new(1.0, 1.0, 1.0);
        let image = room.image_source_position(s, 0, 0, 0, true, false, false);
        assert_eq!(image.x(), -1.0);
        assert_eq!(image.y(), 1.0);
    }

    #[test]
    fn reflection_point_lies_on_wall_plane() {
        let room = CuboidRoom::<f64>::rigid(Point::new(4.0, 3.0, 2.5), Point::ORIGIN, 1.0);
        let s = Point::new(1.0, 1.0, 1.0);
        let o = Point::new(3.0, 2.0, 1.0);
        let p = room.reflection_point(Wall::X2, s, o);
        assert!((p.x() - room.dimensions().x()).abs() < 1e-9);
    }

    #[test]
    fn is_point_in_room_is_strict() {
        let room = CuboidRoom::<f64>::rigid(Point::new(4.0, 3.0, 2.5), Point::ORIGIN, 1.0);
        assert!(room.is_point_in_room(Point::new(2.0, 1.5, 1.0), 0.5));
        assert!(!room.is_point_in_room(Point::new(0.5, 1.5, 1.0), 0.5));
    }

    #[test]
    fn rigid_walls_give_infinite_rt60() {
        let room = CuboidRoom::<f64>::rigid(Point::new(4.0, 3.0, 2.5), Point::ORIGIN, 1.0);
        assert!(room.sabine_rt60().is_infinite());
    }

    #[test]
    fn absorbing_walls_give_finite_rt60() {
        let room = CuboidRoom::<f64>::rigid(Point::new(4.0, 3.0, 2.5), Point::ORIGIN, 0.5);
        assert!(room.sabine_rt60().is_finite());
        assert!(room.sabine_rt60() > 0.0);
    }
}
