//! Explicit rotation handedness.

/// Coordinate-system handedness, made explicit at every rotation site
/// instead of assumed globally — a receiver may be right-handed while a
/// room's coordinate system is modeled left-handed, or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handedness {
    #[default]
    Right,
    Left,
}
