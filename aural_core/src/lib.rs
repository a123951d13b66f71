//! # Aural Core
//!
//! Foundational numeric types shared by every crate in the `aural` workspace:
//! the [`Sample`] trait abstracting over `f32`/`f64`, the generic [`Buffer`]
//! trait, and a small set of math helpers and a fast PRNG used for
//! image-source delay jitter.

pub mod buffer;
pub mod math;
pub mod random;
pub mod sample;

pub use buffer::Buffer;
pub use math::Real;
pub use random::XorShiftRng;
pub use sample::Sample;
