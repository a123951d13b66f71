//! # Aural Sim
//!
//! The simulation core of the aural spatial audio engine: positioned
//! sources and directional receivers connected by variable-latency
//! propagation lines, cuboid room geometry with an image-source RIR
//! builder, and a free-field driver for many-source/many-receiver scenes.

pub mod air_absorption;
pub mod config;
pub mod constants;
pub mod delay_filter;
pub mod directivity;
pub mod error;
pub mod free_field;
pub mod handedness;
pub mod ism;
pub mod point;
pub mod propagation_line;
pub mod quaternion;
pub mod ramp_smoother;
pub mod receiver;
pub mod room;
pub mod source;

pub use directivity::Directivity;
pub use error::{Result, SimError};
pub use free_field::FreeFieldSim;
pub use handedness::Handedness;
pub use ism::ImageSourceMethod;
pub use point::Point;
pub use propagation_line::PropagationLine;
pub use quaternion::Quaternion;
pub use receiver::Receiver;
pub use room::{CuboidRoom, Wall};
pub use source::Source;
