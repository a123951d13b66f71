//! # Aural Buffer
//!
//! Multichannel sample storage for the aural spatial audio engine: an owning
//! [`Buffer`] and a borrowing [`BufferView`] over the same operations, a
//! B-format channel-numbering helper, and the [`Filter`] trait (plus one
//! concrete [`FirFilter`](filter::FirFilter) implementation of it) that
//! propagation lines and the ISM convolver run samples through.

pub mod bformat;
pub mod buffer;
pub mod buffer_mut;
pub mod filter;
pub mod view;

pub use buffer::Buffer;
pub use buffer_mut::BufferMut;
pub use filter::{Filter, FirFilter};
pub use view::BufferView;
