//! Fatal, load-time failures for the simulation core.
//!
//! Only the third error kind the core distinguishes — "fatal failures" —
//! is represented here as a `Result`-returning type. Programming errors
//! (shape mismatches, out-of-range `wave_id`) stay `assert!`/`debug_assert!`
//! at the call site, and environmental warnings (clipped attenuation,
//! coincident source/receiver, missing HRIR file falling back to a default)
//! go through `log::warn!` with processing continuing on a defined,
//! degraded path. See each component's doc comments for which path a given
//! condition takes.

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("HRIR database directory not found: `{0}`")]
    HrirDatabaseNotFound(String),

    #[error("HRIR database directory present but unreadable: `{0}`")]
    HrirDatabaseUnreadable(String),

    #[error("malformed HRIR file `{0}`: {1}")]
    MalformedHrirFile(String, String),

    #[error("fractional-delay read at offset {offset} exceeds max latency {max_latency}")]
    FractionalDelayPastMaxLatency { offset: f64, max_latency: usize },

    #[error("scene configuration error: {0}")]
    InvalidConfig(String),
}
