//! Shared state and dispatch for the binaural directivity family
//! (`FirBinaural`, `DatabaseBinaural`, `SphericalHeadBinaural`): all three
//! share the "two FIR filters, retargeted when the source direction changes"
//! shape described by spec §4.5, differing only in where `get_brir` sources
//! its impulse responses from.

use aural_buffer::{BufferMut, Filter, FirFilter};
use aural_core::Sample;

use crate::point::Point;

/// Which ear a binaural directivity is computing an impulse response for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ear {
    Left,
    Right,
}

/// The output channel each ear writes into.
pub const LEFT_CHANNEL: usize = 0;
pub const RIGHT_CHANNEL: usize = 1;

/// A plain function pointer hook for the generic `FirBinaural` variant. A
/// bare fn pointer (rather than a boxed closure) is what lets `Directivity`
/// stay `Clone` — `Receiver::new` clones the prototype once per incoming
/// wave.
pub type BrirFn<S> = fn(Ear, Point) -> Vec<S>;

/// Two cross-fadable FIR filters plus the direction they were last computed
/// for; embedded in every binaural `Directivity` variant.
#[derive(Debug, Clone)]
pub struct FirBinauralState<S: Sample> {
    left: FirFilter<S>,
    right: FirFilter<S>,
    previous_point: Option<Point>,
    update_length_samples: usize,
}

impl<S: Sample> FirBinauralState<S> {
    pub fn new(ir_length: usize, update_length_samples: usize) -> Self {
        Self {
            left: FirFilter::new(ir_length),
            right: FirFilter::new(ir_length),
            previous_point: None,
            update_length_samples,
        }
    }

    /// Run `input` through both ear filters, retargeting their coefficients
    /// first if `relative_point` differs from the direction they were last
    /// computed for.
    pub fn receive_add_with<B, F>(&mut self, input: &[S], relative_point: Point, output: &mut B, mut get_brir: F)
    where
        B: BufferMut<S>,
        F: FnMut(Ear, Point) -> Vec<S>,
    {
        if self.previous_point != Some(relative_point) {
            let new_left = get_brir(Ear::Left, relative_point);
            let new_right = get_brir(Ear::Right, relative_point);
            self.left.set_coefficients(&new_left, self.update_length_samples);
            self.right.set_coefficients(&new_right, self.update_length_samples);
            self.previous_point = Some(relative_point);
        }
        output.filter_add_samples(LEFT_CHANNEL, 0, input, &mut self.left);
        output.filter_add_samples(RIGHT_CHANNEL, 0, input, &mut self.right);
    }

    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.previous_point = None;
    }
}
