//! A point receiver: a position/orientation pair plus one directivity
//! instance per incoming wave (spec §4.4).

use aural_buffer::BufferMut;
use aural_core::Sample;

use crate::{directivity::Directivity, handedness::Handedness, point::Point, quaternion::Quaternion};

/// Receives sound arriving from one or more sources, converting each
/// incoming wave's world-space direction into a local-frame `receive_add`
/// call on its own [`Directivity`] instance.
///
/// Each incoming wave gets an independent clone of the prototype
/// directivity so that, e.g., a binaural directivity's cross-faded FIR
/// state for wave 0 never interferes with wave 1's.
#[derive(Debug, Clone)]
pub struct Receiver<S: Sample> {
    directivity_instances: Vec<Directivity<S>>,
    position: Point,
    orientation: Quaternion,
    handedness: Handedness,
    bypass: bool,
}

impl<S: Sample> Receiver<S> {
    /// Build a receiver with `max_num_incoming_waves` independent clones of
    /// `directivity_prototype`.
    pub fn new(
        directivity_prototype: Directivity<S>,
        position: Point,
        orientation: Quaternion,
        max_num_incoming_waves: usize,
    ) -> Self {
        assert!(max_num_incoming_waves > 0, "a receiver must accept at least one incoming wave");
        Self {
            directivity_instances: vec![directivity_prototype; max_num_incoming_waves],
            position,
            orientation,
            handedness: Handedness::Right,
            bypass: false,
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }

    #[inline]
    pub fn max_num_incoming_waves(&self) -> usize {
        self.directivity_instances.len()
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_orientation(&mut self, orientation: Quaternion) {
        self.orientation = orientation;
    }

    pub fn set_handedness(&mut self, handedness: Handedness) {
        self.handedness = handedness;
    }

    /// Disable all directional processing: every wave is summed into the
    /// output unmodified, as if the receiver were a perfect omni mic at unity
    /// gain. Useful for debugging a scene's propagation delays/attenuations
    /// in isolation from its directivity model.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
    }

    /// Accumulate `input`, arriving from `world_point` as wave `wave_id`,
    /// into `output`. `wave_id` must be less than
    /// [`Self::max_num_incoming_waves`]; this is a programming error, not a
    /// recoverable condition, so it is asserted rather than returned as a
    /// `Result`.
    pub fn receive_add<B: BufferMut<S>>(&mut self, input: &[S], world_point: Point, wave_id: usize, output: &mut B) {
        assert!(
            wave_id < self.directivity_instances.len(),
            "wave_id {wave_id} exceeds max_num_incoming_waves {}",
            self.directivity_instances.len()
        );

        if world_point == self.position {
            log::warn!("source and receiver are coincident; direction of arrival is undefined, using +x axis");
        }

        if self.bypass {
            output.add_samples(0, 0, input);
            return;
        }

        let world_offset = world_point - self.position;
        let local_point = self.orientation.inverse().rotate_point(world_offset, self.handedness);
        self.directivity_instances[wave_id].receive_add(input, local_point, output);
    }

    /// Reset every wave's directivity state (e.g. FIR filter histories)
    /// without otherwise altering position/orientation/bypass.
    pub fn reset_state(&mut self) {
        for d in &mut self.directivity_instances {
            d.reset_state();
        }
    }
}
