//! The `Directivity` sum type (spec §3/§4.5): one variant per receive
//! pattern, dispatching `receive_add` on the tag rather than through a
//! virtual hierarchy (spec §9, "Polymorphic directivity -> tagged variant").

mod ambisonic;
mod binaural;
mod butterworth;
mod database;
mod spherical_head;

pub use ambisonic::AmbisonicConvention;
pub use binaural::{Ear, FirBinauralState};
pub use database::{HeadRefOrientation, HrirDatabaseHandle, HrirDatabaseKind};
pub use spherical_head::SphericalHeadParams;

use aural_buffer::BufferMut;
use aural_core::Sample;

use crate::point::Point;

const MONO_CHANNEL: usize = 0;

/// Angle between `point` and the receiver's facing axis (+x), per the
/// `AngleBetweenPoints` convention the trig/tan directivities use.
fn angle_from_x_axis(point: Point) -> f64 {
    let norm = point.norm();
    if norm == 0.0 {
        return 0.0;
    }
    (point.x() / norm).clamp(-1.0, 1.0).acos()
}

/// A directivity pattern: a mono microphone shape, an ambisonic encoder, or
/// one of the binaural (two-ear FIR) variants. Cloning a `Directivity`
/// duplicates its filter state, which is exactly what [`crate::receiver::Receiver::new`]
/// needs to give every incoming wave an independent instance.
#[derive(Debug, Clone)]
pub enum Directivity<S: Sample> {
    Omni { gain: S },
    Trig { coefficients: Vec<S> },
    Tan { base_angle: f64 },
    Ambisonic { max_degree: usize, convention: AmbisonicConvention },
    FirBinaural { state: FirBinauralState<S>, brir: binaural::BrirFn<S> },
    DatabaseBinaural { state: FirBinauralState<S>, database: HrirDatabaseHandle<S>, head_ref: HeadRefOrientation },
    SphericalHeadBinaural { state: FirBinauralState<S>, params: SphericalHeadParams },
}

impl<S: Sample> Directivity<S> {
    pub fn omni(gain: S) -> Self {
        Self::Omni { gain }
    }

    pub fn trig(coefficients: Vec<S>) -> Self {
        Self::Trig { coefficients }
    }

    pub fn tan(base_angle: f64) -> Self {
        Self::Tan { base_angle }
    }

    pub fn ambisonic(max_degree: usize, convention: AmbisonicConvention) -> Self {
        Self::Ambisonic { max_degree, convention }
    }

    pub fn fir_binaural(ir_length: usize, update_length_samples: usize, brir: binaural::BrirFn<S>) -> Self {
        Self::FirBinaural { state: FirBinauralState::new(ir_length, update_length_samples), brir }
    }

    pub fn database_binaural(
        database: HrirDatabaseHandle<S>,
        head_ref: HeadRefOrientation,
        update_length_samples: usize,
    ) -> Self {
        let ir_length = database.hrir_length();
        Self::DatabaseBinaural { state: FirBinauralState::new(ir_length, update_length_samples), database, head_ref }
    }

    pub fn spherical_head_binaural(params: SphericalHeadParams, update_length_samples: usize) -> Self {
        Self::SphericalHeadBinaural { state: FirBinauralState::new(params.ir_length, update_length_samples), params }
    }

    /// Accumulate `input`, arriving from `relative_point` in the receiver's
    /// local frame, into `output`. Never overwrites `output`.
    pub fn receive_add<B: BufferMut<S>>(&mut self, input: &[S], relative_point: Point, output: &mut B) {
        match self {
            Self::Omni { gain } => {
                let scaled: Vec<S> = input.iter().map(|&x| x * *gain).collect();
                output.add_samples(MONO_CHANNEL, 0, &scaled);
            }
            Self::Trig { coefficients } => {
                let phi = angle_from_x_axis(relative_point);
                let cos_phi = phi.cos();
                let mut gain = 0.0_f64;
                for (i, c) in coefficients.iter().enumerate() {
                    gain += c.to_f64() * cos_phi.powi(i as i32);
                }
                let gain = S::from_f64(gain);
                let scaled: Vec<S> = input.iter().map(|&x| x * gain).collect();
                output.add_samples(MONO_CHANNEL, 0, &scaled);
            }
            Self::Tan { base_angle } => {
                let phi = angle_from_x_axis(relative_point);
                let gain = if phi < *base_angle {
                    let denom = (*base_angle - phi).sin();
                    1.0 / (1.0 + (phi.sin() / denom).powi(2)).sqrt()
                } else {
                    0.0
                };
                let gain = S::from_f64(gain);
                let scaled: Vec<S> = input.iter().map(|&x| x * gain).collect();
                output.add_samples(MONO_CHANNEL, 0, &scaled);
            }
            Self::Ambisonic { max_degree, convention } => {
                ambisonic::receive_add(*max_degree, *convention, input, relative_point, output);
            }
            Self::FirBinaural { state, brir } => {
                state.receive_add_with(input, relative_point, output, |ear, point| brir(ear, point));
            }
            Self::DatabaseBinaural { state, database, head_ref } => {
                let (azimuth_deg, elevation_deg) = head_reference_angles(*head_ref, relative_point);
                state.receive_add_with(input, relative_point, output, |ear, _point| {
                    database.nearest_brir(ear, azimuth_deg, elevation_deg)
                });
            }
            Self::SphericalHeadBinaural { state, params } => {
                state.receive_add_with(input, relative_point, output, |ear, point| {
                    spherical_head::brir(params, ear, point)
                });
            }
        }
    }

    pub fn reset_state(&mut self) {
        match self {
            Self::Omni { .. } | Self::Trig { .. } | Self::Tan { .. } | Self::Ambisonic { .. } => {}
            Self::FirBinaural { state, .. }
            | Self::DatabaseBinaural { state, .. }
            | Self::SphericalHeadBinaural { state, .. } => state.reset(),
        }
    }
}

/// Azimuth/elevation (in degrees) of `relative_point` under the receiver's
/// chosen head-reference axis.
fn head_reference_angles(head_ref: HeadRefOrientation, relative_point: Point) -> (f64, f64) {
    let (facing_x, facing_y) = match head_ref {
        HeadRefOrientation::FacingX => (relative_point.x(), relative_point.y()),
        HeadRefOrientation::FacingY => (relative_point.y(), -relative_point.x()),
    };
    let azimuth = facing_y.atan2(facing_x).to_degrees();
    let norm = relative_point.norm();
    let elevation = if norm > 0.0 { (relative_point.z() / norm).asin().to_degrees() } else { 0.0 };
    (azimuth, elevation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aural_buffer::Buffer;

    #[test]
    fn omni_scales_and_accumulates() {
        let mut d: Directivity<f64> = Directivity::omni(0.5);
        let mut buf: Buffer<f64> = Buffer::new(1, 2);
        d.receive_add(&[1.0, 2.0], Point::new(1.0, 0.0, 0.0), &mut buf);
        assert_eq!(buf.channel_const_reference(0), &[0.5, 1.0]);
        d.receive_add(&[1.0, 1.0], Point::new(1.0, 0.0, 0.0), &mut buf);
        assert_eq!(buf.channel_const_reference(0), &[1.0, 1.5]);
    }

    #[test]
    fn trig_zeroth_order_is_constant_gain() {
        let mut d: Directivity<f64> = Directivity::trig(vec![0.7]);
        let mut buf: Buffer<f64> = Buffer::new(1, 1);
        d.receive_add(&[1.0], Point::new(0.0, 1.0, 0.0), &mut buf);
        assert!((buf.get(0, 0) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn tan_directivity_is_zero_beyond_base_angle() {
        let mut d: Directivity<f64> = Directivity::tan(std::f64::consts::FRAC_PI_4);
        let mut buf: Buffer<f64> = Buffer::new(1, 1);
        d.receive_add(&[1.0], Point::new(-1.0, 0.0, 0.0), &mut buf);
        assert_eq!(buf.get(0, 0), 0.0);
    }

    #[test]
    fn tan_directivity_is_unity_on_axis() {
        let mut d: Directivity<f64> = Directivity::tan(std::f64::consts::FRAC_PI_4);
        let mut buf: Buffer<f64> = Buffer::new(1, 1);
        d.receive_add(&[1.0], Point::new(1.0, 0.0, 0.0), &mut buf);
        assert!((buf.get(0, 0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fir_binaural_retargets_coefficients_only_on_direction_change() {
        fn flat_brir(_ear: Ear, _point: Point) -> Vec<f64> {
            vec![1.0, 0.0]
        }
        let mut d: Directivity<f64> = Directivity::fir_binaural(2, 0, flat_brir);
        let mut buf: Buffer<f64> = Buffer::new(2, 2);
        d.receive_add(&[1.0, 0.0], Point::new(1.0, 0.0, 0.0), &mut buf);
        assert_eq!(buf.get(0, 0), 1.0);
        assert_eq!(buf.get(1, 0), 1.0);
    }
}
