//! Horizontal higher-order-ambisonics encoding (spec §4.5 / §6).

use aural_buffer::{bformat, BufferMut};
use aural_core::Sample;

use crate::point::Point;

/// B-format channel normalization. `Sqrt2` is the spec's literal formula;
/// `N3D` additionally weights each degree by `sqrt(2d+1)`, the standard
/// full-3D normalization factor (the spec names both conventions but only
/// gives the `Sqrt2` formula explicitly — this extension is recorded as an
/// open-question resolution in `DESIGN.md`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbisonicConvention {
    #[default]
    Sqrt2,
    N3D,
}

/// Encode `input` into the horizontal B-format channels of `output`, up to
/// `max_degree`, for a plane wave arriving from `relative_point`.
pub fn receive_add<S: Sample, B: BufferMut<S>>(
    max_degree: usize,
    convention: AmbisonicConvention,
    input: &[S],
    relative_point: Point,
    output: &mut B,
) {
    let phi = relative_point.azimuth();

    output.add_samples(bformat::channel_id(0, 0), 0, input);

    let sqrt2 = S::from_f64(std::f64::consts::SQRT_2);
    for degree in 1..=max_degree {
        let weight = match convention {
            AmbisonicConvention::Sqrt2 => sqrt2,
            AmbisonicConvention::N3D => sqrt2 * S::from_f64((2 * degree + 1) as f64).sqrt(),
        };
        let cos_term = S::from_f64((degree as f64 * phi).cos()) * weight;
        let sin_term = S::from_f64((degree as f64 * phi).sin()) * weight;

        let plus_channel = bformat::channel_id(degree, 1);
        let minus_channel = bformat::channel_id(degree, -1);

        let scaled_cos: Vec<S> = input.iter().map(|&x| x * cos_term).collect();
        let scaled_sin: Vec<S> = input.iter().map(|&x| x * sin_term).collect();
        output.add_samples(plus_channel, 0, &scaled_cos);
        output.add_samples(minus_channel, 0, &scaled_sin);
    }
}
