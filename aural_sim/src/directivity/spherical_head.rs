//! Duda's rigid-sphere head model for the `SphericalHeadBinaural`
//! directivity: a frequency-domain pressure response evaluated bin-by-bin,
//! inverse-FFT'd, and circularly shifted to center the impulse response.
//!
//! The per-bin series (`Q₋₁`, `Q₀`, first `term`) reproduces the spec's
//! literal recursion; the higher-order terms extend it via the three-term
//! recurrence Duda & Martens' derivation uses for this family of rational
//! functions (`Qₘ = -(2m-1)·z·Qₘ₋₁ - Qₘ₋₂`), since the source material
//! available here stops at the first term. See `DESIGN.md`.

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

use aural_core::Sample;

use super::binaural::Ear;
use crate::point::Point;

const MAX_TERMS: usize = 256;

/// Parameters for a rigid-sphere binaural directivity.
#[derive(Debug, Clone, Copy)]
pub struct SphericalHeadParams {
    pub sphere_radius: f64,
    pub ears_angle: f64,
    pub ir_length: usize,
    pub sampling_frequency: f64,
    pub sound_speed: f64,
    pub convergence_threshold: f64,
}

impl SphericalHeadParams {
    pub fn new(sphere_radius: f64, ears_angle: f64, ir_length: usize, sampling_frequency: f64) -> Self {
        Self {
            sphere_radius,
            ears_angle,
            ir_length,
            sampling_frequency,
            sound_speed: crate::constants::SOUND_SPEED,
            convergence_threshold: 0.0001,
        }
    }
}

fn legendre(m: usize, x: f64) -> f64 {
    match m {
        0 => 1.0,
        1 => x,
        _ => {
            let mut p0 = 1.0;
            let mut p1 = x;
            for n in 2..=m {
                let p2 = ((2 * n - 1) as f64 * x * p1 - (n - 1) as f64 * p0) / n as f64;
                p0 = p1;
                p1 = p2;
            }
            p1
        }
    }
}

/// Pressure transfer function at the sphere surface for a point source at
/// distance `r`, direction `theta` from the facing axis, frequency `f`.
fn pressure(a: f64, r: f64, theta: f64, f: f64, c: f64, threshold: f64) -> Complex64 {
    if f <= 0.0 {
        return Complex64::new(1.0, 0.0);
    }
    let mu = 2.0 * PI * f * a / c;
    let rho = r / a;
    let x = theta.cos();
    let i = Complex64::new(0.0, 1.0);

    let zr = Complex64::new(1.0, 0.0) / (i * mu * rho);
    let za = Complex64::new(1.0, 0.0) / (i * mu);

    let mut qr_prev2 = zr; // Q_{-1}
    let mut qr_prev1 = zr * (Complex64::new(1.0, 0.0) - zr); // Q_0
    let mut qa_prev2 = za;
    let mut qa_prev1 = za * (Complex64::new(1.0, 0.0) - za);

    let term0 = qr_prev1 * za / (za * (za - Complex64::new(1.0, 0.0)));
    let mut sum = term0;
    let mut term = term0;

    let mut p_prev2 = 1.0_f64; // P_{-1}, unused beyond m=1 recurrence seed
    let mut p_prev1 = 1.0_f64; // P_0
    let _ = p_prev2;

    for m in 1..MAX_TERMS {
        let qr = -((2 * m - 1) as f64) * zr * qr_prev1 - qr_prev2;
        let qa = -((2 * m - 1) as f64) * za * qa_prev1 - qa_prev2;
        let p_m = legendre(m, x);

        let denom = za * (za * (m as f64) * qa - qa_prev1);
        term = Complex64::new((2 * m + 1) as f64 * p_m, 0.0) * qr / denom;
        sum += term;

        qr_prev2 = qr_prev1;
        qr_prev1 = qr;
        qa_prev2 = qa_prev1;
        qa_prev1 = qa;
        p_prev2 = p_prev1;
        p_prev1 = p_m;
        let _ = p_prev2;

        if term.norm() / sum.norm().max(1e-300) < threshold {
            break;
        }
    }

    sum
}

/// Angle, in the sphere's reference frame, between the incoming direction
/// and the ear at `(pi/2, +-ears_angle)` (spec §4.5).
pub fn ear_theta(relative_point: Point, ears_angle: f64, ear: Ear) -> f64 {
    let ear_azimuth = match ear {
        Ear::Left => ears_angle,
        Ear::Right => -ears_angle,
    };
    let ear_dir = Point::new(ear_azimuth.cos(), ear_azimuth.sin(), 0.0);
    let source_dir = if relative_point.norm() > 0.0 {
        Point::new(
            relative_point.x() / relative_point.norm(),
            relative_point.y() / relative_point.norm(),
            relative_point.z() / relative_point.norm(),
        )
    } else {
        Point::new(1.0, 0.0, 0.0)
    };
    let cos_theta = (ear_dir.dot(&source_dir)).clamp(-1.0, 1.0);
    cos_theta.acos()
}

/// Generate a real-valued, centered impulse response for `ear` at
/// `relative_point`, sampled at `params.sampling_frequency`.
pub fn brir<S: Sample>(params: &SphericalHeadParams, ear: Ear, relative_point: Point) -> Vec<S> {
    let n = params.ir_length.max(2);
    let r = relative_point.norm().max(params.sphere_radius * 1.01);
    let theta = ear_theta(relative_point, params.ears_angle, ear);

    let mut spectrum = vec![Complex64::new(0.0, 0.0); n];
    let bin_hz = params.sampling_frequency / n as f64;
    for (k, bin) in spectrum.iter_mut().enumerate().take(n / 2 + 1) {
        let f = k as f64 * bin_hz;
        *bin = pressure(params.sphere_radius, r, theta, f, params.sound_speed, params.convergence_threshold);
    }
    for k in (n / 2 + 1)..n {
        spectrum[k] = spectrum[n - k].conj();
    }

    let mut planner = FftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut spectrum);

    let scale = 1.0 / n as f64;
    let shift = n / 2;
    (0..n)
        .map(|i| {
            let idx = (i + shift) % n;
            S::from_f64(spectrum[idx].re * scale)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legendre_matches_known_low_order_values() {
        assert_eq!(legendre(0, 0.3), 1.0);
        assert_eq!(legendre(1, 0.3), 0.3);
        assert!((legendre(2, 0.5) - 0.5 * (3.0 * 0.25 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn brir_produces_requested_length() {
        let params = SphericalHeadParams::new(0.0875, 100.0_f64.to_radians(), 64, 44100.0);
        let ir: Vec<f64> = brir(&params, Ear::Left, Point::new(1.0, 0.0, 0.0));
        assert_eq!(ir.len(), 64);
        assert!(ir.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn ear_theta_zero_for_aligned_direction() {
        let theta = ear_theta(Point::new(1.0, 0.0, 0.0), 0.0, Ear::Left);
        assert!(theta.abs() < 1e-9);
    }
}
