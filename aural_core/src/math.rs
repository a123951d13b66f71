//! Scalar math helpers shared across the simulation core.
//!
//! This module provides a [`Real`] trait abstracting over `f32`/`f64` native
//! math operations, plus a couple of free functions the spec's components
//! need directly: `sinc` (Peterson-window RIR interpolation, §4.7) and
//! decibel conversions (diagnostic logging around attenuation clipping).

#![allow(clippy::approx_constant)]
#![allow(clippy::excessive_precision)]

/// Trait for real number types supporting the transcendental operations the
/// simulation core needs, generic over `f32`/`f64`.
pub trait Real: Copy {
    /// Pi (π).
    const PI: Self;

    /// The reciprocal of pi (1/π).
    const INV_PI: Self;

    /// Half of pi (π/2).
    const FRAC_PI_2: Self;

    /// Third of pi (π/3).
    const FRAC_PI_3: Self;

    /// Quarter of pi (π/4).
    const FRAC_PI_4: Self;

    /// Tau; full circle constant (τ = 2π).
    const TAU: Self;

    /// Inverse tau (1/τ = 1/2π).
    const INV_TAU: Self;

    /// The golden ratio (φ).
    const PHI: Self;

    /// Euler's number (e).
    const E: Self;

    /// Square root of 2.
    const SQRT_2: Self;

    /// Inverse square root of 2.
    const INV_SQRT_2: Self;

    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn log10(self) -> Self;
    fn powf(self, exp: Self) -> Self;
    fn powi(self, exp: i32) -> Self;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn floor(self) -> Self;
    fn round(self) -> Self;
    fn fract(self) -> Self;
    fn rem_euclid(self, rhs: Self) -> Self;
}

impl Real for f32 {
    const PI: Self = 3.14159265358979323846264338327950288_f32;
    const INV_PI: Self = 0.318309886183790671537767526745028724_f32;
    const FRAC_PI_2: Self = 1.57079632679489661923132169163975144_f32;
    const FRAC_PI_3: Self = 1.04719755119659774615421446109316763_f32;
    const FRAC_PI_4: Self = 0.785398163397448309615660845819875721_f32;
    const TAU: Self = 6.28318530717958647692528676655900577_f32;
    const INV_TAU: Self = 0.15915494309189533576882414343516084_f32;
    const PHI: Self = 1.618033988749894848204586834365638118_f32;
    const E: Self = 2.71828182845904523536028747135266250_f32;
    const SQRT_2: Self = 1.41421356237309504880168872420969808_f32;
    const INV_SQRT_2: Self = 0.707106781186547524400844362104849039_f32;

    #[inline]
    fn sin(self) -> Self {
        f32::sin(self)
    }
    #[inline]
    fn cos(self) -> Self {
        f32::cos(self)
    }
    #[inline]
    fn tan(self) -> Self {
        f32::tan(self)
    }
    #[inline]
    fn asin(self) -> Self {
        f32::asin(self)
    }
    #[inline]
    fn acos(self) -> Self {
        f32::acos(self)
    }
    #[inline]
    fn atan(self) -> Self {
        f32::atan(self)
    }
    #[inline]
    fn atan2(self, other: Self) -> Self {
        f32::atan2(self, other)
    }
    #[inline]
    fn exp(self) -> Self {
        f32::exp(self)
    }
    #[inline]
    fn ln(self) -> Self {
        f32::ln(self)
    }
    #[inline]
    fn log10(self) -> Self {
        f32::log10(self)
    }
    #[inline]
    fn powf(self, exp: Self) -> Self {
        f32::powf(self, exp)
    }
    #[inline]
    fn powi(self, exp: i32) -> Self {
        f32::powi(self, exp)
    }
    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }
    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }
    #[inline]
    fn floor(self) -> Self {
        f32::floor(self)
    }
    #[inline]
    fn round(self) -> Self {
        f32::round(self)
    }
    #[inline]
    fn fract(self) -> Self {
        f32::fract(self)
    }
    #[inline]
    fn rem_euclid(self, rhs: Self) -> Self {
        f32::rem_euclid(self, rhs)
    }
}

impl Real for f64 {
    const PI: Self = 3.14159265358979323846264338327950288_f64;
    const INV_PI: Self = 0.318309886183790671537767526745028724_f64;
    const FRAC_PI_2: Self = 1.57079632679489661923132169163975144_f64;
    const FRAC_PI_3: Self = 1.04719755119659774615421446109316763_f64;
    const FRAC_PI_4: Self = 0.785398163397448309615660845819875721_f64;
    const TAU: Self = 6.28318530717958647692528676655900577_f64;
    const INV_TAU: Self = 0.15915494309189533576882414343516084_f64;
    const PHI: Self = 1.618033988749894848204586834365638118_f64;
    const E: Self = 2.71828182845904523536028747135266250_f64;
    const SQRT_2: Self = 1.41421356237309504880168872420969808_f64;
    const INV_SQRT_2: Self = 0.707106781186547524400844362104849039_f64;

    #[inline]
    fn sin(self) -> Self {
        f64::sin(self)
    }
    #[inline]
    fn cos(self) -> Self {
        f64::cos(self)
    }
    #[inline]
    fn tan(self) -> Self {
        f64::tan(self)
    }
    #[inline]
    fn asin(self) -> Self {
        f64::asin(self)
    }
    #[inline]
    fn acos(self) -> Self {
        f64::acos(self)
    }
    #[inline]
    fn atan(self) -> Self {
        f64::atan(self)
    }
    #[inline]
    fn atan2(self, other: Self) -> Self {
        f64::atan2(self, other)
    }
    #[inline]
    fn exp(self) -> Self {
        f64::exp(self)
    }
    #[inline]
    fn ln(self) -> Self {
        f64::ln(self)
    }
    #[inline]
    fn log10(self) -> Self {
        f64::log10(self)
    }
    #[inline]
    fn powf(self, exp: Self) -> Self {
        f64::powf(self, exp)
    }
    #[inline]
    fn powi(self, exp: i32) -> Self {
        f64::powi(self, exp)
    }
    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }
    #[inline]
    fn floor(self) -> Self {
        f64::floor(self)
    }
    #[inline]
    fn round(self) -> Self {
        f64::round(self)
    }
    #[inline]
    fn fract(self) -> Self {
        f64::fract(self)
    }
    #[inline]
    fn rem_euclid(self, rhs: Self) -> Self {
        f64::rem_euclid(self, rhs)
    }
}

/// Normalized sinc: `sin(πx)/(πx)`, with `sinc(0) = 1`.
///
/// Used by the ISM's Peterson-window fractional-delay interpolation (§4.7).
#[inline]
pub fn sinc<T: Real + FromF64Like>(x: T) -> T {
    if x.abs() < T::from_f64_like(1e-9) {
        return T::from_f64_like(1.0);
    }
    let px = x * T::PI;
    px.sin() / px
}

/// Convert a linear amplitude ratio to decibels: `20*log10(|x|)`.
#[inline]
pub fn to_db<T: Real + FromF64Like>(x: T) -> T {
    T::from_f64_like(20.0) * x.abs().log10()
}

/// Minimal float-literal conversion, kept separate from [`Sample`](crate::Sample)
/// so this module has no dependency on the sample trait.
pub trait FromF64Like: Real {
    fn from_f64_like(v: f64) -> Self;
}

impl FromF64Like for f32 {
    #[inline]
    fn from_f64_like(v: f64) -> Self {
        v as f32
    }
}

impl FromF64Like for f64 {
    #[inline]
    fn from_f64_like(v: f64) -> Self {
        v
    }
}
