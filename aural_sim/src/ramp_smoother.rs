//! Sample-accurate linear ramps for attenuation, latency, and FIR
//! coefficients (`PropagationLine` carries two of these directly; `FirFilter`
//! implements its own coefficient-array version of the same idea).

/// A value that linearly ramps to a target over an exact integer sample
/// count. The defining invariant: given target `T` installed with ramp
/// length `R`, `current == T` exactly after `R` calls to
/// [`get_next_value`](Self::get_next_value) — no floating-point drift at the
/// end of the ramp.
#[derive(Debug, Clone, Copy)]
pub struct RampSmoother {
    current: f64,
    target: f64,
    step: f64,
    samples_remaining: usize,
}

impl RampSmoother {
    /// Create a smoother already at rest at `initial_value`.
    pub fn new(initial_value: f64) -> Self {
        Self {
            current: initial_value,
            target: initial_value,
            step: 0.0,
            samples_remaining: 0,
        }
    }

    /// Install a new target, to be reached after `samples` calls to
    /// `get_next_value(1)`. `samples == 0` snaps immediately.
    #[inline]
    pub fn set_target(&mut self, target: f64, samples: usize) {
        if samples == 0 {
            self.current = target;
            self.target = target;
            self.step = 0.0;
            self.samples_remaining = 0;
        } else {
            self.target = target;
            self.step = (target - self.current) / samples as f64;
            self.samples_remaining = samples;
        }
    }

    /// Advance by `n` samples and return the resulting value.
    #[inline]
    pub fn get_next_value(&mut self, n: usize) -> f64 {
        for _ in 0..n {
            self.advance_one();
        }
        self.current
    }

    #[inline]
    fn advance_one(&mut self) {
        if self.samples_remaining > 0 {
            self.current += self.step;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                self.current = self.target;
            }
        }
    }

    /// Advance one sample at a time, writing `dst[i] += src[i] * value_i`
    /// for the bulk-read fast path (`PropagationLine::read`), so the ramp
    /// and the multiply-accumulate happen in lockstep without an
    /// intermediate allocation.
    pub fn get_next_values_multiply(&mut self, src: &[f64], dst: &mut [f64]) {
        assert_eq!(src.len(), dst.len());
        for (d, s) in dst.iter_mut().zip(src) {
            *d += *s * self.get_next_value(1);
        }
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// `true` until the installed target has been reached exactly.
    #[inline]
    pub fn is_updating(&self) -> bool {
        self.samples_remaining > 0
    }
}

impl Default for RampSmoother {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_value_has_no_ramp() {
        let mut s = RampSmoother::new(1.0);
        assert_eq!(s.current(), 1.0);
        assert_eq!(s.get_next_value(1), 1.0);
        assert!(!s.is_updating());
    }

    #[test]
    fn ramp_reaches_target_exactly_after_r_ticks() {
        let mut s = RampSmoother::new(0.0);
        s.set_target(1.0, 4);

        assert!(s.is_updating());
        assert_eq!(s.get_next_value(1), 0.25);
        assert_eq!(s.get_next_value(1), 0.5);
        assert_eq!(s.get_next_value(1), 0.75);
        assert_eq!(s.get_next_value(1), 1.0);
        assert!(!s.is_updating());
    }

    #[test]
    fn zero_sample_ramp_snaps() {
        let mut s = RampSmoother::new(0.0);
        s.set_target(1.0, 0);
        assert_eq!(s.current(), 1.0);
        assert!(!s.is_updating());
    }

    #[test]
    fn retarget_mid_ramp() {
        let mut s = RampSmoother::new(0.0);
        s.set_target(1.0, 4);
        s.get_next_value(1); // 0.25
        s.get_next_value(1); // 0.5

        s.set_target(0.0, 2);
        assert_eq!(s.get_next_value(1), 0.25);
        assert_eq!(s.get_next_value(1), 0.0);
    }

    #[test]
    fn get_next_value_advances_by_n_at_once() {
        let mut s = RampSmoother::new(0.0);
        s.set_target(4.0, 4);
        assert_eq!(s.get_next_value(4), 4.0);
        assert!(!s.is_updating());
    }

    #[test]
    fn multiply_variant_matches_scalar_loop() {
        let mut a = RampSmoother::new(0.0);
        a.set_target(1.0, 4);
        let mut b = a;
        let src = [1.0, 1.0, 1.0, 1.0];
        let mut dst = [0.0; 4];
        a.get_next_values_multiply(&src, &mut dst);
        let scalar: Vec<f64> = (0..4).map(|_| b.get_next_value(1)).collect();
        for i in 0..4 {
            assert!((dst[i] - scalar[i]).abs() < 1e-12);
        }
    }
}
