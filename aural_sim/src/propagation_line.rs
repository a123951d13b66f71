//! Variable-latency, variable-attenuation delay line modeling one acoustic
//! path between a source and a receiver.

use aural_buffer::{Filter, FirFilter};
use aural_core::Sample;

use crate::{
    air_absorption, constants::SOUND_SPEED, delay_filter::DelayFilter, error::Result, ramp_smoother::RampSmoother,
};

/// How a [`PropagationLine`] reads a fractional-sample delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationType {
    /// Read the nearest integer tap.
    #[default]
    Rounding,
    /// Linearly interpolate between the two adjacent taps.
    Linear,
}

/// The distance (in meters) corresponding to a single sample of latency at
/// `sampling_frequency`, used as the default reference distance (the 0 dB
/// point of the 1/r attenuation law).
pub fn one_sample_distance(sampling_frequency: f64) -> f64 {
    SOUND_SPEED / sampling_frequency
}

fn compute_latency_samples(distance: f64, sampling_frequency: f64) -> f64 {
    distance / SOUND_SPEED * sampling_frequency
}

fn sanitise_attenuation(attenuation: f64, allow_gain: bool) -> f64 {
    if !allow_gain && attenuation.abs() > 1.0 {
        log::warn!("propagation line attenuation {attenuation} exceeds unity with allow_gain=false; clipping");
        attenuation.signum()
    } else {
        attenuation
    }
}

/// Models the one-way acoustic path of variable length, at fixed sampling
/// rate, between a source and a receiver: delay, 1/r attenuation, and
/// optional frequency-dependent air absorption, all sample-accurately
/// smoothed when the distance changes.
pub struct PropagationLine<S: Sample> {
    sampling_frequency: f64,
    delay: DelayFilter<S>,
    reference_distance: f64,
    allow_gain: bool,
    distance: f64,
    attenuation_smoother: RampSmoother,
    latency_smoother: RampSmoother,
    air_filters_active: bool,
    air_filter: FirFilter<S>,
    interpolation: InterpolationType,
}

impl<S: Sample> PropagationLine<S> {
    pub fn new(
        distance: f64,
        sampling_frequency: f64,
        max_distance: f64,
        interpolation: InterpolationType,
        air_filters_active: bool,
        allow_gain: bool,
        reference_distance: f64,
    ) -> Self {
        assert!(distance >= 0.0, "distance must be non-negative");
        assert!(sampling_frequency > 0.0, "sampling frequency must be positive");

        let max_latency = compute_latency_samples(max_distance, sampling_frequency).round() as usize;
        let initial_latency = compute_latency_samples(distance, sampling_frequency);
        let delay = DelayFilter::new(initial_latency.round() as usize, max_latency);

        let initial_attenuation = sanitise_attenuation(reference_distance / distance.max(f64::EPSILON), allow_gain);

        let coeffs = air_absorption::nearest_coefficients(distance);
        let air_filter = FirFilter::from_coefficients(coeffs.map(S::from_f64).to_vec());

        Self {
            sampling_frequency,
            delay,
            reference_distance,
            allow_gain,
            distance,
            attenuation_smoother: RampSmoother::new(initial_attenuation),
            latency_smoother: RampSmoother::new(initial_latency),
            air_filters_active,
            air_filter,
            interpolation,
        }
    }

    /// Construct with the spec's documented defaults: 100 m max distance,
    /// rounding interpolation, air filters and gain both disabled, and a
    /// reference distance of one sample of travel.
    pub fn with_defaults(distance: f64, sampling_frequency: f64) -> Self {
        Self::new(
            distance,
            sampling_frequency,
            100.0,
            InterpolationType::Rounding,
            false,
            false,
            one_sample_distance(sampling_frequency),
        )
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[inline]
    pub fn attenuation(&self) -> f64 {
        self.attenuation_smoother.current()
    }

    #[inline]
    pub fn current_latency(&self) -> f64 {
        self.latency_smoother.current()
    }

    #[inline]
    pub fn target_latency(&self) -> f64 {
        self.latency_smoother.target()
    }

    pub fn set_air_filters_active(&mut self, active: bool) {
        self.air_filters_active = active;
    }

    /// Retarget both the latency and the 1/r-law attenuation toward the new
    /// distance, ramping over `ramp_time` seconds rather than snapping; if
    /// air filters are active, their coefficients are retargeted over the
    /// same ramp.
    pub fn set_distance(&mut self, distance: f64, ramp_time: f64) {
        assert!(distance >= 0.0, "distance must be non-negative");
        let ramp_samples = (ramp_time * self.sampling_frequency).round() as usize;

        let target_latency = compute_latency_samples(distance, self.sampling_frequency);
        self.latency_smoother.set_target(target_latency, ramp_samples);

        let target_attenuation =
            sanitise_attenuation(self.reference_distance / distance.max(f64::EPSILON), self.allow_gain);
        self.attenuation_smoother.set_target(target_attenuation, ramp_samples);

        if self.air_filters_active {
            let coeffs = air_absorption::nearest_coefficients(distance).map(S::from_f64);
            self.air_filter.set_coefficients(&coeffs, ramp_samples);
        }

        self.distance = distance;
    }

    /// Override the 1/r-law attenuation directly; a later [`set_distance`](Self::set_distance)
    /// recomputes from the 1/r law again.
    pub fn set_attenuation(&mut self, attenuation: f64, ramp_time: f64) {
        let ramp_samples = (ramp_time * self.sampling_frequency).round() as usize;
        let sanitised = sanitise_attenuation(attenuation, self.allow_gain);
        self.attenuation_smoother.set_target(sanitised, ramp_samples);
    }

    /// Write one input sample, running it through the air-absorption filter
    /// first if active.
    pub fn write(&mut self, sample: S) {
        let x = if self.air_filters_active { self.air_filter.process(sample) } else { sample };
        self.delay.write(x);
    }

    /// Bulk write; runs each sample through the air filter (if active) in
    /// lockstep before storing it in the delay line.
    pub fn write_slice(&mut self, samples: &[S]) {
        for &x in samples {
            self.write(x);
        }
    }

    /// Return the current output sample, without advancing time.
    ///
    /// Fails if the current latency has drifted past the delay line's
    /// `max_latency` (spec §7 kind-3: a fractional-delay request past the
    /// max latency is a fatal, distinguishable failure, not a silent wrap).
    pub fn read(&self) -> Result<S> {
        let attenuation = S::from_f64(self.attenuation_smoother.current());
        let tapped = match self.interpolation {
            InterpolationType::Linear => self.delay.fractional_read_at(self.latency_smoother.current())?,
            InterpolationType::Rounding => self.delay.read_at(self.latency_smoother.current().round() as usize)?,
        };
        Ok(tapped * attenuation)
    }

    /// Bulk read `dst.len()` samples without advancing time. If no ramp is
    /// in progress and interpolation is [`InterpolationType::Rounding`], uses
    /// the fast path (bulk delay read, then a scalar multiply); otherwise
    /// iterates per sample, advancing *copies* of the smoothers so the
    /// preview does not perturb state — the real advance happens in the
    /// paired [`tick`](Self::tick) call.
    pub fn read_into(&self, dst: &mut [S]) -> Result<()> {
        let no_ramp = !self.attenuation_smoother.is_updating() && !self.latency_smoother.is_updating();
        if no_ramp && self.interpolation == InterpolationType::Rounding {
            let n = dst.len();
            let mut raw = vec![S::ZERO; n];
            self.delay.read_into(&mut raw);
            let attenuation = S::from_f64(self.attenuation_smoother.current());
            for (d, r) in dst.iter_mut().zip(raw) {
                *d = r * attenuation;
            }
            return Ok(());
        }

        let mut attenuation_preview = self.attenuation_smoother;
        let mut latency_preview = self.latency_smoother;
        for d in dst.iter_mut() {
            let attenuation = S::from_f64(attenuation_preview.get_next_value(1));
            let latency = latency_preview.get_next_value(1);
            let tapped = match self.interpolation {
                InterpolationType::Linear => self.delay.fractional_read_at(latency)?,
                InterpolationType::Rounding => self.delay.read_at(latency.round() as usize)?,
            };
            *d = tapped * attenuation;
        }
        Ok(())
    }

    /// Advance the smoothers and the underlying delay line by `n` samples,
    /// keeping the delay's integer latency tracking `round(current_latency)`.
    pub fn tick(&mut self, n: usize) {
        self.attenuation_smoother.get_next_value(n);
        self.latency_smoother.get_next_value(n);
        self.delay.tick(n);
        self.delay.set_latency(self.latency_smoother.current().round() as usize);
    }

    pub fn reset(&mut self) {
        self.delay.reset_state();
        self.air_filter.reset();
    }
}
