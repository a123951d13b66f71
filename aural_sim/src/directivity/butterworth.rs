//! Order-10 Butterworth low-pass, used to anti-alias Kemar HRIRs before
//! halving the sample rate from 44.1 kHz to 22.05 kHz (spec §4.5:
//! "downsampled from 44100 Hz through a Butterworth LPF (order 10,
//! 0.001..0.45 passband)").

const ORDER: usize = 10;
const CUTOFF_RATIO: f64 = 0.45;

#[derive(Debug, Clone, Copy, Default)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Biquad {
    fn process(&mut self, x: f64) -> f64 {
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2 - self.a1 * self.y1 - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

/// Cascade of `order / 2` second-order sections implementing a digital
/// Butterworth low-pass at `cutoff_hz`, derived via the bilinear transform
/// of the analog Butterworth pole pairs.
fn design(order: usize, cutoff_hz: f64, sampling_frequency: f64) -> Vec<Biquad> {
    assert!(order % 2 == 0, "this cascade only supports even orders");
    let wc = (std::f64::consts::PI * cutoff_hz / sampling_frequency).tan();
    let wc2 = wc * wc;
    let pairs = order / 2;

    (1..=pairs)
        .map(|k| {
            let theta = std::f64::consts::PI * (2 * k - 1) as f64 / (2.0 * order as f64);
            let sin_t = theta.sin();
            let norm = 1.0 + 2.0 * wc * sin_t + wc2;
            let b0 = wc2 / norm;
            Biquad {
                b0,
                b1: 2.0 * b0,
                b2: b0,
                a1: 2.0 * (wc2 - 1.0) / norm,
                a2: (1.0 - 2.0 * wc * sin_t + wc2) / norm,
                ..Default::default()
            }
        })
        .collect()
}

fn filter(samples: &[f64], sections: &mut [Biquad]) -> Vec<f64> {
    samples
        .iter()
        .map(|&x| {
            let mut v = x;
            for s in sections.iter_mut() {
                v = s.process(v);
            }
            v
        })
        .collect()
}

/// Low-pass filter then decimate by 2, halving the effective sample rate.
pub fn downsample_by_half(samples: &[f64], sampling_frequency: f64) -> Vec<f64> {
    let cutoff = CUTOFF_RATIO * sampling_frequency / 2.0;
    let mut sections = design(ORDER, cutoff, sampling_frequency);
    let filtered = filter(samples, &mut sections);
    filtered.into_iter().step_by(2).collect()
}
