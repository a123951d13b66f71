//! Image-Source Method (ISM) room impulse response builder (spec §4.7).
//!
//! Enumerates the lattice of mirror images of a point source across a
//! [`CuboidRoom`]'s six walls, accumulates each image's delay and
//! attenuation into a fixed-length RIR vector, then exposes that RIR as a
//! digital filter a caller convolves a signal through before handing the
//! result to a [`Receiver`].

use aural_buffer::{BufferMut, Filter, FirFilter};
use aural_core::{Sample, XorShiftRng};

use crate::{point::Point, receiver::Receiver, room::CuboidRoom};

const PETERSON_WINDOW_SECONDS: f64 = 0.004;

/// Builds and holds a room impulse response for a fixed (room, source,
/// receiver) triple, and runs a signal through it.
#[derive(Debug, Clone)]
pub struct ImageSourceMethod<S: Sample> {
    rir_length: usize,
    sampling_frequency: f64,
    sound_speed: f64,
    peterson_window_ms: Option<f64>,
    random_distance: f64,
    rng: XorShiftRng,
    images: Vec<(Point, f64)>,
    convolver: FirFilter<S>,
}

impl<S: Sample> ImageSourceMethod<S> {
    pub fn new(rir_length: usize, sampling_frequency: f64, sound_speed: f64) -> Self {
        assert!(rir_length > 0, "rir_length must be positive");
        Self {
            rir_length,
            sampling_frequency,
            sound_speed,
            peterson_window_ms: None,
            random_distance: 0.0,
            rng: XorShiftRng::default(),
            images: Vec::new(),
            convolver: FirFilter::new(rir_length),
        }
    }

    /// Enable Peterson-window fractional-delay interpolation instead of
    /// round-to-nearest-tap placement.
    pub fn with_peterson_window_ms(mut self, window_ms: f64) -> Self {
        self.peterson_window_ms = Some(window_ms);
        self
    }

    /// Perturb each image's travel distance by a uniform random amount in
    /// `[-random_distance, +random_distance]` meters, seeded by `seed`.
    pub fn with_random_distance(mut self, random_distance: f64, seed: u64) -> Self {
        self.random_distance = random_distance;
        self.rng = XorShiftRng::new(seed);
        self
    }

    pub fn rir(&self) -> &[S] {
        self.convolver.coefficients()
    }

    pub fn images(&self) -> &[(Point, f64)] {
        &self.images
    }

    /// Recompute the RIR for the given room/source/receiver geometry. Call
    /// whenever any of the three changes.
    pub fn update(&mut self, room: &CuboidRoom<S>, source: Point, receiver_position: Point) {
        let betas = wall_betas(room);
        let (nx, ny, nz) = max_reflection_orders(room, self.rir_length, self.sampling_frequency);

        let mut rir = vec![S::ZERO; self.rir_length];
        self.images.clear();

        let window_seconds = self.peterson_window_ms.map(|ms| ms / 1000.0);
        let peterson_cutoff = 0.9 * self.sampling_frequency / 2.0;

        for mx in -nx..=nx {
            for my in -ny..=ny {
                for mz in -nz..=nz {
                    for px in [false, true] {
                        for py in [false, true] {
                            for pz in [false, true] {
                                let image = room.image_source_position(source, mx, my, mz, px, py, pz);
                                let distance = image.distance(&receiver_position);
                                let jittered = if self.random_distance > 0.0 {
                                    (distance + self.rng.next_noise_sample() * self.random_distance).max(0.0)
                                } else {
                                    distance
                                };
                                let delay = jittered / self.sound_speed;
                                let tap = (delay * self.sampling_frequency).round();
                                if tap < 0.0 || tap >= self.rir_length as f64 {
                                    continue;
                                }

                                let gain = image_attenuation(&betas, mx, my, mz, px, py, pz);
                                let denom = delay * self.sampling_frequency;
                                let amplitude = if denom.abs() < 1e-12 { gain } else { gain / denom };

                                self.images.push((image, delay));

                                match window_seconds {
                                    None => {
                                        rir[tap as usize] += S::from_f64(amplitude);
                                    }
                                    Some(window) => {
                                        write_peterson_window(
                                            &mut rir,
                                            delay,
                                            amplitude,
                                            window,
                                            peterson_cutoff,
                                            self.sampling_frequency,
                                        );
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        self.convolver.set_coefficients(&rir, 0);
    }

    /// Convolve `input_signal` with the stored RIR and hand the result to
    /// `receiver` as wave `wave_id` arriving from `local_origin`.
    pub fn run<B: BufferMut<S>>(
        &mut self,
        input_signal: &[S],
        receiver: &mut Receiver<S>,
        wave_id: usize,
        local_origin: Point,
        output: &mut B,
    ) {
        let filtered: Vec<S> = input_signal.iter().map(|&x| self.convolver.process(x)).collect();
        receiver.receive_add(&filtered, local_origin, wave_id, output);
    }

    pub fn reset_state(&mut self) {
        self.convolver.reset();
    }
}

fn wall_betas<S: Sample>(room: &CuboidRoom<S>) -> [f64; 6] {
    std::array::from_fn(|i| {
        room.get_boundary_filters()[i].coefficients().first().copied().unwrap_or(S::ONE).to_f64()
    })
}

fn max_reflection_orders<S: Sample>(room: &CuboidRoom<S>, rir_length: usize, sampling_frequency: f64) -> (i32, i32, i32) {
    let duration = rir_length as f64 / sampling_frequency;
    let order = |length: f64| (duration / (2.0 * length)).floor() as i32 + 1;
    let dims = room.dimensions();
    (order(dims.x()), order(dims.y()), order(dims.z()))
}

/// Attenuation product across all six walls in canonical order
/// `[X1, X2, Y1, Y2, Z1, Z2]`, using the classical image-order exponent
/// split: a lattice index `m` with parity `p` reflects `|m|` times off the
/// wall at the origin and `|m + p|` times off the far wall.
fn image_attenuation(betas: &[f64; 6], mx: i32, my: i32, mz: i32, px: bool, py: bool, pz: bool) -> f64 {
    let axis_term = |near: f64, far: f64, m: i32, p: bool| {
        let p = p as i32;
        near.powi(m.abs()) * far.powi((m + p).abs())
    };
    axis_term(betas[0], betas[1], mx, px) * axis_term(betas[2], betas[3], my, py) * axis_term(betas[4], betas[5], mz, pz)
}

fn unnormalized_sinc(z: f64) -> f64 {
    if z.abs() < 1e-9 {
        1.0
    } else {
        z.sin() / z
    }
}

fn write_peterson_window<S: Sample>(
    rir: &mut [S],
    delay: f64,
    amplitude: f64,
    window_seconds: f64,
    cutoff_hz: f64,
    sampling_frequency: f64,
) {
    let half_window = window_seconds / 2.0;
    let start = ((delay - half_window) * sampling_frequency).ceil().max(0.0) as i64;
    let end = ((delay + half_window) * sampling_frequency).floor() as i64;
    for n in start..=end {
        if n < 0 || n as usize >= rir.len() {
            continue;
        }
        let t = n as f64 / sampling_frequency;
        let dt = t - delay;
        let window = 0.5 * (1.0 + (std::f64::consts::TAU * dt / window_seconds).cos());
        let value = amplitude * window * unnormalized_sinc(std::f64::consts::TAU * cutoff_hz * dt);
        rir[n as usize] += S::from_f64(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{directivity::Directivity, quaternion::Quaternion};

    fn small_room() -> CuboidRoom<f64> {
        CuboidRoom::rigid(Point::new(4.0, 3.0, 2.5), Point::ORIGIN, 1.0)
    }

    #[test]
    fn direct_path_lands_near_expected_tap() {
        let room = small_room();
        let source = Point::new(1.0, 1.0, 1.0);
        let receiver_pos = Point::new(2.0, 1.5, 1.0);
        let fs = 44100.0;
        let c = crate::constants::SOUND_SPEED;
        let mut ism: ImageSourceMethod<f64> = ImageSourceMethod::new(2048, fs, c);
        ism.update(&room, source, receiver_pos);

        let direct_distance = source.distance(&receiver_pos);
        let expected_tap = (direct_distance / c * fs).round() as usize;
        assert!(ism.rir()[expected_tap].abs() > 0.0);
    }

    #[test]
    fn image_source_position_with_zero_lattice_is_identity() {
        let room = small_room();
        let s = Point::new(1.0, 1.0, 1.0);
        assert_eq!(room.image_source_position(s, 0, 0, 0, false, false, false), s);
    }

    #[test]
    fn boundary_reflection_points_lie_on_their_wall_planes() {
        let room = small_room();
        let s = Point::new(1.0, 1.0, 1.0);
        let o = Point::new(2.0, 1.5, 1.0);
        let points = room.get_boundary_points(s, o);
        assert!((points[0].x() - 0.0).abs() < 1e-9);
        assert!((points[1].x() - room.dimensions().x()).abs() < 1e-9);
    }

    #[test]
    fn peterson_window_spreads_energy_across_multiple_taps() {
        let room = small_room();
        let source = Point::new(1.0, 1.0, 1.0);
        let receiver_pos = Point::new(2.0, 1.5, 1.0);
        let fs = 44100.0;
        let c = crate::constants::SOUND_SPEED;
        let mut ism: ImageSourceMethod<f64> = ImageSourceMethod::new(2048, fs, c).with_peterson_window_ms(4.0);
        ism.update(&room, source, receiver_pos);
        let nonzero = ism.rir().iter().filter(|&&x| x.abs() > 1e-9).count();
        assert!(nonzero > 1);
    }

    #[test]
    fn run_delegates_convolved_signal_to_receiver() {
        let room = small_room();
        let source = Point::new(1.0, 1.0, 1.0);
        let receiver_pos = Point::new(2.0, 1.5, 1.0);
        let fs = 44100.0;
        let c = crate::constants::SOUND_SPEED;
        let mut ism: ImageSourceMethod<f64> = ImageSourceMethod::new(256, fs, c);
        ism.update(&room, source, receiver_pos);

        let mut receiver = Receiver::new(Directivity::omni(1.0), receiver_pos, Quaternion::identity(), 1);
        let mut output: aural_buffer::Buffer<f64> = aural_buffer::Buffer::new(1, 256);
        let impulse: Vec<f64> = std::iter::once(1.0).chain(std::iter::repeat(0.0).take(255)).collect();
        ism.run(&impulse, &mut receiver, 0, source, &mut output);
        let energy: f64 = output.channel_const_reference(0).iter().map(|x| x.abs()).sum();
        assert!(energy > 0.0);
    }
}
