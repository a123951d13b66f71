//! End-to-end scenarios drawn straight from spec.md §8, exercised through
//! the public API the way a host application would drive the simulation
//! core rather than through any single component's internals.

use aural_buffer::Buffer;
use aural_sim::{propagation_line::one_sample_distance, Directivity, FreeFieldSim, ImageSourceMethod, Point, Quaternion, Receiver, Source};

// spec §8 end-to-end scenario 6: free-field propagation.
//
// Two sources at x = -c/Fs and x = +3c/Fs, two receivers at x = 0 and
// x = c/Fs, both omni, Fs = 44100, a single-sample impulse of 0.5 on each
// source, 4-sample output. Receiver 0 sees the impulse at tap 1 with
// amplitude 0.5 (distance c/Fs) and at tap 3 with amplitude 0.5/3
// (distance 3c/Fs); receiver 1 sees the superposition at tap 2 with
// amplitude 0.5 (two paths of distance 2c/Fs, each contributing 0.25).
#[test]
fn free_field_two_source_two_receiver_superposition() {
    let fs = 44100.0;
    let unit = one_sample_distance(fs);

    let source_positions = [Point::new(-unit, 0.0, 0.0), Point::new(3.0 * unit, 0.0, 0.0)];
    let receiver_positions = [Point::new(0.0, 0.0, 0.0), Point::new(unit, 0.0, 0.0)];

    let mut sim: FreeFieldSim<f64> = FreeFieldSim::new(&source_positions, &receiver_positions, fs);
    let sources = vec![Source::new(source_positions[0]), Source::new(source_positions[1])];
    let mut receivers = vec![
        Receiver::new(Directivity::omni(1.0), receiver_positions[0], Quaternion::identity(), 2),
        Receiver::new(Directivity::omni(1.0), receiver_positions[1], Quaternion::identity(), 2),
    ];
    let mut outputs = vec![Buffer::<f64>::new(1, 4), Buffer::<f64>::new(1, 4)];

    let mut input_a = vec![0.0; 4];
    input_a[0] = 0.5;
    let mut input_b = vec![0.0; 4];
    input_b[0] = 0.5;

    sim.run(&[input_a, input_b], &sources, &mut receivers, &mut outputs, 4).unwrap();

    let r0 = outputs[0].channel_const_reference(0);
    assert!((r0[1] - 0.5).abs() < 1e-9, "receiver 0 tap 1: {r0:?}");
    assert!((r0[3] - 0.5 / 3.0).abs() < 1e-9, "receiver 0 tap 3: {r0:?}");
    assert_eq!(r0[0], 0.0);
    assert_eq!(r0[2], 0.0);

    let r1 = outputs[1].channel_const_reference(0);
    assert!((r1[2] - 0.5).abs() < 1e-9, "receiver 1 tap 2: {r1:?}");
    assert_eq!(r1[0], 0.0);
    assert_eq!(r1[1], 0.0);
}

// spec §8: the ISM's direct path (zero reflections) must land within one
// sample of the straight-line source-receiver delay, with amplitude
// 1/(delay * fs) at unit wall gain (attenuation 1 for the direct path,
// since it passes through zero walls).
#[test]
fn ism_direct_path_amplitude_matches_inverse_delay_law() {
    use aural_sim::CuboidRoom;

    let fs = 44100.0;
    let c = 343.0;
    let room: CuboidRoom<f64> = CuboidRoom::rigid(Point::new(10.0, 10.0, 10.0), Point::ORIGIN, 1.0);
    let source = Point::new(2.0, 2.0, 2.0);
    let receiver_pos = Point::new(3.0, 2.0, 2.0);

    let mut ism: ImageSourceMethod<f64> = ImageSourceMethod::new(512, fs, c);
    ism.update(&room, source, receiver_pos);

    let direct_delay = source.distance(&receiver_pos) / c;
    let tap = (direct_delay * fs).round() as usize;
    let expected_amplitude = 1.0 / (direct_delay * fs);

    assert!((ism.rir()[tap] - expected_amplitude).abs() < 1e-6, "tap {tap}: {}", ism.rir()[tap]);
}

// spec §8: an ambisonic encoder of order N with a plane wave at azimuth
// theta puts sqrt(2) cos(theta) in channel (1,+1) and sqrt(2) sin(theta)
// in channel (1,-1), exercised here through the full Receiver path (world
// point -> local frame -> directivity) rather than the directivity alone.
#[test]
fn receiver_ambisonic_encode_through_full_receive_path() {
    use aural_sim::directivity::AmbisonicConvention;
    use aural_buffer::bformat;

    let theta = std::f64::consts::FRAC_PI_6;
    let mut receiver: Receiver<f64> =
        Receiver::new(Directivity::ambisonic(1, AmbisonicConvention::Sqrt2), Point::ORIGIN, Quaternion::identity(), 1);

    let world_point = Point::new(theta.cos(), theta.sin(), 0.0);
    let mut output: Buffer<f64> = Buffer::new(bformat::num_channels(1), 1);
    receiver.receive_add(&[1.0], world_point, 0, &mut output);

    let sqrt2 = std::f64::consts::SQRT_2;
    assert!((output.get(bformat::channel_id(1, 1), 0) - sqrt2 * theta.cos()).abs() < 1e-9);
    assert!((output.get(bformat::channel_id(1, -1), 0) - sqrt2 * theta.sin()).abs() < 1e-9);
}
