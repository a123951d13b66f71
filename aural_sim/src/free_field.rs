//! Drives an N-source by M-receiver grid of propagation lines and feeds
//! each receiver's accumulated signal through its directivity in one
//! batched call per pair (spec §4.8).

use aural_buffer::BufferMut;
use aural_core::Sample;

use crate::{error::Result, point::Point, propagation_line::PropagationLine, receiver::Receiver, source::Source};

/// An `N x M` grid of [`PropagationLine`]s (one per source/receiver pair)
/// plus a per-pair scratch buffer, reused across calls to [`Self::run`].
pub struct FreeFieldSim<S: Sample> {
    lines: Vec<Vec<PropagationLine<S>>>,
    scratch: Vec<Vec<Vec<S>>>,
}

impl<S: Sample> FreeFieldSim<S> {
    /// Build one propagation line per (source, receiver) pair, using the
    /// defaults documented on [`PropagationLine::with_defaults`].
    pub fn new(source_positions: &[Point], receiver_positions: &[Point], sampling_frequency: f64) -> Self {
        let lines = source_positions
            .iter()
            .map(|&s| {
                receiver_positions
                    .iter()
                    .map(|&r| PropagationLine::with_defaults(s.distance(&r), sampling_frequency))
                    .collect()
            })
            .collect();
        let scratch = vec![vec![Vec::new(); receiver_positions.len()]; source_positions.len()];
        Self { lines, scratch }
    }

    #[inline]
    pub fn num_sources(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn num_receivers(&self) -> usize {
        self.lines.first().map_or(0, |row| row.len())
    }

    /// Retarget the line between `source_idx` and `receiver_idx` to a new
    /// distance, ramped over `ramp_time` seconds.
    pub fn set_distance(&mut self, source_idx: usize, receiver_idx: usize, distance: f64, ramp_time: f64) {
        self.lines[source_idx][receiver_idx].set_distance(distance, ramp_time);
    }

    /// Run `num_output_samples` ticks: for each sample index, write each
    /// source's input sample through every line to its receivers and park
    /// the read value in that pair's scratch buffer; once all ticks are
    /// done, hand each pair's accumulated buffer to the receiver in one
    /// batched `receive_add` call.
    pub fn run<B: BufferMut<S>>(
        &mut self,
        inputs: &[Vec<S>],
        sources: &[Source],
        receivers: &mut [Receiver<S>],
        outputs: &mut [B],
        num_output_samples: usize,
    ) -> Result<()> {
        let num_sources = self.num_sources();
        let num_receivers = self.num_receivers();
        assert_eq!(inputs.len(), num_sources, "one input buffer per source is required");
        assert_eq!(sources.len(), num_sources);
        assert_eq!(receivers.len(), num_receivers);
        assert_eq!(outputs.len(), num_receivers);
        for input in inputs {
            assert_eq!(input.len(), num_output_samples);
        }

        for row in &mut self.scratch {
            for buf in row {
                buf.clear();
                buf.resize(num_output_samples, S::ZERO);
            }
        }

        for i in 0..num_output_samples {
            for (s, row) in self.lines.iter_mut().enumerate() {
                for (r, line) in row.iter_mut().enumerate() {
                    line.write(inputs[s][i]);
                    self.scratch[s][r][i] = line.read()?;
                    line.tick(1);
                }
            }
        }

        for (s, row) in self.scratch.iter().enumerate() {
            for (r, buf) in row.iter().enumerate() {
                receivers[r].receive_add(buf, sources[s].position(), s, &mut outputs[r]);
            }
        }

        Ok(())
    }

    pub fn reset_state(&mut self) {
        for row in &mut self.lines {
            for line in row {
                line.reset();
            }
        }
    }
}
