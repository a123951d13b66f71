//! Borrowing multichannel sample storage.

use aural_core::Sample;

use crate::filter::Filter;

/// A `num_channels x num_samples` matrix of samples that borrows its storage
/// from elsewhere (typically an owning [`Buffer`](crate::Buffer)).
///
/// A view never allocates and never outlives the data it aliases; mutating
/// through a view mutates the original. This is the Rust replacement for the
/// single conflated `owns_data`-flag buffer type: ownership and aliasing are
/// two distinct types, and the borrow checker enforces the rest.
pub struct BufferView<'a, S: Sample> {
    num_samples: usize,
    channels: Vec<&'a mut [S]>,
}

impl<'a, S: Sample> BufferView<'a, S> {
    /// Construct a view from a vector of same-length per-channel slices.
    pub fn new(channels: Vec<&'a mut [S]>) -> Self {
        let num_samples = channels.first().map_or(0, |c| c.len());
        for (ch, samples) in channels.iter().enumerate() {
            assert_eq!(samples.len(), num_samples, "channel {ch} length mismatch");
        }
        Self { num_samples, channels }
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    #[inline]
    pub fn get(&self, channel: usize, index: usize) -> S {
        self.channels[channel][index]
    }

    #[inline]
    pub fn set(&mut self, channel: usize, index: usize, value: S) {
        self.channels[channel][index] = value;
    }

    pub fn set_samples(&mut self, channel: usize, from: usize, src: &[S]) {
        self.channels[channel][from..from + src.len()].copy_from_slice(src);
    }

    pub fn add_samples(&mut self, channel: usize, from: usize, src: &[S]) {
        let dst = &mut self.channels[channel][from..from + src.len()];
        for (d, s) in dst.iter_mut().zip(src) {
            *d += *s;
        }
    }

    pub fn multiply_add_samples(&mut self, channel: usize, from: usize, src: &[S], k: S) {
        let dst = &mut self.channels[channel][from..from + src.len()];
        for (d, s) in dst.iter_mut().zip(src) {
            *d += *s * k;
        }
    }

    pub fn filter_add_samples<F: Filter<S>>(&mut self, channel: usize, from: usize, src: &[S], filter: &mut F) {
        let mut scratch = vec![S::ZERO; src.len()];
        for (o, i) in scratch.iter_mut().zip(src) {
            *o = filter.process(*i);
        }
        self.add_samples(channel, from, &scratch);
    }

    pub fn reset_samples(&mut self) {
        for ch in &mut self.channels {
            ch.fill(S::ZERO);
        }
    }

    pub fn channel_reference(&mut self, channel: usize) -> &mut [S] {
        self.channels[channel]
    }

    pub fn channel_const_reference(&self, channel: usize) -> &[S] {
        self.channels[channel]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Buffer;

    #[test]
    fn view_aliases_original_storage() {
        let mut owner: Buffer<f64> = Buffer::new(2, 3);
        {
            let mut view = owner.as_view();
            view.set(0, 0, 1.0);
            view.set(1, 2, 2.0);
        }
        assert_eq!(owner.get(0, 0), 1.0);
        assert_eq!(owner.get(1, 2), 2.0);
    }

    #[test]
    #[should_panic]
    fn mismatched_channel_lengths_panic() {
        let mut a = [0.0_f64; 2];
        let mut b = [0.0_f64; 3];
        let _ = BufferView::new(vec![&mut a, &mut b]);
    }
}
