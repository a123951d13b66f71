//! Shared interface over owning and borrowing multichannel storage.
//!
//! [`Buffer`](crate::Buffer) and [`BufferView`](crate::BufferView) expose the
//! identical set of channel operations; this trait lets algorithms upstream
//! (directivity, the ISM convolver, `FreeFieldSim`) stay agnostic to which
//! one they were handed, per the spec's "single `BufferMut` trait" guidance
//! (see `SPEC_FULL.md` §0) rather than duplicating the dispatch by hand.

use aural_core::Sample;

use crate::filter::Filter;

/// Channel-indexed read/write access shared by owning and view buffers.
pub trait BufferMut<S: Sample> {
    fn num_channels(&self) -> usize;
    fn num_samples(&self) -> usize;
    fn get(&self, channel: usize, index: usize) -> S;
    fn set(&mut self, channel: usize, index: usize, value: S);
    fn set_samples(&mut self, channel: usize, from: usize, src: &[S]);
    fn add_samples(&mut self, channel: usize, from: usize, src: &[S]);
    fn multiply_add_samples(&mut self, channel: usize, from: usize, src: &[S], k: S);
    fn filter_add_samples<F: Filter<S>>(&mut self, channel: usize, from: usize, src: &[S], filter: &mut F);
    fn reset_samples(&mut self);
    fn channel_reference(&mut self, channel: usize) -> &mut [S];
    fn channel_const_reference(&self, channel: usize) -> &[S];
}

impl<S: Sample> BufferMut<S> for crate::Buffer<S> {
    fn num_channels(&self) -> usize {
        crate::Buffer::num_channels(self)
    }
    fn num_samples(&self) -> usize {
        crate::Buffer::num_samples(self)
    }
    fn get(&self, channel: usize, index: usize) -> S {
        crate::Buffer::get(self, channel, index)
    }
    fn set(&mut self, channel: usize, index: usize, value: S) {
        crate::Buffer::set(self, channel, index, value)
    }
    fn set_samples(&mut self, channel: usize, from: usize, src: &[S]) {
        crate::Buffer::set_samples(self, channel, from, src)
    }
    fn add_samples(&mut self, channel: usize, from: usize, src: &[S]) {
        crate::Buffer::add_samples(self, channel, from, src)
    }
    fn multiply_add_samples(&mut self, channel: usize, from: usize, src: &[S], k: S) {
        crate::Buffer::multiply_add_samples(self, channel, from, src, k)
    }
    fn filter_add_samples<F: Filter<S>>(&mut self, channel: usize, from: usize, src: &[S], filter: &mut F) {
        crate::Buffer::filter_add_samples(self, channel, from, src, filter)
    }
    fn reset_samples(&mut self) {
        crate::Buffer::reset_samples(self)
    }
    fn channel_reference(&mut self, channel: usize) -> &mut [S] {
        crate::Buffer::channel_reference(self, channel)
    }
    fn channel_const_reference(&self, channel: usize) -> &[S] {
        crate::Buffer::channel_const_reference(self, channel)
    }
}

impl<'a, S: Sample> BufferMut<S> for crate::BufferView<'a, S> {
    fn num_channels(&self) -> usize {
        crate::BufferView::num_channels(self)
    }
    fn num_samples(&self) -> usize {
        crate::BufferView::num_samples(self)
    }
    fn get(&self, channel: usize, index: usize) -> S {
        crate::BufferView::get(self, channel, index)
    }
    fn set(&mut self, channel: usize, index: usize, value: S) {
        crate::BufferView::set(self, channel, index, value)
    }
    fn set_samples(&mut self, channel: usize, from: usize, src: &[S]) {
        crate::BufferView::set_samples(self, channel, from, src)
    }
    fn add_samples(&mut self, channel: usize, from: usize, src: &[S]) {
        crate::BufferView::add_samples(self, channel, from, src)
    }
    fn multiply_add_samples(&mut self, channel: usize, from: usize, src: &[S], k: S) {
        crate::BufferView::multiply_add_samples(self, channel, from, src, k)
    }
    fn filter_add_samples<F: Filter<S>>(&mut self, channel: usize, from: usize, src: &[S], filter: &mut F) {
        crate::BufferView::filter_add_samples(self, channel, from, src, filter)
    }
    fn reset_samples(&mut self) {
        crate::BufferView::reset_samples(self)
    }
    fn channel_reference(&mut self, channel: usize) -> &mut [S] {
        crate::BufferView::channel_reference(self, channel)
    }
    fn channel_const_reference(&self, channel: usize) -> &[S] {
        crate::BufferView::channel_const_reference(self, channel)
    }
}
