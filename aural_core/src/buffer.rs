//! Generic buffer trait shared by owning and borrowing storage.

/// A generic buffer interface implemented by both the owning `Buffer<S>` and
/// the borrowing `BufferView<S>` in `aural_buffer`, so algorithms that only
/// need raw slice access can stay agnostic to which one they were handed.
pub trait Buffer<T> {
    /// Get the length of the `Buffer`.
    fn len(&self) -> usize;

    /// Check if the `Buffer` is empty.
    fn is_empty(&self) -> bool;

    /// Get the `Buffer` as a data slice.
    fn as_slice(&self) -> &[T];

    /// Get the `Buffer` as a mutable data slice.
    fn as_mut_slice(&mut self) -> &mut [T];

    /// Remove all values from the `Buffer`
    fn clear(&mut self);

    /// Set all values in the `Buffer` to zero.
    fn zeroize(&mut self);
}
