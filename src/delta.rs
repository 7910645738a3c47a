//! Conversion between samples and the differences the dictionary works on.
//!
//! A channel is scanned in row-major order and every sample is replaced by its difference to the
//! sample before it. The sample before the first one is taken to be `0`.
use std::convert::TryFrom;

/// The signed difference between a sample and its predecessor.
pub type Delta = i16;

/// The smallest delta two 8-bit samples can have.
pub const MIN_DELTA: Delta = -255;

/// The largest delta two 8-bit samples can have.
pub const MAX_DELTA: Delta = 255;

/// The number of distinct deltas.
pub(crate) const SYMBOLS: usize = (MAX_DELTA - MIN_DELTA) as usize + 1;

/// A running sum left the range of 8-bit samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    /// The index of the first delta producing an invalid sample.
    pub index: usize,
}

/// The dense index of a delta, `0` for [`MIN_DELTA`].
pub(crate) fn symbol(delta: Delta) -> usize {
    debug_assert!((MIN_DELTA..=MAX_DELTA).contains(&delta));
    (delta - MIN_DELTA) as usize
}

/// The difference of every sample to the one before it, with `0` before the first sample.
pub fn to_deltas(samples: &[u8]) -> Vec<Delta> {
    let mut previous = 0u8;
    samples
        .iter()
        .map(|&sample| {
            let delta = Delta::from(sample) - Delta::from(previous);
            previous = sample;
            delta
        })
        .collect()
}

/// Undo [`to_deltas`] by summing up the deltas, starting from `0`.
///
/// Fails when an intermediate sum is not a valid sample. This can not happen for the output of
/// [`to_deltas`].
pub fn from_deltas(deltas: &[Delta]) -> Result<Vec<u8>, OutOfRange> {
    let mut previous: Delta = 0;
    deltas
        .iter()
        .enumerate()
        .map(|(index, &delta)| {
            let sample = previous + delta;
            let byte = u8::try_from(sample).map_err(|_| OutOfRange { index })?;
            previous = sample;
            Ok(byte)
        })
        .collect()
}
