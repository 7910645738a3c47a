//! The sample array handed to and returned by the codec.
use crate::error::{Error, Result};

/// An image of 8-bit samples with interleaved channels, stored row by row.
///
/// The sample of `row`, `column` and `channel` lives at
/// `(row * columns + column) * channels + channel`. Grayscale images have a single channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    rows: usize,
    columns: usize,
    channels: usize,
    data: Vec<u8>,
}

/// The number of samples of an image with these dimensions.
pub(crate) fn sample_count(rows: usize, columns: usize, channels: usize) -> Result<usize> {
    if channels == 0 {
        return Err(Error::InvalidDimensions {
            reason: "an image needs at least one channel",
        });
    }

    rows.checked_mul(columns)
        .and_then(|plane| plane.checked_mul(channels))
        .ok_or(Error::InvalidDimensions {
            reason: "sample count overflows",
        })
}

impl Image {
    /// Wrap interleaved samples, checking them against the dimensions.
    pub fn new(rows: usize, columns: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        let expected = sample_count(rows, columns, channels)?;
        if data.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Image {
            rows,
            columns,
            channels,
            data,
        })
    }

    pub fn grayscale(rows: usize, columns: usize, data: Vec<u8>) -> Result<Self> {
        Image::new(rows, columns, 1, data)
    }

    /// An image with all samples `0`.
    pub fn zeroed(rows: usize, columns: usize, channels: usize) -> Result<Self> {
        let len = sample_count(rows, columns, channels)?;
        Image::new(rows, columns, channels, vec![0; len])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The number of samples in one channel.
    pub fn plane_len(&self) -> usize {
        self.rows * self.columns
    }

    /// The number of samples in all channels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, column: usize, channel: usize) -> Option<u8> {
        if row >= self.rows || column >= self.columns || channel >= self.channels {
            return None;
        }

        self.data
            .get((row * self.columns + column) * self.channels + channel)
            .copied()
    }

    /// Copy out one channel in row-major order.
    ///
    /// # Panics
    ///
    /// If `channel` is not below [`channels`](#method.channels).
    pub fn channel(&self, channel: usize) -> Vec<u8> {
        assert!(channel < self.channels, "channel {} out of range", channel);
        self.data
            .iter()
            .skip(channel)
            .step_by(self.channels)
            .copied()
            .collect()
    }

    /// Overwrite one channel with samples in row-major order.
    ///
    /// # Panics
    ///
    /// If `channel` is not below [`channels`](#method.channels) or `plane` does not hold
    /// [`plane_len`](#method.plane_len) samples.
    pub fn set_channel(&mut self, channel: usize, plane: &[u8]) {
        assert!(channel < self.channels, "channel {} out of range", channel);
        assert_eq!(plane.len(), self.plane_len());
        let targets = self.data.iter_mut().skip(channel).step_by(self.channels);
        for (target, &sample) in targets.zip(plane) {
            *target = sample;
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
