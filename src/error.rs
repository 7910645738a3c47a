//! Errors of the container and channel decoders.
use std::io;

use crate::Code;

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building, encoding or decoding an image.
///
/// Encoding itself cannot fail for a well-formed [`Image`](crate::Image); only writing the result
/// to a sink can.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The first line of the input is not the expected header text.
    #[error("input is not in the '{}' format", crate::HEADER)]
    UnrecognizedFormat,
    /// The dimension line is malformed or describes an impossible image.
    #[error("invalid image dimensions: {reason}")]
    InvalidDimensions { reason: &'static str },
    /// The sample buffer does not match the declared dimensions.
    #[error("expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    /// The input ended before a channel was complete.
    #[error("channel {channel}: stream ended before all samples were decoded")]
    TruncatedStream { channel: usize },
    /// A channel decodes to more samples than the dimension line declares.
    #[error("channel {channel}: stream holds more samples than declared")]
    FramingOverrun { channel: usize },
    /// A code that is neither in the dictionary nor the next one to be added.
    #[error("channel {channel}: invalid code {code}")]
    InvalidCode { channel: usize, code: Code },
    /// The reconstructed deltas leave the range of an 8-bit sample.
    #[error("channel {channel}: reconstructed sample out of range")]
    SampleOutOfRange { channel: usize },
    /// The declared image is larger than the configured [`Limits`](crate::Limits).
    #[error("image of {samples} samples exceeds the limit of {limit}")]
    LimitExceeded { samples: usize, limit: usize },
    /// Reading from the source or writing to the sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
