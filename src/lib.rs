//! # Delta LZW image codec
//!
//! This crate provides a lossless codec for 8-bit images. Each channel of the image is turned
//! into a sequence of differences between neighbouring samples which is then compressed with an
//! LZW dictionary of its own. Code words are fixed at 16 bits and written most significant byte
//! first. The code `0xffff` is reserved to mark the end of a channel.
//!
//! The compressed container is a text header followed by the image dimensions and the binary
//! channel streams:
//!
//! ```text
//! my compressed image - v1.0\n
//! <rows> <columns> <channels>\n
//! <channel 0 codes> ff ff <channel 1 codes> ff ff ...
//! ```
//!
//! Exemplary use of the codec:
//!
//! ```
//! use dlzw::{decode, encode, Image};
//!
//! let image = Image::new(2, 2, 1, vec![128; 4]).unwrap();
//! let compressed = encode(&image);
//! assert!(compressed.starts_with(b"my compressed image - v1.0\n2 2 1\n"));
//!
//! let decoded = decode(&compressed).unwrap();
//! assert_eq!(decoded, image);
//! ```
#![forbid(unsafe_code)]

/// The literal first line of every compressed image.
pub const HEADER: &str = "my compressed image - v1.0";

/// The code marking the end of one channel's stream. It is never assigned to a sequence.
pub const END_CODE: Code = 0xffff;

/// The maximum number of codes a dictionary hands out, `0..END_CODE`.
pub const MAX_ENTRIES: usize = END_CODE as usize;

/// The first code available for sequences of more than one delta.
pub const FIRST_FREE_CODE: Code = 512;

/// Alias for a LZW code point
pub type Code = u16;

pub mod container;
pub mod decode;
pub mod delta;
pub mod encode;
pub mod error;
pub mod image;
pub mod table;

pub use crate::container::{decode, encode, Decoder, EncodeSummary, Encoder, Limits};
pub use crate::error::{Error, Result};
pub use crate::image::Image;
