//! The compressed container: header, dimensions and the channel streams.
use std::io::{Read, Write};
use std::str;

#[cfg(feature = "async")]
use futures::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use log::{debug, info, warn};

use crate::decode::{decode_channel, CodeCursor};
use crate::encode::encode_channel;
use crate::error::{Error, Result};
use crate::image::{sample_count, Image};
use crate::HEADER;

/// Encodes images into the container format.
#[derive(Clone, Copy, Debug, Default)]
pub struct Encoder {
    _private: (),
}

/// Decodes images from the container format.
#[derive(Clone, Copy, Debug, Default)]
pub struct Decoder {
    limits: Limits,
}

/// Resource limits applied to the dimensions read from a compressed image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// The largest `rows * columns * channels` a decoder will allocate.
    pub max_samples: usize,
}

/// Statistics of one encoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeSummary {
    /// The number of samples in the image.
    pub samples: usize,
    /// The number of bytes of all channel streams.
    pub payload_bytes: usize,
    /// The number of bytes including the header lines.
    pub bytes_written: usize,
}

/// An encoding sink.
///
/// See [`Encoder::into_stream`] on how to create this type.
///
/// [`Encoder::into_stream`]: struct.Encoder.html#method.into_stream
pub struct IntoStream<'e, W> {
    encoder: &'e Encoder,
    writer: W,
}

/// A decoding source.
///
/// See [`Decoder::from_stream`] on how to create this type.
///
/// [`Decoder::from_stream`]: struct.Decoder.html#method.from_stream
pub struct FromStream<'d, R> {
    decoder: &'d Decoder,
    reader: R,
}

impl Limits {
    /// No limit on the decoded image size.
    pub fn none() -> Self {
        Limits {
            max_samples: usize::MAX,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_samples: 1 << 28,
        }
    }
}

impl EncodeSummary {
    /// The ratio of input samples to payload bytes.
    pub fn compression_factor(&self) -> f64 {
        self.samples as f64 / self.payload_bytes as f64
    }
}

impl Encoder {
    pub fn new() -> Self {
        Encoder::default()
    }

    /// Encode an image into a complete container.
    pub fn encode(&self, image: &Image) -> Vec<u8> {
        let mut out = head(image).into_bytes();
        append_payload(image, &mut out);
        out
    }

    /// Construct an encoder into a writer.
    pub fn into_stream<W: Write>(&self, writer: W) -> IntoStream<'_, W> {
        IntoStream {
            encoder: self,
            writer,
        }
    }

    /// Encode an image into an asynchronous writer.
    #[cfg(feature = "async")]
    pub async fn write_async<W: AsyncWrite + Unpin>(
        &self,
        image: &Image,
        mut writer: W,
    ) -> Result<EncodeSummary> {
        let (bytes, summary) = self.encode_with_summary(image);
        writer.write_all(&bytes).await?;
        writer.flush().await?;
        Ok(summary)
    }

    fn encode_with_summary(&self, image: &Image) -> (Vec<u8>, EncodeSummary) {
        let bytes = self.encode(image);
        let head_len = head(image).len();
        let summary = EncodeSummary {
            samples: image.len(),
            payload_bytes: bytes.len() - head_len,
            bytes_written: bytes.len(),
        };

        info!(
            "input size {} bytes, output size {} bytes, compression factor {:.2}",
            summary.samples,
            summary.payload_bytes,
            summary.compression_factor(),
        );
        (bytes, summary)
    }
}

impl<W: Write> IntoStream<'_, W> {
    /// Encode an image and write it out completely.
    pub fn encode(mut self, image: &Image) -> Result<EncodeSummary> {
        let (bytes, summary) = self.encoder.encode_with_summary(image);
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(summary)
    }
}

impl Decoder {
    pub fn new() -> Self {
        Decoder::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Decoder { limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Decode a complete container.
    pub fn decode(&self, data: &[u8]) -> Result<Image> {
        let (line, rest) = split_line(data).ok_or(Error::UnrecognizedFormat)?;
        if line != HEADER.as_bytes() {
            warn!("input is not in the '{}' format", HEADER);
            return Err(Error::UnrecognizedFormat);
        }

        let (line, payload) = split_line(rest).ok_or(Error::InvalidDimensions {
            reason: "missing dimension line",
        })?;
        let (rows, columns, channels) = parse_dimensions(line)?;
        let samples = sample_count(rows, columns, channels)?;
        if samples > self.limits.max_samples {
            return Err(Error::LimitExceeded {
                samples,
                limit: self.limits.max_samples,
            });
        }

        let mut cursor = CodeCursor::new(payload);
        let mut decode_plane = |channel| {
            decode_channel(&mut cursor, channel, rows * columns).map_err(|err| {
                warn!("decoding channel {} failed: {}", channel, err);
                err
            })
        };

        // The image is only allocated once the payload held a whole channel.
        let first = decode_plane(0)?;
        let mut image = Image::zeroed(rows, columns, channels)?;
        image.set_channel(0, &first);
        for channel in 1..channels {
            image.set_channel(channel, &decode_plane(channel)?);
        }

        if !cursor.is_empty() {
            debug!("ignoring {} bytes after the last channel", cursor.remaining().len());
        }

        Ok(image)
    }

    /// Construct a decoder from a reader.
    pub fn from_stream<R: Read>(&self, reader: R) -> FromStream<'_, R> {
        FromStream {
            decoder: self,
            reader,
        }
    }

    /// Read and decode an image from an asynchronous reader, up to its end.
    #[cfg(feature = "async")]
    pub async fn read_async<R: AsyncRead + Unpin>(&self, mut reader: R) -> Result<Image> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        self.decode(&data)
    }
}

impl<R: Read> FromStream<'_, R> {
    /// Read the source up to its end and decode it.
    pub fn decode(mut self) -> Result<Image> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        self.decoder.decode(&data)
    }
}

/// Encode an image with the default encoder.
pub fn encode(image: &Image) -> Vec<u8> {
    Encoder::new().encode(image)
}

/// Decode an image with the default limits.
pub fn decode(data: &[u8]) -> Result<Image> {
    Decoder::new().decode(data)
}

/// The header and dimension lines.
fn head(image: &Image) -> String {
    format!(
        "{}\n{} {} {}\n",
        HEADER,
        image.rows(),
        image.columns(),
        image.channels()
    )
}

fn append_payload(image: &Image, out: &mut Vec<u8>) {
    for channel in 0..image.channels() {
        encode_channel(&image.channel(channel), out);
    }
}

/// Split off the first line, without its newline.
fn split_line(data: &[u8]) -> Option<(&[u8], &[u8])> {
    let end = data.iter().position(|&b| b == b'\n')?;
    Some((&data[..end], &data[end + 1..]))
}

fn parse_dimensions(line: &[u8]) -> Result<(usize, usize, usize)> {
    let malformed = Error::InvalidDimensions {
        reason: "expected three decimal integers",
    };
    let line = match str::from_utf8(line) {
        Ok(line) => line,
        Err(_) => return Err(malformed),
    };

    let mut fields = line.split_ascii_whitespace().map(str::parse::<usize>);
    match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(Ok(rows)), Some(Ok(columns)), Some(Ok(channels)), None) => {
            Ok((rows, columns, channels))
        }
        _ => Err(malformed),
    }
}
