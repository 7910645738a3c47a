//! A module for decoding single channels.
use core::mem;

use log::debug;

use crate::delta::{from_deltas, Delta};
use crate::error::{Error, Result};
use crate::table::{DecodeTable, UnknownCode};
use crate::{Code, END_CODE, FIRST_FREE_CODE, MAX_ENTRIES};

/// A cursor reading 16-bit big endian codes from a byte buffer.
///
/// Codes of consecutive channels follow each other directly, so the cursor is shared by all
/// channel decoders of one image.
#[derive(Clone, Debug)]
pub struct CodeCursor<'a> {
    data: &'a [u8],
    position: usize,
}

/// Decompresses the code stream of one channel.
///
/// The decoder rebuilds the dictionary of the encoder one code behind it. When a code refers to
/// the entry the encoder added last, which the decoder can not know yet, its sequence is the
/// previous sequence extended by its own first delta.
pub struct ChannelDecoder {
    /// The index of the channel, for error reporting.
    channel: usize,
    /// The dictionary of this channel.
    table: DecodeTable,
    /// The previous code, `None` before the first one.
    previous: Option<Code>,
    /// The sequence of the previous code.
    current: Vec<Delta>,
    /// The sequence of the code being decoded.
    next: Vec<Delta>,
}

/// The longest sequence a single code can stand for.
const MAX_SEQUENCE: usize = MAX_ENTRIES - FIRST_FREE_CODE as usize + 1;

impl<'a> CodeCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        CodeCursor { data, position: 0 }
    }

    /// Read the next code, or `None` if less than two bytes remain.
    pub fn read_code(&mut self) -> Option<Code> {
        let bytes = self.data.get(self.position..self.position + 2)?;
        self.position += 2;
        Some(Code::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// The number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    pub fn is_empty(&self) -> bool {
        self.remaining().is_empty()
    }
}

impl ChannelDecoder {
    pub fn new(channel: usize) -> Self {
        ChannelDecoder {
            channel,
            table: DecodeTable::new(),
            previous: None,
            current: Vec::new(),
            next: Vec::new(),
        }
    }

    /// Decode exactly `expected` samples and the end marker following them.
    pub fn decode(mut self, cursor: &mut CodeCursor<'_>, expected: usize) -> Result<Vec<u8>> {
        let channel = self.channel;
        let start = cursor.position();
        let mut deltas = Vec::with_capacity(capacity_hint(expected, cursor.remaining().len()));

        while deltas.len() < expected {
            let sequence = self
                .next_sequence(cursor)?
                .ok_or(Error::TruncatedStream { channel })?;
            if deltas.len() + sequence.len() > expected {
                return Err(Error::FramingOverrun { channel });
            }
            deltas.extend_from_slice(sequence);
        }

        if self.read_code(cursor)? != END_CODE {
            return Err(Error::FramingOverrun { channel });
        }

        debug!(
            "decoded {} samples from {} bytes, {} dictionary entries",
            expected,
            cursor.position() - start,
            self.table.len(),
        );
        from_deltas(&deltas).map_err(|_| Error::SampleOutOfRange { channel })
    }

    /// Read one code and return the sequence it stands for, `None` at the end marker.
    ///
    /// Every code after the first one adds an entry to the dictionary until it is full.
    pub fn next_sequence(&mut self, cursor: &mut CodeCursor<'_>) -> Result<Option<&[Delta]>> {
        let channel = self.channel;
        let code = self.read_code(cursor)?;
        if code == END_CODE {
            return Ok(None);
        }

        let previous = match self.previous {
            Some(previous) => previous,
            None => {
                self.table
                    .sequence_of(code, &mut self.current)
                    .map_err(|UnknownCode(code)| Error::InvalidCode { channel, code })?;
                self.previous = Some(code);
                return Ok(Some(&self.current));
            }
        };

        match self.table.sequence_of(code, &mut self.next) {
            Ok(()) => {}
            Err(UnknownCode(code)) if code == self.table.next_code() => {
                self.next.clear();
                self.next.extend_from_slice(&self.current);
                self.next.push(self.current[0]);
            }
            Err(UnknownCode(code)) => return Err(Error::InvalidCode { channel, code }),
        }

        self.table.insert(previous, self.next[0]);
        self.previous = Some(code);
        mem::swap(&mut self.current, &mut self.next);
        Ok(Some(&self.current))
    }

    /// The dictionary in its current state.
    pub fn table(&self) -> &DecodeTable {
        &self.table
    }

    fn read_code(&self, cursor: &mut CodeCursor<'_>) -> Result<Code> {
        cursor.read_code().ok_or(Error::TruncatedStream {
            channel: self.channel,
        })
    }
}

/// How many deltas to reserve, at most what the remaining codes can describe.
fn capacity_hint(expected: usize, remaining: usize) -> usize {
    expected.min((remaining / 2).saturating_mul(MAX_SEQUENCE))
}

/// Decode `expected` samples of channel `channel` from the cursor.
pub fn decode_channel(cursor: &mut CodeCursor<'_>, channel: usize, expected: usize) -> Result<Vec<u8>> {
    ChannelDecoder::new(channel).decode(cursor, expected)
}
