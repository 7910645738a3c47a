//! A module for encoding single channels.
use log::{debug, trace};

use crate::delta::{to_deltas, Delta};
use crate::table::EncodeTable;
use crate::{Code, END_CODE};

/// Compresses the deltas of one channel into a stream of 16-bit codes.
///
/// Feed the deltas in scan order with [`push`] and end the stream with [`finish`], which also
/// writes the end marker. A fresh encoder is needed for every channel.
///
/// [`push`]: #method.push
/// [`finish`]: #method.finish
pub struct ChannelEncoder {
    /// The dictionary of this channel.
    table: EncodeTable,
    /// The code of the longest known sequence matched so far, `None` before the first delta.
    current_code: Option<Code>,
    /// The number of codes written, without the end marker.
    codes: usize,
}

impl ChannelEncoder {
    pub fn new() -> Self {
        ChannelEncoder {
            table: EncodeTable::new(),
            current_code: None,
            codes: 0,
        }
    }

    /// Encode the next delta, appending any finished code to `out`.
    pub fn push(&mut self, delta: Delta, out: &mut Vec<u8>) {
        let current = match self.current_code {
            Some(code) => code,
            None => {
                self.current_code = Some(self.table.seed_code(delta));
                return;
            }
        };

        match self.table.extend(current, delta) {
            Some(code) => self.current_code = Some(code),
            None => {
                self.buffer_code(current, out);
                if self.table.insert(current, delta).is_some() && self.table.is_full() {
                    trace!("dictionary full after {} codes", self.codes);
                }
                self.current_code = Some(self.table.seed_code(delta));
            }
        }
    }

    /// Flush the pending sequence and write the end marker.
    ///
    /// Returns the number of codes written for this channel, not counting the end marker.
    pub fn finish(mut self, out: &mut Vec<u8>) -> usize {
        // The pending sequence is flushed even when it is a single delta, otherwise the last
        // sample of the channel would be lost.
        if let Some(code) = self.current_code.take() {
            self.buffer_code(code, out);
        }
        out.extend_from_slice(&END_CODE.to_be_bytes());
        self.codes
    }

    /// The dictionary in its current state.
    pub fn table(&self) -> &EncodeTable {
        &self.table
    }

    fn buffer_code(&mut self, code: Code, out: &mut Vec<u8>) {
        out.extend_from_slice(&code.to_be_bytes());
        self.codes += 1;
    }
}

impl Default for ChannelEncoder {
    fn default() -> Self {
        ChannelEncoder::new()
    }
}

/// Compress one channel of samples, given in scan order, and append the stream to `out`.
///
/// Returns the number of codes written, not counting the end marker.
pub fn encode_channel(samples: &[u8], out: &mut Vec<u8>) -> usize {
    let start = out.len();
    let mut encoder = ChannelEncoder::new();
    for delta in to_deltas(samples) {
        encoder.push(delta, out);
    }

    let entries = encoder.table().len();
    let codes = encoder.finish(out);
    debug!(
        "encoded {} samples into {} codes ({} bytes), {} dictionary entries",
        samples.len(),
        codes,
        out.len() - start,
        entries,
    );
    codes
}

#[cfg(test)]
mod tests {
    use super::{encode_channel, ChannelEncoder};
    use crate::delta::to_deltas;
    use crate::{FIRST_FREE_CODE, MAX_ENTRIES};

    fn stream(samples: &[u8]) -> Vec<u8> {
        let mut out = vec![];
        encode_channel(samples, &mut out);
        out
    }

    #[test]
    fn flat_channel() {
        // 128, then (0,) as code 256, then (0, 0) as the freshly added 513.
        assert_eq!(stream(&[128; 4]), [0, 128, 1, 0, 2, 1, 255, 255]);
    }

    #[test]
    fn ramp_flushes_single_delta() {
        // 10, then (10, 10) as 512, then the trailing (10,).
        assert_eq!(stream(&[10, 20, 30, 40]), [0, 10, 2, 0, 0, 10, 255, 255]);
    }

    #[test]
    fn negative_deltas_use_upper_seeds() {
        // Deltas 200, -100, -100: (200,), then (-100,) twice as 356 since (-100, -100) is new.
        assert_eq!(stream(&[200, 100, 0]), [0, 200, 1, 100, 1, 100, 255, 255]);
    }

    #[test]
    fn single_sample_is_not_dropped() {
        assert_eq!(stream(&[0]), [1, 0, 255, 255]);
        assert_eq!(stream(&[7]), [0, 7, 255, 255]);
    }

    #[test]
    fn empty_channel_is_only_the_end_marker() {
        let mut out = vec![];
        assert_eq!(encode_channel(&[], &mut out), 0);
        assert_eq!(out, [255, 255]);
    }

    #[test]
    fn appends_to_existing_output() {
        let mut out = vec![0xaa];
        assert_eq!(encode_channel(&[1, 2], &mut out), 2);
        assert_eq!(out, [0xaa, 0, 1, 0, 1, 255, 255]);
    }

    #[test]
    fn dictionary_grows_monotonically_up_to_the_cap() {
        // A pseudo-random walk keeps producing new sequences.
        let mut state = 0x1234_5678u32;
        let samples: Vec<u8> = (0..400_000)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect();

        let mut encoder = ChannelEncoder::new();
        let mut out = vec![];
        let mut last = encoder.table().len();
        assert_eq!(last, usize::from(FIRST_FREE_CODE));
        for delta in to_deltas(&samples) {
            encoder.push(delta, &mut out);
            let len = encoder.table().len();
            assert!(len >= last && len <= MAX_ENTRIES);
            last = len;
        }
        assert_eq!(last, MAX_ENTRIES);
        assert!(encoder.table().is_full());
    }
}
