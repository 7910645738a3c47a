//! The dictionaries shared by the channel encoder and decoder.
//!
//! Both directions start from the same seed: every single delta `v` in `0..=255` gets code `v`,
//! then every `-v` for `v` in `0..=255` gets the codes `256..512` in order. Since `-0 == 0` the
//! sequence `(0,)` is seeded twice and keeps the later code `256`, leaving code `0` unassigned.
//! Streams depend on this exact assignment so both tables reproduce it rather than skip it.
//!
//! Longer sequences are only ever added as a known sequence extended by one delta. The encoder
//! keeps them as a tree searched by `(prefix code, delta)` while the decoder keeps one link to
//! the prefix per code.
use crate::delta::{symbol, Delta, SYMBOLS};
use crate::{Code, END_CODE, FIRST_FREE_CODE};

/// A code was looked up that the table has not assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCode(pub Code);

/// Hand every seed sequence to `assign`, in seeding order, and return the next free code.
fn seed(mut assign: impl FnMut(Delta, Code)) -> Code {
    for v in 0..=255 {
        assign(v, v as Code);
    }
    let mut next: Code = 256;
    for v in 0..=255 {
        assign(-v, next);
        next += 1;
    }
    next
}

/// The sequence-to-code direction, used while encoding.
pub struct EncodeTable {
    /// Successors of the empty sequence, that is the seed codes.
    root: Box<Full>,
    /// How to find the successors of each code.
    keys: Vec<Successors>,
    simples: Vec<Simple>,
    complex: Vec<Full>,
    next_code: Code,
}

/// The code-to-sequence direction, used while decoding.
pub struct DecodeTable {
    links: Vec<Link>,
    /// The length of the sequence of each code, `0` for unassigned codes.
    depths: Vec<u16>,
}

/// Where the continuations of one code are stored.
///
/// Most codes have few successors. These are kept in a short list that is searched linearly,
/// only codes with many successors get a full table indexed by delta.
#[derive(Clone, Copy)]
enum Successors {
    NoSuccessor,
    Simple(u16),
    Full(u16),
}

const SHORT: usize = 16;

#[derive(Clone, Copy)]
struct Simple {
    codes: [Code; SHORT],
    deltas: [Delta; SHORT],
    count: u8,
}

/// Continuations by delta symbol, [`END_CODE`] where there is none.
#[derive(Clone)]
struct Full {
    continuation: [Code; SYMBOLS],
}

#[derive(Clone, Copy)]
struct Link {
    prefix: Code,
    delta: Delta,
}

impl EncodeTable {
    pub fn new() -> Self {
        let mut root = Box::new(Full::empty());
        let next_code = seed(|delta, code| root.continuation[symbol(delta)] = code);
        debug_assert_eq!(next_code, FIRST_FREE_CODE);

        let mut keys = Vec::with_capacity(crate::MAX_ENTRIES);
        keys.resize(usize::from(next_code), Successors::NoSuccessor);

        EncodeTable {
            root,
            keys,
            simples: Vec::new(),
            complex: Vec::new(),
            next_code,
        }
    }

    /// The code of the single-delta sequence `(delta,)`.
    pub fn seed_code(&self, delta: Delta) -> Code {
        self.root.continuation[symbol(delta)]
    }

    /// The code of the sequence `code` extended by `delta`, if it is known.
    pub fn extend(&self, code: Code, delta: Delta) -> Option<Code> {
        let key = self.keys[usize::from(code)];
        match key {
            Successors::NoSuccessor => None,
            Successors::Simple(idx) => {
                let nexts = &self.simples[usize::from(idx)];
                nexts
                    .deltas
                    .iter()
                    .zip(nexts.codes.iter())
                    .take(usize::from(nexts.count))
                    .find(|&(&sdelta, _)| sdelta == delta)
                    .map(|(_, &scode)| scode)
            }
            Successors::Full(idx) => self.complex[usize::from(idx)].get(delta),
        }
    }

    /// The code of a whole sequence, if it is known.
    pub fn code_of(&self, sequence: &[Delta]) -> Option<Code> {
        let (&first, rest) = sequence.split_first()?;
        rest.iter()
            .try_fold(self.seed_code(first), |code, &delta| self.extend(code, delta))
    }

    pub fn contains(&self, sequence: &[Delta]) -> bool {
        self.code_of(sequence).is_some()
    }

    /// Add the sequence `code` extended by `delta`.
    ///
    /// Returns the new code, or `None` without changes once all codes are assigned. The extended
    /// sequence must not already be in the table.
    pub fn insert(&mut self, code: Code, delta: Delta) -> Option<Code> {
        if self.is_full() {
            return None;
        }

        let next = self.next_code;
        debug_assert!(self.extend(code, delta).is_none());
        let key = self.keys[usize::from(code)];
        match key {
            Successors::NoSuccessor => {
                let mut simple = Simple::default();
                simple.codes[0] = next;
                simple.deltas[0] = delta;
                simple.count = 1;
                self.keys[usize::from(code)] = Successors::Simple(self.simples.len() as u16);
                self.simples.push(simple);
            }
            Successors::Simple(idx) if usize::from(self.simples[usize::from(idx)].count) < SHORT => {
                let nexts = &mut self.simples[usize::from(idx)];
                let nidx = usize::from(nexts.count);
                nexts.deltas[nidx] = delta;
                nexts.codes[nidx] = next;
                nexts.count += 1;
            }
            Successors::Simple(idx) => {
                let simple = &self.simples[usize::from(idx)];
                let mut full = Full::empty();
                for (&sdelta, &scode) in simple.deltas.iter().zip(simple.codes.iter()) {
                    full.continuation[symbol(sdelta)] = scode;
                }
                full.continuation[symbol(delta)] = next;
                self.keys[usize::from(code)] = Successors::Full(self.complex.len() as u16);
                self.complex.push(full);
            }
            Successors::Full(idx) => {
                self.complex[usize::from(idx)].continuation[symbol(delta)] = next;
            }
        }

        self.keys.push(Successors::NoSuccessor);
        self.next_code += 1;
        Some(next)
    }

    /// The number of codes handed out so far, including the seeds.
    pub fn len(&self) -> usize {
        usize::from(self.next_code)
    }

    pub fn is_full(&self) -> bool {
        self.next_code >= END_CODE
    }
}

impl DecodeTable {
    pub fn new() -> Self {
        let mut links = Vec::with_capacity(crate::MAX_ENTRIES);
        let mut depths = Vec::with_capacity(crate::MAX_ENTRIES);
        let unassigned = Link {
            prefix: END_CODE,
            delta: 0,
        };
        links.resize(usize::from(FIRST_FREE_CODE), unassigned);
        depths.resize(usize::from(FIRST_FREE_CODE), 0);

        // Which code currently owns each single-delta sequence.
        let mut owner: [Option<Code>; SYMBOLS] = [None; SYMBOLS];
        let next_code = seed(|delta, code| {
            if let Some(previous) = owner[symbol(delta)].replace(code) {
                depths[usize::from(previous)] = 0;
            }
            links[usize::from(code)] = Link {
                prefix: END_CODE,
                delta,
            };
            depths[usize::from(code)] = 1;
        });
        debug_assert_eq!(usize::from(next_code), links.len());

        DecodeTable { links, depths }
    }

    pub fn contains(&self, code: Code) -> bool {
        self.depths
            .get(usize::from(code))
            .map_or(false, |&depth| depth > 0)
    }

    /// Write the sequence of `code` into `out`, replacing its contents.
    pub fn sequence_of(&self, code: Code, out: &mut Vec<Delta>) -> Result<(), UnknownCode> {
        if !self.contains(code) {
            return Err(UnknownCode(code));
        }

        out.clear();
        out.resize(usize::from(self.depths[usize::from(code)]), 0);
        let mut code_iter = code;
        for slot in out.iter_mut().rev() {
            let link = self.links[usize::from(code_iter)];
            *slot = link.delta;
            code_iter = link.prefix;
        }

        Ok(())
    }

    /// Add the sequence `code` extended by `delta`.
    ///
    /// Returns the new code, or `None` without changes once all codes are assigned.
    pub fn insert(&mut self, code: Code, delta: Delta) -> Option<Code> {
        if self.is_full() {
            return None;
        }

        let next = self.next_code();
        let depth = self.depths[usize::from(code)] + 1;
        self.links.push(Link {
            prefix: code,
            delta,
        });
        self.depths.push(depth);
        Some(next)
    }

    /// The code the next insertion will be assigned.
    pub fn next_code(&self) -> Code {
        self.links.len() as Code
    }

    /// The number of codes handed out so far, including the seeds.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_full(&self) -> bool {
        self.links.len() >= crate::MAX_ENTRIES
    }
}

impl Full {
    fn empty() -> Self {
        Full {
            continuation: [END_CODE; SYMBOLS],
        }
    }

    fn get(&self, delta: Delta) -> Option<Code> {
        match self.continuation[symbol(delta)] {
            END_CODE => None,
            code => Some(code),
        }
    }
}

impl Default for EncodeTable {
    fn default() -> Self {
        EncodeTable::new()
    }
}

impl Default for DecodeTable {
    fn default() -> Self {
        DecodeTable::new()
    }
}

impl Default for Simple {
    fn default() -> Self {
        Simple {
            codes: [0; SHORT],
            deltas: [0; SHORT],
            count: 0,
        }
    }
}
