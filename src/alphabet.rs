//! Symbol catalogs with fixed-width integer codes.
//!
//! An [`Alphabet`] assigns every distinct character of its source text an
//! index in order of first appearance. Indices are written as codes of
//! `code_width` bits; the width depends on the alphabet size and the chosen
//! [`WidthPolicy`].

use std::collections::{HashMap, HashSet};

use crate::bits::highest_set_bit;
use crate::error::{Error, Result};

/// Per-character occurrence counts in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct SymbolCounts {
    entries: Vec<(char, usize)>,
    positions: HashMap<char, usize>,
}

impl SymbolCounts {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every character of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut counts = Self::new();
        for c in text.chars() {
            counts.add(c);
        }
        counts
    }

    /// Record one occurrence of `c`.
    pub fn add(&mut self, c: char) {
        match self.positions.get(&c) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(c, self.entries.len());
                self.entries.push((c, 1));
            }
        }
    }

    /// Remove one occurrence of `c`. The entry is dropped once its count
    /// reaches zero; removing an absent character does nothing.
    pub fn remove(&mut self, c: char) {
        let Some(&pos) = self.positions.get(&c) else {
            return;
        };
        if self.entries[pos].1 > 1 {
            self.entries[pos].1 -= 1;
            return;
        }
        self.entries.remove(pos);
        self.positions.remove(&c);
        for (i, &(sym, _)) in self.entries.iter().enumerate().skip(pos) {
            self.positions.insert(sym, i);
        }
    }

    /// Return the number of occurrences of `c`.
    pub fn count(&self, c: char) -> usize {
        self.positions
            .get(&c)
            .map_or(0, |&pos| self.entries[pos].1)
    }

    /// Return the number of distinct characters.
    pub fn unique_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate distinct characters in first-occurrence order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|&(c, _)| c)
    }

    /// Iterate `(character, count)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.entries.iter().copied()
    }
}

/// How many bits each code gets for an alphabet of `n` symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidthPolicy {
    /// `highest_set_bit(n) + 1`.
    ///
    /// One bit wider than necessary when `n` is a power of two; kept so
    /// packed data matches what this formula has always produced.
    #[default]
    Legacy,
    /// `ceil(log2(n))`, at least 1 bit.
    Minimal,
}

impl WidthPolicy {
    /// Code width for an alphabet of `n` symbols. Zero symbols need zero bits.
    pub fn code_width(self, n: usize) -> u32 {
        if n == 0 {
            return 0;
        }
        // char has fewer than 2^21 values, so n always fits.
        let n = n as u32;
        match self {
            WidthPolicy::Legacy => highest_set_bit(n) + 1,
            WidthPolicy::Minimal if n == 1 => 1,
            WidthPolicy::Minimal => highest_set_bit(n - 1) + 1,
        }
    }

    pub(crate) fn to_byte(self) -> u8 {
        match self {
            WidthPolicy::Legacy => 0,
            WidthPolicy::Minimal => 1,
        }
    }

    pub(crate) fn from_byte(b: u8) -> Result<Self> {
        match b {
            0 => Ok(WidthPolicy::Legacy),
            1 => Ok(WidthPolicy::Minimal),
            other => Err(Error::InvalidEncoding(format!(
                "unknown width policy {other}"
            ))),
        }
    }
}

/// An immutable, ordered set of distinct characters.
///
/// `symbols()[i]` has code `i`.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, u32>,
    code_width: u32,
    policy: WidthPolicy,
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols && self.policy == other.policy
    }
}

impl Eq for Alphabet {}

impl Alphabet {
    /// Build the alphabet of `text` with the default width policy.
    pub fn from_text(text: &str) -> Self {
        Self::from_text_with(text, WidthPolicy::default())
    }

    /// Build the alphabet of `text`, sizing codes with `policy`.
    pub fn from_text_with(text: &str, policy: WidthPolicy) -> Self {
        let counts = SymbolCounts::from_text(text);
        log::trace!(
            "alphabet: {} distinct of {} chars",
            counts.unique_count(),
            text.len()
        );
        Self::build(counts.symbols().collect(), policy)
    }

    /// Build an alphabet from an explicit symbol order.
    ///
    /// Fails if any symbol repeats.
    pub fn from_symbols(
        symbols: impl IntoIterator<Item = char>,
        policy: WidthPolicy,
    ) -> Result<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        let mut seen = HashSet::with_capacity(symbols.len());
        for &c in &symbols {
            if !seen.insert(c) {
                return Err(Error::InvalidEncoding(format!(
                    "duplicate symbol {c:?} in alphabet"
                )));
            }
        }
        Ok(Self::build(symbols, policy))
    }

    fn build(symbols: Vec<char>, policy: WidthPolicy) -> Self {
        let index = symbols
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as u32))
            .collect();
        let code_width = policy.code_width(symbols.len());
        Self {
            symbols,
            index,
            code_width,
            policy,
        }
    }

    /// Return the number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Return true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in code order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Bits per code.
    pub fn code_width(&self) -> u32 {
        self.code_width
    }

    /// `(1 << code_width) - 1`.
    pub fn code_mask(&self) -> u32 {
        ((1u64 << self.code_width) - 1) as u32
    }

    /// The policy the code width was derived with.
    pub fn policy(&self) -> WidthPolicy {
        self.policy
    }

    /// Return the symbol with code `index`.
    pub fn symbol_at(&self, index: usize) -> Result<char> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index,
                len: self.symbols.len(),
            })
    }

    /// Return the code of `c`.
    pub fn index_of(&self, c: char) -> Result<u32> {
        self.index.get(&c).copied().ok_or(Error::SymbolNotFound(c))
    }

    /// Return true if `c` has a code.
    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }
}
