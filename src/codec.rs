//! Fixed-width bit packing of strings over an [`Alphabet`].
//!
//! # Layout
//!
//! A string of `N` characters packed with code width `w` occupies `N * w`
//! bits split into `N` slots of `w` bits. The character at position `p` is
//! stored in slot `N - 1 - p`, i.e. bits `[(N-1-p) * w, (N-p) * w)`, with the
//! code's most significant bit at the highest index. The first character
//! therefore sits in the top slot, and reading the store's bit string from
//! the left visits the characters in text order.
//!
//! # Serialized form
//!
//! All integers little-endian:
//! - magic: 8 bytes (`PBITSTR1`)
//! - width policy: u8
//! - symbol count: u64, then that many u32 Unicode scalar values
//! - bit length: u64
//! - block count: u64, then that many u32 blocks

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use crate::alphabet::{Alphabet, WidthPolicy};
use crate::bitstore::BitStore;
use crate::error::{Error, Result};

const MAGIC: &[u8; 8] = b"PBITSTR1";

/// Pack `text` using `alphabet`.
///
/// Every character must belong to the alphabet; nothing is allocated until
/// all of them have been looked up. An empty alphabet is rejected since its
/// codes would have no bits.
pub fn encode(text: &str, alphabet: &Alphabet) -> Result<PackedString> {
    let width = alphabet.code_width() as usize;
    if width == 0 {
        return Err(Error::InvalidEncoding(
            "cannot encode with an empty alphabet".to_string(),
        ));
    }
    let codes = text
        .chars()
        .map(|c| alphabet.index_of(c))
        .collect::<Result<Vec<u32>>>()?;

    let n = codes.len();
    let bits = n.checked_mul(width).ok_or_else(|| {
        Error::InvalidEncoding(format!("{n} symbols of {width} bits overflow"))
    })?;
    let mut store = BitStore::new(bits);
    for (pos, &code) in codes.iter().enumerate() {
        let slot = n - 1 - pos;
        store.set_int(slot * width, (slot + 1) * width, code)?;
    }
    log::debug!("encoded {n} symbols at {width} bits into {bits} bits");

    Ok(PackedString {
        store,
        alphabet: alphabet.clone(),
    })
}

/// Unpack `store` back to text using `alphabet`.
///
/// Fails if the store's length is not a whole number of slots or a slot holds
/// a code past the end of the alphabet.
pub fn decode(store: &BitStore, alphabet: &Alphabet) -> Result<String> {
    let n = slot_count(store, alphabet)?;
    let width = alphabet.code_width() as usize;
    let mut out = String::with_capacity(n);
    for slot in (0..n).rev() {
        out.push(symbol_in_slot(store, alphabet, slot, width)?);
    }
    log::debug!("decoded {n} symbols from {} bits", store.len());
    Ok(out)
}

fn slot_count(store: &BitStore, alphabet: &Alphabet) -> Result<usize> {
    let width = alphabet.code_width() as usize;
    if width == 0 {
        return Err(Error::InvalidEncoding(
            "empty alphabet has no codes".to_string(),
        ));
    }
    if store.len() % width != 0 {
        return Err(Error::InvalidEncoding(format!(
            "{} bits is not a multiple of code width {width}",
            store.len()
        )));
    }
    Ok(store.len() / width)
}

fn symbol_in_slot(
    store: &BitStore,
    alphabet: &Alphabet,
    slot: usize,
    width: usize,
) -> Result<char> {
    let code = store.to_int(slot * width, (slot + 1) * width)?;
    alphabet.symbol_at(code as usize).map_err(|_| {
        Error::InvalidEncoding(format!(
            "code {code} in slot {slot} exceeds alphabet of {}",
            alphabet.len()
        ))
    })
}

/// A string packed as fixed-width codes together with its alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedString {
    store: BitStore,
    alphabet: Alphabet,
}

impl PackedString {
    /// Pack `text` over its own alphabet (first-occurrence order, default
    /// width policy).
    pub fn new(text: &str) -> Result<Self> {
        Self::with_policy(text, WidthPolicy::default())
    }

    /// Pack `text` over its own alphabet sized with `policy`.
    pub fn with_policy(text: &str, policy: WidthPolicy) -> Result<Self> {
        encode(text, &Alphabet::from_text_with(text, policy))
    }

    /// Reassemble a packed string from a store and the alphabet it was
    /// encoded with. Every slot is checked.
    pub fn from_parts(store: BitStore, alphabet: Alphabet) -> Result<Self> {
        let n = slot_count(&store, &alphabet)?;
        let width = alphabet.code_width() as usize;
        for slot in 0..n {
            symbol_in_slot(&store, &alphabet, slot, width)?;
        }
        Ok(Self { store, alphabet })
    }

    /// Split into the store and alphabet.
    pub fn into_parts(self) -> (BitStore, Alphabet) {
        (self.store, self.alphabet)
    }

    /// The packed bits.
    pub fn store(&self) -> &BitStore {
        &self.store
    }

    /// The alphabet the codes refer to.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Return the number of characters.
    pub fn len(&self) -> usize {
        // Width is nonzero for every constructed value.
        self.store.len() / self.alphabet.code_width() as usize
    }

    /// Return true if the packed string has no characters.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Return the character at text position `pos` without unpacking the
    /// rest.
    pub fn char_at(&self, pos: usize) -> Result<char> {
        let n = self.len();
        if pos >= n {
            return Err(Error::IndexOutOfBounds { index: pos, len: n });
        }
        let width = self.alphabet.code_width() as usize;
        symbol_in_slot(&self.store, &self.alphabet, n - 1 - pos, width)
    }

    /// Unpack to a `String`.
    pub fn decode(&self) -> Result<String> {
        decode(&self.store, &self.alphabet)
    }

    /// Serialize to the little-endian layout described in the module docs.
    pub fn to_bytes(&self) -> Vec<u8> {
        let symbols = self.alphabet.symbols();
        let blocks = self.store.blocks();
        let mut out =
            Vec::with_capacity(8 + 1 + 8 * 3 + 4 * (symbols.len() + blocks.len()));
        out.extend_from_slice(MAGIC);
        out.push(self.alphabet.policy().to_byte());

        out.extend_from_slice(&(symbols.len() as u64).to_le_bytes());
        for &c in symbols {
            out.extend_from_slice(&(c as u32).to_le_bytes());
        }

        out.extend_from_slice(&(self.store.len() as u64).to_le_bytes());
        out.extend_from_slice(&(blocks.len() as u64).to_le_bytes());
        for &w in blocks {
            out.extend_from_slice(&w.to_le_bytes());
        }
        out
    }

    /// Deserialize from [`PackedString::to_bytes`] output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = ByteReader { bytes, off: 0 };

        if &r.take::<8>()? != MAGIC {
            return Err(Error::InvalidEncoding(
                "bad magic for PackedString".to_string(),
            ));
        }
        let policy = WidthPolicy::from_byte(r.take::<1>()?[0])?;

        let symbol_count = r.len_prefix(4)?;
        let mut symbols = Vec::with_capacity(symbol_count);
        for _ in 0..symbol_count {
            let raw = u32::from_le_bytes(r.take()?);
            let c = char::from_u32(raw).ok_or_else(|| {
                Error::InvalidEncoding(format!("invalid symbol scalar {raw:#x}"))
            })?;
            symbols.push(c);
        }
        let alphabet = Alphabet::from_symbols(symbols, policy)?;

        let bit_len = r.u64_as_usize()?;
        let block_count = r.len_prefix(4)?;
        let mut blocks = Vec::with_capacity(block_count);
        for _ in 0..block_count {
            blocks.push(u32::from_le_bytes(r.take()?));
        }

        if r.off != bytes.len() {
            return Err(Error::InvalidEncoding(
                "trailing bytes after PackedString".to_string(),
            ));
        }

        Self::from_parts(BitStore::from_blocks(blocks, bit_len)?, alphabet)
    }

    /// Write [`PackedString::to_bytes`] output to `w`.
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<()> {
        w.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read everything from `r` and deserialize it.
    pub fn read_from<R: Read>(mut r: R) -> Result<Self> {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf)?;
        Self::from_bytes(&buf)
    }
}

impl fmt::Display for PackedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.decode().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for PackedString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    off: usize,
}

impl ByteReader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.off + N;
        if end > self.bytes.len() {
            return Err(Error::InvalidEncoding(
                "unexpected end of input".to_string(),
            ));
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.off..end]);
        self.off = end;
        Ok(out)
    }

    fn u64_as_usize(&mut self) -> Result<usize> {
        let v = u64::from_le_bytes(self.take()?);
        usize::try_from(v).map_err(|_| {
            Error::InvalidEncoding(format!("length {v} does not fit in usize"))
        })
    }

    /// A count of `item_size`-byte items that must fit in the remaining input.
    fn len_prefix(&mut self, item_size: usize) -> Result<usize> {
        let n = self.u64_as_usize()?;
        let remaining = self.bytes.len() - self.off;
        if n > remaining / item_size {
            return Err(Error::InvalidEncoding(format!(
                "count {n} exceeds remaining {remaining} bytes"
            )));
        }
        Ok(n)
    }
}
