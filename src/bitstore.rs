//! Fixed-capacity bit-addressable storage over 32-bit blocks.
//!
//! # Layout
//!
//! Bit `i` lives in block `i / 32` at bit `i % 32` of that block. When a range
//! of bits is read as an integer, higher bit indices are more significant:
//! bit `end - 1` becomes the top bit of the result and bit `start` the
//! lowest. `to_bit_string` renders in the same order, highest index first,
//! so parsing its output as base 2 yields `to_int` for the same range.
//!
//! Bits at indices `>= len` are cleared on construction and never written,
//! so the tail of the last block cannot leak into any result.

use std::fmt;
use std::ops::BitAnd;

use crate::error::{Error, Result};

/// Number of bits in a storage block.
pub const BLOCK_BITS: usize = 32;

/// A fixed-length bit array stored in `u32` blocks.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitStore {
    blocks: Vec<u32>,
    len: usize,
}

impl fmt::Debug for BitStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitStore")
            .field("len", &self.len)
            .field("ones", &self.count_ones())
            .finish()
    }
}

impl fmt::Display for BitStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(f, self, 0, self.len)
    }
}

impl BitStore {
    /// Create a store of `len` bits, all zero.
    pub fn new(len: usize) -> Self {
        Self {
            blocks: vec![0; len.div_ceil(BLOCK_BITS)],
            len,
        }
    }

    /// Create a store of `len` bits whose blocks are produced by `init`.
    ///
    /// `init` receives the block index. Bits past `len` in the last block are
    /// discarded.
    pub fn from_fn(len: usize, init: impl FnMut(usize) -> u32) -> Self {
        let blocks = (0..len.div_ceil(BLOCK_BITS)).map(init).collect();
        let mut store = Self { blocks, len };
        store.clear_tail();
        store
    }

    /// Wrap existing blocks holding `len` bits.
    ///
    /// Fails unless `blocks.len() == ceil(len / 32)`.
    pub fn from_blocks(blocks: Vec<u32>, len: usize) -> Result<Self> {
        let expected = len.div_ceil(BLOCK_BITS);
        if blocks.len() != expected {
            return Err(Error::InvalidEncoding(format!(
                "{} blocks cannot hold exactly {len} bits (expected {expected})",
                blocks.len()
            )));
        }
        let mut store = Self { blocks, len };
        store.clear_tail();
        Ok(store)
    }

    fn clear_tail(&mut self) {
        let used = self.len % BLOCK_BITS;
        if used != 0 {
            if let Some(last) = self.blocks.last_mut() {
                *last &= (1u32 << used) - 1;
            }
        }
    }

    /// Return the number of addressable bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if the store holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the underlying blocks.
    pub fn blocks(&self) -> &[u32] {
        &self.blocks
    }

    /// Approximate heap memory usage in bytes.
    pub fn heap_bytes(&self) -> usize {
        self.blocks.capacity() * 4
    }

    /// Return the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end || end > self.len {
            return Err(Error::InvalidRange {
                start,
                end,
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_int_range(&self, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        if end - start > BLOCK_BITS {
            return Err(Error::RangeTooWide { start, end });
        }
        Ok(())
    }

    /// Return true if bit `index` is set.
    pub fn get(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.bit(index))
    }

    #[inline]
    fn bit(&self, index: usize) -> bool {
        (self.blocks[index / BLOCK_BITS] >> (index % BLOCK_BITS)) & 1 == 1
    }

    /// Set or clear bit `index`.
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        self.check_index(index)?;
        let mask = 1u32 << (index % BLOCK_BITS);
        let block = &mut self.blocks[index / BLOCK_BITS];
        if value {
            *block |= mask;
        } else {
            *block &= !mask;
        }
        Ok(())
    }

    /// Read bits `[start, end)` as an unsigned integer.
    ///
    /// Bit `end - 1` is the most significant. The range may be at most 32
    /// bits wide; an empty range reads as 0.
    pub fn to_int(&self, start: usize, end: usize) -> Result<u32> {
        self.check_int_range(start, end)?;
        let width = end - start;
        if width == 0 {
            return Ok(0);
        }
        let block = start / BLOCK_BITS;
        let offset = start % BLOCK_BITS;

        // At most two blocks are touched; widen so the shifts never overflow.
        let mut window = (self.blocks[block] as u64) >> offset;
        if offset + width > BLOCK_BITS {
            window |= (self.blocks[block + 1] as u64) << (BLOCK_BITS - offset);
        }
        Ok((window & low_mask(width)) as u32)
    }

    /// Read the first `min(len, 32)` bits as an unsigned integer.
    pub fn to_int_prefix(&self) -> u32 {
        match self.blocks.first() {
            // The tail is kept clear, so the first block already is the value.
            Some(&first) => first,
            None => 0,
        }
    }

    /// Write the low `end - start` bits of `value` into `[start, end)`.
    ///
    /// Significance matches [`BitStore::to_int`], so reading the range back
    /// returns `value` truncated to the range width.
    pub fn set_int(&mut self, start: usize, end: usize, value: u32) -> Result<()> {
        self.check_int_range(start, end)?;
        let width = end - start;
        if width == 0 {
            return Ok(());
        }
        let block = start / BLOCK_BITS;
        let offset = start % BLOCK_BITS;
        let mask = low_mask(width) << offset;
        let bits = ((value as u64) << offset) & mask;

        self.blocks[block] = (self.blocks[block] & !(mask as u32)) | bits as u32;
        if offset + width > BLOCK_BITS {
            let hi_mask = (mask >> BLOCK_BITS) as u32;
            let hi_bits = (bits >> BLOCK_BITS) as u32;
            self.blocks[block + 1] = (self.blocks[block + 1] & !hi_mask) | hi_bits;
        }
        Ok(())
    }

    /// Render bits `[start, end)` as `'0'`/`'1'`, highest index first.
    pub fn to_bit_string(&self, start: usize, end: usize) -> Result<String> {
        self.check_range(start, end)?;
        let mut out = String::with_capacity(end - start);
        for i in (start..end).rev() {
            out.push(if self.bit(i) { '1' } else { '0' });
        }
        Ok(out)
    }

    /// Borrow bits `[start, end)` as a view without copying.
    pub fn slice(&self, start: usize, end: usize) -> Result<BitSlice<'_>> {
        self.check_range(start, end)?;
        Ok(BitSlice {
            parent: self,
            offset: start,
            len: end - start,
        })
    }

    /// Bitwise AND of two stores.
    ///
    /// The result is as long as the longer operand; the shorter one is
    /// treated as zero past its end, so those result bits are always 0.
    pub fn and(&self, other: &BitStore) -> BitStore {
        let len = self.len.max(other.len);
        let shared = self.blocks.len().min(other.blocks.len());
        BitStore::from_fn(len, |i| {
            if i < shared {
                self.blocks[i] & other.blocks[i]
            } else {
                0
            }
        })
    }
}

impl BitAnd for &BitStore {
    type Output = BitStore;

    fn bitand(self, rhs: &BitStore) -> BitStore {
        self.and(rhs)
    }
}

#[inline]
fn low_mask(width: usize) -> u64 {
    (1u64 << width) - 1
}

fn write_bits(
    f: &mut fmt::Formatter<'_>,
    store: &BitStore,
    start: usize,
    end: usize,
) -> fmt::Result {
    use fmt::Write;
    for i in (start..end).rev() {
        f.write_char(if store.bit(i) { '1' } else { '0' })?;
    }
    Ok(())
}

/// A borrowed sub-range of a [`BitStore`].
///
/// Reads are forwarded to the parent with the offset applied; nothing is
/// copied. The borrow keeps the parent alive and unmodified for the slice's
/// lifetime.
#[derive(Clone, Copy)]
pub struct BitSlice<'a> {
    parent: &'a BitStore,
    offset: usize,
    len: usize,
}

impl fmt::Debug for BitSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitSlice")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .finish()
    }
}

impl fmt::Display for BitSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bits(f, self.parent, self.offset, self.offset + self.len)
    }
}

impl<'a> BitSlice<'a> {
    /// Return the number of bits in the view.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start of the view within the parent.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Return the store this view borrows from.
    pub fn parent(&self) -> &'a BitStore {
        self.parent
    }

    /// Return bit `index` relative to the start of the view.
    pub fn get(&self, index: usize) -> Result<bool> {
        if index >= self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(self.parent.bit(self.offset + index))
    }

    /// Read the whole view as an integer. Fails if wider than 32 bits.
    pub fn to_int(&self) -> Result<u32> {
        self.parent.to_int(self.offset, self.offset + self.len)
    }

    /// Render the whole view, highest index first.
    pub fn to_bit_string(&self) -> String {
        self.to_string()
    }
}
