//! # Bit-Packed Strings
//!
//! *Word-backed bit storage and fixed-width symbol codes.*
//!
//! ## Intuition First
//!
//! A string over a small alphabet wastes most of every byte. Text made only of
//! `A`, `C`, `G` and `T` carries two bits of information per character, yet
//! UTF-8 spends eight. If every distinct character gets a small integer and
//! those integers are written back to back at a fixed width, the same text
//! fits in a fraction of the space, and any character can still be found by
//! multiplying its position by the width.
//!
//! ## The Problem
//!
//! - **Byte strings**: trivial random access, but the width is fixed at 8+ bits.
//! - **Entropy coders**: near-optimal size, but variable-length codes mean no
//!   random access without an index.
//!
//! Fixed-width packing sits between the two: $n \lceil \log_2 \sigma \rceil$
//! bits for $n$ characters over $\sigma$ symbols, with $O(1)$ access.
//!
//! ## Mathematical Formulation
//!
//! For an alphabet $\Sigma = (s_0, \dots, s_{\sigma-1})$ and code width $w$,
//! a string $c_0 c_1 \dots c_{n-1}$ is stored as
//!
//! $$\sum_{p=0}^{n-1} \mathrm{idx}(c_p) \cdot 2^{(n-1-p)w}$$
//!
//! read as one long integer over the bit store, i.e. the first character
//! occupies the most significant slot.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(n)$ encode/decode, $O(1)$ `char_at`.
//! - **Space**: $nw$ bits plus at most 31 bits of block padding, plus the
//!   alphabet.
//!
//! ## What Could Go Wrong
//!
//! 1. **Width rounding**: the default [`WidthPolicy::Legacy`] spends one extra
//!    bit whenever $\sigma$ is a power of two. Use [`WidthPolicy::Minimal`]
//!    for new data; both decode their own output.
//! 2. **Alphabet drift**: a store is meaningless without the exact alphabet it
//!    was encoded with. [`PackedString`] keeps the two together.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **`bits`**: single-bit helpers over integers and float bit patterns.
//! - **`BitStore`**: bit-addressable storage over `u32` blocks, with borrowed
//!   [`BitSlice`] views.
//! - **`Alphabet`**: first-occurrence symbol catalog with code widths.
//! - **`PackedString`**: the packed text plus its alphabet.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alphabet;
pub mod bits;
pub mod bitstore;
pub mod codec;
pub mod error;

pub use alphabet::{Alphabet, SymbolCounts, WidthPolicy};
pub use bitstore::{BitSlice, BitStore};
pub use codec::{decode, encode, PackedString};
pub use error::{Error, Result};
