//! Error types for bit storage and packed strings.

use thiserror::Error;

/// Error variants for bit storage and packing operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An index was provided that is out of the structure's bounds.
    #[error("index out of bounds: {index} (len {len})")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The length it was checked against.
        len: usize,
    },

    /// A bit range is reversed or extends past the end of the store.
    #[error("invalid bit range {start}..{end} (len {len})")]
    InvalidRange {
        /// Range start (inclusive).
        start: usize,
        /// Range end (exclusive).
        end: usize,
        /// Number of addressable bits.
        len: usize,
    },

    /// An integer read or write spans more bits than a `u32` holds.
    #[error("bit range {start}..{end} is wider than 32 bits")]
    RangeTooWide {
        /// Range start (inclusive).
        start: usize,
        /// Range end (exclusive).
        end: usize,
    },

    /// A character is not part of the alphabet.
    #[error("symbol {0:?} not in alphabet")]
    SymbolNotFound(char),

    /// Packed data is inconsistent with its alphabet, or bytes are malformed.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// An I/O error occurred during serialization or deserialization.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for packing operations.
pub type Result<T> = std::result::Result<T, Error>;
