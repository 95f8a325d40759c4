//! Error types for the pixelpack codec.
//!
//! All operations return structured errors rather than panicking.
//! A failed decode is never silent: one flipped or dropped bit
//! desynchronizes every later symbol boundary, so every failure carries
//! enough context (bit offsets where applicable) to diagnose it.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Codec: code construction, encode, or decode failures
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Artifact: serialized artifact parsing/validation
/// - CRC: data corruption detected in an artifact
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Codec error (building a codebook, encoding, or decoding)
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Artifact serialization/parsing error
    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// CRC validation failed, indicating data corruption
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Codec errors covering the whole compress/decompress pipeline.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input sequence was empty; there is nothing to build a code from
    #[error("empty input: cannot build a code for zero symbols")]
    EmptyInput,

    /// Encode-time symbol with no entry in the forward table.
    /// Indicates the caller paired a sequence with a foreign codebook.
    #[error("symbol {symbol} has no code in this codebook")]
    UnknownSymbol { symbol: u8 },

    /// Decode ran out of bits with a partially matched code pending.
    /// Indicates truncated, corrupted, or wrongly padded input.
    #[error("incomplete code at bit {bit_offset}: {pending_bits} unmatched trailing bits")]
    IncompleteCode {
        bit_offset: usize,
        pending_bits: usize,
    },

    /// Decode accumulated more bits than the longest codeword without a
    /// match. Cannot happen with an intact stream and its own codebook.
    #[error("invalid code at bit {bit_offset}: no codeword matches")]
    InvalidCode { bit_offset: usize },

    /// A codeword exceeded 64 bits. Requires a Fibonacci-like frequency
    /// distribution with astronomical counts; rejected rather than
    /// silently mis-stored.
    #[error("code length {length} exceeds maximum 64")]
    CodeTooLong { length: usize },

    /// A received symbol/length table is not a valid prefix code
    /// (duplicate symbols or Kraft inequality violated).
    #[error("symbol length table does not describe a valid prefix code")]
    InvalidLengthTable,
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the valid bits
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Artifact framing errors.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Artifact is too short to contain a valid header
    #[error("artifact too short: need at least {required} bytes, got {actual}")]
    TooShort { required: usize, actual: usize },

    /// Declared table/payload lengths do not match the byte count
    #[error("length mismatch: header says {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Padding count outside 0..=7
    #[error("invalid padding count {0}: must be 0-7")]
    BadPadding(u8),

    /// Artifact declares zero table entries
    #[error("artifact contains an empty code table")]
    EmptyTable,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
