//! pixelpack-core: Lossless Huffman entropy coding for pixel intensity data
//!
//! This library converts a sequence of 8-bit intensity values into a
//! variable-length bitstream using a canonical Huffman code built from
//! the input's own symbol distribution, and reconstructs the original
//! sequence exactly from that bitstream plus a small code table.
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `freq`: Symbol frequency counting
//! - `bitio`: Low-level bit reading/writing
//! - `huffman`: Canonical Huffman codec (tree build, code tables,
//!   encode, decode)
//! - `artifact`: CRC-protected serialization of payload + pad count +
//!   code table, the unit an independent decoder needs
//! - `metrics`: Observable codec behavior
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Explicit artifacts**: Decode never relies on encoder-side
//!   in-memory state; everything it needs travels in the artifact
//! - **Opaque to outer layers**: The sealed artifact is a plain byte
//!   blob; encryption or transport layers wrap it without the codec
//!   knowing
//! - **Deterministic**: Equal-weight tree merges are tie-broken by
//!   insertion order, so the same input always yields the same bytes

pub mod artifact;
pub mod bitio;
pub mod error;
pub mod freq;
pub mod huffman;
pub mod metrics;

// Re-export commonly used types
pub use error::{Error, Result};
