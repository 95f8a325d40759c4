//! Bit-level packing for variable-length codewords.
//!
//! `BitWriter` concatenates codewords MSB-first into a byte buffer and
//! pads the final partial byte with zeros; `BitReader` walks bits
//! MSB-first, bounded by an explicit valid-bit count so padding is never
//! read back as data.
//!
//! # Padding
//!
//! Padding is length-only metadata. The writer reports the exact number
//! of data bits written; the pad count P = (8 - bit_len % 8) % 8 must
//! travel with the bytes, and the reader is constructed with the valid
//! bit count (bytes * 8 - P). Padding bit values are never validated,
//! only skipped.
//!
//! # Example
//! ```
//! use pixelpack_core::bitio::{BitWriter, BitReader};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! assert_eq!(writer.bit_len(), 5);
//! assert_eq!(writer.pad_bits(), 3);
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&bytes, 5);
//! assert!(reader.read_bit().unwrap());
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `pending` holds fewer than 8 bits, MSB-aligned
/// - `pending_len` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    pending: u8,
    /// Number of bits in `pending` (0-7)
    pending_len: u8,
}

impl BitWriter {
    /// Create a writer with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the lowest `count` bits of `value`, most significant first.
    ///
    /// Writing value=0b101 with count=3 appends bits 1, 0, 1 in that
    /// order.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        // Walk from the top bit of the codeword down.
        for i in (0..count).rev() {
            let bit = ((value >> i) & 1) as u8;
            self.pending |= bit << (7 - self.pending_len);
            self.pending_len += 1;

            if self.pending_len == 8 {
                self.bytes.push(self.pending);
                self.pending = 0;
                self.pending_len = 0;
            }
        }

        Ok(())
    }

    /// Total data bits written so far (excluding any padding).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.pending_len as usize
    }

    /// Number of zero bits `finish` will append to reach a byte
    /// boundary: (8 - bit_len % 8) % 8, always in 0..=7.
    pub fn pad_bits(&self) -> u8 {
        (8 - self.pending_len) % 8
    }

    /// Flush the final partial byte (zero-padded) and return the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_len > 0 {
            self.bytes.push(self.pending);
        }
        self.bytes
    }
}

/// Reads bits MSB-first from a byte buffer, bounded by a valid-bit
/// count.
///
/// # Invariants
/// - `position <= bit_len <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source bytes
    data: &'a [u8],
    /// Number of valid (non-padding) bits in `data`
    bit_len: usize,
    /// Current bit position (0 = MSB of first byte)
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over the first `bit_len` bits of `data`.
    ///
    /// `bit_len` is clamped to the buffer size; trailing padding bits
    /// beyond it are unreachable.
    pub fn new(data: &'a [u8], bit_len: usize) -> Self {
        Self {
            data,
            bit_len: bit_len.min(data.len() * 8),
            position: 0,
        }
    }

    /// Read the next bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` past the valid-bit bound.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.bit_len {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let byte = self.data[self.position / 8];
        let bit = (byte >> (7 - self.position % 8)) & 1;
        self.position += 1;

        Ok(bit == 1)
    }

    /// Current bit position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Valid bits not yet consumed.
    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.position
    }

    /// True once all valid bits are consumed.
    pub fn is_empty(&self) -> bool {
        self.position >= self.bit_len
    }
}
