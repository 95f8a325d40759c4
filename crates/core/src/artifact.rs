//! Serialized codec artifact: the self-contained unit a decoder needs.
//!
//! Compression produces three things that must travel together: the
//! packed payload bytes, the trailing pad count, and the code table.
//! This module packages them into one CRC-protected blob so decode never
//! depends on encoder-side in-memory state.
//!
//! # Artifact Format
//!
//! ```text
//! +-------------------+
//! | Magic (4 bytes)   |  0x48 0x50 0x58 0x43 ("HPXC")
//! +-------------------+
//! | symbol_count (2)  |  u16 little-endian, entries in the code table
//! +-------------------+
//! | pad_bits (1)      |  u8 trailing padding bits in payload (0-7)
//! +-------------------+
//! | payload_len (4)   |  u32 payload byte count
//! +-------------------+
//! | crc32 (4)         |  u32 checksum of everything after the magic
//! +-------------------+
//! | code table        |  symbol_count x (symbol u8, code_len u8)
//! +-------------------+
//! | payload           |  packed codewords, final byte zero-padded
//! +-------------------+
//! ```
//!
//! Codes are canonical, so (symbol, code_len) pairs fully reconstruct
//! the codebook; the tree shape is never transmitted.
//!
//! # Opaque blob contract
//!
//! The sealed artifact is exactly the byte payload handed to any outer
//! layer (encryption, transport framing). Whatever that layer does, the
//! bytes given to [`open`] must be byte-identical to what [`seal`]
//! returned; outer framing such as nonces or tags must be stripped
//! before `open` sees the blob.

use crate::error::{ArtifactError, Error, Result};
use crate::freq::FrequencyTable;
use crate::huffman::{Codebook, EncodedStream};

/// Magic number for artifacts: "HPXC" (Huffman PiXel Codec)
const MAGIC: [u8; 4] = [0x48, 0x50, 0x58, 0x43];

/// Size of the artifact header in bytes
const HEADER_SIZE: usize = 15;

/// A parsed artifact: rebuilt codebook plus the packed payload.
pub struct Artifact {
    /// Codebook rebuilt from the transmitted length pairs
    pub codebook: Codebook,

    /// Packed codeword bytes
    pub payload: Vec<u8>,

    /// Trailing padding bits in the final payload byte (0-7)
    pub pad_bits: u8,

    /// CRC32 checksum (already validated by `open`)
    pub crc32: u32,
}

impl Artifact {
    /// Count of valid data bits in the payload.
    pub fn bit_len(&self) -> usize {
        self.payload.len() * 8 - self.pad_bits as usize
    }

    /// Decode the payload back into the original symbol sequence.
    pub fn decode(&self) -> Result<Vec<u8>> {
        self.codebook.decode(&self.payload, self.bit_len())
    }
}

/// Serialize an encoded stream and its codebook into one blob.
pub fn seal(stream: &EncodedStream, codebook: &Codebook) -> Vec<u8> {
    let pairs = codebook.length_pairs();
    let symbol_count = pairs.len() as u16;
    let pad_bits = stream.pad_bits();
    let payload_len = stream.bytes.len() as u32;

    let mut table = Vec::with_capacity(pairs.len() * 2);
    for (symbol, len) in pairs {
        table.push(symbol);
        table.push(len);
    }

    let crc32 = compute_crc(symbol_count, pad_bits, payload_len, &table, &stream.bytes);

    let mut blob = Vec::with_capacity(HEADER_SIZE + table.len() + stream.bytes.len());
    blob.extend_from_slice(&MAGIC);
    blob.extend_from_slice(&symbol_count.to_le_bytes());
    blob.push(pad_bits);
    blob.extend_from_slice(&payload_len.to_le_bytes());
    blob.extend_from_slice(&crc32.to_le_bytes());
    blob.extend_from_slice(&table);
    blob.extend_from_slice(&stream.bytes);

    blob
}

/// Parse and validate an artifact blob.
///
/// # Errors
/// - `ArtifactError::InvalidMagic` if the magic number doesn't match
/// - `ArtifactError::TooShort` / `LengthMismatch` on size problems
/// - `ArtifactError::EmptyTable` / `BadPadding` on bad header fields
/// - `Error::Crc` if the checksum doesn't match
/// - `CodecError::InvalidLengthTable` if the table is not a prefix code
pub fn open(bytes: &[u8]) -> Result<Artifact> {
    if bytes.len() < HEADER_SIZE {
        return Err(ArtifactError::TooShort {
            required: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let magic: [u8; 4] = bytes[0..4].try_into().map_err(|_| ArtifactError::TooShort {
        required: HEADER_SIZE,
        actual: bytes.len(),
    })?;
    if magic != MAGIC {
        return Err(ArtifactError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let symbol_count = u16::from_le_bytes([bytes[4], bytes[5]]);
    let pad_bits = bytes[6];
    let payload_len = u32::from_le_bytes([bytes[7], bytes[8], bytes[9], bytes[10]]);
    let crc32 = u32::from_le_bytes([bytes[11], bytes[12], bytes[13], bytes[14]]);

    if symbol_count == 0 {
        return Err(ArtifactError::EmptyTable.into());
    }
    if pad_bits > 7 || (payload_len == 0 && pad_bits != 0) {
        return Err(ArtifactError::BadPadding(pad_bits).into());
    }

    let table_len = symbol_count as usize * 2;
    let expected_size = HEADER_SIZE + table_len + payload_len as usize;
    if bytes.len() != expected_size {
        return Err(ArtifactError::LengthMismatch {
            expected: expected_size,
            actual: bytes.len(),
        }
        .into());
    }

    let table = &bytes[HEADER_SIZE..HEADER_SIZE + table_len];
    let payload = &bytes[HEADER_SIZE + table_len..];

    let computed_crc = compute_crc(symbol_count, pad_bits, payload_len, table, payload);
    if computed_crc != crc32 {
        return Err(Error::Crc {
            expected: crc32,
            actual: computed_crc,
        });
    }

    let pairs: Vec<(u8, u8)> = table.chunks_exact(2).map(|c| (c[0], c[1])).collect();
    let codebook = Codebook::from_lengths(&pairs)?;

    Ok(Artifact {
        codebook,
        payload: payload.to_vec(),
        pad_bits,
        crc32,
    })
}

/// CRC32 over everything after the magic.
fn compute_crc(
    symbol_count: u16,
    pad_bits: u8,
    payload_len: u32,
    table: &[u8],
    payload: &[u8],
) -> u32 {
    let mut hasher = crc32fast::Hasher::new();

    hasher.update(&symbol_count.to_le_bytes());
    hasher.update(&[pad_bits]);
    hasher.update(&payload_len.to_le_bytes());
    hasher.update(table);
    hasher.update(payload);

    hasher.finalize()
}

/// Compress a symbol buffer end to end: frequency count, codebook,
/// encode, seal.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let freq = FrequencyTable::from_symbols(input);
    let codebook = Codebook::from_frequencies(&freq)?;
    let stream = codebook.encode(input)?;

    log::debug!(
        "compressed {} symbols to {} payload bytes",
        input.len(),
        stream.bytes.len()
    );

    Ok(seal(&stream, &codebook))
}

/// Decompress a sealed artifact back into the original symbol buffer.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    open(bytes)?.decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open_round_trip() {
        let input = b"hello world! this is a test.";

        let blob = compress(input).unwrap();
        let artifact = open(&blob).unwrap();

        assert_eq!(artifact.payload.len() * 8 - artifact.pad_bits as usize, artifact.bit_len());
        assert_eq!(artifact.decode().unwrap(), input);
    }

    #[test]
    fn test_decompress_convenience() {
        let input = b"abracadabra";
        let blob = compress(input).unwrap();
        assert_eq!(decompress(&blob).unwrap(), input);
    }

    #[test]
    fn test_invalid_magic() {
        let mut blob = compress(b"data").unwrap();
        blob[0] = 0xFF;

        assert!(matches!(
            open(&blob),
            Err(Error::Artifact(ArtifactError::InvalidMagic { .. }))
        ));
    }

    #[test]
    fn test_too_short() {
        let blob = vec![0u8; 10];
        assert!(matches!(
            open(&blob),
            Err(Error::Artifact(ArtifactError::TooShort { .. }))
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let mut blob = compress(b"some payload data here").unwrap();
        blob.truncate(blob.len() - 1);

        assert!(matches!(
            open(&blob),
            Err(Error::Artifact(ArtifactError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_payload_corruption_detected() {
        let mut blob = compress(b"payload under test").unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0x01;

        assert!(matches!(open(&blob), Err(Error::Crc { .. })));
    }

    #[test]
    fn test_table_corruption_detected() {
        let mut blob = compress(b"payload under test").unwrap();
        // First table byte sits right after the header.
        blob[HEADER_SIZE] ^= 0xFF;

        assert!(matches!(open(&blob), Err(Error::Crc { .. })));
    }

    #[test]
    fn test_bad_padding_rejected() {
        let mut blob = compress(b"x").unwrap();
        blob[6] = 8; // pad_bits out of range
        assert!(matches!(
            open(&blob),
            Err(Error::Artifact(ArtifactError::BadPadding(8)))
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(compress(b"").is_err());
    }

    #[test]
    fn test_single_byte_input() {
        let blob = compress(b"A").unwrap();
        assert_eq!(decompress(&blob).unwrap(), b"A");
    }

    #[test]
    fn test_highly_repetitive_input_compresses() {
        let input = vec![b'X'; 65536];
        let blob = compress(&input).unwrap();

        // One symbol, one bit each: payload is ~8 KiB plus tiny header.
        assert!(blob.len() < input.len() / 4);
        assert_eq!(decompress(&blob).unwrap(), input);
    }

    #[test]
    fn test_full_alphabet() {
        let input: Vec<u8> = (0..=255).collect();
        let blob = compress(&input).unwrap();
        assert_eq!(decompress(&blob).unwrap(), input);
    }
}
