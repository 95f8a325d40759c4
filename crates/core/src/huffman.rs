//! Canonical Huffman codec over the 0-255 intensity alphabet.
//!
//! The pipeline is: frequency table -> prefix-code tree (min-heap merge)
//! -> code lengths (iterative depth-first walk) -> canonical codeword
//! assignment -> bit-packed encode / greedy prefix-match decode.
//!
//! Codes are canonical: codewords are derived from (symbol, length)
//! pairs alone, sorted by (length, symbol). Two sides that agree on the
//! length table produce identical codebooks, so the tree never has to be
//! transmitted and decode never depends on encoder-side in-memory state.
//!
//! # Prefix property
//!
//! Every codeword corresponds to a distinct leaf path, so no codeword is
//! a prefix of another. That is what makes the greedy decode loop
//! unambiguous: the first time the accumulator matches a codeword, that
//! match is the only one possible.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt::Write as _;

use crate::bitio::{BitReader, BitWriter};
use crate::error::{CodecError, Result};
use crate::freq::FrequencyTable;

/// Longest representable codeword. With 8-bit symbols a longer code
/// would need a Fibonacci-like distribution with > 10^13 total count.
pub const MAX_CODE_LEN: u8 = 64;

/// A single codeword: the lowest `len` bits of `bits`, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    /// Render as a '0'/'1' string, e.g. for the code listing.
    fn to_bit_string(self) -> String {
        let mut s = String::with_capacity(self.len as usize);
        for i in (0..self.len).rev() {
            s.push(if (self.bits >> i) & 1 == 1 { '1' } else { '0' });
        }
        s
    }
}

/// A prefix-code tree node. Leaves carry a symbol; internal nodes own
/// two children. Merge weights live in the heap entries, which are
/// discarded once the tree shape is fixed.
enum Node {
    Leaf(u8),
    Internal(Box<Node>, Box<Node>),
}

/// Heap entry ordering: weight first, then insertion sequence so that
/// equal-weight merges are deterministic across runs.
struct HeapEntry {
    weight: u64,
    seq: u16,
    node: Node,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

/// Build the prefix-code tree by repeated minimum-pair merging.
///
/// The two lightest nodes are extracted, merged under a fresh internal
/// node (first extracted on the left), and reinserted, until one root
/// remains. Each merge shrinks the heap by one, so this terminates.
fn build_tree(freq: &FrequencyTable) -> Result<Node> {
    let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::new();
    let mut seq: u16 = 0;

    for (symbol, weight) in freq.iter_nonzero() {
        heap.push(Reverse(HeapEntry {
            weight,
            seq,
            node: Node::Leaf(symbol),
        }));
        seq += 1;
    }

    while heap.len() > 1 {
        // Both pops are guarded by the loop condition.
        let (Some(Reverse(first)), Some(Reverse(second))) = (heap.pop(), heap.pop()) else {
            break;
        };

        heap.push(Reverse(HeapEntry {
            weight: first.weight + second.weight,
            seq,
            node: Node::Internal(Box::new(first.node), Box::new(second.node)),
        }));
        seq += 1;
    }

    match heap.pop() {
        Some(Reverse(entry)) => Ok(entry.node),
        None => Err(CodecError::EmptyInput.into()),
    }
}

/// Walk the tree depth-first with an explicit stack and record the leaf
/// depths as code lengths.
///
/// A lone-leaf root (single-symbol alphabet) gets length 1, never 0: an
/// empty codeword cannot repeat in a bitstream, so three occurrences of
/// the only symbol must still cost three bits.
fn code_lengths(root: &Node) -> Result<Vec<(u8, u8)>> {
    let mut pairs = Vec::new();
    let mut stack: Vec<(&Node, usize)> = vec![(root, 0)];

    while let Some((node, depth)) = stack.pop() {
        match node {
            Node::Leaf(symbol) => {
                if depth > MAX_CODE_LEN as usize {
                    return Err(CodecError::CodeTooLong { length: depth }.into());
                }
                pairs.push((*symbol, depth.max(1) as u8));
            }
            Node::Internal(left, right) => {
                stack.push((&**right, depth + 1));
                stack.push((&**left, depth + 1));
            }
        }
    }

    Ok(pairs)
}

/// The forward and reverse code tables, mutually inverse bijections.
///
/// Forward: symbol -> codeword, dense over the alphabet. Reverse:
/// (length, bits) -> symbol, used by the greedy decoder. Both are built
/// once and only read afterwards; the tree they came from is gone by
/// the time a `Codebook` exists.
pub struct Codebook {
    codes: [Option<Code>; 256],
    reverse: HashMap<(u8, u64), u8>,
    max_len: u8,
}

impl Codebook {
    /// Build a codebook from a symbol frequency table.
    ///
    /// # Errors
    /// `CodecError::EmptyInput` if the table has no symbols;
    /// `CodecError::CodeTooLong` if any code would exceed 64 bits.
    pub fn from_frequencies(freq: &FrequencyTable) -> Result<Self> {
        let tree = build_tree(freq)?;
        let pairs = code_lengths(&tree)?;

        let codebook = Self::from_lengths(&pairs)?;
        log::debug!(
            "built codebook: {} symbols, max code length {} bits",
            pairs.len(),
            codebook.max_len
        );
        Ok(codebook)
    }

    /// Build a codebook from (symbol, code length) pairs via canonical
    /// assignment: sort by (length, symbol), then count upward, shifting
    /// left at each length increase.
    ///
    /// This is the transmission-side constructor: the artifact carries
    /// only these pairs.
    ///
    /// # Errors
    /// `CodecError::InvalidLengthTable` if the pairs are empty, repeat a
    /// symbol, contain a zero or oversized length, or over-subscribe the
    /// code space (Kraft inequality violated).
    pub fn from_lengths(pairs: &[(u8, u8)]) -> Result<Self> {
        if pairs.is_empty() {
            return Err(CodecError::InvalidLengthTable.into());
        }

        let mut sorted = pairs.to_vec();
        sorted.sort_unstable_by_key(|&(symbol, len)| (len, symbol));

        let mut codes: [Option<Code>; 256] = [None; 256];
        let mut reverse = HashMap::with_capacity(sorted.len());
        let mut max_len = 0u8;

        // u128 so the len == 64 boundary cannot silently wrap.
        let mut next: u128 = 0;
        let mut prev_len = 0u8;

        for &(symbol, len) in &sorted {
            if len == 0 || len > MAX_CODE_LEN {
                return Err(CodecError::InvalidLengthTable.into());
            }
            if codes[symbol as usize].is_some() {
                return Err(CodecError::InvalidLengthTable.into());
            }

            next <<= len - prev_len;
            if next >> len != 0 {
                // Ran off the end of the code space for this length.
                return Err(CodecError::InvalidLengthTable.into());
            }

            let code = Code {
                bits: next as u64,
                len,
            };
            codes[symbol as usize] = Some(code);
            reverse.insert((len, code.bits), symbol);

            next += 1;
            prev_len = len;
            max_len = len;
        }

        Ok(Self {
            codes,
            reverse,
            max_len,
        })
    }

    /// Codeword for a symbol, if this codebook covers it.
    pub fn code(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Longest codeword length in bits.
    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    /// Number of symbols with a codeword.
    pub fn symbol_count(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// (symbol, code length) pairs in ascending symbol order — the
    /// canonical transmission form. `from_lengths` on these pairs
    /// reproduces this codebook exactly.
    pub fn length_pairs(&self) -> Vec<(u8, u8)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.map(|code| (s as u8, code.len)))
            .collect()
    }

    /// Encode a symbol sequence into a packed bitstream.
    ///
    /// Codewords are concatenated in input order; the final partial byte
    /// is zero-padded. The returned stream carries the exact data bit
    /// count, from which the pad count follows.
    ///
    /// # Errors
    /// `CodecError::EmptyInput` for an empty sequence;
    /// `CodecError::UnknownSymbol` if a symbol has no codeword here.
    pub fn encode(&self, input: &[u8]) -> Result<EncodedStream> {
        if input.is_empty() {
            return Err(CodecError::EmptyInput.into());
        }

        let mut writer = BitWriter::new();
        for &symbol in input {
            let code = self
                .code(symbol)
                .ok_or(CodecError::UnknownSymbol { symbol })?;
            writer.write_bits(code.bits, code.len as usize)?;
        }

        let bit_len = writer.bit_len();
        log::debug!(
            "encoded {} symbols into {} bits ({} pad bits)",
            input.len(),
            bit_len,
            writer.pad_bits()
        );

        Ok(EncodedStream {
            bytes: writer.finish(),
            bit_len,
        })
    }

    /// Decode a packed bitstream back into the original symbols.
    ///
    /// `bit_len` is the count of valid data bits; trailing padding past
    /// it is never examined. Greedy prefix matching: accumulate bits
    /// until the accumulator equals a codeword, emit, reset. O(total
    /// bits) overall.
    ///
    /// # Errors
    /// `CodecError::InvalidCode` if the accumulator outgrows the longest
    /// codeword (corrupt stream or wrong codebook);
    /// `CodecError::IncompleteCode` if the bits run out mid-codeword
    /// (truncated stream or wrong pad count).
    pub fn decode(&self, bytes: &[u8], bit_len: usize) -> Result<Vec<u8>> {
        let mut reader = BitReader::new(bytes, bit_len);
        let mut output = Vec::new();

        let mut acc_bits = 0u64;
        let mut acc_len = 0u8;

        while !reader.is_empty() {
            let bit = reader.read_bit()?;
            acc_bits = (acc_bits << 1) | bit as u64;
            acc_len += 1;

            if let Some(&symbol) = self.reverse.get(&(acc_len, acc_bits)) {
                output.push(symbol);
                acc_bits = 0;
                acc_len = 0;
            } else if acc_len >= self.max_len {
                return Err(CodecError::InvalidCode {
                    bit_offset: reader.position(),
                }
                .into());
            }
        }

        if acc_len != 0 {
            return Err(CodecError::IncompleteCode {
                bit_offset: reader.position(),
                pending_bits: acc_len as usize,
            }
            .into());
        }

        log::debug!("decoded {} bits into {} symbols", bit_len, output.len());
        Ok(output)
    }

    /// Human-readable code listing, one `symbol : code` line per mapped
    /// symbol in ascending symbol order. Diagnostics only; nothing
    /// parses this.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (symbol, code) in self
            .codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.map(|code| (s, code)))
        {
            // write! to a String cannot fail.
            let _ = writeln!(out, "{:>3} : {}", symbol, code.to_bit_string());
        }
        out
    }
}

/// A packed bitstream plus its exact data bit count.
///
/// The byte buffer, the pad count, and the code table must travel
/// together; losing any one makes decode impossible or ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedStream {
    /// Packed bytes, final byte zero-padded
    pub bytes: Vec<u8>,
    /// Count of valid data bits (<= bytes.len() * 8)
    pub bit_len: usize,
}

impl EncodedStream {
    /// Trailing pad bits appended to reach the byte boundary (0-7).
    pub fn pad_bits(&self) -> u8 {
        (self.bytes.len() * 8 - self.bit_len) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codebook_for(input: &[u8]) -> Codebook {
        Codebook::from_frequencies(&FrequencyTable::from_symbols(input)).unwrap()
    }

    #[test]
    fn test_worked_scenario() {
        // freq {2:3, 3:2, 4:1} -> lengths {2:1, 3:2, 4:2} -> canonical
        // codes {2:"0", 3:"10", 4:"11"} -> "000101011", 9 bits, P=7.
        let input = [2u8, 2, 2, 3, 3, 4];
        let codebook = codebook_for(&input);

        assert_eq!(codebook.code(2), Some(Code { bits: 0b0, len: 1 }));
        assert_eq!(codebook.code(3), Some(Code { bits: 0b10, len: 2 }));
        assert_eq!(codebook.code(4), Some(Code { bits: 0b11, len: 2 }));

        let stream = codebook.encode(&input).unwrap();
        assert_eq!(stream.bit_len, 9);
        assert_eq!(stream.pad_bits(), 7);
        assert_eq!(stream.bytes, vec![0b0001_0101, 0b1000_0000]);

        let decoded = codebook.decode(&stream.bytes, stream.bit_len).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_single_symbol_alphabet() {
        // A lone leaf has no path bits; it must still get a 1-bit code
        // so occurrences remain countable in the stream.
        let input = [5u8, 5, 5];
        let codebook = codebook_for(&input);

        assert_eq!(codebook.code(5), Some(Code { bits: 0, len: 1 }));

        let stream = codebook.encode(&input).unwrap();
        assert_eq!(stream.bit_len, 3);
        assert_eq!(stream.pad_bits(), 5);

        let decoded = codebook.decode(&stream.bytes, stream.bit_len).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_empty_input_rejected() {
        let freq = FrequencyTable::from_symbols(&[]);
        assert!(matches!(
            Codebook::from_frequencies(&freq),
            Err(crate::error::Error::Codec(CodecError::EmptyInput))
        ));

        let codebook = codebook_for(&[1, 2, 3]);
        assert!(matches!(
            codebook.encode(&[]),
            Err(crate::error::Error::Codec(CodecError::EmptyInput))
        ));
    }

    #[test]
    fn test_unknown_symbol() {
        // Codebook built from a different input than the one encoded.
        let codebook = codebook_for(&[1, 1, 2]);
        let result = codebook.encode(&[1, 2, 99]);
        assert!(matches!(
            result,
            Err(crate::error::Error::Codec(CodecError::UnknownSymbol {
                symbol: 99
            }))
        ));
    }

    #[test]
    fn test_truncation_detected() {
        let input = [2u8, 2, 2, 3, 3, 4];
        let codebook = codebook_for(&input);
        let stream = codebook.encode(&input).unwrap();

        // Dropping the last data bit leaves a half-matched codeword.
        let result = codebook.decode(&stream.bytes, stream.bit_len - 1);
        assert!(matches!(
            result,
            Err(crate::error::Error::Codec(CodecError::IncompleteCode {
                pending_bits: 1,
                ..
            }))
        ));
    }

    #[test]
    fn test_prefix_property() {
        let input: Vec<u8> = (0u8..=255).flat_map(|s| vec![s; s as usize + 1]).collect();
        let codebook = codebook_for(&input);

        let codes: Vec<Code> = (0u8..=255).filter_map(|s| codebook.code(s)).collect();
        assert_eq!(codes.len(), 256);

        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                let short = a.len.min(b.len);
                // Compare the top `short` bits of both codes.
                assert_ne!(
                    a.bits >> (a.len - short),
                    b.bits >> (b.len - short),
                    "one code is a prefix of another"
                );
            }
        }
    }

    #[test]
    fn test_canonical_round_trip_through_lengths() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let codebook = codebook_for(input);

        let rebuilt = Codebook::from_lengths(&codebook.length_pairs()).unwrap();
        for s in 0u8..=255 {
            assert_eq!(codebook.code(s), rebuilt.code(s));
        }

        let stream = codebook.encode(input).unwrap();
        let decoded = rebuilt.decode(&stream.bytes, stream.bit_len).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_deterministic_tie_breaking() {
        // Four equal-weight symbols: any assignment is optimal, but two
        // builds of the same input must agree exactly.
        let input = [10u8, 20, 30, 40];
        let a = codebook_for(&input);
        let b = codebook_for(&input);
        assert_eq!(a.length_pairs(), b.length_pairs());
        for s in [10u8, 20, 30, 40] {
            assert_eq!(a.code(s), b.code(s));
            assert_eq!(a.code(s).map(|c| c.len), Some(2));
        }
    }

    #[test]
    fn test_invalid_length_tables() {
        // Empty.
        assert!(Codebook::from_lengths(&[]).is_err());
        // Duplicate symbol.
        assert!(Codebook::from_lengths(&[(1, 1), (1, 2)]).is_err());
        // Zero length.
        assert!(Codebook::from_lengths(&[(1, 0)]).is_err());
        // Over-subscribed: three 1-bit codes cannot coexist.
        assert!(Codebook::from_lengths(&[(1, 1), (2, 1), (3, 1)]).is_err());
        // Exactly full is fine.
        assert!(Codebook::from_lengths(&[(1, 1), (2, 2), (3, 2)]).is_ok());
    }

    #[test]
    fn test_invalid_code_mid_stream() {
        // Sparse codebook: {1:"0", 2:"10"} leaves "11" unassigned.
        let codebook = Codebook::from_lengths(&[(1, 1), (2, 2)]).unwrap();
        let result = codebook.decode(&[0b1100_0000], 2);
        assert!(matches!(
            result,
            Err(crate::error::Error::Codec(CodecError::InvalidCode {
                bit_offset: 2
            }))
        ));
    }

    #[test]
    fn test_listing_format() {
        let codebook = codebook_for(&[2, 2, 2, 3, 3, 4]);
        let listing = codebook.listing();

        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines, vec!["  2 : 0", "  3 : 10", "  4 : 11"]);
    }

    #[test]
    fn test_all_symbols_round_trip() {
        let input: Vec<u8> = (0u8..=255).collect();
        let codebook = codebook_for(&input);
        // Uniform distribution over 256 symbols: all codes 8 bits.
        for s in 0u8..=255 {
            assert_eq!(codebook.code(s).map(|c| c.len), Some(8));
        }

        let stream = codebook.encode(&input).unwrap();
        assert_eq!(stream.bit_len, 256 * 8);
        assert_eq!(stream.pad_bits(), 0);
        assert_eq!(
            codebook.decode(&stream.bytes, stream.bit_len).unwrap(),
            input
        );
    }
}
