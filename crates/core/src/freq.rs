//! Symbol frequency counting over the fixed 0-255 intensity alphabet.
//!
//! The table is built once per input and read-only afterwards. A dense
//! array is used instead of a map: the alphabet is bounded and small, so
//! indexing beats hashing and the zero entries cost nothing.

/// Occurrence counts for each intensity value in an input buffer.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    /// Count per symbol (index = intensity value)
    counts: [u64; 256],

    /// Sum of all counts (input length)
    total: u64,

    /// Number of distinct symbols with a nonzero count
    distinct: u16,
}

impl FrequencyTable {
    /// Tabulate the frequency of every symbol in the input.
    ///
    /// An empty input yields an empty table; rejecting that as
    /// uncompressible is the tree builder's job, not ours.
    pub fn from_symbols(input: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &symbol in input {
            counts[symbol as usize] += 1;
        }

        let distinct = counts.iter().filter(|&&c| c > 0).count() as u16;

        Self {
            counts,
            total: input.len() as u64,
            distinct,
        }
    }

    /// Count for a single symbol.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total symbols counted (the input length).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> u16 {
        self.distinct
    }

    /// True if no symbols were counted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate over (symbol, count) pairs with nonzero counts, in
    /// ascending symbol order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    /// Shannon entropy of the distribution in bits per symbol.
    ///
    /// This is the information-theoretic floor for the average code
    /// length; an optimal prefix code lands within one bit of it.
    /// Returns 0.0 for an empty table.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_simple_sequence() {
        let table = FrequencyTable::from_symbols(&[2, 2, 2, 3, 3, 4]);

        assert_eq!(table.count(2), 3);
        assert_eq!(table.count(3), 2);
        assert_eq!(table.count(4), 1);
        assert_eq!(table.count(5), 0);
        assert_eq!(table.total(), 6);
        assert_eq!(table.distinct(), 3);
    }

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::from_symbols(&[]);
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.entropy(), 0.0);
    }

    #[test]
    fn test_iter_nonzero_ordered() {
        let table = FrequencyTable::from_symbols(&[200, 7, 7, 0]);
        let pairs: Vec<_> = table.iter_nonzero().collect();
        assert_eq!(pairs, vec![(0, 1), (7, 2), (200, 1)]);
    }

    #[test]
    fn test_all_symbols() {
        let input: Vec<u8> = (0..=255).collect();
        let table = FrequencyTable::from_symbols(&input);
        assert_eq!(table.distinct(), 256);
        assert_eq!(table.total(), 256);
        // Uniform over 256 symbols: exactly 8 bits of entropy.
        assert!((table.entropy() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_symbol_entropy() {
        let table = FrequencyTable::from_symbols(&[5, 5, 5]);
        assert_eq!(table.distinct(), 1);
        assert_eq!(table.entropy(), 0.0);
    }
}
