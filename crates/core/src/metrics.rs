//! Metrics for a compress/decompress run.
//!
//! Tracks per-stage wall-clock timings and the size figures that make
//! the codec's behavior visible: how skewed the input distribution was,
//! how close the code got to the entropy floor, how much the padding
//! cost.
//!
//! # Design
//!
//! A plain struct with explicit updates at each pipeline stage; the
//! whole pipeline is single-threaded, so no atomics or locks. For
//! multi-threaded use, keep per-thread metrics and merge at the end.

use std::time::{Duration, Instant};

/// Timings and size figures for one codec run.
#[derive(Debug, Clone, Default)]
pub struct CodecMetrics {
    // === Input ===
    /// Symbols in the input sequence
    pub input_symbols: u64,

    /// Distinct symbols present
    pub distinct_symbols: u16,

    /// Shannon entropy of the input distribution (bits/symbol)
    pub entropy_bits: f64,

    // === Output ===
    /// Data bits in the encoded stream (excluding padding)
    pub encoded_bits: u64,

    /// Trailing padding bits (0-7)
    pub pad_bits: u8,

    /// Total sealed artifact size in bytes (header + table + payload)
    pub artifact_bytes: u64,

    // === Stage timings ===
    /// Frequency counting
    pub count_time: Duration,

    /// Tree build + canonical code assignment
    pub build_time: Duration,

    /// Symbol encoding + packing
    pub encode_time: Duration,

    /// Decoding back to symbols
    pub decode_time: Duration,
}

impl CodecMetrics {
    /// Fresh zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time a closure and return its result alongside the elapsed time.
    pub fn time<T>(f: impl FnOnce() -> T) -> (T, Duration) {
        let start = Instant::now();
        let result = f();
        (result, start.elapsed())
    }

    /// Average code length actually achieved (bits/symbol).
    pub fn avg_code_len(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.input_symbols as f64
        }
    }

    /// Space saved versus the 8-bit fixed-length encoding, as a
    /// percentage: (1 - encoded_bits / (8 * input_symbols)) * 100.
    pub fn compression_percent(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            (1.0 - self.encoded_bits as f64 / (8.0 * self.input_symbols as f64)) * 100.0
        }
    }

    /// Sealed artifact size relative to the raw input (lower is better).
    pub fn artifact_ratio(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.artifact_bytes as f64 / self.input_symbols as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Input ===");
        println!("Symbols: {}", self.input_symbols);
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Entropy: {:.4} bits/symbol", self.entropy_bits);
        println!();

        println!("=== Compression ===");
        println!(
            "Encoded: {} bits + {} pad bits",
            self.encoded_bits, self.pad_bits
        );
        println!("Average code length: {:.4} bits/symbol", self.avg_code_len());
        println!("Compression: {:.2}%", self.compression_percent());
        println!(
            "Artifact: {} bytes ({:.1}% of raw)",
            self.artifact_bytes,
            self.artifact_ratio() * 100.0
        );
        println!();

        println!("=== Timing ===");
        println!("Frequency count: {:.3} ms", self.count_time.as_secs_f64() * 1000.0);
        println!("Codebook build:  {:.3} ms", self.build_time.as_secs_f64() * 1000.0);
        println!("Encode:          {:.3} ms", self.encode_time.as_secs_f64() * 1000.0);
        println!("Decode:          {:.3} ms", self.decode_time.as_secs_f64() * 1000.0);
        println!();
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "input_symbols={}\n\
             distinct_symbols={}\n\
             entropy_bits={:.4}\n\
             encoded_bits={}\n\
             pad_bits={}\n\
             artifact_bytes={}\n\
             avg_code_len={:.4}\n\
             compression_percent={:.2}\n\
             count_ms={:.3}\n\
             build_ms={:.3}\n\
             encode_ms={:.3}\n\
             decode_ms={:.3}\n",
            self.input_symbols,
            self.distinct_symbols,
            self.entropy_bits,
            self.encoded_bits,
            self.pad_bits,
            self.artifact_bytes,
            self.avg_code_len(),
            self.compression_percent(),
            self.count_time.as_secs_f64() * 1000.0,
            self.build_time.as_secs_f64() * 1000.0,
            self.encode_time.as_secs_f64() * 1000.0,
            self.decode_time.as_secs_f64() * 1000.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_code_len() {
        let metrics = CodecMetrics {
            input_symbols: 6,
            encoded_bits: 9,
            ..Default::default()
        };
        assert!((metrics.avg_code_len() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_compression_percent() {
        // 9 bits instead of 48: 81.25% saved.
        let metrics = CodecMetrics {
            input_symbols: 6,
            encoded_bits: 9,
            ..Default::default()
        };
        assert!((metrics.compression_percent() - 81.25).abs() < 1e-9);
    }

    #[test]
    fn test_zero_input_is_not_a_division() {
        let metrics = CodecMetrics::new();
        assert_eq!(metrics.avg_code_len(), 0.0);
        assert_eq!(metrics.compression_percent(), 0.0);
        assert_eq!(metrics.artifact_ratio(), 0.0);
    }

    #[test]
    fn test_time_helper() {
        let (value, elapsed) = CodecMetrics::time(|| 40 + 2);
        assert_eq!(value, 42);
        assert!(elapsed < Duration::from_secs(1));
    }

    #[test]
    fn test_export_text() {
        let metrics = CodecMetrics {
            input_symbols: 1000,
            encoded_bits: 4500,
            pad_bits: 4,
            ..Default::default()
        };

        let text = metrics.export_text();
        assert!(text.contains("input_symbols=1000"));
        assert!(text.contains("encoded_bits=4500"));
        assert!(text.contains("pad_bits=4"));
    }
}
