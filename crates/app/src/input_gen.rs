//! Sample input generation for testing the codec.
//!
//! When no input file is specified, we generate a buffer that behaves
//! like a flattened grayscale image: flat regions, smooth gradients,
//! dithered texture, and patches of sensor noise.
//!
//! # Design
//!
//! Real images have heavily skewed intensity histograms, which is what
//! makes Huffman coding worthwhile. The generator mixes region types so
//! the compression figures in the metrics stay interesting: flat areas
//! compress hard, noise barely at all.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate a sample intensity buffer with mixed compressibility.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_bytes`: exact size of generated data
pub fn generate_sample_image(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let mut remaining = size_bytes;

    while remaining > 0 {
        let region = remaining.min(rng.gen_range(512..=4096));

        match rng.gen_range(0..10u8) {
            // 40% flat regions (sky, shadow, background)
            0..=3 => {
                let level: u8 = rng.gen();
                data.extend(std::iter::repeat(level).take(region));
            }

            // 30% smooth gradients
            4..=6 => {
                let start: u8 = rng.gen();
                let end: u8 = rng.gen();
                for i in 0..region {
                    let t = i as f64 / region.max(1) as f64;
                    let level = start as f64 + (end as f64 - start as f64) * t;
                    data.push(level as u8);
                }
            }

            // 20% dithered texture (narrow band around a base level)
            7..=8 => {
                let base: i16 = rng.gen_range(0..=255);
                for _ in 0..region {
                    let jitter: i16 = rng.gen_range(-6..=6);
                    data.push((base + jitter).clamp(0, 255) as u8);
                }
            }

            // 10% sensor noise (incompressible)
            _ => {
                for _ in 0..region {
                    data.push(rng.gen());
                }
            }
        }

        remaining = remaining.saturating_sub(region);
    }

    data.truncate(size_bytes);
    data
}

/// Write generated sample data to a file.
pub fn write_sample_file(
    path: &std::path::Path,
    seed: u64,
    size_bytes: usize,
) -> std::io::Result<()> {
    std::fs::write(path, generate_sample_image(seed, size_bytes))
}
