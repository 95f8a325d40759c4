//! pixelpack: end-to-end demo pipeline for the entropy coder.
//!
//! Flow: obtain input (file or generated sample) -> compress into a
//! sealed artifact -> write the artifact to disk as an opaque blob ->
//! read it back -> decode -> verify byte equality -> report metrics.
//!
//! The artifact file stands in for whatever outer layer would carry the
//! blob in a real deployment (encryption, transport); the codec only
//! ever sees the bytes it sealed.

mod config;
mod input_gen;

use std::process::ExitCode;

use pixelpack_core::artifact::{open, seal};
use pixelpack_core::freq::FrequencyTable;
use pixelpack_core::huffman::Codebook;
use pixelpack_core::metrics::CodecMetrics;

use config::Config;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("run with --help for usage");
            return ExitCode::FAILURE;
        }
    };

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> pixelpack_core::Result<()> {
    // Obtain input.
    let input = match &config.input_file {
        Some(path) => {
            log::info!("reading input from {}", path.display());
            std::fs::read(path)?
        }
        None => {
            log::info!(
                "generating {} byte sample (seed {})",
                config.sample_bytes,
                config.seed
            );
            input_gen::generate_sample_image(config.seed, config.sample_bytes)
        }
    };

    let mut metrics = CodecMetrics::new();
    metrics.input_symbols = input.len() as u64;

    // Compression side.
    let (freq, count_time) = CodecMetrics::time(|| FrequencyTable::from_symbols(&input));
    metrics.count_time = count_time;
    metrics.distinct_symbols = freq.distinct();
    metrics.entropy_bits = freq.entropy();

    let (codebook, build_time) = CodecMetrics::time(|| Codebook::from_frequencies(&freq));
    let codebook = codebook?;
    metrics.build_time = build_time;

    if let Some(path) = &config.codes_file {
        std::fs::write(path, codebook.listing())?;
        println!("Wrote code listing to {}", path.display());
    }

    let (stream, encode_time) = CodecMetrics::time(|| codebook.encode(&input));
    let stream = stream?;
    metrics.encode_time = encode_time;
    metrics.encoded_bits = stream.bit_len as u64;
    metrics.pad_bits = stream.pad_bits();

    let blob = seal(&stream, &codebook);
    metrics.artifact_bytes = blob.len() as u64;
    std::fs::write(&config.artifact_file, &blob)?;
    println!(
        "Wrote {} byte artifact to {}",
        blob.len(),
        config.artifact_file.display()
    );

    // Decompression side: everything comes back off disk.
    let blob = std::fs::read(&config.artifact_file)?;
    let artifact = open(&blob)?;

    let (decoded, decode_time) = CodecMetrics::time(|| artifact.decode());
    let decoded = decoded?;
    metrics.decode_time = decode_time;

    std::fs::write(&config.output_file, &decoded)?;
    println!(
        "Wrote {} decoded bytes to {}",
        decoded.len(),
        config.output_file.display()
    );

    if config.print_metrics {
        metrics.print_summary();
    }

    // Verify.
    if decoded == input {
        println!("✓ Round trip verified: output matches input");
        Ok(())
    } else {
        println!("✗ Round trip FAILED: output differs from input");
        Err(pixelpack_core::Error::Config(
            "decoded output does not match input".to_string(),
        ))
    }
}
