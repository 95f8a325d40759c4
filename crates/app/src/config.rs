//! Configuration for the pixelpack command-line pipeline.
//!
//! Handles parsing command-line arguments and generating sensible
//! defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: without `--in` it generates
//! a sample image-like buffer from a time-based seed, and all defaults
//! are printed on request so runs are reproducible.

use std::path::PathBuf;

/// Complete configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Files ===
    /// Input file path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Where the decoded bytes are written
    pub output_file: PathBuf,

    /// Where the sealed artifact blob is written
    pub artifact_file: PathBuf,

    /// Optional path for the human-readable code listing
    pub codes_file: Option<PathBuf>,

    // === Sample generation ===
    /// Seed for generated sample data
    pub seed: u64,

    /// Size of generated sample data in bytes
    pub sample_bytes: usize,

    // === Behavior ===
    /// Whether to print resolved configuration
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If `--seed` is absent, a time-based seed is used (and printed via
    /// `print`, so the run stays reproducible).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut artifact_file: Option<PathBuf> = None;
        let mut codes_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--artifact" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--artifact requires a path".to_string());
                    }
                    artifact_file = Some(PathBuf::from(&args[i]));
                }
                "--codes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--codes requires a path".to_string());
                    }
                    codes_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--size" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--size requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid size")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            input_file,
            output_file: output_file.unwrap_or_else(|| PathBuf::from("./out.bin")),
            artifact_file: artifact_file.unwrap_or_else(|| PathBuf::from("./compressed.hpxc")),
            codes_file,
            seed,
            sample_bytes: sample_bytes.unwrap_or(256 * 1024),
            print_config,
            print_metrics,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!(
            "Input file:    {}",
            self.input_file
                .as_deref()
                .and_then(|p| p.to_str())
                .unwrap_or("(generate sample)")
        );
        println!("Output file:   {}", self.output_file.display());
        println!("Artifact file: {}", self.artifact_file.display());
        if let Some(codes) = &self.codes_file {
            println!("Codes file:    {}", codes.display());
        }
        println!();
        println!("Seed: {}", self.seed);
        println!("Sample size: {} bytes", self.sample_bytes);
        println!();
    }
}

fn print_help() {
    println!("pixelpack: lossless Huffman entropy coding for intensity data");
    println!();
    println!("USAGE:");
    println!("    pixelpack [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>        Input file (default: generate sample)");
    println!("    --out <PATH>       Decoded output file (default: ./out.bin)");
    println!("    --artifact <PATH>  Sealed artifact file (default: ./compressed.hpxc)");
    println!("    --codes <PATH>     Write human-readable code listing");
    println!();
    println!("    --seed <N>         Seed for generated sample data");
    println!("    --size <N>         Generated sample size in bytes (default: 262144)");
    println!();
    println!("    --print-config     Print resolved configuration");
    println!("    --no-metrics       Don't print metrics summary");
    println!("    --help, -h         Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    pixelpack                              # Run on generated sample");
    println!("    pixelpack --seed 42 --print-config     # Deterministic run");
    println!("    pixelpack --in image.raw --codes codes.txt");
    println!();
}
