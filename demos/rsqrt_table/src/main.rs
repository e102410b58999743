use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use goldschmidt_rsqrt::{Goldschmidt, QFormat, DEFAULT_ROUNDS};
use log::info;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON config, e.g. {"format":{"int_bits":16,"frac_bits":16},"rounds":2}.
    /// Overrides the width and round flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Integer bits (sign included)
    #[arg(long, default_value_t = 16)]
    int_bits: u32,

    /// Fractional bits
    #[arg(long, default_value_t = 16)]
    frac_bits: u32,

    /// Refinement rounds; the documented error bound assumes 2
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    rounds: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate real-valued inputs against an f64 reference
    Table {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// SHA-256 of the raw outputs over an evenly spaced sweep of the positive range
    Digest {
        #[arg(long, default_value_t = 4096)]
        samples: u32,
    },
}

fn load_config(args: &Args) -> Result<Goldschmidt> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()));
    }
    let format = QFormat::new(args.int_bits, args.frac_bits).context("invalid Q format")?;
    Ok(Goldschmidt::new(format).with_rounds(args.rounds))
}

fn print_table(g: &Goldschmidt, values: &[f64]) {
    let format = g.format();
    println!(
        "{:>14} {:>12} {:>14} {:>14} {:>10} {:>14}",
        "input", "raw", "rsqrt", "reference", "rel_err", "sqrt"
    );
    for &value in values {
        let raw = format.from_f64(value);
        match g.evaluate(raw) {
            Ok(out) => {
                let real_input = format.to_f64(raw);
                let reference = 1.0 / real_input.sqrt();
                let rsqrt = format.to_f64(out.rsqrt);
                println!(
                    "{:>14.6} {:>12} {:>14.8} {:>14.8} {:>10.6} {:>14.8}",
                    value,
                    raw,
                    rsqrt,
                    reference,
                    (rsqrt - reference).abs() / reference,
                    format.to_f64(out.sqrt),
                );
            }
            Err(e) => println!("{:>14.6} {:>12} error: {}", value, raw, e),
        }
    }
}

fn sweep_digest(g: &Goldschmidt, samples: u32) -> Result<String> {
    let max = g.format().max_raw();
    let step = (max / samples.max(1) as i64).max(1);
    let mut hasher = Sha256::new();
    let mut raw = 1i64;
    while raw <= max {
        let input = raw as i32;
        let out = g
            .rsqrt(input)
            .with_context(|| format!("rsqrt of raw input {}", input))?;
        hasher.update(out.to_le_bytes());
        raw += step;
    }
    Ok(hex::encode(hasher.finalize()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let g = load_config(&args)?;
    info!(
        "Q{}.{} with {} rounds",
        g.format().int_bits(),
        g.format().frac_bits(),
        g.rounds()
    );

    match &args.command {
        Command::Table { values } => print_table(&g, values),
        Command::Digest { samples } => {
            let digest = sweep_digest(&g, *samples)?;
            println!("RSQRT_HASH {}", digest);
        }
    }
    Ok(())
}
