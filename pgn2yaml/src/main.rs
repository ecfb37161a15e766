mod converter;

use anyhow::{Context, Result};
use chessticle::ReaderConfig;
use clap::Parser;
use converter::{write_game, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PGN file
    file: String,

    /// Path of the output file (if not specified, same as the PGN file with the extension changed)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,

    /// Maximum nesting of variations (unlimited if not specified)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log parsing details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let pgn_path = PathBuf::from(cli.file);

    let text = std::fs::read_to_string(&pgn_path).context(format!(
        "Could not read file {}",
        pgn_path.to_string_lossy()
    ))?;

    let config = ReaderConfig {
        max_variation_depth: cli.max_depth,
    };
    let game = chessticle::parse_with(&text, &config).context("Unable to parse PGN file")?;

    let output_path = cli.output.map_or_else(
        || {
            let mut path = pgn_path.clone();
            path.set_extension(cli.format.extension());
            path
        },
        PathBuf::from,
    );
    println!(
        "Writing {} file to {}",
        cli.format.extension().to_uppercase(),
        output_path.to_string_lossy()
    );

    write_game(&game, &output_path, cli.format)
}
