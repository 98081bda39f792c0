use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

use rescanf::{CompiledFormat, collect_columns};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Format to match against each line, e.g. "%s - %d errors"
    #[arg(value_name = "FORMAT")]
    format: String,

    /// File to read (stdin if omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Match whitespace in the format literally instead of as `\s+`
    #[arg(short = 'w', long)]
    exact_whitespace: bool,

    /// Print one line per field instead of one line per match
    #[arg(short = 'c', long)]
    columns: bool,

    /// Separator between printed values
    #[arg(short = 's', long, default_value = "\t")]
    separator: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let compiled = CompiledFormat::new(&args.format, !args.exact_whitespace)?;

    let input: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to read {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut out = io::stdout().lock();
    if args.columns {
        for column in collect_columns(&compiled, input.lines())? {
            writeln!(out, "{}", column.iter().join(&args.separator))?;
        }
        return Ok(());
    }

    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let values = compiled
            .apply(&line)
            .with_context(|| format!("line {}", number + 1))?;
        if let Some(values) = values {
            writeln!(out, "{}", values.iter().join(&args.separator))?;
        }
    }
    Ok(())
}
