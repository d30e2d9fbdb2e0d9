//! csvmerge CLI
//!
//! Command-line tool that merges several CSV files into one table,
//! matching rows on the columns the files share.

use clap::{Parser, ValueEnum};
use csvmerge_core::{
    expand_inputs, merge_sources, parse_csv, write_csv, write_json, Error, Source,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csvmerge")]
#[command(about = "Merge several CSV files into one", long_about = None)]
#[command(version)]
struct Cli {
    /// Input CSV files, or directories to search for them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write the merged data here instead of the console
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report what happens; only effective together with --output
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,
}

/// Output rendering for the merged table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON
    Json,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        match e {
            Error::MalformedRow { .. } => std::process::exit(1),
            _ => {
                eprintln!("For help use --help");
                std::process::exit(2);
            }
        }
    }
}

fn run() -> csvmerge_core::Result<()> {
    let cli = Cli::parse();

    // Diagnostics share stdout with console output, so they are only
    // emitted when the merged data goes to a file
    let verbose = cli.verbose && cli.output.is_some();

    let files = expand_inputs(&cli.inputs)?;

    let mut sources: Vec<Source> = Vec::with_capacity(files.len());
    for file in &files {
        let source = parse_csv(file)?;
        if verbose {
            println!(
                "Found {} columns {:?} and {} rows in {}",
                source.column_count(),
                source.header,
                source.row_count(),
                source.path.display()
            );
        }
        sources.push(source);
    }

    let result = merge_sources(&sources)?;

    if verbose {
        println!("Merged columns are {:?}", result.table.schema.names());
        println!(
            "{} new rows inserted, {} rows merged",
            result.inserted, result.merged
        );
    }

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| Error::FileWrite {
                path: path.clone(),
                source: e,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let written = match cli.format {
        Format::Csv => write_csv(writer, &result.table)?,
        Format::Json => write_json(writer, &result.table)?,
    };

    if verbose {
        if let Some(path) = &cli.output {
            println!("Exported {} rows to {}", written, path.display());
        }
    }

    Ok(())
}
