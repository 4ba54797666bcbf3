// src/main.rs
mod logger;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use huffpack::{Session, codes, driver, journal};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "huffpack", version = "0.1.0")]
#[command(about = "Huffman compression for text files.", long_about = None)]
struct Cli {
    /// Log every codec phase
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Append a JSON line per action to this file
    #[arg(long, global = true)]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a text file into a self-describing .huf container
    Compress {
        source: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Restore the text from a .huf container
    Decompress {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write <name>.bin and <name>_decompressed.txt in one session
    Roundtrip { source: PathBuf },
    /// Print the code assigned to every symbol
    Codes { source: PathBuf },
}

fn record(journal_path: Option<&Path>, action: &str, report: &driver::Report) -> anyhow::Result<()> {
    if let Some(path) = journal_path {
        journal::append(path, &journal::JournalEntry::new(action, report))
            .with_context(|| format!("failed to append to journal {}", path.display()))?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose).context("failed to set up the global logger")?;

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();
    let journal_path = cli.journal.as_deref();

    match cli.command {
        Commands::Compress { source, output } => {
            let report = driver::compress_file(&source, output.as_deref())
                .with_context(|| format!("failed to compress {}", source.display()))?;
            record(journal_path, "compress", &report)?;
            println!("Compressed file path: {}", report.artifact.display());
        }
        Commands::Decompress { input, output } => {
            let report = driver::decompress_file(&input, output.as_deref())
                .with_context(|| format!("failed to decompress {}", input.display()))?;
            record(journal_path, "decompress", &report)?;
            println!("Decompressed file path: {}", report.artifact.display());
        }
        Commands::Roundtrip { source } => {
            let outcome = driver::roundtrip_file(&source)
                .with_context(|| format!("failed to process {}", source.display()))?;
            record(journal_path, "compress", &outcome.compressed)?;
            record(journal_path, "decompress", &outcome.decompressed)?;
            println!("Compressed file path: {}", outcome.compressed.artifact.display());
            println!("Decompressed file path: {}", outcome.decompressed.artifact.display());
            if !outcome.matches {
                bail!("decompressed text does not match {}", source.display());
            }
        }
        Commands::Codes { source } => {
            let text = driver::read_source(&source)
                .with_context(|| format!("failed to read {}", source.display()))?;
            let session = Session::analyze(&text)?;
            for (symbol, code) in session.table().entries() {
                let freq = session.frequencies().get(&symbol).copied().unwrap_or_default();
                println!("{:>8} {:>8} {}", format!("{symbol:?}"), freq, codes::render(code));
            }
        }
    }

    Ok(())
}
