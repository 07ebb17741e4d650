//! Redline CLI - tracked-change dataset extraction tool
//!
//! Glues the pipeline together: parse a document's tracked changes into
//! the paragraph JSON intermediate, build the JSONL correction dataset
//! from it, or do both in one pass.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use redline_backend::RevisionExtractor;
use redline_core::{
    read_paragraphs_json, write_paragraphs_json, write_records_jsonl, DatasetBuilder, Paragraph,
    DATASET_FILE, DEFAULT_CONTEXT_WORDS, REVISIONS_FILE,
};

#[derive(Parser)]
#[command(
    name = "redline",
    version,
    about = "Extract tracked changes from Word documents into a correction dataset"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document's tracked changes into the paragraph JSON intermediate
    Extract {
        /// Input document: .docx, or raw WordprocessingML XML
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = REVISIONS_FILE)]
        output: PathBuf,
    },

    /// Build the JSONL correction dataset from a paragraph JSON intermediate
    Dataset {
        /// Paragraph JSON intermediate produced by `extract`
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = DATASET_FILE)]
        output: PathBuf,

        /// Context words kept on each side of a change group
        #[arg(long, default_value_t = DEFAULT_CONTEXT_WORDS)]
        context_words: usize,
    },

    /// Extract and build the dataset in one pass
    Run {
        /// Input document: .docx, or raw WordprocessingML XML
        input: PathBuf,

        /// Directory for the intermediate and the dataset (created if absent)
        #[arg(long, default_value = "outputs")]
        out_dir: PathBuf,

        /// Context words kept on each side of a change group
        #[arg(long, default_value_t = DEFAULT_CONTEXT_WORDS)]
        context_words: usize,
    },

    /// Print each paragraph's corrected reading from an intermediate
    Show {
        /// Paragraph JSON intermediate produced by `extract`
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract { input, output } => cmd_extract(&input, &output),
        Commands::Dataset {
            input,
            output,
            context_words,
        } => cmd_dataset(&input, &output, context_words),
        Commands::Run {
            input,
            out_dir,
            context_words,
        } => cmd_run(&input, &out_dir, context_words),
        Commands::Show { input } => cmd_show(&input),
    }
}

fn cmd_extract(input: &Path, output: &Path) -> Result<()> {
    let paragraphs = extract_paragraphs(input)?;
    save_paragraphs(&paragraphs, output)?;

    let entry_count: usize = paragraphs.iter().map(|p| p.entries.len()).sum();
    println!(
        "{} {} paragraphs ({} entries) -> {}",
        "Extracted".green().bold(),
        paragraphs.len(),
        entry_count,
        output.display()
    );
    Ok(())
}

fn cmd_dataset(input: &Path, output: &Path, context_words: usize) -> Result<()> {
    let file = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let paragraphs = read_paragraphs_json(file)
        .with_context(|| format!("failed to decode {}", input.display()))?;

    save_dataset(&paragraphs, output, context_words)
}

fn cmd_run(input: &Path, out_dir: &Path, context_words: usize) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let paragraphs = extract_paragraphs(input)?;
    let revisions_path = out_dir.join(REVISIONS_FILE);
    save_paragraphs(&paragraphs, &revisions_path)?;
    println!(
        "{} {} paragraphs -> {}",
        "Extracted".green().bold(),
        paragraphs.len(),
        revisions_path.display()
    );

    save_dataset(&paragraphs, &out_dir.join(DATASET_FILE), context_words)
}

fn cmd_show(input: &Path) -> Result<()> {
    let file = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let paragraphs = read_paragraphs_json(file)
        .with_context(|| format!("failed to decode {}", input.display()))?;

    for (index, paragraph) in paragraphs.iter().enumerate() {
        println!("Paragraph {}: {}", index + 1, paragraph.corrected_reading());
    }
    Ok(())
}

fn extract_paragraphs(input: &Path) -> Result<Vec<Paragraph>> {
    RevisionExtractor::new()
        .extract_file(input)
        .with_context(|| format!("failed to parse {}", input.display()))
}

fn save_paragraphs(paragraphs: &[Paragraph], output: &Path) -> Result<()> {
    let file =
        File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_paragraphs_json(paragraphs, &mut writer)
        .with_context(|| format!("failed to write {}", output.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", output.display()))
}

fn save_dataset(paragraphs: &[Paragraph], output: &Path, context_words: usize) -> Result<()> {
    let mut builder = DatasetBuilder::with_context_words(context_words);
    let records = builder.document_records(paragraphs);

    let file =
        File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_records_jsonl(&records, &mut writer)
        .with_context(|| format!("failed to write {}", output.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} {} records -> {} ({} skipped)",
        "Dataset".green().bold(),
        builder.records_emitted(),
        output.display(),
        builder.records_skipped()
    );
    Ok(())
}
