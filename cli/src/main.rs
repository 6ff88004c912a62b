//! unhwp CLI - HWP/HWPX text extraction tool
//!
//! A command-line tool for extracting structured content from Korean HWP 5.x
//! and HWPX documents.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use unhwp::render::JsonFormat;

/// HWP/HWPX document extraction to YAML, text, and JSON
#[derive(Parser)]
#[command(
    name = "unhwp",
    version,
    about = "Extract content from HWP documents",
    long_about = "unhwp - structured text extraction for Korean HWP 5.x and HWPX files.\n\n\
                  Decodes the binary record streams (or section XML) and emits the\n\
                  reconstructed sections, paragraphs, and tables."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to a YAML extraction report
    Yaml {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a document to flattened plain text
    Text {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a document to JSON
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Classify files by HWP format version
    Triage {
        /// Input files or directories
        inputs: Vec<PathBuf>,

        /// Recurse into directories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Extract a directory of documents to YAML reports
    Batch {
        /// Input directory
        input: PathBuf,

        /// Output directory for YAML reports
        #[arg(short, long, default_value = "out")]
        output: PathBuf,

        /// Recurse into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Worker threads (default: rayon's heuristic)
        #[arg(short, long)]
        jobs: Option<usize>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Yaml { input, output } => {
            let yaml = unhwp::to_yaml(&input)?;
            write_output(output.as_deref(), &yaml)?;
        }

        Commands::Text { input, output } => {
            let text = unhwp::extract_text(&input)?;
            write_output(output.as_deref(), &text)?;
        }

        Commands::Json {
            input,
            output,
            compact,
        } => {
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = unhwp::to_json(&input, format)?;
            write_output(output.as_deref(), &json)?;
        }

        Commands::Info { input } => {
            print_info(&input)?;
        }

        Commands::Triage { inputs, recursive } => {
            triage(&inputs, recursive);
        }

        Commands::Batch {
            input,
            output,
            recursive,
            jobs,
        } => {
            if let Some(jobs) = jobs {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build_global()
                    .ok();
            }
            batch(&input, &output, recursive)?;
        }
    }

    Ok(())
}

fn write_output(path: Option<&std::path::Path>, content: &str) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, content),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn print_info(input: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = unhwp::detect_format_from_path(input)?;
    println!("{}: {}", "Format".bold(), format);

    let doc = unhwp::parse_file(input)?;
    println!("{}: {}", "Version".bold(), doc.version);
    println!("{}: {}", "Compressed".bold(), doc.compressed);
    println!("{}: {}", "Sections".bold(), doc.sections.len());
    println!("{}: {}", "Paragraphs".bold(), doc.paragraph_count());
    println!("{}: {}", "Tables".bold(), doc.table_count());

    for section in &doc.sections {
        println!(
            "  section {}: {} paragraphs, {} tables",
            section.index,
            section.paragraphs.len(),
            section.tables.len()
        );
    }
    Ok(())
}

fn triage(inputs: &[PathBuf], recursive: bool) {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(unhwp::batch::collect_files(input, recursive));
        } else {
            files.push(input.clone());
        }
    }

    let mut counts = [0usize; 4];
    for file in &files {
        let label = match unhwp::detect_format_from_path(file) {
            Ok(format) => {
                match format {
                    unhwp::FormatType::Hwp5 => counts[0] += 1,
                    unhwp::FormatType::Hwpx => counts[1] += 1,
                    unhwp::FormatType::Hwp3 => counts[2] += 1,
                }
                format.name().green()
            }
            Err(_) => {
                counts[3] += 1;
                "unknown".yellow()
            }
        };
        println!("{}  {}", label, file.display());
    }

    println!();
    println!(
        "{}: {} total — {} HWP 5.x, {} HWPX, {} HWP 3.x, {} unknown",
        "Triage".bold(),
        files.len(),
        counts[0],
        counts[1],
        counts[2],
        counts[3]
    );
}

fn batch(
    input: &std::path::Path,
    output: &std::path::Path,
    recursive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = unhwp::batch::collect_files(input, recursive);
    if files.is_empty() {
        println!("No .hwp/.hwpx files under {}", input.display());
        return Ok(());
    }
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );

    let outcomes: Vec<unhwp::batch::FileOutcome> = files
        .par_iter()
        .map(|path| {
            let outcome = unhwp::batch::process_file(path);
            pb.inc(1);
            outcome
        })
        .collect();
    pb.finish_and_clear();

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    for outcome in &outcomes {
        match (&outcome.document, &outcome.method) {
            (Some(doc), Some(method)) => {
                let stem = outcome
                    .path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "output".to_string());
                let report = unhwp::render::to_yaml(
                    doc,
                    outcome.path.display().to_string(),
                    *method,
                )?;
                fs::write(output.join(format!("{stem}.yaml")), report)?;
                succeeded += 1;
            }
            _ => {
                failed += 1;
                if let Some(error) = &outcome.error {
                    eprintln!(
                        "{} {}: {}",
                        "skip".yellow(),
                        outcome.path.display(),
                        error
                    );
                }
            }
        }
    }

    println!(
        "{}: {} extracted, {} failed, reports in {}",
        "Batch".green().bold(),
        succeeded,
        failed,
        output.display()
    );
    Ok(())
}
