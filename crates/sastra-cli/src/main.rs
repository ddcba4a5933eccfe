// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sastra — Khmer PDF text extraction with OCR fallback.
//
// Entry point. Initialises logging, parses arguments, runs the extraction
// pipeline, and writes or previews the result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use sastra_core::config::ExtractionOptions;
use sastra_core::human_errors::humanize_error;
use sastra_document::KhmerExtractor;

/// How much of the extracted text to show when no output file is given.
const PREVIEW_CHARS: usize = 1000;

/// Extract Khmer text from a PDF using Tesseract OCR.
#[derive(Parser, Debug)]
#[command(name = "sastra", version, long_about = None)]
struct Cli {
    /// Path to the PDF file
    pdf_path: PathBuf,

    /// Output text file path (prints a preview to the console when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// DPI for page rasterization on the OCR path (higher is better quality
    /// but slower)
    #[arg(long, default_value_t = 300)]
    dpi: u32,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the extracted text / preview.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // One generic failure code; the kinds differ only in the text.
            let human = humanize_error(&err);
            eprintln!("Error: {err}");
            eprintln!();
            eprintln!("{}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> sastra_core::Result<()> {
    let options = ExtractionOptions {
        dpi: cli.dpi,
        ..ExtractionOptions::default()
    };
    let extraction = KhmerExtractor::new(options).extract(&cli.pdf_path)?;

    match &cli.output {
        Some(path) => {
            extraction.write_to(path)?;
            println!("Extracted text saved to: {}", path.display());
        }
        None => {
            println!("\nExtracted Text Preview:");
            println!("{}", preview(&extraction.text, PREVIEW_CHARS));
        }
    }

    Ok(())
}

/// The first `limit` characters of `text`, with an ellipsis when truncated.
/// Counts characters, not bytes, so Khmer text never splits mid-code-point.
fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        None => text.to_string(),
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
    }
}
