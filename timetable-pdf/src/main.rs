// timetable-pdf: Render a scraped timetable as a color-coded PDF

use chrono::Local;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use timetable_pdf::{generate_pdf, FontSource, RenderConfig, TimetableError, TimetableInput};

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Render a timetable grid as a color-coded PDF")]
struct Args {
    /// Extracted timetable (JSON with course_rows and grid)
    #[arg(short, long)]
    input: PathBuf,

    /// Render configuration overrides (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output filename (defaults to timetable-{date}.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Title printed above the table
    #[arg(short, long)]
    title: Option<String>,

    /// Regular TrueType font (requires --font-bold)
    #[arg(long, requires = "font_bold")]
    font: Option<PathBuf>,

    /// Bold TrueType font (requires --font)
    #[arg(long, requires = "font")]
    font_bold: Option<PathBuf>,

    /// Do not repeat the header row on continuation pages
    #[arg(long)]
    no_repeat_header: bool,

    /// Log layout decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

// ============================================================================
// Logging
// ============================================================================

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), TimetableError> {
    let args = Args::parse();
    init_logging(args.verbose);

    let input = TimetableInput::from_json_file(&args.input)?;

    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    };
    if let Some(title) = args.title.clone().or_else(|| input.title.clone()) {
        config.title = Some(title);
    }
    if let (Some(regular), Some(bold)) = (args.font, args.font_bold) {
        config.font = FontSource::TrueType { regular, bold };
    }
    if args.no_repeat_header {
        config.repeat_header_on_new_page = false;
    }

    let output_file = args.output.unwrap_or_else(|| {
        PathBuf::from(format!("timetable-{}.pdf", Local::now().format("%Y-%m-%d")))
    });

    let report = generate_pdf(&input, config, &output_file)?;

    println!("✓ Generated: {}", output_file.display());
    println!("  Rows: {}", report.rows);
    println!("  Pages: {}", report.pages);
    if !report.unresolved.is_empty() {
        println!("  Unresolved slots: {}", report.unresolved.len());
    }

    Ok(())
}
