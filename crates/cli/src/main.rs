//! CLI tool for filling PowerPoint templates from tabular data.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use deck_core::scan::find_placeholders_in_deck;
use deck_core::{find_placeholders, generate, GenerationConfig, GenerationReport, Table};
use deck_pptx::PptxDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// Fill PowerPoint templates, one slide per data row.
#[derive(Parser, Debug)]
#[command(name = "deck-fill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill a template from a JSON table
    Fill(FillArgs),
    /// List the placeholders found in templates
    Scan {
        /// Template file(s) (.pptx)
        #[arg(required = true)]
        templates: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct FillArgs {
    /// Template file (.pptx)
    #[arg(short, long)]
    template: PathBuf,

    /// Data rows: a JSON array of objects
    #[arg(short, long)]
    data: PathBuf,

    /// Generation config (default: the stock template mapping)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (default: <template>-filled.pptx next to the template)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory holding the per-row pictures
    #[arg(long)]
    img_dir: Option<PathBuf>,

    /// Directory holding the badge icons
    #[arg(long)]
    logos_dir: Option<PathBuf>,

    /// Cell value that turns a badge on
    #[arg(long)]
    activation: Option<String>,

    /// Use at most this many rows
    #[arg(short, long)]
    max_slides: Option<usize>,

    /// Write the generation report as JSON
    #[arg(short, long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match &cli.command {
        Command::Fill(args) => fill(args, cli.verbose),
        Command::Scan { templates } => scan(templates),
    }
}

fn fill(args: &FillArgs, verbose: bool) -> Result<()> {
    let config = load_config(args)?;

    let text = fs::read_to_string(&args.data)
        .with_context(|| format!("Failed to read {}", args.data.display()))?;
    let mut table = Table::from_json(&text)
        .with_context(|| format!("Invalid data in {}", args.data.display()))?;
    if let Some(max) = args.max_slides {
        table.truncate(max);
    }

    let mut doc = PptxDocument::open(&args.template)
        .with_context(|| format!("Failed to open {}", args.template.display()))?;
    if verbose {
        eprintln!(
            "Processing: {} ({} slides, {} rows)",
            args.template.display(),
            doc.deck().slides.len(),
            table.len()
        );
    }

    let report = generate(doc.deck_mut(), &table, &config);

    let output_path = get_output_path(&args.template, args.output.as_ref());
    doc.save(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }

    print_summary(&report, &output_path);
    Ok(())
}

/// The generation config, with the command-line overrides applied.
fn load_config(args: &FillArgs) -> Result<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            GenerationConfig::from_json(&text)
                .with_context(|| format!("Invalid config in {}", path.display()))?
        }
        None => GenerationConfig::default(),
    };

    if let Some(dir) = &args.img_dir {
        config = config.with_image_dir(dir);
    }
    if let Some(dir) = &args.logos_dir {
        config = config.with_badge_dir(dir);
    }
    if let Some(value) = &args.activation {
        config = config.with_activation(value);
    }
    Ok(config)
}

fn scan(templates: &[PathBuf]) -> Result<()> {
    let mut failures = 0;

    for path in templates {
        match scan_file(path) {
            Ok(output) => print!("{}", output),
            Err(e) => {
                eprintln!("Error processing {}: {:#}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} templates could not be read", failures, templates.len());
    }
    Ok(())
}

/// Placeholders of one template, slide by slide.
fn scan_file(path: &Path) -> Result<String> {
    let doc = PptxDocument::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let deck = doc.deck();

    let mut output = format!("{}\n", path.display());
    for (index, slide) in deck.slides.iter().enumerate() {
        let found = find_placeholders(slide);
        if found.is_empty() {
            continue;
        }
        output.push_str(&format!("  slide {}:", index + 1));
        for key in found.keys() {
            output.push(' ');
            output.push_str(found.get(key).unwrap_or(key));
        }
        output.push('\n');
    }

    let total = find_placeholders_in_deck(deck);
    output.push_str(&format!("  {} distinct placeholders\n", total.len()));
    Ok(output)
}

/// Determine the output path for a filled template.
fn get_output_path(template: &Path, output: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = output {
        return path.clone();
    }

    let stem = template
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let filename = format!("{}-filled.pptx", stem);

    match template.parent() {
        Some(parent) => parent.join(filename),
        None => PathBuf::from(filename),
    }
}

fn write_report(path: &Path, report: &GenerationReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

fn print_summary(report: &GenerationReport, output_path: &Path) {
    eprintln!(
        "Filled {} slides: {} placeholders, {} pictures, {} badges",
        report.slides.len(),
        report.replaced_count(),
        report.pictures_replaced(),
        report.badges_placed()
    );
    if report.dropped_rows > 0 {
        eprintln!(
            "  {} rows had no slide left and were skipped",
            report.dropped_rows
        );
    }
    for slide in &report.slides {
        if !slide.failed.is_empty() {
            eprintln!(
                "  slide {}: not substituted: {}",
                slide.index + 1,
                slide.failed.join(", ")
            );
        }
    }
    eprintln!("Written to: {}", output_path.display());
}
