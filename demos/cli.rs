//! Command-line front end for top_colors
//!
//! Prints the dominant colors of an image as JSON on stdout and a short
//! summary on stderr.
//!
//! Usage:
//!   cargo run --example cli -- photo.png --code hex
//!   cargo run --example cli -- photo.png --code cmyk --config config.json
//!   cargo run --example cli -- --write-default-config config.json

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::info;
use top_colors::image_loader::ImageFormat;
use top_colors::{AnalysisConfig, ColorPipeline, ColorReport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Report the dominant colors of an image", long_about = None)]
struct Cli {
    /// Image to analyze (PNG, JPEG or GIF)
    #[arg(required_unless_present = "write_default_config")]
    image: Option<PathBuf>,

    /// Output representation: hex, cmyk, or anything else for raw RGB
    #[arg(short, long)]
    code: Option<String>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the default configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_default_config: Option<PathBuf>,

    /// Accept files whose extension the upload layer would reject
    #[arg(long)]
    any_extension: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(path) = &cli.write_default_config {
        write_default_config(path);
        return;
    }

    let Some(image_path) = cli.image.as_deref() else {
        eprintln!("No image given");
        process::exit(2);
    };

    if !cli.any_extension && !has_upload_extension(image_path) {
        eprintln!(
            "Unsupported file type: {} (allowed: {})",
            image_path.display(),
            top_colors::image_loader::supported_extensions().join(", ")
        );
        process::exit(2);
    }

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path).unwrap_or_else(|error| {
            eprintln!("Error loading config: {}", error);
            process::exit(1);
        }),
        None => AnalysisConfig::default(),
    };

    let pipeline = match ColorPipeline::new(&config) {
        Ok(pipeline) => pipeline,
        Err(error) => {
            eprintln!("Invalid configuration: {}", error);
            process::exit(1);
        }
    };

    info!("Analyzing {}", image_path.display());
    match pipeline.report(image_path, cli.code.as_deref()) {
        Ok(report) => print_report(&report),
        Err(error) => {
            eprintln!("Analysis failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    }
}

fn has_upload_extension(path: &Path) -> bool {
    ImageFormat::from_extension(path).is_some()
}

fn write_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    match AnalysisConfig::default().to_json_file(path) {
        Ok(()) => eprintln!("Configuration saved to {}", path.display()),
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}

fn print_report(report: &ColorReport) {
    // JSON to stdout for programmatic use
    match serde_json::to_string_pretty(&report.formatted()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    }

    // Summary to stderr for human reading
    eprintln!();
    eprintln!("Color Analysis Summary:");
    eprintln!(
        "  Image: {}x{} (analyzed at {}x{})",
        report.source_dimensions.0,
        report.source_dimensions.1,
        report.analyzed_dimensions.0,
        report.analyzed_dimensions.1
    );
    eprintln!("  Distinct colors: {}", report.distinct_colors);
    for (rank, entry) in report.colors.iter().enumerate() {
        eprintln!(
            "  {:>2}. {:<28} {:>6.2}%",
            rank + 1,
            entry.color.to_string(),
            entry.share * 100.0
        );
    }
}
