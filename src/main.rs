mod adapters;
mod application;
mod cli;
mod config;
mod inventory;
mod ports;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::SbomFileWriter;
use adapters::outbound::system::SysinfoHostProbe;
use adapters::scanners::{
    ApplicationScanner, BrewScanner, CargoScanner, ChromeScanner, CursorScanner, GemScanner,
    GoScanner, NpmScanner, PipScanner, VsCodeScanner, YarnScanner,
};
use application::use_cases::GenerateSbomsUseCase;
use cli::Args;
use config::Config;
use owo_colors::OwoColorize;
use ports::Scanner;
use shared::Result;
use std::path::Path;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse_args();

    let mut config = Config::default();
    if let Some(path) = &args.config {
        config = config::load_config_from_path(Path::new(path))?.apply_to(config);
    } else if let Some(file) = config::discover_config(Path::new("."))? {
        config = file.apply_to(config);
    }
    let config = args.apply_to(config);

    let writer = SbomFileWriter::prepare(&config.output_dir)?;
    let scanners = build_scanners(&config);
    if config.verbose {
        for scanner in &scanners {
            eprintln!("  enabled scanner: {}", scanner.name());
        }
    }

    let use_case = GenerateSbomsUseCase::new(
        SysinfoHostProbe::new(),
        StderrProgressReporter::new(config.verbose),
        writer,
    );
    let summary = use_case.execute(&scanners, &config)?;

    print_summary(&summary);
    Ok(())
}

/// Instantiates every known scanner and drops the disabled ones.
fn build_scanners(config: &Config) -> Vec<Box<dyn Scanner>> {
    let all: Vec<Box<dyn Scanner>> = vec![
        Box::new(NpmScanner),
        Box::new(YarnScanner),
        Box::new(PipScanner),
        Box::new(GemScanner),
        Box::new(GoScanner),
        Box::new(BrewScanner),
        Box::new(CargoScanner),
        Box::new(ApplicationScanner),
        Box::new(VsCodeScanner),
        Box::new(CursorScanner),
        Box::new(ChromeScanner),
    ];

    all.into_iter()
        .filter(|scanner| {
            let disabled = config.is_scanner_disabled(scanner.name());
            if disabled && config.verbose {
                eprintln!("  skipping disabled scanner: {}", scanner.name());
            }
            !disabled
        })
        .collect()
}

fn print_summary(summary: &application::dto::ScanSummary) {
    println!();
    println!("{}", "Inventory complete".green().bold());
    for result in &summary.results {
        println!(
            "  {} {:>5} component(s)  {}",
            result.category.to_string().cyan(),
            result.component_count,
            result.output_path.display()
        );
    }
    if !summary.scanner_errors.is_empty() {
        println!();
        for (name, message) in &summary.scanner_errors {
            println!("  {} scanner '{}': {}", "warning:".yellow(), name, message);
        }
    }
    if !summary.degenerate_refs.is_empty() {
        println!(
            "  {} {} component(s) had no usable identity",
            "warning:".yellow(),
            summary.degenerate_refs.len()
        );
    }
    println!();
    println!(
        "  {} document(s), {} component(s) total",
        summary.results.len(),
        summary.total_components()
    );
}
