use clap::Parser;
use keifu::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Trace a generated image's workflow back to its models, prompts and parameters
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow JSON file
    workflow_path: String,

    /// Optional path to an analyzer configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Print the findings as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Print timing information after the report
    #[arg(short, long)]
    timings: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "keifu=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Configuration ---
    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read config file '{}': {}", path, e))
            });
            AnalyzerConfig::from_json(&text).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse config file '{}': {}", path, e))
            })
        }
        None => AnalyzerConfig::default(),
    };
    let analyzer = Analyzer::builder().with_config(config).build();

    // --- 2. File Loading ---
    let load_start = Instant::now();
    let document = load_workflow_file(&cli.workflow_path)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let load_duration = load_start.elapsed();

    // --- 3. Analysis ---
    let analysis_start = Instant::now();
    let findings = analyzer
        .analyze(&document)
        .unwrap_or_else(|e| exit_with_error(&format!("Analysis could not run: {}", e)));
    let analysis_duration = analysis_start.elapsed();

    // --- 4. Output ---
    if cli.json {
        let rendered = serde_json::to_string_pretty(&findings)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize findings: {}", e)));
        println!("{}", rendered);
    } else {
        print!("{}", ReportFormatter::format(&findings));
    }

    if cli.timings {
        eprintln!("\n--- Performance Summary ---");
        eprintln!("File Loading:   {:?}", load_duration);
        eprintln!("Analysis:       {:?}", analysis_duration);
        eprintln!("Total:          {:?}", total_start.elapsed());
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
