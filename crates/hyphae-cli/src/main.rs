//! Hyphae CLI: map which files in a source tree reference which others.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use hyphae_core::config::{ScanConfig, ScanResult};
use hyphae_core::error::Result;
use hyphae_core::output::write_output;
use hyphae_core::pipeline;
use hyphae_core::tree::manifest::load_manifest;

#[derive(Parser)]
#[command(
    name = "hyphae",
    version,
    about = "Hyphae - Map the file-to-file references in a source tree"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a source tree and write its dependency graph as JSON
    Analyze {
        /// Directory to scan, or a JSON tree manifest with --manifest
        path: PathBuf,

        /// Output JSON file path
        #[arg(short, long)]
        output: Option<String>,

        /// Comma-separated language filter
        #[arg(short, long)]
        languages: Option<String>,

        /// Additional directory or file names to exclude
        #[arg(long)]
        exclude: Vec<String>,

        /// Skip files larger than this many bytes
        #[arg(long, default_value = "1000000")]
        max_file_size: u64,

        /// Scan files on a single thread
        #[arg(long)]
        sequential: bool,

        /// Treat PATH as a JSON tree manifest instead of a directory
        #[arg(long)]
        manifest: bool,

        /// Show per-phase timing breakdown and debug logs
        #[arg(long)]
        verbose: bool,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            output,
            languages,
            exclude,
            max_file_size,
            sequential,
            manifest,
            verbose,
            quiet,
        } => {
            init_logging(verbose);

            let repo_path = path.canonicalize().unwrap_or(path);
            let repo_name = if manifest {
                repo_path.file_stem()
            } else {
                repo_path.file_name()
            }
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "repo".to_string());

            let output_path = output.unwrap_or_else(|| format!("{repo_name}.hyphae.json"));

            let lang_filter = languages.map(|l| {
                l.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            });

            let config = ScanConfig {
                repo_path: repo_path.to_string_lossy().to_string(),
                    languages: lang_filter,
                exclude_patterns: exclude,
                max_file_size,
                parallel: !sequential,
                ..Default::default()
            };

            let source = if manifest {
                Source::Manifest(repo_path)
            } else {
                Source::Directory
            };

            if quiet {
                run_quiet(&config, &source, &output_path);
            } else {
                run_with_progress(&config, &source, &output_path, &repo_name, verbose);
            }
        }
    }
}

/// Where the file tree comes from.
enum Source {
    Directory,
    Manifest(PathBuf),
}

fn run(
    config: &ScanConfig,
    source: &Source,
    progress: Option<&pipeline::ProgressCallback>,
) -> Result<ScanResult> {
    match source {
        Source::Directory => pipeline::run_pipeline(config, progress),
        Source::Manifest(path) => {
            let tree = load_manifest(path)?;
            pipeline::run_tree(tree, config, progress)
        }
    }
}

fn run_quiet(config: &ScanConfig, source: &Source, output_path: &str) {
    match run(config, source, None) {
        Ok(result) => {
            if let Err(e) = write_output(&result, output_path) {
                eprintln!("Error writing output: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    }
}

fn stat(result: &ScanResult, key: &str) -> String {
    result
        .stats
        .get(key)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "0".to_string())
}

fn run_with_progress(
    config: &ScanConfig,
    source: &Source,
    output_path: &str,
    repo_name: &str,
    verbose: bool,
) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Initialising...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |msg| {
            pb.set_message(msg.to_string());
        })
    };

    let start = Instant::now();
    let result = match run(config, source, Some(&progress)) {
        Ok(r) => r,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    };
    pb.finish_and_clear();

    // Summary
    println!(
        "\n{}  Hyphae Scan: {}",
        style("✓").green().bold(),
        style(repo_name).bold()
    );
    println!("  {:<14} {}", "Files:", stat(&result, "files"));
    println!("  {:<14} {}", "Scanned:", stat(&result, "scanned_files"));
    println!("  {:<14} {}", "References:", stat(&result, "raw_references"));
    println!("  {:<14} {}", "Links:", stat(&result, "links"));
    println!("  {:<14} {}", "Isolated:", stat(&result, "isolated_files"));

    let duration = start.elapsed();
    println!(
        "  {:<14} {:.1}ms",
        "Duration:",
        duration.as_secs_f64() * 1000.0
    );

    if verbose {
        if let Some(serde_json::Value::Object(timings)) = result.metadata.get("phase_timings") {
            println!("\n  Phase Timings:");
            for (phase, secs) in timings {
                if let Some(val) = secs.as_f64() {
                    println!("    {:<14} {:.1}ms", phase, val * 1000.0);
                }
            }
        }
    }

    if let Err(e) = write_output(&result, output_path) {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }

    println!(
        "\n  {} {}",
        style("Output written to:").green(),
        Path::new(output_path).display()
    );
}
