use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "sisnet workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the build/scan benchmarks and write a report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
    /// Load an edge list and print its degree summary as JSON
    Inspect {
        /// Edge list file, one `u<delim>v` record per line
        path: PathBuf,

        /// Field delimiter
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Skip empty lines
        #[arg(long, default_value_t = false)]
        skip_blank_lines: bool,

        /// Skip lines starting with this character
        #[arg(long)]
        comment: Option<char>,
    },
}

const BENCH: &str = "compact_build_benchmark";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
        Commands::Inspect {
            path,
            delimiter,
            skip_blank_lines,
            comment,
        } => inspect(&path, delimiter, skip_blank_lines, comment)?,
    }

    Ok(())
}

fn inspect(path: &Path, delimiter: char, skip_blank_lines: bool, comment: Option<char>) -> Result<()> {
    let options = sisnet::LoadOptions {
        delimiter,
        skip_blank_lines,
        comment_prefix: comment,
    };
    let start = Instant::now();
    let graph = sisnet::load_graph_with(path, &options, &mut sisnet::observer::TracingObserver)
        .with_context(|| format!("Failed to load edge list {}", path.display()))?;
    tracing::info!(elapsed = ?start.elapsed(), "loaded {}", path.display());

    println!("{}", serde_json::to_string_pretty(&graph.summary())?);
    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Compiling benchmarks...");
    let status = Command::new("cargo")
        .args(["build", "--bench", BENCH, "--release"])
        .status()?;
    if !status.success() {
        anyhow::bail!("Failed to compile benchmarks");
    }

    let start = Instant::now();
    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0");
    cmd.arg("bench").arg("--bench").arg(BENCH);

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd.status().context("Failed to run benchmarks")?;
    if !status.success() {
        anyhow::bail!("Benchmark run failed");
    }
    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

#[derive(Serialize)]
struct ReportRow {
    benchmark: String,
    mean_ns: f64,
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = BTreeMap::new();
    collect_results(criterion_dir, criterion_dir, &mut results);
    let rows: Vec<ReportRow> = results
        .into_iter()
        .map(|(benchmark, mean_ns)| ReportRow { benchmark, mean_ns })
        .collect();

    let out_dir = Path::new("benchmark_results");
    fs::create_dir_all(out_dir)?;

    use std::fmt::Write as _;
    let mut md = String::from("# Compact Build Benchmark Report\n\n| Benchmark | Mean |\n|---|---|\n");
    for row in &rows {
        writeln!(md, "| {} | {} |", row.benchmark, format_ns(row.mean_ns))?;
    }
    fs::write(out_dir.join("report.md"), md)?;
    fs::write(out_dir.join("report.json"), serde_json::to_string_pretty(&rows)?)?;

    println!("Report written to {}", out_dir.display());
    Ok(())
}

fn format_ns(ns: f64) -> String {
    if ns > 1_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else if ns > 1_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else {
        format!("{ns:.0} ns")
    }
}

/// Walks `target/criterion`, keeping the `new` estimate of each benchmark.
fn collect_results(root: &Path, dir: &Path, results: &mut BTreeMap<String, f64>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().and_then(|s| s.to_str()) != Some("report") {
                collect_results(root, &path, results);
            }
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        // Structure: <root>/<benchmark path>/new/estimates.json
        let Some(baseline_dir) = path.parent() else { continue };
        if baseline_dir.file_name().and_then(|s| s.to_str()) != Some("new") {
            continue;
        }
        let Some(bench_dir) = baseline_dir.parent() else { continue };
        let Ok(name) = bench_dir.strip_prefix(root) else { continue };

        let mean = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .and_then(|json| json.get("mean")?.get("point_estimate")?.as_f64());
        if let Some(time_ns) = mean {
            results.insert(name.display().to_string(), time_ns);
        }
    }
}
