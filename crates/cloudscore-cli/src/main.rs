//! CLI entry point for cloudscore.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All business logic lives in the `cloudscore-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use cloudscore_app::{
    AssessInput, parse_report_json, render_annotations, render_markdown, render_text,
    run_assessment, run_coverage, score_exit_code, serialize_report, to_renderable,
};
use cloudscore_domain::{CancelToken, CheckRegistry};
use cloudscore_settings::Overrides;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "cloudscore",
    version,
    about = "Evaluate cloud assets against a control catalog and score compliance"
)]
struct Cli {
    /// Path to cloudscore config TOML (missing file means defaults).
    #[arg(long, default_value = "cloudscore.toml")]
    config: Utf8PathBuf,

    /// Override profile (default|floored|parallel).
    #[arg(long)]
    profile: Option<String>,

    /// Override the score of a fully compliant asset.
    #[arg(long, allow_hyphen_values = true)]
    baseline: Option<i64>,

    /// Override the lowest reported score.
    #[arg(long, allow_hyphen_values = true)]
    score_floor: Option<i64>,

    /// Override the number of assets evaluated concurrently.
    #[arg(long)]
    workers: Option<u32>,

    /// Override the per-check deadline in milliseconds (0 disables it).
    #[arg(long)]
    check_timeout_ms: Option<u64>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate every asset against the catalog and write the JSON report.
    Assess {
        /// Control catalog JSON.
        #[arg(long)]
        catalog: Utf8PathBuf,

        /// Asset inventory JSON.
        #[arg(long)]
        assets: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/cloudscore/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/cloudscore/report.md")]
        markdown_out: Utf8PathBuf,

        /// Exit with code 2 when any asset scores below this value.
        #[arg(long, allow_hyphen_values = true)]
        fail_below: Option<i64>,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/cloudscore/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Print the plain-text compliance report from an existing JSON report.
    Text {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/cloudscore/report.json")]
        report: Utf8PathBuf,
    },

    /// Render GitHub Actions annotations for failed criteria.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/cloudscore/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// List catalog check ids and whether each resolves to a check.
    Checks {
        /// Control catalog JSON.
        #[arg(long)]
        catalog: Utf8PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.cmd {
        Commands::Assess {
            catalog,
            assets,
            report_out,
            write_markdown,
            markdown_out,
            fail_below,
        } => cmd_assess(
            &cli,
            catalog,
            assets,
            report_out,
            write_markdown.then_some(markdown_out.as_path()),
            *fail_below,
        ),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()).map(|()| 0),
        Commands::Text { report } => cmd_text(report).map(|()| 0),
        Commands::Annotations { report, max } => cmd_annotations(report, *max).map(|()| 0),
        Commands::Checks { catalog } => cmd_checks(&cli, catalog).map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("cloudscore error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Install the stderr log subscriber. `CLOUDSCORE_LOG` takes `EnvFilter` directives.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CLOUDSCORE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("cloudscore=info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter)
        .init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        baseline: cli.baseline,
        score_floor: cli.score_floor,
        workers: cli.workers,
        check_timeout_ms: cli.check_timeout_ms,
    }
}

/// Load config if present; a missing file is allowed (defaults apply).
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    if !path.exists() {
        tracing::debug!(path = %path, "no config file; using defaults");
        return Ok(String::new());
    }
    std::fs::read_to_string(path).with_context(|| format!("read config: {}", path))
}

fn read_input(path: &Utf8Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what}: {}", path))
}

/// Checks compiled into this binary. Config-defined attribute checks are added by the app layer.
fn builtin_registry() -> CheckRegistry {
    CheckRegistry::new()
}

fn cmd_assess(
    cli: &Cli,
    catalog_path: &Utf8Path,
    assets_path: &Utf8Path,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
    fail_below: Option<i64>,
) -> anyhow::Result<i32> {
    let config_text = read_config(&cli.config)?;
    let catalog_text = read_input(catalog_path, "catalog")?;
    let inventory_text = read_input(assets_path, "asset inventory")?;

    let input = AssessInput {
        config_text: &config_text,
        catalog_text: &catalog_text,
        inventory_text: &inventory_text,
        overrides: overrides(cli),
        registry: builtin_registry(),
    };
    // Nothing in the binary triggers cancellation; an interrupt ends the process.
    let output = run_assessment(input, &CancelToken::new())?;

    write_report_file(report_out, &output.report).context("write report json")?;

    if let Some(md_path) = markdown_out {
        let md = render_markdown(&to_renderable(&output.report));
        write_text_file(md_path, &md).context("write markdown")?;
    }

    tracing::info!(
        assets = output.report.assets.len(),
        report = %report_out,
        "assessment complete"
    );

    Ok(score_exit_code(&output.report, fail_below))
}

fn write_report_file(
    path: &Utf8Path,
    report: &cloudscore_app::CloudscoreReport,
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn load_report(report_path: &Utf8Path) -> anyhow::Result<cloudscore_app::CloudscoreReport> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    parse_report_json(&report_text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = load_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_text(report_path: &Utf8Path) -> anyhow::Result<()> {
    let report = load_report(report_path)?;
    print!("{}", render_text(&to_renderable(&report)));
    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = load_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_checks(cli: &Cli, catalog_path: &Utf8Path) -> anyhow::Result<()> {
    let config_text = read_config(&cli.config)?;
    let catalog_text = read_input(catalog_path, "catalog")?;

    let coverage = run_coverage(&config_text, &catalog_text, overrides(cli), builtin_registry())?;
    for entry in coverage {
        println!(
            "{}\t{}\t{}",
            entry.check_id,
            entry.status.as_str(),
            entry.uses
        );
    }
    Ok(())
}
