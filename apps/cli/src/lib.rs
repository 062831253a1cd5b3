//! # Sealant CLI
//!
//! Runs the generator over a symbol snapshot exported by the build.
//!
//! * `generate` writes the generated sources (or lists them with `--dry-run`).
//! * `scopes` prints the scope forest with the features each scope enables.
//! * `check` validates scopes and contributions without writing anything.
//!
//! Results go to `stdout`, logs to `stderr`. The exit status is `1` when any declaration was
//! rejected and non-zero with an error message when the run itself failed.

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use sealant::domain::config::{GeneratorConfig, LoggingConfig};
use sealant::domain::features::Feature;
use sealant::emitter::{FileSink, MemorySink};
use sealant::kernel::config::load_config;
use sealant::kernel::prelude::{ScopeConfiguration, ScopeGraph, SymbolTable};
use sealant::{Pipeline, Report};
use sealant_logger::Logger;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "sealant", version, about = "Generates DI integration sources from a symbol snapshot")]
pub struct Cli {
    /// Generator settings (TOML, JSON or YAML). `SEALANT__*` variables apply on top.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More logging; repeat for trace output.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate sources from a symbol snapshot.
    Generate(GenerateArgs),
    /// Print the scope forest with the features each scope enables.
    Scopes(SnapshotArgs),
    /// Validate scopes and contributions without writing anything.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Snapshot file, or a directory of `.json` snapshots.
    #[arg(long, short = 's', value_name = "PATH")]
    pub symbols: PathBuf,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Output directory; overrides `output.dir`.
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Render in memory and list the units instead of writing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first rejected declaration.
    #[arg(long)]
    pub fail_fast: bool,

    /// Generate only for these features (repeatable).
    #[arg(long = "feature", value_name = "NAME")]
    pub features: Vec<Feature>,

    /// Remove sources left over from a previous run.
    #[arg(long)]
    pub clean: bool,

    /// Also write the run report as JSON.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Write the run report as JSON.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// How a command ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    Diagnostics,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Clean => Self::SUCCESS,
            Outcome::Diagnostics => Self::from(1),
        }
    }
}

/// Loads settings from `--config` (if any) and the environment.
///
/// # Errors
/// Returns an error if the file is missing or malformed.
pub fn load_settings(cli: &Cli) -> anyhow::Result<GeneratorConfig> {
    load_config(cli.config.as_ref()).context("Configuration is malformed")
}

/// Console logging on `stderr`, plus rolling files when `logging.directory` is set.
///
/// # Errors
/// Returns an error if the subscriber cannot be installed.
pub fn init_logging(cli: &Cli, config: &LoggingConfig) -> anyhow::Result<Logger> {
    let mut builder = Logger::builder().name("sealant").verbosity(cli.verbose, cli.quiet);
    if let Some(filter) = &config.env_filter {
        builder = builder.env_filter(filter);
    }
    let logger = match &config.directory {
        Some(dir) => builder.path(dir).json(config.json).init(),
        None => builder.init(),
    };
    logger.context("Failed to initialize logging")
}

/// Runs one command, writing its results to `out`.
///
/// # Errors
/// Fatal generator errors and I/O errors.
pub fn run(command: Command, config: GeneratorConfig, out: &mut impl Write) -> anyhow::Result<Outcome> {
    match command {
        Command::Generate(args) => generate(args, config, out),
        Command::Scopes(args) => scopes(&args, out),
        Command::Check(args) => check(&args, config, out),
    }
}

// --- Commands ---

fn generate(args: GenerateArgs, mut config: GeneratorConfig, out: &mut impl Write) -> anyhow::Result<Outcome> {
    if let Some(dir) = args.out {
        config.output.dir = dir;
    }
    config.output.clean_stale |= args.clean;
    config.fail_fast |= args.fail_fast;
    if !args.features.is_empty() {
        config.features = args.features.into_iter().collect();
    }

    let table = load_snapshot(&args.snapshot.symbols)?;
    let pipeline = Pipeline::builder().config(config.clone()).build();

    let report = if args.dry_run {
        let sink = MemorySink::new();
        let report = pipeline.run(&table, &sink)?;
        for key in sink.keys() {
            writeln!(out, "{key}")?;
        }
        report
    } else {
        let sink = FileSink::from_config(&config.output);
        let report = pipeline.run(&table, &sink)?;
        writeln!(out, "Generated {} units into {}", report.emitted.len(), config.output.dir.display())?;
        report
    };

    finish(&report, args.report.as_deref(), out)
}

fn check(args: &CheckArgs, config: GeneratorConfig, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let table = load_snapshot(&args.snapshot.symbols)?;
    let sink = MemorySink::new();
    let report = Pipeline::builder().config(config).build().run(&table, &sink)?;

    writeln!(
        out,
        "Checked {} declarations: {} units, {} skipped",
        table.len(),
        report.emitted.len(),
        report.skips.len()
    )?;
    finish(&report, args.report.as_deref(), out)
}

fn scopes(args: &SnapshotArgs, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let table = load_snapshot(&args.symbols)?;
    let (graph, errors) = ScopeGraph::build(&table);
    graph.validate()?;

    for root in graph.roots() {
        print_scope(&graph, root, 0, out)?;
    }
    for error in &errors {
        writeln!(out, "error[{}]: {error}", error.kind())?;
    }
    Ok(if errors.is_empty() { Outcome::Clean } else { Outcome::Diagnostics })
}

// --- Helpers ---

fn load_snapshot(path: &Path) -> anyhow::Result<SymbolTable> {
    SymbolTable::from_path(path).with_context(|| format!("Failed to load snapshot {}", path.display()))
}

fn print_scope(
    graph: &ScopeGraph,
    scope: &ScopeConfiguration,
    depth: usize,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let features: Vec<String> = scope.features.features().map(|f| f.to_string()).collect();
    writeln!(out, "{}{} [{}]", "  ".repeat(depth), scope.scope, features.join(", "))?;
    for child in graph.children_of(&scope.scope) {
        print_scope(graph, child, depth + 1, out)?;
    }
    Ok(())
}

/// Prints the diagnostics and writes the JSON report if asked to.
fn finish(report: &Report, json: Option<&Path>, out: &mut impl Write) -> anyhow::Result<Outcome> {
    for diagnostic in &report.diagnostics {
        let location = diagnostic
            .source_file
            .as_ref()
            .map(|p| format!(" {}", p.display()))
            .unwrap_or_default();
        writeln!(out, "error[{}]{location}: {}", diagnostic.kind, diagnostic.message)?;
    }

    if let Some(path) = json {
        let raw = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        std::fs::write(path, raw).with_context(|| format!("Failed to write report {}", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(if report.is_clean() { Outcome::Clean } else { Outcome::Diagnostics })
}
