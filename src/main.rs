mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use crate::model::bayes::{BayesError, check_unit, evaluate};
use crate::model::params::{
    DEFAULT_SENSITIVITY_PCT, DEFAULT_SPECIFICITY_PCT, Percent, TestParams,
};
use crate::pipeline::stage1_sweep::{DEFAULT_POINTS, run_stage1};
use crate::pipeline::stage2_report::{ReportError, Stage2Input, write_reports};
use crate::report::chart::{ChartOptions, DEFAULT_TITLE};
use crate::report::json::render_eval_json;
use crate::report::text::render_eval_text;

const DEFAULT_REFERENCE_PRIOR: f64 = 0.1;

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Bayes(#[from] BayesError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("failed to encode result: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Parser)]
#[command(
    name = "posttest-curves",
    version,
    about = "Post-test probability of disease vs. pre-test probability for one diagnostic test"
)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sweep pre-test probabilities over [0, 1] and write chart and reports.
    Run(RunArgs),
    /// Evaluate a single pre-test probability.
    Eval(EvalArgs),
}

#[derive(Debug, Clone, Copy, Args)]
struct TestArgs {
    /// Sensitivity in whole percent.
    #[arg(
        long,
        default_value_t = DEFAULT_SENSITIVITY_PCT,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    sensitivity: u8,

    /// Specificity in whole percent.
    #[arg(
        long,
        default_value_t = DEFAULT_SPECIFICITY_PCT,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    specificity: u8,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    #[command(flatten)]
    test: TestArgs,

    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = DEFAULT_POINTS, value_parser = parse_points)]
    points: usize,

    /// Pre-test probability highlighted in the text report.
    #[arg(long, default_value_t = DEFAULT_REFERENCE_PRIOR, value_parser = parse_probability)]
    prior: f64,

    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,
}

#[derive(Debug, Clone, Args)]
struct EvalArgs {
    #[command(flatten)]
    test: TestArgs,

    #[arg(long, value_parser = parse_probability)]
    prior: f64,

    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone)]
struct RunConfig {
    sensitivity: Percent,
    specificity: Percent,
    out_dir: PathBuf,
    n_points: usize,
    reference_prior: f64,
    title: String,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(err) = dispatch(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn dispatch(command: Command) -> Result<(), RunError> {
    match command {
        Command::Run(args) => run(&resolve_config(args)?),
        Command::Eval(args) => eval(&args),
    }
}

fn resolve_config(args: RunArgs) -> Result<RunConfig, BayesError> {
    Ok(RunConfig {
        sensitivity: Percent::new(args.test.sensitivity)?,
        specificity: Percent::new(args.test.specificity)?,
        out_dir: args.out,
        n_points: args.points,
        reference_prior: args.prior,
        title: args.title,
    })
}

fn run(config: &RunConfig) -> Result<(), RunError> {
    let params = TestParams::from_percent(config.sensitivity, config.specificity);
    info!(
        sensitivity_pct = config.sensitivity.get(),
        specificity_pct = config.specificity.get(),
        n_points = config.n_points,
        "running prior sweep"
    );

    let sweep = run_stage1(&params, config.n_points);

    let input = Stage2Input {
        sweep: &sweep,
        sensitivity_pct: config.sensitivity,
        specificity_pct: config.specificity,
        reference_prior: config.reference_prior,
        chart: ChartOptions {
            title: config.title.clone(),
            ..ChartOptions::default()
        },
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: read_git_hash(&PathBuf::from(".")),
    };
    write_reports(&input, &config.out_dir)?;
    Ok(())
}

fn eval(args: &EvalArgs) -> Result<(), RunError> {
    let params = TestParams::from_percent(
        Percent::new(args.test.sensitivity)?,
        Percent::new(args.test.specificity)?,
    );
    let result = evaluate(args.prior, params.sensitivity, params.specificity)?;
    if args.json {
        println!("{}", render_eval_json(&result)?);
    } else {
        println!("{}", render_eval_text(&result));
    }
    Ok(())
}

fn parse_points(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("invalid point count: {s}"))?;
    if n < 2 {
        return Err("point count must be at least 2".to_string());
    }
    Ok(n)
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .parse()
        .map_err(|_| format!("invalid probability: {s}"))?;
    check_unit("prior", v).map_err(|e| e.to_string())?;
    Ok(v)
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
