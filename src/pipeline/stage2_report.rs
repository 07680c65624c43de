use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::model::bayes::{likelihood_ratios, posterior, ppv_break_even_prior};
use crate::model::params::Percent;
use crate::model::sweep::Sweep;
use crate::report::chart::{ChartOptions, render_chart_svg};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{ParamsSummary, SummaryData, SweepSummary, ToolMeta, format_f64_6};

pub const SWEEP_TSV: &str = "sweep.tsv";
pub const SUMMARY_JSON: &str = "summary.json";
pub const REPORT_TXT: &str = "report.txt";
pub const CHART_SVG: &str = "chart.svg";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Stage2Input<'a> {
    pub sweep: &'a Sweep,
    pub sensitivity_pct: Percent,
    pub specificity_pct: Percent,
    pub reference_prior: f64,
    pub chart: ChartOptions,

    pub tool_name: String,
    pub tool_version: String,
    pub git_hash: Option<String>,
}

pub fn write_reports(input: &Stage2Input<'_>, out_dir: &Path) -> Result<SummaryData, ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let tsv_path = out_dir.join(SWEEP_TSV);
    write_sweep_tsv(input.sweep, &tsv_path).map_err(|source| ReportError::Write {
        path: tsv_path.clone(),
        source,
    })?;

    let svg = render_chart_svg(input.sweep, &input.chart);
    write_text(&out_dir.join(CHART_SVG), &svg)?;

    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&out_dir.join(SUMMARY_JSON), &json)?;

    let report = render_report_text(&summary);
    write_text(&out_dir.join(REPORT_TXT), &report)?;

    info!(
        out_dir = %out_dir.display(),
        n_points = input.sweep.len(),
        "reports written"
    );
    Ok(summary)
}

fn write_sweep_tsv(sweep: &Sweep, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "prior",
        "ppv",
        "one_minus_npv",
        "sensitivity",
        "specificity",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    for p in &sweep.points {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            format_f64_6(p.prior),
            format_f64_6(p.ppv),
            format_f64_6(p.one_minus_npv),
            format_f64_6(p.sensitivity),
            format_f64_6(p.specificity),
        )?;
    }
    w.flush()
}

fn build_summary(input: &Stage2Input<'_>) -> SummaryData {
    let sweep = input.sweep;
    let params = &sweep.params;

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
            git_hash: input.git_hash.clone(),
        },
        params: ParamsSummary {
            sensitivity_pct: input.sensitivity_pct.get(),
            specificity_pct: input.specificity_pct.get(),
            sensitivity: params.sensitivity,
            specificity: params.specificity,
        },
        sweep: SweepSummary {
            n_points: sweep.len(),
            prior_min: sweep.priors().next().unwrap_or(f64::NAN),
            prior_max: sweep.priors().last().unwrap_or(f64::NAN),
            undefined_ppv: sweep.undefined_ppv(),
            undefined_one_minus_npv: sweep.undefined_one_minus_npv(),
        },
        likelihood_ratios: likelihood_ratios(params),
        reference: posterior(input.reference_prior, params),
        ppv_break_even_prior: ppv_break_even_prior(params),
        artifacts: [SWEEP_TSV, CHART_SVG, SUMMARY_JSON, REPORT_TXT]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    let write = || -> std::io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        w.write_all(contents.as_bytes())?;
        w.flush()
    };
    write().map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_report.rs"]
mod tests;
