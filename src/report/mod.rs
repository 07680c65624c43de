pub mod chart;
pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::bayes::{LikelihoodRatios, PosteriorResult};

pub const NA: &str = "NA";

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
    pub git_hash: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParamsSummary {
    pub sensitivity_pct: u8,
    pub specificity_pct: u8,
    pub sensitivity: f64,
    pub specificity: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SweepSummary {
    pub n_points: usize,
    pub prior_min: f64,
    pub prior_max: f64,
    pub undefined_ppv: usize,
    pub undefined_one_minus_npv: usize,
}

/// Everything `summary.json` and `report.txt` are rendered from. Undefined
/// numbers stay NaN here and become `null` / `NA` at render time.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub params: ParamsSummary,
    pub sweep: SweepSummary,
    pub likelihood_ratios: LikelihoodRatios,
    pub reference: PosteriorResult,
    pub ppv_break_even_prior: f64,
    pub artifacts: Vec<String>,
}

pub fn format_f64_6(v: f64) -> String {
    if v.is_nan() {
        NA.to_string()
    } else {
        format!("{:.6}", v)
    }
}

pub fn format_pct(v: f64) -> String {
    if v.is_nan() {
        NA.to_string()
    } else {
        format!("{:.2}%", v * 100.0)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
