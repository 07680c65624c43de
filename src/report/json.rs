use serde::Serialize;

use crate::model::bayes::PosteriorResult;
use crate::report::SummaryData;

// serde_json writes non-finite floats as `null`, which is how undefined
// posteriors and infinite likelihood ratios appear in the output.
pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}

#[derive(Debug, Serialize)]
struct EvalRecord<'a> {
    tool: &'static str,
    #[serde(flatten)]
    result: &'a PosteriorResult,
    npv: f64,
    complete: bool,
}

pub fn render_eval_json(result: &PosteriorResult) -> serde_json::Result<String> {
    serde_json::to_string(&EvalRecord {
        tool: env!("CARGO_PKG_NAME"),
        result,
        npv: result.npv(),
        complete: result.is_complete(),
    })
}
