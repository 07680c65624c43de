use crate::model::bayes::PosteriorResult;
use crate::report::{SummaryData, format_f64_6, format_pct};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Pre-Test vs Post-Test Probability Report (1 test)\n");
    out.push_str("=================================================\n\n");

    out.push_str("1. Test characteristics\n");
    out.push_str(&format!(
        "Sensitivity: {}% ({})\n",
        data.params.sensitivity_pct,
        format_f64_6(data.params.sensitivity)
    ));
    out.push_str(&format!(
        "Specificity: {}% ({})\n",
        data.params.specificity_pct,
        format_f64_6(data.params.specificity)
    ));
    out.push_str(&format!(
        "LR+: {}\nLR-: {}\n\n",
        format_ratio(data.likelihood_ratios.positive),
        format_ratio(data.likelihood_ratios.negative)
    ));

    out.push_str("2. Reference point\n");
    let r = &data.reference;
    out.push_str(&format!("Pre-test probability: {}\n", format_pct(r.prior)));
    out.push_str(&format!(
        "After a positive result (PPV): {}\n",
        format_pct(r.ppv)
    ));
    out.push_str(&format!(
        "After a negative result (1 - NPV): {}\n",
        format_pct(r.one_minus_npv)
    ));
    out.push_str(&format!(
        "Positive result: {}\n",
        positive_statement(r.prior, r.ppv)
    ));
    out.push_str(&format!(
        "Negative result: {}\n",
        negative_statement(r.prior, r.one_minus_npv)
    ));
    out.push_str(&format!(
        "Pre-test probability at which PPV reaches 50%: {}\n\n",
        format_pct(data.ppv_break_even_prior)
    ));

    out.push_str("3. Sweep\n");
    out.push_str(&format!(
        "Points: {} (pre-test {} to {})\n",
        data.sweep.n_points,
        format_f64_6(data.sweep.prior_min),
        format_f64_6(data.sweep.prior_max)
    ));
    out.push_str(&format!(
        "Undefined PPV points: {}\nUndefined 1 - NPV points: {}\n",
        data.sweep.undefined_ppv, data.sweep.undefined_one_minus_npv
    ));
    if data.sweep.undefined_ppv + data.sweep.undefined_one_minus_npv > 0 {
        out.push_str(
            "Note: undefined points occur where both branches of Bayes' denominator are zero; they are shown as gaps in the chart.\n",
        );
    }
    out.push('\n');

    out.push_str("4. Notes\n");
    out.push_str(NOTES);

    out
}

pub fn render_eval_text(r: &PosteriorResult) -> String {
    format!(
        "prior={} sensitivity={} specificity={} ppv={} one_minus_npv={}",
        format_f64_6(r.prior),
        format_f64_6(r.sensitivity),
        format_f64_6(r.specificity),
        format_f64_6(r.ppv),
        format_f64_6(r.one_minus_npv)
    )
}

fn format_ratio(v: f64) -> String {
    if v.is_infinite() {
        "inf".to_string()
    } else {
        format_f64_6(v)
    }
}

fn positive_statement(prior: f64, ppv: f64) -> &'static str {
    if ppv.is_nan() {
        "undefined at this pre-test probability"
    } else if ppv >= 0.90 {
        "strongly confirms disease"
    } else if ppv >= 0.50 {
        "makes disease more likely than not"
    } else if ppv > prior {
        "raises the probability of disease, but it stays below 50%"
    } else {
        "carries no confirmatory weight"
    }
}

fn negative_statement(prior: f64, one_minus_npv: f64) -> &'static str {
    if one_minus_npv.is_nan() {
        "undefined at this pre-test probability"
    } else if one_minus_npv <= 0.01 {
        "effectively rules out disease"
    } else if one_minus_npv < prior {
        "lowers the probability of disease"
    } else {
        "carries no exclusionary weight"
    }
}

const NOTES: &str = "\
* Sensitivity: the ability of a test to correctly identify patients with a disease, TP / (TP + FN).
* Specificity: the ability of a test to correctly identify people without the disease, TN / (TN + FP).
  TP: people who have the disease and were correctly tested positive.
  FP: people who do not have the disease but were incorrectly tested positive.
  TN: people who do not have the disease and were correctly tested negative.
  FN: people who have the disease but were incorrectly tested negative.
* Positive Predictive Value (the Post-Positive-Test curve) is the probability that a person with a
  positive result has the disease. Pre-test probability and specificity have the greatest impact on
  false positives: as both increase, PPV increases.
* Negative Predictive Value (1 minus the Post-Negative-Test curve) is the probability that a person
  with a negative result does not have the disease. As pre-test probability decreases, or sensitivity
  increases, false negatives fall and NPV increases.
* If a disease is rare, the probability that a test result reflects the true disease state may
  still be low, even with a very good test.
";

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
