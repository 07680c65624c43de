use tracing::{debug, warn};

use crate::model::bayes::posterior;
use crate::model::params::TestParams;
use crate::model::sweep::Sweep;

pub const DEFAULT_POINTS: usize = 100;

/// `n` evenly spaced values over [0, 1]; the last one is exactly 1.0.
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|i| i as f64 / last).collect()
        }
    }
}

pub fn run_stage1(params: &TestParams, n_points: usize) -> Sweep {
    let priors = linspace(n_points);
    let mut points = Vec::with_capacity(priors.len());
    for prior in priors {
        points.push(posterior(prior, params));
    }

    let sweep = Sweep {
        params: *params,
        points,
    };

    debug!(
        n_points = sweep.len(),
        sensitivity = params.sensitivity,
        specificity = params.specificity,
        "prior sweep evaluated"
    );
    let undefined = sweep.undefined_ppv() + sweep.undefined_one_minus_npv();
    if undefined > 0 {
        warn!(
            ppv = sweep.undefined_ppv(),
            one_minus_npv = sweep.undefined_one_minus_npv(),
            "sweep contains undefined posterior values (0/0); they are left as gaps"
        );
    }
    sweep
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_sweep.rs"]
mod tests;
