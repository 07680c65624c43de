//! Single-test Bayesian update from a pre-test probability to the two
//! post-test probabilities.
//!
//! A ratio whose numerator and denominator both vanish is `f64::NAN`.

use serde::Serialize;
use thiserror::Error;

use crate::model::params::TestParams;

#[derive(Debug, Error, PartialEq)]
pub enum BayesError {
    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfDomain { name: &'static str, value: f64 },
    #[error("percentage must lie in 0..=100, got {0}")]
    PercentOutOfRange(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PosteriorResult {
    pub prior: f64,
    pub ppv: f64,
    pub one_minus_npv: f64,
    pub sensitivity: f64,
    pub specificity: f64,
}

impl PosteriorResult {
    pub fn is_complete(&self) -> bool {
        !self.ppv.is_nan() && !self.one_minus_npv.is_nan()
    }

    pub fn npv(&self) -> f64 {
        1.0 - self.one_minus_npv
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LikelihoodRatios {
    pub positive: f64,
    pub negative: f64,
}

pub(crate) fn check_unit(name: &'static str, value: f64) -> Result<(), BayesError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(BayesError::OutOfDomain { name, value })
    }
}

/// Bayes update for one evaluation point. Inputs outside [0, 1] are the
/// only error; a 0/0 ratio comes back as NaN in the result.
pub fn evaluate(
    prior: f64,
    sensitivity: f64,
    specificity: f64,
) -> Result<PosteriorResult, BayesError> {
    check_unit("prior", prior)?;
    let params = TestParams::new(sensitivity, specificity)?;
    Ok(posterior(prior, &params))
}

/// Caller guarantees every input already lies in [0, 1].
pub fn posterior(prior: f64, params: &TestParams) -> PosteriorResult {
    let s = params.sensitivity;
    let c = params.specificity;
    let absent = 1.0 - prior;

    let ppv = ratio(s * prior, (1.0 - c) * absent);
    let one_minus_npv = ratio((1.0 - s) * prior, c * absent);

    PosteriorResult {
        prior,
        ppv,
        one_minus_npv,
        sensitivity: s,
        specificity: c,
    }
}

pub fn likelihood_ratios(params: &TestParams) -> LikelihoodRatios {
    LikelihoodRatios {
        positive: odds_ratio(params.sensitivity, params.false_positive_rate()),
        negative: odds_ratio(params.false_negative_rate(), params.specificity),
    }
}

/// Pre-test probability at which a positive result moves the posterior to
/// exactly one half. NaN when the test never produces a positive.
pub fn ppv_break_even_prior(params: &TestParams) -> f64 {
    let fpr = params.false_positive_rate();
    let denom = params.sensitivity + fpr;
    if denom == 0.0 { f64::NAN } else { fpr / denom }
}

// hit / (hit + miss)
fn ratio(hit: f64, miss: f64) -> f64 {
    let denom = hit + miss;
    if denom == 0.0 { f64::NAN } else { hit / denom }
}

fn odds_ratio(num: f64, denom: f64) -> f64 {
    if denom == 0.0 {
        if num == 0.0 { f64::NAN } else { f64::INFINITY }
    } else {
        num / denom
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/bayes.rs"]
mod tests;
