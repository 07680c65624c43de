use serde::Serialize;

use crate::model::bayes::{BayesError, check_unit};

pub const DEFAULT_SENSITIVITY_PCT: u8 = 85;
pub const DEFAULT_SPECIFICITY_PCT: u8 = 98;

/// Whole-number percentage in `0..=100`, the resolution the CLI accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Percent(u8);

impl Percent {
    pub fn new(value: u8) -> Result<Self, BayesError> {
        if value > 100 {
            return Err(BayesError::PercentOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn fraction(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Accuracy characteristics of one diagnostic test, held fixed across a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestParams {
    pub sensitivity: f64,
    pub specificity: f64,
}

impl TestParams {
    pub fn new(sensitivity: f64, specificity: f64) -> Result<Self, BayesError> {
        check_unit("sensitivity", sensitivity)?;
        check_unit("specificity", specificity)?;
        Ok(Self {
            sensitivity,
            specificity,
        })
    }

    pub fn from_percent(sensitivity: Percent, specificity: Percent) -> Self {
        Self {
            sensitivity: sensitivity.fraction(),
            specificity: specificity.fraction(),
        }
    }

    pub fn false_positive_rate(&self) -> f64 {
        1.0 - self.specificity
    }

    pub fn false_negative_rate(&self) -> f64 {
        1.0 - self.sensitivity
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/params.rs"]
mod tests;
