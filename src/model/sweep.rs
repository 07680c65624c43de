use serde::Serialize;

use crate::model::bayes::PosteriorResult;
use crate::model::params::TestParams;

#[derive(Debug, Clone, Serialize)]
pub struct Sweep {
    pub params: TestParams,
    pub points: Vec<PosteriorResult>,
}

impl Sweep {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn priors(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.prior)
    }

    pub fn undefined_ppv(&self) -> usize {
        self.points.iter().filter(|p| p.ppv.is_nan()).count()
    }

    pub fn undefined_one_minus_npv(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.one_minus_npv.is_nan())
            .count()
    }
}
