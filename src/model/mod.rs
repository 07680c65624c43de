pub mod bayes;
pub mod params;
pub mod sweep;
