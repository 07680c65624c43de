use super::*;

#[test]
fn test_percent_bounds() {
    assert_eq!(Percent::new(0).unwrap().get(), 0);
    assert_eq!(Percent::new(100).unwrap().fraction(), 1.0);
    assert_eq!(Percent::new(101), Err(BayesError::PercentOutOfRange(101)));
}

#[test]
fn test_from_percent_defaults() {
    let p = TestParams::from_percent(
        Percent::new(DEFAULT_SENSITIVITY_PCT).unwrap(),
        Percent::new(DEFAULT_SPECIFICITY_PCT).unwrap(),
    );
    assert_eq!(p.sensitivity, 0.85);
    assert_eq!(p.specificity, 0.98);
    assert!((p.false_positive_rate() - 0.02).abs() < 1e-12);
    assert!((p.false_negative_rate() - 0.15).abs() < 1e-12);
}

#[test]
fn test_new_validates_domain() {
    assert!(TestParams::new(0.0, 1.0).is_ok());
    assert!(TestParams::new(1.01, 0.5).is_err());
    assert!(TestParams::new(0.5, f64::NAN).is_err());
}
