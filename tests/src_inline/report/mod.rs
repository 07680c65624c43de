use super::*;

#[test]
fn test_format_f64_6() {
    assert_eq!(format_f64_6(0.825243), "0.825243");
    assert_eq!(format_f64_6(1.0), "1.000000");
    assert_eq!(format_f64_6(f64::NAN), NA);
}

#[test]
fn test_format_pct() {
    assert_eq!(format_pct(0.1), "10.00%");
    assert_eq!(format_pct(0.825243), "82.52%");
    assert_eq!(format_pct(f64::NAN), NA);
}
