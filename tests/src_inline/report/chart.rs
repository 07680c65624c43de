use super::*;
use crate::model::params::{Percent, TestParams};
use crate::pipeline::stage1_sweep::run_stage1;

fn sweep(sens: u8, spec: u8, n: usize) -> Sweep {
    let params = TestParams::from_percent(Percent::new(sens).unwrap(), Percent::new(spec).unwrap());
    run_stage1(&params, n)
}

#[test]
fn test_svg_has_three_series_and_labels() {
    let svg = render_chart_svg(&sweep(85, 98, 100), &ChartOptions::default());
    assert!(svg.starts_with("<?xml"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("class=\"series\"").count(), 3);
    assert!(svg.contains("data-name=\"Pre-Test\""));
    assert!(svg.contains("data-name=\"Post-Positive-Test (PPV)\""));
    assert!(svg.contains("data-name=\"Post-Negative-Test (1 - NPV)\""));
    assert!(svg.contains("Pre-Test probability that you have disease"));
    assert!(svg.contains("Post-Test probability that you have disease"));
    assert!(svg.contains(DEFAULT_TITLE));
}

#[test]
fn test_markers_only_on_posterior_series() {
    let svg = render_chart_svg(&sweep(85, 98, 10), &ChartOptions::default());
    // 10 markers per posterior series plus one legend marker each.
    assert_eq!(svg.matches("<circle").count(), 2 * 10 + 2);
    assert_eq!(svg.matches("<polyline").count(), 3);
}

#[test]
fn test_nan_points_are_gaps() {
    let svg = render_chart_svg(&sweep(100, 100, 10), &ChartOptions::default());
    // one undefined point per posterior series: 9 markers each.
    assert_eq!(svg.matches("<circle").count(), 2 * 9 + 2);
    assert!(!svg.contains("NaN"));
}

#[test]
fn test_finite_runs_split_on_nan() {
    let xs = [0.0, 0.25, 0.5, 0.75, 1.0];
    let ys = [0.1, f64::NAN, 0.3, 0.4, f64::NAN];
    let runs = finite_runs(&xs, &ys);
    assert_eq!(runs, vec![vec![(0.0, 0.1)], vec![(0.5, 0.3), (0.75, 0.4)]]);
    assert!(finite_runs(&xs, &[f64::NAN; 5]).is_empty());
}

#[test]
fn test_title_escaped() {
    let opts = ChartOptions {
        title: "PPV <rare> & \"common\"".to_string(),
        ..ChartOptions::default()
    };
    let svg = render_chart_svg(&sweep(85, 98, 5), &opts);
    assert!(svg.contains("PPV &lt;rare&gt; &amp; &quot;common&quot;"));
}
