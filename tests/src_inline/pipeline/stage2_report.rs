use super::*;
use crate::model::params::TestParams;
use crate::pipeline::stage1_sweep::run_stage1;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("posttest_report_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn build_sweep(sens: u8, spec: u8, n: usize) -> Sweep {
    let params = TestParams::from_percent(Percent::new(sens).unwrap(), Percent::new(spec).unwrap());
    run_stage1(&params, n)
}

fn build_input(sweep: &Sweep) -> Stage2Input<'_> {
    Stage2Input {
        sweep,
        sensitivity_pct: Percent::new((sweep.params.sensitivity * 100.0).round() as u8).unwrap(),
        specificity_pct: Percent::new((sweep.params.specificity * 100.0).round() as u8).unwrap(),
        reference_prior: 0.1,
        chart: ChartOptions::default(),
        tool_name: "posttest-curves".to_string(),
        tool_version: "0.1.0".to_string(),
        git_hash: None,
    }
}

#[test]
fn test_writes_all_artifacts() {
    let sweep = build_sweep(85, 98, 100);
    let dir = make_temp_dir();
    let summary = write_reports(&build_input(&sweep), &dir).unwrap();
    for name in [SWEEP_TSV, SUMMARY_JSON, REPORT_TXT, CHART_SVG] {
        assert!(dir.join(name).is_file(), "{name} missing");
    }
    assert_eq!(summary.artifacts.len(), 4);
}

#[test]
fn test_sweep_tsv_layout() {
    let sweep = build_sweep(85, 98, 100);
    let dir = make_temp_dir();
    write_reports(&build_input(&sweep), &dir).unwrap();
    let text = std::fs::read_to_string(dir.join(SWEEP_TSV)).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "prior\tppv\tone_minus_npv\tsensitivity\tspecificity"
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 100);
    assert_eq!(rows[0], "0.000000\t0.000000\t0.000000\t0.850000\t0.980000");
    assert_eq!(rows[99], "1.000000\t1.000000\t1.000000\t0.850000\t0.980000");
}

#[test]
fn test_undefined_points_render_as_na_and_null() {
    let sweep = build_sweep(100, 100, 5);
    let dir = make_temp_dir();
    let summary = write_reports(&build_input(&sweep), &dir).unwrap();
    assert_eq!(summary.sweep.undefined_ppv, 1);
    assert_eq!(summary.sweep.undefined_one_minus_npv, 1);

    let tsv = std::fs::read_to_string(dir.join(SWEEP_TSV)).unwrap();
    let first_row = tsv.lines().nth(1).unwrap();
    assert!(first_row.starts_with("0.000000\tNA\t0.000000"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join(SUMMARY_JSON)).unwrap()).unwrap();
    assert!(json["likelihood_ratios"]["positive"].is_null());
    assert_eq!(json["sweep"]["undefined_ppv"], 1);
}

#[test]
fn test_summary_json_schema() {
    let sweep = build_sweep(85, 98, 100);
    let dir = make_temp_dir();
    write_reports(&build_input(&sweep), &dir).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join(SUMMARY_JSON)).unwrap()).unwrap();
    assert_eq!(json["tool"]["name"], "posttest-curves");
    assert!(json["tool"]["git_hash"].is_null());
    assert_eq!(json["params"]["sensitivity_pct"], 85);
    assert_eq!(json["params"]["specificity_pct"], 98);
    assert_eq!(json["sweep"]["n_points"], 100);
    assert_eq!(json["sweep"]["prior_min"], 0.0);
    assert_eq!(json["sweep"]["prior_max"], 1.0);
    let ppv = json["reference"]["ppv"].as_f64().unwrap();
    assert!((ppv - 0.825243).abs() < 1e-6);
    let lr_pos = json["likelihood_ratios"]["positive"].as_f64().unwrap();
    assert!((lr_pos - 42.5).abs() < 1e-9);
}

#[test]
fn test_deterministic_output() {
    let sweep = build_sweep(85, 98, 100);
    let dir = make_temp_dir();
    let input = build_input(&sweep);
    write_reports(&input, &dir).unwrap();
    let a = std::fs::read_to_string(dir.join(SUMMARY_JSON)).unwrap();
    let svg_a = std::fs::read_to_string(dir.join(CHART_SVG)).unwrap();
    write_reports(&input, &dir).unwrap();
    let b = std::fs::read_to_string(dir.join(SUMMARY_JSON)).unwrap();
    let svg_b = std::fs::read_to_string(dir.join(CHART_SVG)).unwrap();
    assert_eq!(a, b);
    assert_eq!(svg_a, svg_b);
}

#[test]
fn test_unwritable_out_dir_reports_path() {
    let dir = make_temp_dir();
    let blocker = dir.join("not_a_dir");
    std::fs::write(&blocker, b"x").unwrap();
    let sweep = build_sweep(85, 98, 10);
    let err = write_reports(&build_input(&sweep), &blocker.join("out")).unwrap_err();
    match err {
        ReportError::Write { path, .. } => assert!(path.ends_with("out")),
        other => panic!("unexpected error: {other}"),
    }
}
