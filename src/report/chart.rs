//! SVG rendering of the post-test probability curves.
//!
//! Three series share the unit square: the identity line (no test), the
//! post-positive curve (PPV) and the post-negative curve (1 - NPV). A NaN
//! value breaks its polyline and gets no marker.

use std::fmt::Write;

use crate::model::sweep::Sweep;

pub const DEFAULT_TITLE: &str = "Post Probability vs. prior probability (1 test)";

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 640.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 120.0;
const MARGIN_BOTTOM: f64 = 80.0;
const MARKER_RADIUS: f64 = 3.0;
const TICKS: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct Series {
    pub name: &'static str,
    pub color: &'static str,
    pub markers: bool,
}

pub const SERIES_PRE_TEST: Series = Series {
    name: "Pre-Test",
    color: "#636efa",
    markers: false,
};
pub const SERIES_PPV: Series = Series {
    name: "Post-Positive-Test (PPV)",
    color: "#ef553b",
    markers: true,
};
pub const SERIES_ONE_MINUS_NPV: Series = Series {
    name: "Post-Negative-Test (1 - NPV)",
    color: "#00cc96",
    markers: true,
};

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            x_label: "Pre-Test probability that you have disease",
            y_label: "Post-Test probability that you have disease",
        }
    }
}

struct Frame {
    plot_w: f64,
    plot_h: f64,
}

impl Frame {
    fn new() -> Self {
        Self {
            plot_w: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            plot_h: HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    fn x(&self, v: f64) -> f64 {
        MARGIN_LEFT + v * self.plot_w
    }

    fn y(&self, v: f64) -> f64 {
        MARGIN_TOP + (1.0 - v) * self.plot_h
    }
}

pub fn render_chart_svg(sweep: &Sweep, opts: &ChartOptions) -> String {
    let frame = Frame::new();
    let mut out = String::new();

    let _ = writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"Courier New, monospace\">"
    );
    let _ = writeln!(
        out,
        "  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>"
    );
    let _ = writeln!(
        out,
        "  <text x=\"{:.2}\" y=\"28\" font-size=\"18\" text-anchor=\"middle\">{}</text>",
        WIDTH / 2.0,
        xml_escape(&opts.title)
    );

    write_axes(&mut out, &frame, opts);

    let priors: Vec<f64> = sweep.priors().collect();
    let ppv: Vec<f64> = sweep.points.iter().map(|p| p.ppv).collect();
    let npv: Vec<f64> = sweep.points.iter().map(|p| p.one_minus_npv).collect();

    write_series(&mut out, &frame, &SERIES_PRE_TEST, &priors, &priors);
    write_series(&mut out, &frame, &SERIES_PPV, &priors, &ppv);
    write_series(&mut out, &frame, &SERIES_ONE_MINUS_NPV, &priors, &npv);

    write_legend(
        &mut out,
        &[SERIES_PRE_TEST, SERIES_PPV, SERIES_ONE_MINUS_NPV],
    );

    out.push_str("</svg>\n");
    out
}

fn write_axes(out: &mut String, frame: &Frame, opts: &ChartOptions) {
    let _ = writeln!(out, "  <g class=\"grid\" stroke=\"#e5ecf6\" stroke-width=\"1\">");
    for i in 0..=TICKS {
        let v = i as f64 / TICKS as f64;
        let _ = writeln!(
            out,
            "    <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>",
            frame.x(v),
            frame.y(0.0),
            frame.x(v),
            frame.y(1.0)
        );
        let _ = writeln!(
            out,
            "    <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>",
            frame.x(0.0),
            frame.y(v),
            frame.x(1.0),
            frame.y(v)
        );
    }
    out.push_str("  </g>\n");

    let _ = writeln!(
        out,
        "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"#444444\"/>",
        MARGIN_LEFT, MARGIN_TOP, frame.plot_w, frame.plot_h
    );

    let _ = writeln!(out, "  <g class=\"ticks\" font-size=\"12\" fill=\"#444444\">");
    for i in 0..=TICKS {
        let v = i as f64 / TICKS as f64;
        let _ = writeln!(
            out,
            "    <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\">{:.1}</text>",
            frame.x(v),
            frame.y(0.0) + 18.0,
            v
        );
        let _ = writeln!(
            out,
            "    <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\">{:.1}</text>",
            frame.x(0.0) - 8.0,
            frame.y(v) + 4.0,
            v
        );
    }
    out.push_str("  </g>\n");

    let _ = writeln!(
        out,
        "  <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"14\" text-anchor=\"middle\">{}</text>",
        frame.x(0.5),
        HEIGHT - 24.0,
        xml_escape(opts.x_label)
    );
    let cy = frame.y(0.5);
    let _ = writeln!(
        out,
        "  <text x=\"24\" y=\"{cy:.2}\" font-size=\"14\" text-anchor=\"middle\" transform=\"rotate(-90 24 {cy:.2})\">{}</text>",
        xml_escape(opts.y_label)
    );
}

fn write_series(out: &mut String, frame: &Frame, series: &Series, xs: &[f64], ys: &[f64]) {
    let _ = writeln!(
        out,
        "  <g class=\"series\" data-name=\"{}\">",
        xml_escape(series.name)
    );
    for run in finite_runs(xs, ys) {
        if run.len() < 2 {
            continue;
        }
        let mut pts = String::new();
        for (i, &(x, y)) in run.iter().enumerate() {
            if i > 0 {
                pts.push(' ');
            }
            let _ = write!(pts, "{:.2},{:.2}", frame.x(x), frame.y(y));
        }
        let _ = writeln!(
            out,
            "    <polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\" points=\"{}\"/>",
            series.color, pts
        );
    }
    if series.markers {
        for (&x, &y) in xs.iter().zip(ys) {
            if y.is_nan() {
                continue;
            }
            let _ = writeln!(
                out,
                "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{MARKER_RADIUS}\" fill=\"{}\"/>",
                frame.x(x),
                frame.y(y),
                series.color
            );
        }
    }
    out.push_str("  </g>\n");
}

fn write_legend(out: &mut String, entries: &[Series]) {
    out.push_str("  <g class=\"legend\" font-size=\"13\">\n");
    let x = MARGIN_LEFT + 8.0;
    for (i, s) in entries.iter().enumerate() {
        let y = 52.0 + i as f64 * 20.0;
        let _ = writeln!(
            out,
            "    <line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"2\"/>",
            x,
            x + 28.0,
            s.color
        );
        if s.markers {
            let _ = writeln!(
                out,
                "    <circle cx=\"{:.2}\" cy=\"{y:.2}\" r=\"{MARKER_RADIUS}\" fill=\"{}\"/>",
                x + 14.0,
                s.color
            );
        }
        let _ = writeln!(
            out,
            "    <text x=\"{:.2}\" y=\"{:.2}\">{}</text>",
            x + 36.0,
            y + 4.0,
            xml_escape(s.name)
        );
    }
    out.push_str("  </g>\n");
}

/// Splits the paired values into maximal runs with no NaN in `ys`.
pub fn finite_runs(xs: &[f64], ys: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (&x, &y) in xs.iter().zip(ys) {
        if y.is_nan() {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        } else {
            current.push((x, y));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/chart.rs"]
mod tests;
