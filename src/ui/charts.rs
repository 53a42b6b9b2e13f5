use std::ops::RangeInclusive;

use eframe::egui::{self, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use super::format::{compact_count, truncate_label};
use crate::color::ColorScale;
use crate::data::aggregate::{FilteredView, rating_histogram, top_n};
use crate::data::model::{CompanyRecord, Metric};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;
const LABEL_CHARS: usize = 18;

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// How a ranked chart lays out its bars.
#[derive(Debug, Clone, Copy)]
enum Orientation {
    /// Names on the y axis, highest value on top.
    Horizontal,
    /// Names on the x axis, highest value on the left.
    Vertical,
}

struct RankedChart {
    id: &'static str,
    title: &'static str,
    metric: Metric,
    scale: ColorScale,
    orientation: Orientation,
}

const TOP_RATED: RankedChart = RankedChart {
    id: "top_rated",
    title: "Top Rated Companies",
    metric: Metric::Rating,
    scale: ColorScale::Aurora,
    orientation: Orientation::Horizontal,
};

const MOST_JOBS: RankedChart = RankedChart {
    id: "most_jobs",
    title: "Most Active Hiring",
    metric: Metric::Jobs,
    scale: ColorScale::Magma,
    orientation: Orientation::Vertical,
};

const MOST_REVIEWS: RankedChart = RankedChart {
    id: "most_reviews",
    title: "Most Reviewed Companies",
    metric: Metric::Reviews,
    scale: ColorScale::Viridis,
    orientation: Orientation::Horizontal,
};

const MOST_INTERVIEWS: RankedChart = RankedChart {
    id: "most_interviews",
    title: "Most Interviews Reported",
    metric: Metric::Interviews,
    scale: ColorScale::Plasma,
    orientation: Orientation::Horizontal,
};

const MOST_SALARIES: RankedChart = RankedChart {
    id: "most_salaries",
    title: "Most Salary Data Points",
    metric: Metric::Salaries,
    scale: ColorScale::Inferno,
    orientation: Orientation::Horizontal,
};

/// The six dashboard charts, two per row.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    let Some(view) = state.view() else {
        return;
    };
    let n = state.top_n;

    ui.columns(2, |cols: &mut [Ui]| {
        ranked_card(&mut cols[0], &TOP_RATED, &view, n);
        ranked_card(&mut cols[1], &MOST_JOBS, &view, n);
    });
    ui.columns(2, |cols: &mut [Ui]| {
        chart_card(&mut cols[0], "Rating Distribution", &view, rating_distribution);
        ranked_card(&mut cols[1], &MOST_REVIEWS, &view, n);
    });
    ui.columns(2, |cols: &mut [Ui]| {
        ranked_card(&mut cols[0], &MOST_INTERVIEWS, &view, n);
        ranked_card(&mut cols[1], &MOST_SALARIES, &view, n);
    });
}

fn ranked_card(ui: &mut Ui, chart: &RankedChart, view: &FilteredView<'_>, n: usize) {
    let title = format!("{} (Top {n})", chart.title);
    chart_card(ui, &title, view, |ui: &mut Ui, view: &FilteredView<'_>| {
        let records = top_n(view, chart.metric, n);
        match chart.orientation {
            Orientation::Horizontal => ranked_bars(ui, chart, &records),
            Orientation::Vertical => column_bars(ui, chart, &records),
        }
    });
}

/// A framed chart with a title; shows "No data" for an empty view.
fn chart_card(
    ui: &mut Ui,
    title: &str,
    view: &FilteredView<'_>,
    body: impl FnOnce(&mut Ui, &FilteredView<'_>),
) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.strong(title);
        if view.is_empty() {
            ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label("No data");
                });
            });
        } else {
            body(ui, view);
        }
    });
}

/// Category axis labels: integer positions map to `labels`, everything else is blank.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let pos = mark.value;
        if pos.fract().abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

fn value_formatter(metric: Metric) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| match metric {
        Metric::Rating => format!("{:.1}", mark.value),
        _ => compact_count(mark.value),
    }
}

fn bars_for(
    records: &[&CompanyRecord],
    chart: &RankedChart,
    position: impl Fn(usize) -> f64,
) -> Vec<Bar> {
    let values: Vec<f64> = records.iter().map(|r| r.metric(chart.metric)).collect();
    let colors = chart.scale.colors_for(&values);
    records
        .iter()
        .zip(values)
        .zip(colors)
        .enumerate()
        .map(|(i, ((rec, v), c))| {
            Bar::new(position(i), v)
                .name(&rec.name)
                .fill(c)
                .width(0.6)
        })
        .collect()
}

/// Horizontal bars, highest value on top.
fn ranked_bars(ui: &mut Ui, chart: &RankedChart, records: &[&CompanyRecord]) {
    let n = records.len();
    // Row i is drawn at y = n-1-i so rank 1 sits at the top.
    let labels: Vec<String> = records
        .iter()
        .rev()
        .map(|r| truncate_label(&r.name, LABEL_CHARS))
        .collect();
    let bars = bars_for(records, chart, |i| (n - 1 - i) as f64);

    Plot::new(chart.id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_axis_formatter(category_formatter(labels))
        .x_axis_formatter(value_formatter(chart.metric))
        .include_x(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name(chart.metric.label()));
        });
}

/// Vertical bars in rank order, left to right.
fn column_bars(ui: &mut Ui, chart: &RankedChart, records: &[&CompanyRecord]) {
    let labels: Vec<String> = records
        .iter()
        .map(|r| truncate_label(&r.name, LABEL_CHARS))
        .collect();
    let bars = bars_for(records, chart, |i| i as f64);

    Plot::new(chart.id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_formatter(value_formatter(chart.metric))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(chart.metric.label()));
        });
}

/// Histogram of ratings across the filtered view.
fn rating_distribution(ui: &mut Ui, view: &FilteredView<'_>) {
    let color = ColorScale::Aurora.color_at(0.1);
    let bars: Vec<Bar> = rating_histogram(view)
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!("{:.2} – {:.2}", bin.start, bin.end))
                .fill(color)
        })
        .collect();

    Plot::new("rating_histogram")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Rating")
        .y_axis_label("Count")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Companies"));
        });
}
