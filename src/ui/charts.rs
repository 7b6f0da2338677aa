use eframe::egui::{Align2, Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::ColorMap;
use crate::data::aggregate::{GroupMean, GroupedView, Metrics};
use crate::data::error::AggregateError;
use crate::data::labels::{UiText, Vocabulary};
use crate::state::AppState;
use crate::ui::{format, table};

const CHART_HEIGHT: f32 = 260.0;
const TITLE_BAR_COLOR: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the scrollable central panel.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| dashboard(ui, state));
}

/// Metrics, the four charts and the filtered table, top to bottom.
fn dashboard(ui: &mut Ui, state: &AppState) {
    let vocab = state.vocabulary;
    let view = &state.view;

    ui.heading(vocab.text(UiText::Overview));
    metrics_row(ui, &view.metrics, vocab);
    ui.separator();

    ui.heading(vocab.text(UiText::Analyses));
    ui.columns(2, |cols| {
        cols[0].strong(vocab.text(UiText::BySeniority));
        category_bars(
            &mut cols[0],
            "by_seniority",
            &view.by_seniority,
            &state.seniority_colors,
            vocab,
        );
        cols[1].strong(vocab.text(UiText::ByWorkType));
        category_bars(
            &mut cols[1],
            "by_remote_type",
            &view.by_remote_type,
            &state.remote_colors,
            vocab,
        );
    });
    ui.separator();

    ui.heading(vocab.top_titles_heading(state.top_titles));
    top_titles_chart(ui, &view.top_titles, vocab);
    ui.separator();

    ui.heading(vocab.text(UiText::ByYear));
    yearly_chart(ui, &view.by_year, vocab);
    ui.separator();

    ui.heading(vocab.text(UiText::FilteredData));
    table::filtered_table(ui, state);
}

fn no_data(ui: &mut Ui, vocab: Vocabulary) {
    ui.label(RichText::new(vocab.text(UiText::NoData)).italics());
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

fn metrics_row(ui: &mut Ui, metrics: &Metrics, vocab: Vocabulary) {
    let no_data = vocab.text(UiText::NoData);
    let money = |v: Result<f64, AggregateError>| {
        v.map(format::usd).unwrap_or_else(|_| no_data.to_string())
    };

    ui.columns(3, |cols| {
        metric(
            &mut cols[0],
            vocab.text(UiText::TotalRecords),
            &format::thousands(metrics.count as u64),
        );
        metric(&mut cols[1], vocab.text(UiText::MeanSalary), &money(metrics.mean_usd));
        metric(&mut cols[2], vocab.text(UiText::MaxSalary), &money(metrics.max_usd));
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.label(label);
    ui.heading(RichText::new(value).strong());
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Vertical bars in the order of `view`, one legend entry per category.
fn category_bars(
    ui: &mut Ui,
    id: &str,
    view: &GroupedView<String>,
    colors: &ColorMap,
    vocab: Vocabulary,
) {
    let Ok(groups) = view else {
        no_data(ui, vocab);
        return;
    };

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label("USD")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, GroupMean { key, mean }) in groups.iter().enumerate() {
                let bar = Bar::new(i as f64, *mean).name(key).width(0.7);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(key).color(colors.color_for(key)));
            }
        });
}

/// Horizontal bars, best paid on top, with the job title written on each bar.
fn top_titles_chart(ui: &mut Ui, view: &GroupedView<String>, vocab: Vocabulary) {
    let Ok(groups) = view else {
        no_data(ui, vocab);
        return;
    };

    let n = groups.len();
    Plot::new("top_titles")
        .height(CHART_HEIGHT.max(28.0 * n as f32))
        .x_axis_label("USD")
        .show_y(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = groups
                .iter()
                .enumerate()
                .map(|(rank, g)| Bar::new((n - 1 - rank) as f64, g.mean).name(&g.key).width(0.7))
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(TITLE_BAR_COLOR));

            for (rank, g) in groups.iter().enumerate() {
                let label = format!("{}  {}", g.key, format::usd(g.mean));
                let pos = PlotPoint::new(0.0, (n - 1 - rank) as f64);
                plot_ui.text(
                    Text::new(pos, RichText::new(label).color(Color32::WHITE))
                        .anchor(Align2::LEFT_CENTER),
                );
            }
        });
}

/// Mean salary per year as a line with markers.
fn yearly_chart(ui: &mut Ui, view: &GroupedView<i32>, vocab: Vocabulary) {
    let Ok(groups) = view else {
        no_data(ui, vocab);
        return;
    };

    let series: Vec<[f64; 2]> = groups
        .iter()
        .map(|g| [f64::from(g.key), g.mean])
        .collect();

    Plot::new("by_year")
        .height(CHART_HEIGHT)
        .x_axis_label(vocab.text(UiText::Year))
        .y_axis_label("USD")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(series.clone())).width(2.0));
            plot_ui.points(Points::new(PlotPoints::from(series)).radius(4.0));
        });
}
