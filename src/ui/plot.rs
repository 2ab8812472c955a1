use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Curves plot (central panel)
// ---------------------------------------------------------------------------

/// Render every series of the chart against its index.
///
/// Only named series get a legend entry; unnamed ones are drawn but stay
/// out of the legend. A series with padding gaps is drawn as one line per
/// finite run, all under the same name so the legend shows it once.
pub fn curves_plot(ui: &mut Ui, state: &mut AppState) {
    let reset = state.take_reset();
    let chart = &state.chart;

    let mut plot = Plot::new("curves_plot")
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .show_grid(chart.grid)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if state.show_legend {
        plot = plot.legend(Legend::default());
    }

    if reset {
        plot = plot.reset();
    }

    plot.show(ui, |plot_ui| {
        for series in &chart.series {
            for run in series.finite_runs() {
                let mut line = Line::new(PlotPoints::from(run))
                    .color(Color32::from(series.color))
                    .width(1.5);
                if let Some(name) = &series.name {
                    line = line.name(name);
                }

                plot_ui.line(line);
            }
        }
    });
}
