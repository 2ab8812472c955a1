use eframe::egui;

use crate::chart::Chart;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CurveViewerApp {
    pub state: AppState,
}

impl CurveViewerApp {
    pub fn new(chart: Chart, source: String) -> Self {
        Self {
            state: AppState::new(chart, source),
        }
    }
}

impl eframe::App for CurveViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::curves_plot(ui, &mut self.state);
        });
    }
}
