use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title and toolbar above the plot.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(&state.chart.title).strong());
    });

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(state.summary());

        ui.separator();

        if ui
            .selectable_label(state.show_legend, "Legend")
            .clicked()
        {
            state.show_legend = !state.show_legend;
        }

        if ui.button("Reset view").clicked() {
            state.reset_view = true;
        }
    });
}
