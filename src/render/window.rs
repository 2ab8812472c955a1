use eframe::egui;

use super::Viewport;
use crate::app::CurveViewerApp;
use crate::chart::Chart;
use crate::error::CurveError;

/// Open the chart in a native window and block until the user closes it.
///
/// The window and its GPU surface live only for the duration of this call.
pub fn show(chart: Chart, viewport: Viewport, source: &str) -> Result<(), CurveError> {
    let title = format!("{} – {source}", chart.title);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([viewport.width as f32, viewport.height as f32])
            .with_min_inner_size([400.0, 300.0])
            .with_title(&title),
        ..Default::default()
    };

    log::info!(
        "opening window with {} curves ({} points)",
        chart.series.len(),
        chart.point_count()
    );

    let app = CurveViewerApp::new(chart, source.to_string());
    eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| CurveError::DisplayUnavailable(e.to_string()))?;

    log::debug!("window closed");
    Ok(())
}
