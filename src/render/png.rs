use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use super::Viewport;
use crate::chart::{Bounds, Chart};
use crate::error::CurveError;

/// Grid divisions per axis when ticks cannot be labelled.
const PLAIN_GRID_STEPS: usize = 10;

/// Draw the chart into a PNG at `path`.
///
/// Text needs a system font. Without one (bare containers, CI) the chart is
/// still written, with grid and curves but no title, tick labels or legend.
pub fn export(chart: &Chart, path: &Path, viewport: Viewport) -> Result<(), CurveError> {
    let text = fonts_available();
    if !text {
        log::warn!("no usable font found, writing {} without text", path.display());
    }

    draw(chart, path, viewport, text).map_err(|e| CurveError::Export {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::info!(
        "wrote {} curves to {} ({}x{})",
        chart.series.len(),
        path.display(),
        viewport.width,
        viewport.height
    );
    Ok(())
}

/// Whether plotters can lay out text with the default sans-serif face.
pub fn fonts_available() -> bool {
    FontDesc::new(FontFamily::SansSerif, 12.0, FontStyle::Normal)
        .box_size("0")
        .is_ok()
}

fn draw(chart: &Chart, path: &Path, viewport: Viewport, text: bool) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (viewport.width, viewport.height)).into_drawing_area();
    root.fill(&WHITE)?;

    if text {
        draw_labelled(chart, &root)?;
    } else {
        draw_plain(chart, &root)?;
    }

    root.present()?;
    Ok(())
}

fn draw_labelled(
    chart: &Chart,
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
) -> Result<(), Box<dyn Error>> {
    let b = chart.bounds();
    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(b.x_min..b.x_max, b.y_min..b.y_max)?;

    {
        let mut mesh = ctx.configure_mesh();
        mesh.x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str());
        if !chart.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    for series in &chart.series {
        let color = RGBColor::from(series.color);
        let mut runs = series.finite_runs().into_iter();
        // Only the first run carries the legend entry.
        if let Some(first) = runs.next() {
            let drawn = ctx.draw_series(LineSeries::new(as_coords(first), color.stroke_width(2)))?;
            if let Some(name) = &series.name {
                drawn
                    .label(name.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
        }
        for run in runs {
            ctx.draw_series(LineSeries::new(as_coords(run), color.stroke_width(2)))?;
        }
    }

    if !chart.legend_entries().is_empty() {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

/// Same plot area with no text at all: a hand-drawn grid and the curves.
fn draw_plain(
    chart: &Chart,
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
) -> Result<(), Box<dyn Error>> {
    let b = chart.bounds();
    let mut ctx = ChartBuilder::on(root)
        .margin(16)
        .build_cartesian_2d(b.x_min..b.x_max, b.y_min..b.y_max)?;

    if chart.grid {
        let grey = RGBColor(220, 220, 220);
        ctx.draw_series(grid_lines(b).map(|line| PathElement::new(line, grey)))?;
    }
    ctx.draw_series(std::iter::once(PathElement::new(
        vec![
            (b.x_min, b.y_min),
            (b.x_max, b.y_min),
            (b.x_max, b.y_max),
            (b.x_min, b.y_max),
            (b.x_min, b.y_min),
        ],
        BLACK,
    )))?;

    for series in &chart.series {
        let color = RGBColor::from(series.color);
        for run in series.finite_runs() {
            ctx.draw_series(LineSeries::new(as_coords(run), color.stroke_width(2)))?;
        }
    }
    Ok(())
}

fn as_coords(run: Vec<[f64; 2]>) -> impl Iterator<Item = (f64, f64)> {
    run.into_iter().map(|[x, y]| (x, y))
}

/// Evenly spaced vertical and horizontal lines across `b`.
fn grid_lines(b: Bounds) -> impl Iterator<Item = Vec<(f64, f64)>> {
    let steps = PLAIN_GRID_STEPS;
    (1..steps).flat_map(move |k| {
        let t = k as f64 / steps as f64;
        let x = b.x_min + t * (b.x_max - b.x_min);
        let y = b.y_min + t * (b.y_max - b.y_min);
        [
            vec![(x, b.y_min), (x, b.y_max)],
            vec![(b.x_min, y), (b.x_max, y)],
        ]
    })
}
