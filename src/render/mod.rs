/// Presentation layer: where a finished [`Chart`] ends up.
///
/// ```text
///   Chart ──► choose_sink ──┬──► Sink::Window  eframe session, blocks until closed
///                           └──► Sink::Png     plotters bitmap, non-interactive
/// ```
pub mod png;
pub mod window;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::chart::Chart;
use crate::error::CurveError;

/// Pixel size of the window or image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// Interactive window.
    Window,
    /// Image written to disk.
    Png(PathBuf),
}

// ---------------------------------------------------------------------------
// Sink selection
// ---------------------------------------------------------------------------

/// Pick the sink: an explicit output wins, then a window if a display is
/// available, then the fallback image.
pub fn choose_sink(
    output: Option<PathBuf>,
    fallback: Option<PathBuf>,
    display: bool,
) -> Result<Sink, CurveError> {
    if let Some(path) = output {
        return Ok(Sink::Png(path));
    }
    if display {
        return Ok(Sink::Window);
    }
    match fallback {
        Some(path) => {
            log::warn!("no display available, writing {} instead", path.display());
            Ok(Sink::Png(path))
        }
        None => Err(CurveError::DisplayUnavailable(
            "neither DISPLAY nor WAYLAND_DISPLAY is set; pass --output or --fallback-output"
                .to_string(),
        )),
    }
}

/// Whether the current process can open a window.
pub fn display_available() -> bool {
    display_available_with(|key| std::env::var_os(key))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_available_with(var: impl Fn(&str) -> Option<OsString>) -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|key| var(key).is_some_and(|v| !v.is_empty()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn display_available_with(_var: impl Fn(&str) -> Option<OsString>) -> bool {
    true
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Show or write the chart. For a window this blocks until it is closed.
///
/// When the window cannot be created and `fallback` is set, the chart is
/// written there instead.
pub fn present(
    chart: &Chart,
    sink: &Sink,
    viewport: Viewport,
    source: &str,
    fallback: Option<&Path>,
) -> Result<(), CurveError> {
    match sink {
        Sink::Png(path) => png::export(chart, path, viewport),
        Sink::Window => match (window::show(chart.clone(), viewport, source), fallback) {
            (Err(CurveError::DisplayUnavailable(reason)), Some(path)) => {
                log::warn!("{reason}; writing {} instead", path.display());
                png::export(chart, path, viewport)
            }
            (result, _) => result,
        },
    }
}
