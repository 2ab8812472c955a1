use crate::chart::Chart;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What the window shows. The chart itself never changes; only view
/// toggles do.
pub struct AppState {
    pub chart: Chart,

    /// Input file name shown in the top bar.
    pub source: String,

    /// Whether the legend overlay is drawn.
    pub show_legend: bool,

    /// Set by "Reset view"; consumed by the next plot frame.
    pub reset_view: bool,
}

impl AppState {
    pub fn new(chart: Chart, source: String) -> Self {
        Self {
            chart,
            source,
            show_legend: true,
            reset_view: false,
        }
    }

    /// One-line summary for the top bar.
    pub fn summary(&self) -> String {
        let curves = self.chart.series.len();
        let points = self
            .chart
            .series
            .iter()
            .map(|s| s.points.len())
            .max()
            .unwrap_or(0);
        format!("{curves} curves × {points} points  ·  {}", self.source)
    }

    /// Take the pending reset request, if any.
    pub fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset_view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::LegendMode;
    use crate::data::model::CurveSet;

    #[test]
    fn summary_counts_curves_and_points() {
        let set = CurveSet {
            curves: vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        };
        let state = AppState::new(
            Chart::from_curves(&set, LegendMode::PerCurve),
            "curves.csv".to_string(),
        );
        assert_eq!(state.summary(), "2 curves × 3 points  ·  curves.csv");
        assert!(state.show_legend);
    }

    #[test]
    fn reset_is_consumed_once() {
        let mut state = AppState::new(
            Chart::from_curves(&CurveSet::default(), LegendMode::Fixed),
            String::new(),
        );
        assert!(!state.take_reset());
        state.reset_view = true;
        assert!(state.take_reset());
        assert!(!state.take_reset());
    }
}
