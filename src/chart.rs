use clap::ValueEnum;

use crate::color::{Rgb, generate_palette};
use crate::data::model::CurveSet;

pub const TITLE: &str = "Curves Plot";
pub const X_LABEL: &str = "Index";
pub const Y_LABEL: &str = "Value";

/// Legend used by the compatibility mode, whatever the number of curves.
pub const FIXED_LEGEND: [&str; 3] = ["Curve 1", "Curve 2", "Curve 3"];

// ---------------------------------------------------------------------------
// Legend mode
// ---------------------------------------------------------------------------

/// How series are named in the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LegendMode {
    /// "Curve N" for every curve.
    #[default]
    PerCurve,
    /// Exactly the three labels of [`FIXED_LEGEND`]: fewer curves leave
    /// labels unused, extra curves are drawn without a legend entry.
    Fixed,
}

impl LegendMode {
    /// Legend name for the series at `index`, if it gets one.
    pub fn label(self, index: usize) -> Option<String> {
        match self {
            LegendMode::PerCurve => Some(format!("Curve {}", index + 1)),
            LegendMode::Fixed => FIXED_LEGEND.get(index).map(|s| s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

/// One line on the chart: `points[i] == [i, curve[i]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: Option<String>,
    pub color: Rgb,
    pub points: Vec<[f64; 2]>,
}

impl Series {
    /// Points that can actually be drawn (padding cells are NaN).
    pub fn finite_points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.points
            .iter()
            .copied()
            .filter(|[x, y]| x.is_finite() && y.is_finite())
    }

    /// Maximal stretches of consecutive finite points. A padding cell ends
    /// the current stretch so no segment is drawn across the gap.
    pub fn finite_runs(&self) -> Vec<Vec<[f64; 2]>> {
        self.points
            .split(|[x, y]| !(x.is_finite() && y.is_finite()))
            .filter(|run| !run.is_empty())
            .map(<[[f64; 2]]>::to_vec)
            .collect()
    }
}

/// Everything needed to draw the plot, independent of the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grid: bool,
    pub series: Vec<Series>,
}

impl Chart {
    /// Lay out one series per curve against its positional index.
    pub fn from_curves(curves: &CurveSet, legend: LegendMode) -> Self {
        let palette = generate_palette(curves.len());
        let series = curves
            .curves
            .iter()
            .zip(palette)
            .enumerate()
            .map(|(j, (curve, color))| Series {
                name: legend.label(j),
                color,
                points: curve
                    .iter()
                    .enumerate()
                    .map(|(i, &y)| [i as f64, y])
                    .collect(),
            })
            .collect();

        Chart {
            title: TITLE.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            grid: true,
            series,
        }
    }

    /// Total number of points over all series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Named series in draw order: (label, colour).
    pub fn legend_entries(&self) -> Vec<(&str, Rgb)> {
        self.series
            .iter()
            .filter_map(|s| s.name.as_deref().map(|n| (n, s.color)))
            .collect()
    }

    /// Extent of every finite point, never empty or zero-width.
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::EMPTY;
        for [x, y] in self.series.iter().flat_map(Series::finite_points) {
            b.x_min = b.x_min.min(x);
            b.x_max = b.x_max.max(x);
            b.y_min = b.y_min.min(y);
            b.y_max = b.y_max.max(y);
        }
        b.normalized()
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    const EMPTY: Bounds = Bounds {
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
    };

    fn normalized(self) -> Self {
        let (x_min, x_max) = widen(self.x_min, self.x_max);
        let (y_min, y_max) = widen(self.y_min, self.y_max);
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

/// Unit range when nothing was seen; ±0.5 around a single value.
fn widen(min: f64, max: f64) -> (f64, f64) {
    if min > max {
        (0.0, 1.0)
    } else if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curves(n: usize, len: usize) -> CurveSet {
        CurveSet {
            curves: (0..n)
                .map(|j| (0..len).map(|i| (i * j) as f64).collect())
                .collect(),
        }
    }

    fn names(chart: &Chart) -> Vec<Option<&str>> {
        chart.series.iter().map(|s| s.name.as_deref()).collect()
    }

    #[test]
    fn presentation_metadata_is_fixed() {
        let chart = Chart::from_curves(&curves(2, 3), LegendMode::default());
        assert_eq!(chart.title, "Curves Plot");
        assert_eq!(chart.x_label, "Index");
        assert_eq!(chart.y_label, "Value");
        assert!(chart.grid);
    }

    #[test]
    fn series_plot_value_against_index() {
        let set = CurveSet {
            curves: vec![vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]],
        };
        let chart = Chart::from_curves(&set, LegendMode::PerCurve);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[1].points, vec![[0.0, 2.0], [1.0, 4.0], [2.0, 6.0]]);
        assert_eq!(chart.point_count(), 6);
    }

    #[test]
    fn per_curve_legend_names_every_series() {
        let chart = Chart::from_curves(&curves(5, 2), LegendMode::PerCurve);
        assert_eq!(
            names(&chart),
            vec![
                Some("Curve 1"),
                Some("Curve 2"),
                Some("Curve 3"),
                Some("Curve 4"),
                Some("Curve 5"),
            ]
        );
    }

    #[test]
    fn fixed_legend_with_fewer_curves_omits_labels() {
        let chart = Chart::from_curves(&curves(2, 2), LegendMode::Fixed);
        assert_eq!(names(&chart), vec![Some("Curve 1"), Some("Curve 2")]);
        assert_eq!(chart.legend_entries().len(), 2);
    }

    #[test]
    fn fixed_legend_with_more_curves_leaves_extras_unnamed() {
        let chart = Chart::from_curves(&curves(5, 2), LegendMode::Fixed);
        assert_eq!(
            names(&chart),
            vec![Some("Curve 1"), Some("Curve 2"), Some("Curve 3"), None, None]
        );
        let labels: Vec<&str> = chart.legend_entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(labels, FIXED_LEGEND);
    }

    #[test]
    fn empty_curve_set_has_unit_bounds() {
        let chart = Chart::from_curves(&CurveSet::default(), LegendMode::Fixed);
        assert!(chart.series.is_empty());
        assert!(chart.legend_entries().is_empty());
        assert_eq!(
            chart.bounds(),
            Bounds {
                x_min: 0.0,
                x_max: 1.0,
                y_min: 0.0,
                y_max: 1.0,
            }
        );
    }

    #[test]
    fn flat_single_point_bounds_are_widened() {
        let set = CurveSet {
            curves: vec![vec![4.0]],
        };
        let b = Chart::from_curves(&set, LegendMode::PerCurve).bounds();
        assert_eq!((b.x_min, b.x_max), (-0.5, 0.5));
        assert_eq!((b.y_min, b.y_max), (3.5, 4.5));
    }

    #[test]
    fn bounds_skip_padding() {
        let set = CurveSet {
            curves: vec![vec![1.0, f64::NAN, -2.0]],
        };
        let chart = Chart::from_curves(&set, LegendMode::PerCurve);
        assert_eq!(chart.series[0].finite_points().count(), 2);
        let b = chart.bounds();
        assert_eq!((b.x_min, b.x_max), (0.0, 2.0));
        assert_eq!((b.y_min, b.y_max), (-2.0, 1.0));
    }

    #[test]
    fn padding_splits_a_series_into_runs() {
        let set = CurveSet {
            curves: vec![
                vec![1.0, f64::NAN, 3.0, 4.0],
                vec![f64::NAN, f64::NAN, 5.0, f64::NAN],
                vec![f64::NAN; 3],
            ],
        };
        let chart = Chart::from_curves(&set, LegendMode::PerCurve);
        assert_eq!(
            chart.series[0].finite_runs(),
            vec![vec![[0.0, 1.0]], vec![[2.0, 3.0], [3.0, 4.0]]]
        );
        assert_eq!(chart.series[1].finite_runs(), vec![vec![[2.0, 5.0]]]);
        assert!(chart.series[2].finite_runs().is_empty());
    }

    #[test]
    fn complete_series_is_a_single_run() {
        let chart = Chart::from_curves(&curves(1, 4), LegendMode::PerCurve);
        let runs = chart.series[0].finite_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0], chart.series[0].points);
    }
}
