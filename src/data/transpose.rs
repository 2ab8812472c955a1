use clap::ValueEnum;

use super::model::{Curve, CurveSet, Table};
use crate::error::CurveError;

// ---------------------------------------------------------------------------
// Ragged-row policy
// ---------------------------------------------------------------------------

/// What to do when rows do not all have the same number of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RaggedPolicy {
    /// Keep only the columns every row has.
    #[default]
    Truncate,
    /// Keep every column; missing cells become NaN and break the line.
    Pad,
    /// Reject the first row whose length differs from the first row.
    Fail,
}

// ---------------------------------------------------------------------------
// Transpose
// ---------------------------------------------------------------------------

/// Turn the row-major table into one curve per column.
///
/// For every kept column `j` and row `i`, `curves[j][i] == rows[i][j]`.
pub fn transpose(table: &Table, policy: RaggedPolicy) -> Result<CurveSet, CurveError> {
    let Some(first) = table.rows.first() else {
        return Ok(CurveSet::default());
    };

    let shortest = table.rows.iter().map(Vec::len).min().unwrap_or(0);
    let longest = table.rows.iter().map(Vec::len).max().unwrap_or(0);

    let width = match policy {
        RaggedPolicy::Truncate => {
            if shortest != longest {
                let dropped: usize = table.rows.iter().map(|r| r.len() - shortest).sum();
                log::warn!(
                    "rows have between {shortest} and {longest} fields; \
                     keeping {shortest} columns and dropping {dropped} values"
                );
            }
            shortest
        }
        RaggedPolicy::Pad => longest,
        RaggedPolicy::Fail => {
            let expected = first.len();
            if let Some(i) = table.rows.iter().position(|r| r.len() != expected) {
                return Err(CurveError::Shape {
                    line: table.line_of(i),
                    expected,
                    found: table.rows[i].len(),
                });
            }
            expected
        }
    };

    let curves: Vec<Curve> = (0..width)
        .map(|j| {
            table
                .rows
                .iter()
                .map(|row| row.get(j).copied().unwrap_or(f64::NAN))
                .collect()
        })
        .collect();

    log::debug!("transposed {} rows into {} curves", table.len(), curves.len());
    Ok(CurveSet { curves })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[f64]]) -> Table {
        Table::from_rows(rows.iter().map(|r| r.to_vec()).collect())
    }

    #[test]
    fn three_rows_of_two_become_two_curves_of_three() {
        let t = table(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        let set = transpose(&t, RaggedPolicy::default()).unwrap();
        assert_eq!(set.curves, vec![vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]);
    }

    #[test]
    fn transposition_law_holds_for_every_cell() {
        let rows: Vec<Vec<f64>> = (0..7)
            .map(|i| (0..4).map(|j| (i * 10 + j) as f64).collect())
            .collect();
        let t = Table::from_rows(rows.clone());
        let set = transpose(&t, RaggedPolicy::Fail).unwrap();

        assert_eq!(set.len(), 4);
        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                assert_eq!(set.curves[j][i], *value);
            }
        }
    }

    #[test]
    fn empty_table_yields_no_curves() {
        for policy in [RaggedPolicy::Truncate, RaggedPolicy::Pad, RaggedPolicy::Fail] {
            let set = transpose(&Table::default(), policy).unwrap();
            assert!(set.is_empty());
        }
    }

    #[test]
    fn single_row_gives_curves_of_length_one() {
        let set = transpose(&table(&[&[1.0, 2.0, 3.0]]), RaggedPolicy::Fail).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.curves.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn truncate_keeps_shortest_width() {
        let t = table(&[&[1.0, 2.0, 3.0], &[4.0, 5.0], &[6.0, 7.0, 8.0]]);
        let set = transpose(&t, RaggedPolicy::Truncate).unwrap();
        assert_eq!(set.curves, vec![vec![1.0, 4.0, 6.0], vec![2.0, 5.0, 7.0]]);
    }

    #[test]
    fn pad_fills_missing_cells_with_nan() {
        let t = table(&[&[1.0, 2.0], &[3.0]]);
        let set = transpose(&t, RaggedPolicy::Pad).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.curves[0], vec![1.0, 3.0]);
        assert_eq!(set.curves[1][0], 2.0);
        assert!(set.curves[1][1].is_nan());
    }

    #[test]
    fn fail_reports_the_offending_line() {
        let mut t = Table::default();
        t.push(1, vec![1.0, 2.0]);
        t.push(3, vec![3.0, 4.0]);
        t.push(4, vec![5.0]);

        match transpose(&t, RaggedPolicy::Fail) {
            Err(CurveError::Shape {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 4);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected shape error, got {other:?}"),
        }
    }
}
