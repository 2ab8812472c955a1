// ---------------------------------------------------------------------------
// Row / Table – what the loader reads
// ---------------------------------------------------------------------------

/// One input line, decoded into numbers in field order.
pub type Row = Vec<f64>;

/// One column of the table, plotted as a single line series.
pub type Curve = Vec<f64>;

/// All rows of the input file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
    /// 1-based source line of each row (blank lines are skipped, so these
    /// are not always contiguous).
    pub lines: Vec<u64>,
}

impl Table {
    /// Build a table whose rows sit on consecutive lines starting at 1.
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let lines = (1..=rows.len() as u64).collect();
        Table { rows, lines }
    }

    pub fn push(&mut self, line: u64, row: Row) {
        self.rows.push(row);
        self.lines.push(line);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Source line of row `i`, falling back to its position.
    pub fn line_of(&self, i: usize) -> u64 {
        self.lines.get(i).copied().unwrap_or(i as u64 + 1)
    }
}

// ---------------------------------------------------------------------------
// CurveSet – the transposed table
// ---------------------------------------------------------------------------

/// Column-major view of a [`Table`]: `curves[j][i] == rows[i][j]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSet {
    pub curves: Vec<Curve>,
}

impl CurveSet {
    /// Number of curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Length of the longest curve.
    pub fn points(&self) -> usize {
        self.curves.iter().map(Vec::len).max().unwrap_or(0)
    }
}
