use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::{CurveSet, Row, Table};
use super::transpose::{RaggedPolicy, transpose};
use crate::error::CurveError;

/// File name used when no input is given.
pub const DEFAULT_INPUT: &str = "curves.csv";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Single-byte field separator.
    pub delimiter: u8,
    pub ragged: RaggedPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            ragged: RaggedPolicy::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the file and transpose it into curves.
pub fn load_curves(path: &Path, opts: &LoadOptions) -> Result<CurveSet, CurveError> {
    let table = load_table(path, opts)?;
    transpose(&table, opts.ragged)
}

/// Read every non-blank line of a delimited file as a row of numbers.
///
/// No header row is recognised: the first line is data like any other.
/// The file handle is owned by the reader and closed when this returns,
/// whether or not parsing succeeded.
pub fn load_table(path: &Path, opts: &LoadOptions) -> Result<Table, CurveError> {
    let file = File::open(path).map_err(|source| CurveError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("opened {}", path.display());

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(opts.delimiter)
        .from_reader(file);

    let mut table = Table::default();
    let mut record = StringRecord::new();

    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(CurveError::from_csv(path, e)),
        }
        let line = record.position().map(|p| p.line()).unwrap_or(table.len() as u64 + 1);
        table.push(line, parse_record(&record, line)?);
    }

    if table.is_empty() {
        log::warn!("{} contains no data rows", path.display());
    } else {
        log::info!("loaded {} rows from {}", table.len(), path.display());
    }
    Ok(table)
}

/// Parse every field of one record as `f64`.
fn parse_record(record: &StringRecord, line: u64) -> Result<Row, CurveError> {
    record
        .iter()
        .enumerate()
        .map(|(j, tok)| {
            tok.parse::<f64>().map_err(|_| CurveError::Parse {
                line,
                field: j + 1,
                token: tok.to_string(),
            })
        })
        .collect()
}
