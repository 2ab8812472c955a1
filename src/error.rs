use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can abort a run. None of these are recovered locally.
#[derive(Error, Debug)]
pub enum CurveError {
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `line` and `field` are 1-based.
    #[error("line {line}, field {field}: '{token}' is not a number")]
    Parse {
        line: u64,
        field: usize,
        token: String,
    },

    #[error("line {line}: expected {expected} fields but found {found}")]
    Shape {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("malformed input: {0}")]
    Csv(#[from] csv::Error),

    #[error("no display available: {0}")]
    DisplayUnavailable(String),

    #[error("failed to write {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },
}

impl CurveError {
    /// Split a csv read error into an I/O failure on `path` or a structural one.
    pub fn from_csv(path: &Path, err: csv::Error) -> Self {
        if err.is_io_error() {
            CurveError::FileAccess {
                path: path.to_path_buf(),
                source: io::Error::from(err),
            }
        } else {
            CurveError::Csv(err)
        }
    }
}
