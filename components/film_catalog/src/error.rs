//! Catalog error types
//!
//! Load failures carry the path of the catalog file so a startup report
//! points straight at the broken document.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Required record fields that were absent (or null) in a film record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing field(s): {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

/// A single invalid record inside a catalog document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDefect {
    /// Position of the record in the `films` array
    pub index: usize,
    pub missing: MissingFields,
}

impl fmt::Display for RecordDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}: {}", self.index, self.missing)
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog {path} has invalid records: {}", describe_defects(.defects))]
    InvalidRecords {
        path: PathBuf,
        defects: Vec<RecordDefect>,
    },

    #[error("failed to encode catalog")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write catalog {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("film not found: {0}")]
    NotFound(String),

    #[error("catalog is empty")]
    Empty,

    #[error("film '{name}' is already in the catalog ({hash})")]
    Duplicate { name: String, hash: String },
}

impl CatalogError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        CatalogError::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Write {
            path: path.into(),
            source,
        }
    }
}

fn describe_defects(defects: &[RecordDefect]) -> String {
    defects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, CatalogError>;
