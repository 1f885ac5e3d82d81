//! Loading of CIN census submissions.
//!
//! A submission is a folder holding one CSV file per census table, named
//! after the table (`Header.csv`, `CINdetails.csv`, ...).
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cin_ingest::load_tables;
//!
//! let tables = load_tables(Path::new("returns/2022"))?;
//! ```

mod csv;
mod discovery;
mod error;

use std::path::Path;

use tracing::{debug, info};

use cin_validate::TableSet;

pub use csv::{read_table, validate_encoding};
pub use discovery::discover_tables;
pub use error::{IngestError, Result};

/// Read every census table found in `dir`.
///
/// Tables without a file are simply absent from the result; rules that need
/// them fail on their own.
pub fn load_tables(dir: &Path) -> Result<TableSet> {
    let mut tables = TableSet::new();
    for (table, path) in discover_tables(dir)? {
        let df = read_table(&path)?;
        debug!(table = %table, rows = df.height(), path = %path.display(), "table loaded");
        tables.insert(table, df);
    }
    let rows: usize = tables.heights().values().sum();
    info!(dir = %dir.display(), tables = tables.len(), rows, "submission loaded");
    Ok(tables)
}
