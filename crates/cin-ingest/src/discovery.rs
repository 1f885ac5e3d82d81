//! Table discovery for submission folders.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use cin_model::TableId;

use crate::error::{IngestError, Result};

/// Map each census table to the CSV file that holds it.
///
/// A file belongs to a table when its stem is the table name, compared
/// case-insensitively. Other files are skipped.
pub fn discover_tables(dir: &Path) -> Result<BTreeMap<TableId, PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut tables: BTreeMap<TableId, PathBuf> = BTreeMap::new();
    for path in paths {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let table = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.parse::<TableId>().ok());

        let Some(table) = table.filter(|_| is_csv) else {
            debug!(path = %path.display(), "skipping file that names no census table");
            continue;
        };
        if let Some(first) = tables.get(&table) {
            return Err(IngestError::DuplicateTable {
                table: table.to_string(),
                first: first.clone(),
                second: path,
            });
        }
        tables.insert(table, path);
    }

    Ok(tables)
}
