//! CSV table loading.
//!
//! Every export is read into a [`CsvTable`]: a header row plus trimmed data
//! rows. Trailing blank rows (from a trailing newline in the export) are
//! skipped rather than surfacing as phantom records. Downstream code maps
//! rows to typed structs; nothing outside this module touches the parser.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use super::StorageError;

/// Header-name → column-index lookup for the headered tables.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex(std::collections::HashMap<String, usize>);

impl HeaderIndex {
    pub fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn as_map(&self) -> &std::collections::HashMap<String, usize> {
        &self.0
    }
}

/// A loaded table: one header row and zero or more data rows.
#[derive(Debug, Clone)]
pub struct CsvTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Load a table from disk.
    pub fn load(path: &Path) -> Result<CsvTable, StorageError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file = File::open(path)?;
        Self::from_reader(&name, file)
    }

    /// Parse a table from any reader. Requires a header row and at least
    /// one data row.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<CsvTable, StorageError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records: Vec<Vec<String>> = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(|cell| cell.trim().to_string()).collect();
            // Skip blank rows wherever they appear; exports routinely end
            // with a trailing newline.
            if row.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            records.push(row);
        }

        if records.len() < 2 {
            return Err(StorageError::MalformedTable {
                table: name.to_string(),
                reason: format!(
                    "expected a header row and at least one data row, found {} rows",
                    records.len()
                ),
            });
        }

        let headers = records.remove(0);
        Ok(CsvTable {
            name: name.to_string(),
            headers,
            rows: records,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Build the header lookup for header-addressed tables.
    pub fn header_index(&self) -> HeaderIndex {
        HeaderIndex(
            self.headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.trim().to_string(), i))
                .collect(),
        )
    }

    /// Resolve a required key column, erroring when the header lacks it.
    pub fn key_column(&self, column: &str) -> Result<usize, StorageError> {
        self.headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| StorageError::MalformedTable {
                table: self.name.clone(),
                reason: format!("key column \"{column}\" not found in header"),
            })
    }
}
