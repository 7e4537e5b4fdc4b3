//! Header row normalization.

use std::collections::BTreeSet;

/// Header row of a manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    /// Column names in file order, trimmed. Blank cells are kept so column
    /// positions stay aligned with the data.
    pub columns: Vec<String>,
    /// Zero-based record index the header was taken from (leading blank
    /// records are skipped).
    pub record_index: usize,
}

impl HeaderRow {
    pub fn new(columns: Vec<String>, record_index: usize) -> Self {
        Self {
            columns,
            record_index,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Names that occur more than once, each reported once, in file order.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        let mut duplicates = Vec::new();
        for column in &self.columns {
            if column.is_empty() {
                continue;
            }
            if !seen.insert(column.as_str()) && reported.insert(column.as_str()) {
                duplicates.push(column.as_str());
            }
        }
        duplicates
    }

    /// Number of blank header cells.
    pub fn blank_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_empty()).count()
    }
}

/// Normalizes a header cell: strips a UTF-8 BOM and surrounding whitespace.
///
/// Inner whitespace is kept so the name still matches the file's column.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}
