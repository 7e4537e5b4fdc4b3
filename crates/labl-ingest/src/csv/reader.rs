//! Header row extraction from CSV files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

use super::header::{HeaderRow, normalize_header};

/// Maximum accepted upload size (500 MB).
pub const MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Check file size against [`MAX_FILE_SIZE`].
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 files; UTF-8 with or without BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Reads the header row: the first record with at least one non-blank cell.
pub fn read_header_row(path: &Path) -> Result<HeaderRow> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let columns: Vec<String> = record.iter().map(normalize_header).collect();
        if columns.iter().all(String::is_empty) {
            continue;
        }
        let row = HeaderRow::new(columns, index);
        report_anomalies(path, &row);
        debug!(
            path = %path.display(),
            columns = row.len(),
            record_index = index,
            "read header row"
        );
        return Ok(row);
    }

    Err(IngestError::NoHeaderRow {
        path: path.to_path_buf(),
    })
}

/// Reads the header list the column mapper consumes.
pub fn read_headers(path: &Path) -> Result<Vec<String>> {
    read_header_row(path).map(|row| row.columns)
}

fn report_anomalies(path: &Path, row: &HeaderRow) {
    let duplicates = row.duplicates();
    if !duplicates.is_empty() {
        warn!(
            path = %path.display(),
            duplicates = ?duplicates,
            "duplicate column names; the first occurrence is used for mapping"
        );
    }
    let blanks = row.blank_count();
    if blanks > 0 {
        warn!(path = %path.display(), blanks, "header row has blank column names");
    }
}
