//! Manifest ingestion for the column mapper.
//!
//! The mapper works on a header list only; this crate produces that list
//! from an uploaded CSV file.
//!
//! ```ignore
//! use std::path::Path;
//! use labl_ingest::read_headers;
//!
//! let headers = read_headers(Path::new("manifest.csv"))?;
//! println!("{} columns", headers.len());
//! ```

mod csv;
mod error;

pub use crate::csv::{
    HeaderRow, MAX_FILE_SIZE, check_file_size, check_file_size_with_limit, normalize_header,
    read_header_row, read_headers, validate_encoding,
};
pub use error::{IngestError, Result};
