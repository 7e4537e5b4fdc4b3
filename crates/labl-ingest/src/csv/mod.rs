//! CSV reading utilities.

mod header;
mod reader;

pub use header::{HeaderRow, normalize_header};
pub use reader::{
    MAX_FILE_SIZE, check_file_size, check_file_size_with_limit, read_header_row, read_headers,
    validate_encoding,
};
