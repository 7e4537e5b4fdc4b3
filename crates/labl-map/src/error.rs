//! Error types for mapping operations.

use thiserror::Error;

use labl_model::{CanonicalField, ModelError};

/// Errors from interactive mapping edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Header named by the user is not in the uploaded file.
    #[error("column not found: {column}{}", suggestion_suffix(.suggestion))]
    ColumnNotFound {
        column: String,
        suggestion: Option<String>,
    },
    /// Required field cannot be mapped to an empty header.
    #[error("no column given for {0}")]
    EmptyColumn(CanonicalField),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(header) => format!(" (did you mean '{header}'?)"),
        None => String::new(),
    }
}

/// Errors from the profile repository.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Profiles must map at least one field.
    #[error("profile '{0}' has no mapped fields")]
    EmptyMapping(String),
    #[error("profile not found: {0}")]
    NotFound(String),
    #[error("a profile named '{0}' already exists")]
    DuplicateName(String),
    /// Several stored profiles share a name; use the id instead.
    #[error("{count} profiles are named '{name}'; use the profile id")]
    AmbiguousName { name: String, count: usize },
}
