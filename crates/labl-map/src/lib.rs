//! Column mapping for uploaded shipping manifests.
//!
//! Infers which spreadsheet column holds each canonical shipping field,
//! validates that required fields are mapped, and stores reusable mapping
//! profiles.
//!
//! ```
//! use labl_map::{suggest_mapping, validate};
//!
//! let headers: Vec<String> = ["Weight", "Carrier Fee", "Zone"]
//!     .iter()
//!     .map(|h| h.to_string())
//!     .collect();
//! let mapping = suggest_mapping(&headers);
//! assert!(validate(&mapping).is_ok());
//! ```

pub mod engine;
pub mod error;
pub mod repository;
pub mod rules;
pub mod state;
pub mod utils;

pub use engine::{
    AssignmentMode, ColumnMapper, normalize_for_headers, prune_stale, suggest_mapping, validate,
};
pub use error::{MappingError, ProfileError};
pub use repository::ProfileRepository;
pub use rules::{FieldKeywordRule, RuleKind, Tier};
pub use state::{FieldStatus, MappingState};
pub use utils::closest_header;
