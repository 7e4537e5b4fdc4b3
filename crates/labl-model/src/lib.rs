//! Data model for the Labl IQ column mapper.
//!
//! - [`CanonicalField`]: the fixed shipping schema slots the rate engine expects
//! - [`ColumnMapping`]: field -> header assignments for one uploaded file
//! - [`MappingProfile`]: a named mapping saved for reuse
//! - [`ValidationOutcome`]: required-field check result

pub mod error;
pub mod field;
pub mod mapping;
pub mod profile;
pub mod validation;

pub use error::{ModelError, Result};
pub use field::CanonicalField;
pub use mapping::ColumnMapping;
pub use profile::MappingProfile;
pub use validation::ValidationOutcome;
