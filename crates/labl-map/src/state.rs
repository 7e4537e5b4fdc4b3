//! Mapping state for the interactive review step after an upload.
//!
//! The state owns the header row of one file, starts from the mapper's
//! suggestion and records the user's overrides until the mapping is
//! submitted or saved as a profile.

use std::collections::BTreeSet;

use tracing::{debug, info};

use labl_model::{CanonicalField, ColumnMapping, MappingProfile, ValidationOutcome};

use crate::engine::{ColumnMapper, prune_stale, validate};
use crate::error::MappingError;
use crate::utils::closest_header;

/// Column mapping under review for one uploaded file.
#[derive(Debug, Clone)]
pub struct MappingState {
    headers: Vec<String>,
    mapper: ColumnMapper,
    mapping: ColumnMapping,
}

/// Status of a field in the current mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Mapped,
    /// Required and not mapped; blocks submission.
    Missing,
    /// Optional and not mapped.
    Unmapped,
}

impl MappingState {
    /// Creates the state and runs auto-mapping on `headers`.
    pub fn new(headers: Vec<String>, mapper: ColumnMapper) -> Self {
        let mapping = mapper.suggest_mapping(&headers);
        Self {
            headers,
            mapper,
            mapping,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Maps `field` to `header`, overriding any suggestion.
    pub fn assign(&mut self, field: CanonicalField, header: &str) -> Result<(), MappingError> {
        let header = header.trim();
        if header.is_empty() {
            return Err(MappingError::EmptyColumn(field));
        }
        if !self.headers.iter().any(|h| h == header) {
            return Err(MappingError::ColumnNotFound {
                column: header.to_string(),
                suggestion: closest_header(header, &self.headers).map(str::to_string),
            });
        }
        debug!(field = %field, header, "manual mapping");
        self.mapping.insert(field, header);
        Ok(())
    }

    /// Leaves `field` unmapped. Returns true if it was mapped.
    pub fn clear(&mut self, field: CanonicalField) -> bool {
        self.mapping.remove(field).is_some()
    }

    /// Discards every manual change and re-runs auto-mapping.
    pub fn reset_auto_mapping(&mut self) {
        self.mapping = self.mapper.suggest_mapping(&self.headers);
    }

    /// Replaces the mapping with a saved profile's, keeping only the fields
    /// whose header exists in this file.
    ///
    /// Returns the fields that could not be applied.
    pub fn apply_profile(&mut self, profile: &MappingProfile) -> Vec<CanonicalField> {
        let (mapping, dropped) = prune_stale(&profile.mapping, &self.headers);
        info!(
            profile = %profile.name,
            applied = mapping.len(),
            dropped = dropped.len(),
            "applied mapping profile"
        );
        self.mapping = mapping;
        dropped
    }

    pub fn validate(&self) -> ValidationOutcome {
        validate(&self.mapping)
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn status(&self, field: CanonicalField) -> FieldStatus {
        if self.mapping.is_mapped(field) {
            FieldStatus::Mapped
        } else if field.is_required() {
            FieldStatus::Missing
        } else {
            FieldStatus::Unmapped
        }
    }

    /// Headers not used by any field, in column order.
    pub fn unmapped_headers(&self) -> Vec<&str> {
        let used: BTreeSet<&str> = self.mapping.iter().map(|(_, header)| header).collect();
        self.headers
            .iter()
            .map(String::as_str)
            .filter(|header| !used.contains(header))
            .collect()
    }

    /// Sanitized mapping for the map-columns request body.
    pub fn request_body(&self) -> ColumnMapping {
        self.mapping.clone().sanitize()
    }
}
