//! Saved mapping presets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::mapping::ColumnMapping;

/// A named, persisted column mapping a user can reapply to new uploads.
///
/// Profiles are never edited in place; changing one means deleting it and
/// saving a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingProfile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub mapping: ColumnMapping,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MappingProfile {
    /// Creates a profile stamped with `now` for both timestamps.
    ///
    /// The name is trimmed and must not be blank; the mapping is sanitized.
    pub fn new(
        id: impl Into<String>,
        name: &str,
        description: Option<String>,
        mapping: ColumnMapping,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::BlankProfileName);
        }
        Ok(Self {
            id: id.into(),
            name: name.to_string(),
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            mapping: mapping.sanitize(),
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::field::CanonicalField;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn serializes_camel_case() {
        let mut mapping = ColumnMapping::new();
        mapping.insert(CanonicalField::Weight, "Weight");
        let profile =
            MappingProfile::new("p1", " Standard ", None, mapping, fixed_now()).unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "Standard");
        assert_eq!(json["mapping"]["weight"], "Weight");
        assert_eq!(json["createdAt"], "2024-03-01T12:00:00Z");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn rejects_blank_name() {
        let result = MappingProfile::new("p1", "   ", None, ColumnMapping::new(), fixed_now());
        assert_eq!(result, Err(ModelError::BlankProfileName));
    }

    #[test]
    fn drops_blank_description_and_headers() {
        let mut mapping = ColumnMapping::new();
        mapping.insert(CanonicalField::Weight, "Weight");
        mapping.insert(CanonicalField::Zone, "");
        let profile =
            MappingProfile::new("p1", "A", Some("  ".to_string()), mapping, fixed_now()).unwrap();
        assert!(profile.description.is_none());
        assert_eq!(profile.mapping.len(), 1);
    }
}
