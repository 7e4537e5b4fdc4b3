//! Column mapper: suggests, validates and prunes field-to-header mappings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use labl_model::{CanonicalField, ColumnMapping, ValidationOutcome};

use crate::rules::{FieldKeywordRule, Tier};
use crate::utils::HeaderForm;

/// Order in which fields claim headers under [`AssignmentMode::Exclusive`]:
/// the most specific rules first, the loosest placeholder rules last.
const SPECIFICITY_ORDER: [CanonicalField; 12] = [
    CanonicalField::FromZip,
    CanonicalField::Length,
    CanonicalField::Width,
    CanonicalField::Height,
    CanonicalField::Zone,
    CanonicalField::Weight,
    CanonicalField::Rate,
    CanonicalField::ToZip,
    CanonicalField::ShipmentId,
    CanonicalField::Carrier,
    CanonicalField::ServiceLevel,
    CanonicalField::PackageType,
];

/// How fields compete for headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMode {
    /// Every field is matched on its own; one header may serve two fields.
    /// Saved profiles were produced this way.
    #[default]
    Independent,
    /// Fields claim headers in specificity order and a claimed header leaves
    /// the pool.
    Exclusive,
}

/// Suggests a [`ColumnMapping`] from a spreadsheet's header row.
///
/// Matching is keyword based and deterministic: within each field's candidate
/// set the leftmost column wins. The mapper never fails; an incomplete result
/// is surfaced by [`validate`].
///
/// # Example
///
/// ```
/// use labl_map::ColumnMapper;
/// use labl_model::CanonicalField;
///
/// let headers = vec!["Zip".to_string(), "Origin Zip".to_string()];
/// let mapping = ColumnMapper::new().suggest_mapping(&headers);
/// assert_eq!(mapping.get(CanonicalField::ToZip), Some("Zip"));
/// assert_eq!(mapping.get(CanonicalField::FromZip), Some("Origin Zip"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnMapper {
    mode: AssignmentMode,
}

impl ColumnMapper {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mode(mut self, mode: AssignmentMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> AssignmentMode {
        self.mode
    }

    /// Suggests a header for every field that has a qualifying column.
    pub fn suggest_mapping(&self, headers: &[String]) -> ColumnMapping {
        let forms: Vec<HeaderForm<'_>> = headers.iter().map(|h| HeaderForm::new(h)).collect();
        let mut mapping = ColumnMapping::new();
        match self.mode {
            AssignmentMode::Independent => {
                for field in CanonicalField::ALL {
                    if let Some(header) = best_match(field, &forms, &BTreeSet::new()) {
                        mapping.insert(field, header);
                    }
                }
            }
            AssignmentMode::Exclusive => {
                let mut claimed = BTreeSet::new();
                for field in SPECIFICITY_ORDER {
                    if let Some(header) = best_match(field, &forms, &claimed) {
                        claimed.insert(header);
                        mapping.insert(field, header);
                    }
                }
            }
        }
        debug!(
            headers = headers.len(),
            mapped = mapping.len(),
            mode = ?self.mode,
            "suggested column mapping"
        );
        mapping
    }

    /// Lists every header that qualifies for `field`, preferred candidates
    /// first, each group in column order.
    pub fn candidates<'h>(&self, field: CanonicalField, headers: &'h [String]) -> Vec<&'h str> {
        let rule = FieldKeywordRule::for_field(field);
        let mut preferred = Vec::new();
        let mut fallback = Vec::new();
        for header in headers {
            match rule.classify(&HeaderForm::new(header)) {
                Some(Tier::Preferred) => preferred.push(header.as_str()),
                Some(Tier::Fallback) => fallback.push(header.as_str()),
                None => {}
            }
        }
        preferred.extend(fallback);
        preferred
    }
}

fn best_match<'h>(
    field: CanonicalField,
    forms: &[HeaderForm<'h>],
    claimed: &BTreeSet<&str>,
) -> Option<&'h str> {
    let rule = FieldKeywordRule::for_field(field);
    let mut fallback = None;
    for form in forms {
        if claimed.contains(form.raw) {
            continue;
        }
        match rule.classify(form) {
            Some(Tier::Preferred) => {
                trace!(field = %field, header = form.raw, "matched preferred header");
                return Some(form.raw);
            }
            Some(Tier::Fallback) if fallback.is_none() => fallback = Some(form.raw),
            _ => {}
        }
    }
    if let Some(header) = fallback {
        trace!(field = %field, header, "matched fallback header");
    }
    fallback
}

/// Suggests a mapping with the default, independent assignment mode.
pub fn suggest_mapping(headers: &[String]) -> ColumnMapping {
    ColumnMapper::new().suggest_mapping(headers)
}

/// Checks that every required field has a non-empty header.
pub fn validate(mapping: &ColumnMapping) -> ValidationOutcome {
    let missing: Vec<CanonicalField> = CanonicalField::REQUIRED
        .into_iter()
        .filter(|field| !mapping.is_mapped(*field))
        .collect();
    if missing.is_empty() {
        ValidationOutcome::Ok
    } else {
        ValidationOutcome::Missing(missing)
    }
}

/// Drops every entry whose header is not in `headers`.
///
/// A mapping is only meaningful for the header row it was built against;
/// this is applied whenever a stored mapping meets a new file.
pub fn normalize_for_headers(mapping: &ColumnMapping, headers: &[String]) -> ColumnMapping {
    prune_stale(mapping, headers).0
}

/// Like [`normalize_for_headers`], also returning the dropped fields so the
/// caller can tell the user which saved fields did not apply.
pub fn prune_stale(
    mapping: &ColumnMapping,
    headers: &[String],
) -> (ColumnMapping, Vec<CanonicalField>) {
    let mut kept = mapping.clone();
    let mut dropped = Vec::new();
    kept.retain(|field, header| {
        let present = headers.iter().any(|h| h == header);
        if !present {
            dropped.push(field);
        }
        present
    });
    if !dropped.is_empty() {
        debug!(dropped = dropped.len(), "dropped stale mapping entries");
    }
    (kept, dropped)
}
