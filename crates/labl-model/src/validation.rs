use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::field::CanonicalField;

/// Result of checking a mapping for required fields.
///
/// Missing fields are a user-facing condition, not an error: callers gate
/// downstream processing on [`ValidationOutcome::is_ok`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok,
    /// Required fields without a mapped header, in canonical order.
    Missing(Vec<CanonicalField>),
}

impl ValidationOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationOutcome::Ok)
    }

    pub fn missing(&self) -> &[CanonicalField] {
        match self {
            ValidationOutcome::Ok => &[],
            ValidationOutcome::Missing(fields) => fields,
        }
    }

    /// Actionable message, e.g. "Please map a column for Weight, Carrier Rate".
    ///
    /// Returns `None` when nothing is missing.
    pub fn message(&self) -> Option<String> {
        match self {
            ValidationOutcome::Ok => None,
            ValidationOutcome::Missing(fields) => {
                let labels: Vec<&str> = fields.iter().map(CanonicalField::label).collect();
                Some(format!("Please map a column for {}", labels.join(", ")))
            }
        }
    }
}

impl Serialize for ValidationOutcome {
    /// Serializes as `{"ok":true}` or `{"ok":false,"missing":[...]}`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValidationOutcome::Ok => {
                let mut state = serializer.serialize_struct("ValidationOutcome", 1)?;
                state.serialize_field("ok", &true)?;
                state.end()
            }
            ValidationOutcome::Missing(fields) => {
                let mut state = serializer.serialize_struct("ValidationOutcome", 2)?;
                state.serialize_field("ok", &false)?;
                state.serialize_field("missing", fields)?;
                state.end()
            }
        }
    }
}
