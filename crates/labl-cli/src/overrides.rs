//! Parsing of `field=Header` manual assignments.

use labl_model::CanonicalField;

/// Parses `field=Header`. The header keeps any further `=` characters.
pub fn parse_field_assignment(raw: &str) -> Result<(CanonicalField, String), String> {
    let (field, header) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=HEADER, got '{raw}'"))?;
    let field: CanonicalField = field.parse().map_err(|e| format!("{e}"))?;
    let header = header.trim();
    if header.is_empty() {
        return Err(format!("no header given for {field}"));
    }
    Ok((field, header.to_string()))
}
