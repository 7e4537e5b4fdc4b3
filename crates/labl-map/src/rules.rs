//! Keyword rules that decide whether a header can hold a canonical field.
//!
//! Each field has exactly one [`FieldKeywordRule`]. A rule classifies a header
//! as a preferred candidate, a fallback candidate, or no candidate at all;
//! the engine then picks the leftmost preferred header, or the leftmost
//! fallback when no preferred header exists.

use labl_model::CanonicalField;

use crate::utils::HeaderForm;

const WEIGHT_WORDS: &[&str] = &["weight", "wt", "lbs", "oz", "kg"];
// "g" alone is too short to search for inside words.
const WEIGHT_UNITS: &[&str] = &["g"];
const DEST_ZIP_WORDS: &[&str] = &["zip", "postal", "postcode", "destination", "dest"];
const ORIGIN_WORDS: &[&str] = &["origin", "from"];
const ORIGIN_ZIP_WORDS: &[&str] = &["zip", "postal", "code"];
const RATE_WORDS: &[&str] = &["cost", "rate", "fee"];
const RATE_EXCLUSIONS: &[&str] = &["carrier"];
const CARRIER_EXCLUSIONS: &[&str] = &["cost", "rate", "fee", "charge", "price", "amount"];
const ZONE_WORDS: &[&str] = &["zone"];
const LENGTH_WORDS: &[&str] = &["length", "dimension", "size"];
const WIDTH_WORDS: &[&str] = &["width"];
const HEIGHT_WORDS: &[&str] = &["height"];

/// How a rule recognizes a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Header must literally contain one of the names. No short-token
    /// guessing, so "L" never becomes a length column.
    Strict(&'static [&'static str]),
    /// Header contains any word, or has a whole token equal to any unit.
    Keywords {
        words: &'static [&'static str],
        tokens: &'static [&'static str],
    },
    /// Header contains a word from both groups.
    Conjunction {
        any_of: &'static [&'static str],
        and_any_of: &'static [&'static str],
    },
    /// Header contains a comma-separated token of the field's placeholder,
    /// or the field key itself.
    Placeholder,
}

/// Candidate strength of a header for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Preferred,
    /// Matches, but also contains an excluded word. Used only when no
    /// preferred header exists.
    Fallback,
}

/// Matching rule for a single canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKeywordRule {
    pub field: CanonicalField,
    pub kind: RuleKind,
    /// Lower-case substrings that disqualify a matching header.
    pub exclusions: &'static [&'static str],
    /// Demote excluded headers to [`Tier::Fallback`] instead of rejecting them.
    pub demote_excluded: bool,
    /// Reject headers that also satisfy this other field's rule.
    pub yields_to: Option<CanonicalField>,
}

impl FieldKeywordRule {
    const fn new(field: CanonicalField, kind: RuleKind) -> Self {
        Self {
            field,
            kind,
            exclusions: &[],
            demote_excluded: false,
            yields_to: None,
        }
    }

    const fn excluding(mut self, exclusions: &'static [&'static str]) -> Self {
        self.exclusions = exclusions;
        self
    }

    const fn demoting(mut self) -> Self {
        self.demote_excluded = true;
        self
    }

    const fn yielding_to(mut self, other: CanonicalField) -> Self {
        self.yields_to = Some(other);
        self
    }

    /// Returns the rule for `field`.
    pub fn for_field(field: CanonicalField) -> Self {
        match field {
            CanonicalField::Weight => Self::new(
                field,
                RuleKind::Keywords {
                    words: WEIGHT_WORDS,
                    tokens: WEIGHT_UNITS,
                },
            ),
            CanonicalField::Rate => Self::new(
                field,
                RuleKind::Keywords {
                    words: RATE_WORDS,
                    tokens: &[],
                },
            )
            .excluding(RATE_EXCLUSIONS)
            .demoting(),
            CanonicalField::FromZip => Self::new(
                field,
                RuleKind::Conjunction {
                    any_of: ORIGIN_WORDS,
                    and_any_of: ORIGIN_ZIP_WORDS,
                },
            ),
            CanonicalField::ToZip => Self::new(
                field,
                RuleKind::Keywords {
                    words: DEST_ZIP_WORDS,
                    tokens: &[],
                },
            )
            .yielding_to(CanonicalField::FromZip),
            CanonicalField::Length => Self::new(field, RuleKind::Strict(LENGTH_WORDS)),
            CanonicalField::Width => Self::new(field, RuleKind::Strict(WIDTH_WORDS)),
            CanonicalField::Height => Self::new(field, RuleKind::Strict(HEIGHT_WORDS)),
            CanonicalField::Zone => Self::new(
                field,
                RuleKind::Keywords {
                    words: ZONE_WORDS,
                    tokens: &[],
                },
            ),
            CanonicalField::Carrier => {
                Self::new(field, RuleKind::Placeholder).excluding(CARRIER_EXCLUSIONS)
            }
            CanonicalField::ServiceLevel
            | CanonicalField::PackageType
            | CanonicalField::ShipmentId => Self::new(field, RuleKind::Placeholder),
        }
    }

    /// True if the header satisfies the rule's positive test, ignoring
    /// exclusions.
    pub fn matches(&self, header: &HeaderForm<'_>) -> bool {
        match self.kind {
            RuleKind::Strict(names) => names.iter().any(|name| header.contains(name)),
            RuleKind::Keywords { words, tokens } => {
                words.iter().any(|word| header.contains(word))
                    || tokens.iter().any(|token| header.has_token(token))
            }
            RuleKind::Conjunction { any_of, and_any_of } => {
                any_of.iter().any(|word| header.contains_lower(word))
                    && and_any_of.iter().any(|word| header.contains_lower(word))
            }
            RuleKind::Placeholder => placeholder_matches(self.field, header),
        }
    }

    /// Classifies a header for this field.
    pub fn classify(&self, header: &HeaderForm<'_>) -> Option<Tier> {
        if !self.matches(header) {
            return None;
        }
        if let Some(other) = self.yields_to
            && Self::for_field(other).matches(header)
        {
            return None;
        }
        let excluded = self
            .exclusions
            .iter()
            .any(|word| header.contains_lower(word));
        match (excluded, self.demote_excluded) {
            (false, _) => Some(Tier::Preferred),
            (true, true) => Some(Tier::Fallback),
            (true, false) => None,
        }
    }
}

fn placeholder_matches(field: CanonicalField, header: &HeaderForm<'_>) -> bool {
    let key = field.as_str();
    if header.contains_lower(key) || header.contains_lower(&key.replace('_', " ")) {
        return true;
    }
    field
        .placeholder()
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .any(|token| header.contains_lower(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(field: CanonicalField, header: &str) -> Option<Tier> {
        FieldKeywordRule::for_field(field).classify(&HeaderForm::new(header))
    }

    #[test]
    fn dimensions_require_literal_name() {
        assert_eq!(
            classify(CanonicalField::Length, "Length (in)"),
            Some(Tier::Preferred)
        );
        assert_eq!(
            classify(CanonicalField::Length, "Package Size"),
            Some(Tier::Preferred)
        );
        assert_eq!(classify(CanonicalField::Length, "L"), None);
        assert_eq!(classify(CanonicalField::Width, "W"), None);
        assert_eq!(classify(CanonicalField::Height, "ht"), None);
        assert_eq!(
            classify(CanonicalField::Height, "pkg_height"),
            Some(Tier::Preferred)
        );
    }

    #[test]
    fn weight_units_match_inside_unseparated_headers() {
        for header in ["PkgWt", "TotalLbs", "ShipWtOz", "massKg"] {
            assert_eq!(
                classify(CanonicalField::Weight, header),
                Some(Tier::Preferred),
                "{header}"
            );
        }
        assert_eq!(classify(CanonicalField::Weight, "Tracking"), None);
    }

    #[test]
    fn weight_gram_unit_matches_whole_token_only() {
        assert_eq!(
            classify(CanonicalField::Weight, "Pkg Wt"),
            Some(Tier::Preferred)
        );
        assert_eq!(
            classify(CanonicalField::Weight, "Mass (g)"),
            Some(Tier::Preferred)
        );
        assert_eq!(
            classify(CanonicalField::Weight, "weight_lbs"),
            Some(Tier::Preferred)
        );
        assert_eq!(classify(CanonicalField::Weight, "Length"), None);
        assert_eq!(classify(CanonicalField::Weight, "Tracking Number"), None);
    }

    #[test]
    fn rate_demotes_carrier_headers() {
        assert_eq!(
            classify(CanonicalField::Rate, "Total Cost"),
            Some(Tier::Preferred)
        );
        assert_eq!(
            classify(CanonicalField::Rate, "Carrier Fee"),
            Some(Tier::Fallback)
        );
        assert_eq!(classify(CanonicalField::Rate, "Carrier"), None);
    }

    #[test]
    fn origin_zip_needs_both_tokens() {
        assert_eq!(
            classify(CanonicalField::FromZip, "Origin Zip"),
            Some(Tier::Preferred)
        );
        assert_eq!(
            classify(CanonicalField::FromZip, "Ship From Postal Code"),
            Some(Tier::Preferred)
        );
        assert_eq!(classify(CanonicalField::FromZip, "Zip"), None);
        assert_eq!(classify(CanonicalField::FromZip, "Origin City"), None);
    }

    #[test]
    fn destination_zip_yields_to_origin() {
        assert_eq!(classify(CanonicalField::ToZip, "Zip"), Some(Tier::Preferred));
        assert_eq!(
            classify(CanonicalField::ToZip, "Dest. Postcode"),
            Some(Tier::Preferred)
        );
        assert_eq!(classify(CanonicalField::ToZip, "Origin Zip"), None);
    }

    #[test]
    fn carrier_rejects_monetary_headers() {
        assert_eq!(
            classify(CanonicalField::Carrier, "Carrier"),
            Some(Tier::Preferred)
        );
        assert_eq!(classify(CanonicalField::Carrier, "Carrier Rate"), None);
        assert_eq!(classify(CanonicalField::Carrier, "Carrier Fee"), None);
    }

    #[test]
    fn placeholder_rule_uses_hint_tokens_and_key() {
        assert_eq!(
            classify(CanonicalField::ShipmentId, "Order ID"),
            Some(Tier::Preferred)
        );
        assert_eq!(
            classify(CanonicalField::ServiceLevel, "service_level"),
            Some(Tier::Preferred)
        );
        assert_eq!(
            classify(CanonicalField::PackageType, "Box Type"),
            Some(Tier::Preferred)
        );
        assert_eq!(classify(CanonicalField::ServiceLevel, "Zone"), None);
    }
}
