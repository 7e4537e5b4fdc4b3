//! Header normalization helpers.

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const CLOSEST_HEADER_MIN_SIMILARITY: f64 = 0.8;

/// Comparison forms of a single header, computed once per suggestion run.
#[derive(Debug, Clone)]
pub struct HeaderForm<'a> {
    /// Header exactly as it appears in the file.
    pub raw: &'a str,
    /// Lower-cased header.
    pub lower: String,
    /// Lower-cased header with every non-alphanumeric character removed,
    /// so "Weight (lbs)" and "weight_lbs" both contain "weight".
    pub compact: String,
    /// Lower-cased alphanumeric runs, e.g. `["pkg", "wt", "oz"]`.
    pub tokens: Vec<String>,
}

impl<'a> HeaderForm<'a> {
    pub fn new(raw: &'a str) -> Self {
        let lower = raw.to_lowercase();
        let compact = lower.chars().filter(|ch| ch.is_alphanumeric()).collect();
        let tokens = lower
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            raw,
            lower,
            compact,
            tokens,
        }
    }

    /// True if the lower-cased or compact form contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lower.contains(needle) || self.compact.contains(needle)
    }

    /// True if only the lower-cased form contains `needle`.
    pub fn contains_lower(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    /// True if a whole token equals `token`.
    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

/// Normalizes text for display comparisons: lower-case, separators folded to
/// single spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds the header most similar to `wanted`, for "did you mean" hints when a
/// user names a column that is not in the file.
pub fn closest_header<'h>(wanted: &str, headers: &'h [String]) -> Option<&'h str> {
    let wanted = normalize_text(wanted);
    let mut best: Option<(&str, f64)> = None;
    for header in headers {
        let score = jaro_similarity(wanted.chars(), normalize_text(header).chars());
        if score < CLOSEST_HEADER_MIN_SIMILARITY {
            continue;
        }
        if best.is_none_or(|(_, current)| score > current) {
            best = Some((header.as_str(), score));
        }
    }
    best.map(|(header, _)| header)
}
