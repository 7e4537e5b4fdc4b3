//! Column mappings from canonical fields to spreadsheet headers.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::field::CanonicalField;

/// Mapping from canonical field to the header that holds it.
///
/// At most one header per field. Serializes as a flat JSON object keyed by
/// the snake_case field name, which is the body the map-columns endpoint
/// expects. Deserialization goes through [`ColumnMapping::from_raw`]: keys
/// are matched case-insensitively with legacy aliases, and keys that name no
/// field are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<CanonicalField, String>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mapping from loosely keyed data such as a profile's
    /// `Record<string, string>`.
    ///
    /// Keys are parsed with [`CanonicalField::from_str`](std::str::FromStr), so
    /// legacy aliases are accepted. Keys that name no field are returned
    /// separately instead of being kept.
    pub fn from_raw<K, V, I>(raw: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut mapping = Self::new();
        let mut unknown = Vec::new();
        for (key, value) in raw {
            match key.as_ref().parse::<CanonicalField>() {
                Ok(field) => {
                    mapping.insert(field, value);
                }
                Err(_) => unknown.push(key.as_ref().to_string()),
            }
        }
        (mapping, unknown)
    }

    /// Returns the header mapped to `field`, if any.
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Maps `field` to `header`, returning the previous header.
    pub fn insert(&mut self, field: CanonicalField, header: impl Into<String>) -> Option<String> {
        self.0.insert(field, header.into())
    }

    pub fn remove(&mut self, field: CanonicalField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in canonical field order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.0.iter().map(|(field, header)| (*field, header.as_str()))
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(CanonicalField, &str) -> bool) {
        self.0.retain(|field, header| keep(*field, header));
    }

    /// Returns true if a non-blank header is mapped to `field`.
    pub fn is_mapped(&self, field: CanonicalField) -> bool {
        self.get(field).is_some_and(|header| !header.trim().is_empty())
    }

    /// Drops entries whose header is empty or whitespace-only.
    ///
    /// Applied before a mapping is sent to the backend or saved.
    #[must_use]
    pub fn sanitize(mut self) -> Self {
        self.0.retain(|_, header| !header.trim().is_empty());
        self
    }

    /// Converts to plain string keys for transport.
    pub fn to_raw(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, header)| (field.as_str().to_string(), header.clone()))
            .collect()
    }
}

impl<'de> Deserialize<'de> for ColumnMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw).0)
    }
}

impl FromIterator<(CanonicalField, String)> for ColumnMapping {
    fn from_iter<T: IntoIterator<Item = (CanonicalField, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ColumnMapping {
    type Item = (&'a CanonicalField, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, CanonicalField, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
