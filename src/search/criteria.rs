//! Search criteria: field-path to value mappings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A dotted field path into an LM annotation, parsed from the
/// underscore-joined form used by search forms (`source_lemma` resolves
/// to the `lemma` field of the `source` span).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse an underscore-joined criterion key.
    pub fn parse(key: &str) -> Self {
        Self {
            segments: key.split('_').map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this path names the top-level score field.
    pub fn is_score(&self) -> bool {
        self.segments.len() == 1 && self.segments[0] == "score"
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// User-supplied search criteria: criterion key to raw string value.
///
/// Keys map 1:1 onto LM annotation fields via [`FieldPath`] translation.
/// Empty values are kept here but ignored when the filter is built, so a
/// form submitting blank fields behaves the same as one omitting them.
/// A `BTreeMap` keeps predicate order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchCriteria {
    fields: BTreeMap<String, String>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a criterion value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Iterate non-empty criteria as (key, value) pairs.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether any non-empty criterion is present.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Parse criteria from a JSON object string, as submitted by the
    /// viewer front end. Non-string values are stringified; nulls are
    /// treated as absent.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)?;
        let mut criteria = Self::new();
        for (key, value) in value {
            match value {
                serde_json::Value::String(s) => {
                    criteria.set(key, s);
                }
                serde_json::Value::Null => {}
                other => {
                    criteria.set(key, other.to_string());
                }
            }
        }
        Ok(criteria)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchCriteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
