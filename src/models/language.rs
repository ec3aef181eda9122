//! Language registry entries.

use serde::{Deserialize, Serialize};

/// A selectable per-language collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Collection language code (the `<lang>` in `docs_<lang>`).
    pub key: String,
    /// Human-readable name.
    pub display: String,
}

impl Language {
    /// Build a registry entry from a raw language code.
    pub fn from_code(code: &str) -> Self {
        Self {
            key: code.to_string(),
            display: display_name(code),
        }
    }
}

/// Display name for a language code, falling back to the raw code for
/// languages the corpus does not normally ship.
pub fn display_name(code: &str) -> String {
    match code {
        "en" => "English".to_string(),
        "es" => "Spanish".to_string(),
        "ru" => "Russian".to_string(),
        "fa" => "Farsi".to_string(),
        other => other.to_string(),
    }
}
