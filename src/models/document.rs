//! Annotated-sentence document model.
//!
//! Documents carry the raw sentence text, word-level morphosyntactic
//! tokens, and linguistic metaphor (LM) annotations linking a source
//! expression to a target expression with a confidence score. Documents
//! are read-only from the viewer's perspective.

use serde::{Deserialize, Serialize};

/// A single annotated sentence.
///
/// The `_id` key is a unique, totally ordered string; pagination anchors
/// on it. Span offsets in `word` and `lms` are character offsets into
/// `text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique ordered identifier (serialized as `_id`).
    #[serde(rename = "_id")]
    pub id: String,
    /// Raw sentence text.
    pub text: String,
    /// Word tokens with part-of-speech and dependency edges.
    #[serde(default)]
    pub word: Vec<Word>,
    /// Linguistic metaphor annotations.
    #[serde(default)]
    pub lms: Vec<LmAnnotation>,
    /// Language code, when the loader recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// A word token in the dependency parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// Zero-based token index.
    #[serde(default)]
    pub idx: u32,
    /// Character offset of the token start.
    #[serde(default)]
    pub start: usize,
    /// Character offset one past the token end.
    #[serde(default)]
    pub end: usize,
    /// Part-of-speech tag.
    #[serde(default)]
    pub pos: String,
    /// Surface form.
    #[serde(default)]
    pub form: String,
    /// Lemma.
    #[serde(default)]
    pub lem: String,
    /// Dependency edge to the head token, absent for unattached tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep: Option<Dep>,
}

/// Dependency edge. Head indices are 1-based in the corpus data; a head
/// of 0 marks the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dep {
    #[serde(default)]
    pub head: u32,
    /// Relation label (`type` in the corpus data).
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

/// A linguistic metaphor annotation: a scored link between a source
/// expression and a target expression within one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LmAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Which extraction system produced this annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    /// Confidence score.
    #[serde(default)]
    pub score: f64,
    pub source: LmSpan,
    pub target: LmSpan,
    /// Conceptual metaphor system tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cms: Vec<String>,
}

/// One side of an LM annotation: a half-open `[start, end)` character
/// span with its linguistic attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LmSpan {
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub end: usize,
    #[serde(default)]
    pub form: String,
    #[serde(default)]
    pub lemma: String,
    /// Single concept tag (older extractor output).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    /// Concept tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concepts: Vec<String>,
    /// Schema tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_roundtrip_id_field() {
        let json = r#"{
            "_id": "wiki_00042",
            "text": "the economy is a house of cards",
            "word": [
                {"idx": 0, "start": 0, "end": 3, "pos": "DT", "form": "the", "lem": "the",
                 "dep": {"head": 2, "type": "det"}}
            ],
            "lms": [{
                "name": "ECONOMY AS STRUCTURE",
                "score": 0.82,
                "source": {"start": 17, "end": 31, "form": "house of cards", "lemma": "house of cards",
                           "schemas": ["Physical_structure"]},
                "target": {"start": 4, "end": 11, "form": "economy", "lemma": "economy",
                           "concepts": ["ECONOMY"]}
            }]
        }"#;

        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id, "wiki_00042");
        assert_eq!(doc.word[0].dep.as_ref().unwrap().kind, "det");
        assert_eq!(doc.lms[0].source.schemas, vec!["Physical_structure"]);

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["_id"], "wiki_00042");
    }

    #[test]
    fn test_missing_annotation_lists_default_empty() {
        let doc: Document =
            serde_json::from_str(r#"{"_id": "d1", "text": "plain sentence"}"#).unwrap();
        assert!(doc.word.is_empty());
        assert!(doc.lms.is_empty());
    }
}
