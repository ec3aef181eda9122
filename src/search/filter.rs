//! Filter predicates over LM annotations.
//!
//! The query builder turns [`SearchCriteria`] into an [`LmFilter`], an
//! AND-combined predicate list. Field values resolve through a tagged
//! variant over the known LM schema rather than reflection, since the
//! schema is fixed at compile time.

use regex::{Regex, RegexBuilder};

use crate::models::{Document, LmAnnotation, LmSpan};

use super::criteria::{FieldPath, SearchCriteria};

/// A resolved LM field value.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Number(f64),
}

/// One criterion compiled into a matchable predicate.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Case-insensitive substring/regex match on a text or list field.
    Pattern { path: FieldPath, pattern: Regex },
    /// Strictly-greater score threshold. A malformed threshold parses to
    /// NaN, which never compares true, so it silently matches nothing.
    ScoreAbove { threshold: f64 },
}

impl Predicate {
    /// Compile a single criterion.
    fn compile(key: &str, value: &str) -> Self {
        let path = FieldPath::parse(key);
        if path.is_score() {
            return Predicate::ScoreAbove {
                threshold: value.trim().parse::<f64>().unwrap_or(f64::NAN),
            };
        }

        // Treat the value as a regex where it compiles, a literal
        // substring otherwise.
        let pattern = RegexBuilder::new(value)
            .case_insensitive(true)
            .build()
            .or_else(|_| {
                RegexBuilder::new(&regex::escape(value))
                    .case_insensitive(true)
                    .build()
            })
            // Escaped literals always compile.
            .unwrap_or_else(|e| unreachable!("escaped pattern failed to compile: {e}"));

        Predicate::Pattern { path, pattern }
    }

    /// Match this predicate against a single LM annotation.
    ///
    /// Pattern predicates on fields that resolve to a number, or that the
    /// annotation does not carry, do not exclude the annotation. This
    /// keeps sparse extractor output visible, matching the original
    /// viewer behavior.
    pub fn matches(&self, lm: &LmAnnotation) -> bool {
        match self {
            Predicate::ScoreAbove { threshold } => lm.score > *threshold,
            Predicate::Pattern { path, pattern } => match resolve_field(lm, path) {
                Some(FieldValue::Text(text)) => pattern.is_match(text),
                Some(FieldValue::List(items)) => items.iter().any(|item| pattern.is_match(item)),
                Some(FieldValue::Number(_)) | None => true,
            },
        }
    }
}

/// An AND-combined set of predicates: the opaque filter object consumed
/// by the pager's store queries and the highlighter.
#[derive(Debug, Clone, Default)]
pub struct LmFilter {
    predicates: Vec<Predicate>,
}

impl LmFilter {
    /// Build a filter from search criteria. Empty criterion values are
    /// skipped; no criteria yields a filter that matches everything.
    pub fn build(criteria: &SearchCriteria) -> Self {
        Self {
            predicates: criteria
                .active()
                .map(|(key, value)| Predicate::compile(key, value))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether a single annotation satisfies every predicate. Used when
    /// selecting annotations to highlight.
    pub fn matches_lm(&self, lm: &LmAnnotation) -> bool {
        self.predicates.iter().all(|p| p.matches(lm))
    }

    /// Whether a document satisfies the filter: each predicate must hold
    /// on at least one of the document's annotations, independently.
    /// Different annotations may satisfy different predicates, mirroring
    /// how an AND of per-field clauses behaves over an array-valued
    /// field in the original store.
    pub fn matches_doc(&self, doc: &Document) -> bool {
        self.predicates
            .iter()
            .all(|p| doc.lms.iter().any(|lm| p.matches(lm)))
    }

    /// Select the annotations of `doc` matching every predicate,
    /// preserving document order.
    pub fn select<'a>(&self, lms: &'a [LmAnnotation]) -> Vec<&'a LmAnnotation> {
        lms.iter().filter(|lm| self.matches_lm(lm)).collect()
    }
}

/// Resolve a dotted field path against the known LM schema.
fn resolve_field<'a>(lm: &'a LmAnnotation, path: &FieldPath) -> Option<FieldValue<'a>> {
    match path.segments() {
        [field] => match field.as_str() {
            "name" => lm.name.as_deref().map(FieldValue::Text),
            "extractor" => lm.extractor.as_deref().map(FieldValue::Text),
            "seed" => lm.seed.as_deref().map(FieldValue::Text),
            "score" => Some(FieldValue::Number(lm.score)),
            "cms" => Some(FieldValue::List(&lm.cms)),
            _ => None,
        },
        [side, field] => {
            let span = match side.as_str() {
                "source" => &lm.source,
                "target" => &lm.target,
                _ => return None,
            };
            resolve_span_field(span, field)
        }
        _ => None,
    }
}

fn resolve_span_field<'a>(span: &'a LmSpan, field: &str) -> Option<FieldValue<'a>> {
    match field {
        "form" => Some(FieldValue::Text(&span.form)),
        "lemma" => Some(FieldValue::Text(&span.lemma)),
        "concept" => span.concept.as_deref().map(FieldValue::Text),
        "concepts" => Some(FieldValue::List(&span.concepts)),
        "schemas" => Some(FieldValue::List(&span.schemas)),
        "start" => Some(FieldValue::Number(span.start as f64)),
        "end" => Some(FieldValue::Number(span.end as f64)),
        _ => None,
    }
}
