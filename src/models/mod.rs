//! Data models for annotated-sentence documents.

mod document;
mod language;

pub use document::{Dep, Document, LmAnnotation, LmSpan, Word};
pub use language::{display_name, Language};
