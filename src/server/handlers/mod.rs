//! HTTP request handlers for the web server.

mod documents;
mod languages;

pub use documents::{document_graph, get_document, list_documents};
pub use languages::list_languages;
