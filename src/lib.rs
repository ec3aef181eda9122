//! GMR Viewer - annotated-corpus viewer for linguistic metaphor (LM)
//! annotations.
//!
//! Pages through per-language collections of annotated sentences,
//! filters them by LM fields, highlights matching source/target spans,
//! and derives dependency graphs for external layout.

pub mod cli;
pub mod config;
pub mod graph;
pub mod highlight;
pub mod models;
pub mod pager;
pub mod repository;
pub mod search;
pub mod server;
pub mod utils;
