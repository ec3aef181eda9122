//! Command implementations.

pub mod docs;
pub mod import;
pub mod init;
pub mod languages;
pub mod serve;
