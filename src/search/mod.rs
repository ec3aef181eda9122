//! Search criteria and filter construction.
//!
//! User-supplied field/value criteria are translated into an [`LmFilter`],
//! the opaque conjunction of predicates consumed by the pager's store
//! queries and by the highlighter.

mod criteria;
mod filter;

pub use criteria::{FieldPath, SearchCriteria};
pub use filter::{FieldValue, LmFilter, Predicate};
