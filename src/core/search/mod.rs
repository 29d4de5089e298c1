//! Multi-entity fuzzy search.
//!
//! One approximate matcher per entity collection, each with its own
//! field weights and threshold. The five result lists are merged and
//! re-ranked globally by score (lower is better).

pub mod fields;
mod fuzzy;
mod grouping;
mod ranker;

pub use fuzzy::{field_norm, FuzzyMatcher, Pattern, EPSILON};
pub use grouping::{GroupCaps, GroupedResults};
pub use ranker::SearchRanker;
