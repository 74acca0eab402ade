//! Client-side filtering and facet counting for model-pricing views.
//!
//! Given a model list and the current selection, the engine derives one view
//! per filter dimension with that dimension's own constraint lifted, so every
//! option can show how many models it would match.

pub mod engine;
pub mod facets;
pub mod fingerprint;
pub mod matcher;
pub mod record;
pub mod selection;
pub mod subset;

#[cfg(test)]
mod test_support;

pub use engine::{EngineStats, FilterEngine, ModelSet, SubsetCacheStore};
pub use facets::{Facet, FacetOption, FacetSet, build_facets};
pub use fingerprint::{CacheKey, CacheKeyGenerator};
pub use matcher::{Matcher, derive_subsets, dimension_matches};
pub use record::{FilterableModel, TAG_DELIMITERS, normalize_tags};
pub use selection::{ALL, Dimension, FilterSelection, Selector, UNKNOWN_VENDOR};
pub use subset::{DerivedSubsets, SubsetIndices};
