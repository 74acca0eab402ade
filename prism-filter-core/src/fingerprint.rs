use crate::selection::{Dimension, FilterSelection, Selector};

/// Memo key for one derived subset.
///
/// Holds the model set generation, the ignored dimension, and the selection
/// with the ignored dimension reset to its sentinel, so changing that
/// dimension's own selector maps to the same entry. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    generation: u64,
    ignore: Option<Dimension>,
    relevant: FilterSelection,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CacheKeyGenerator;

impl CacheKeyGenerator {
    pub fn subset_key(
        generation: u64,
        selection: &FilterSelection,
        ignore: Option<Dimension>,
    ) -> CacheKey {
        let mut relevant = selection.clone();
        match ignore {
            Some(Dimension::Category) => relevant.category = Selector::All,
            Some(Dimension::Group) => relevant.group = Selector::All,
            Some(Dimension::QuotaType) => relevant.quota_type = Selector::All,
            Some(Dimension::EndpointType) => relevant.endpoint_type = Selector::All,
            Some(Dimension::Vendor) => relevant.vendor = Selector::All,
            Some(Dimension::Tag) => relevant.tag = Selector::All,
            Some(Dimension::Search) => relevant.search.clear(),
            None => {}
        }

        CacheKey {
            generation,
            ignore,
            relevant,
        }
    }
}
