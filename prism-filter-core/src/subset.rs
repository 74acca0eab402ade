use crate::selection::Dimension;
use std::sync::Arc;

/// Ordered positions of the matching models within the source list.
///
/// Positions are ascending, so resolving them against the source list keeps
/// its relative order. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubsetIndices(Arc<[usize]>);

impl SubsetIndices {
    pub(crate) fn from_vec(indices: Vec<usize>) -> Self {
        Self(Arc::from(indices))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolves the positions against the list they were derived from.
    /// Positions past the end of `models` are skipped.
    pub fn pick<'a, M>(&'a self, models: &'a [M]) -> impl Iterator<Item = &'a M> + 'a {
        self.0.iter().filter_map(move |&idx| models.get(idx))
    }
}

/// The derived views of one model list under one selection.
///
/// Each `*_models` field lifts exactly one dimension's constraint; `filtered`
/// applies every constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedSubsets {
    pub category_models: SubsetIndices,
    pub group_count_models: SubsetIndices,
    pub quota_type_models: SubsetIndices,
    pub endpoint_type_models: SubsetIndices,
    pub vendor_models: SubsetIndices,
    pub tag_models: SubsetIndices,
    pub filtered: SubsetIndices,
}

impl DerivedSubsets {
    /// Subset whose own constraint is lifted for `dimension`.
    /// `Search` is not precomputed here; ask the engine for it directly.
    pub fn ignoring(&self, dimension: Dimension) -> Option<&SubsetIndices> {
        match dimension {
            Dimension::Category => Some(&self.category_models),
            Dimension::Group => Some(&self.group_count_models),
            Dimension::QuotaType => Some(&self.quota_type_models),
            Dimension::EndpointType => Some(&self.endpoint_type_models),
            Dimension::Vendor => Some(&self.vendor_models),
            Dimension::Tag => Some(&self.tag_models),
            Dimension::Search => None,
        }
    }
}
