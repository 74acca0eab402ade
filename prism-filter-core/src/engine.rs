use crate::fingerprint::{CacheKey, CacheKeyGenerator};
use crate::matcher::Matcher;
use crate::record::FilterableModel;
use crate::selection::{Dimension, FilterSelection};
use crate::subset::{DerivedSubsets, SubsetIndices};
use moka::sync::Cache;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

pub type SubsetCacheStore = Cache<CacheKey, SubsetIndices, ahash::RandomState>;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// An immutable model list tagged with a process-unique generation.
///
/// The generation stands in for the list's identity in memo keys, so a new
/// list never reuses entries derived from an old one.
#[derive(Debug)]
pub struct ModelSet<M> {
    generation: u64,
    models: Arc<[M]>,
}

impl<M> Clone for ModelSet<M> {
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            models: Arc::clone(&self.models),
        }
    }
}

impl<M> ModelSet<M> {
    pub fn new(models: Vec<M>) -> Self {
        Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            models: Arc::from(models),
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn models(&self) -> &[M] {
        &self.models
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl<M> Default for ModelSet<M> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoizing front of the matcher.
///
/// Each derived subset is cached on its own, keyed by the model set
/// generation plus only the selectors it depends on.
pub struct FilterEngine {
    cache: SubsetCacheStore,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FilterEngine {
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity.max(1))
            .build_with_hasher(ahash::RandomState::new());

        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Every derived view of `set` under `selection`.
    pub fn derive<M: FilterableModel>(
        &self,
        set: &ModelSet<M>,
        selection: &FilterSelection,
    ) -> DerivedSubsets {
        let matcher = Matcher::new(selection);
        if selection.is_unconstrained() {
            // Lifting a constraint that isn't there changes nothing.
            let all = self.lookup(set, &matcher, None);
            return DerivedSubsets {
                category_models: all.clone(),
                group_count_models: all.clone(),
                quota_type_models: all.clone(),
                endpoint_type_models: all.clone(),
                vendor_models: all.clone(),
                tag_models: all.clone(),
                filtered: all,
            };
        }

        DerivedSubsets {
            category_models: self.lookup(set, &matcher, Some(Dimension::Category)),
            group_count_models: self.lookup(set, &matcher, Some(Dimension::Group)),
            quota_type_models: self.lookup(set, &matcher, Some(Dimension::QuotaType)),
            endpoint_type_models: self.lookup(set, &matcher, Some(Dimension::EndpointType)),
            vendor_models: self.lookup(set, &matcher, Some(Dimension::Vendor)),
            tag_models: self.lookup(set, &matcher, Some(Dimension::Tag)),
            filtered: self.lookup(set, &matcher, None),
        }
    }

    /// A single view; `ignore = None` applies every constraint.
    pub fn subset<M: FilterableModel>(
        &self,
        set: &ModelSet<M>,
        selection: &FilterSelection,
        ignore: Option<Dimension>,
    ) -> SubsetIndices {
        self.lookup(set, &Matcher::new(selection), ignore)
    }

    fn lookup<M: FilterableModel>(
        &self,
        set: &ModelSet<M>,
        matcher: &Matcher<'_>,
        ignore: Option<Dimension>,
    ) -> SubsetIndices {
        let key = CacheKeyGenerator::subset_key(set.generation(), matcher.selection(), ignore);
        if let Some(hit) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let subset = matcher.subset(set.models(), ignore);
        self.cache.insert(key, subset.clone());
        subset
    }

    /// Drops every memoized subset, e.g. after the model list is replaced.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(1024)
    }
}
