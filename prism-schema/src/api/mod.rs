use crate::pricing::{EndpointInfo, PricingModel, PricingVendor};
use chrono::{DateTime, Utc};
use prism_filter_core::{FacetSet, FilterSelection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One page of the fully filtered model list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelPageBody {
    /// Size of the filtered list before pagination.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub data: Vec<PricingModel>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FacetsBody {
    pub total_models: usize,
    /// Size of the fully filtered list.
    pub filtered: usize,
    pub selection: FilterSelection,
    pub facets: FacetSet,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogMetaBody {
    pub model_count: usize,
    pub fetched_at: DateTime<Utc>,
    pub vendors: Vec<PricingVendor>,
    pub group_ratio: BTreeMap<String, f64>,
    pub usable_group: BTreeMap<String, String>,
    pub supported_endpoint: BTreeMap<String, EndpointInfo>,
    pub auto_groups: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct RefreshBody {
    pub model_count: usize,
    pub duration_ms: u64,
}
