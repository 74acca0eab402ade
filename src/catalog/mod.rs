//! Pricing catalog: snapshot building, loading, ownership and sync.
//!
//! Layout:
//! - `format.rs`: tier/display-name/vendor enrichment and ordering
//! - `loader.rs`: upstream fetch (with retry) and seed file loading
//! - `actor.rs`: the actor owning the current snapshot and the filter engine
//! - `sync.rs`: one-shot and periodic refresh from upstream

pub mod actor;
pub mod format;
pub mod loader;
pub mod sync;

pub use actor::{CatalogHandle, CatalogView, spawn};
pub use format::{ModelCategory, format_models};
pub use sync::{CatalogSync, SyncRunResult};

use crate::error::PrismError;
use chrono::{DateTime, Utc};
use prism_filter_core::ModelSet;
use prism_schema::{CatalogMetaBody, EndpointInfo, PricingEnvelope, PricingModel, PricingVendor};
use std::collections::BTreeMap;

/// One immutable, formatted copy of the upstream pricing listing.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub models: ModelSet<PricingModel>,
    pub vendors: Vec<PricingVendor>,
    pub group_ratio: BTreeMap<String, f64>,
    pub usable_group: BTreeMap<String, String>,
    pub supported_endpoint: BTreeMap<String, EndpointInfo>,
    pub auto_groups: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Formats a successful listing into a snapshot.
    pub fn from_envelope(envelope: PricingEnvelope) -> Result<Self, PrismError> {
        if !envelope.success {
            return Err(PrismError::UpstreamRejected(envelope.message));
        }

        let models = format_models(envelope.data, &envelope.vendors);
        Ok(Self {
            models: ModelSet::new(models),
            vendors: envelope.vendors,
            group_ratio: envelope.group_ratio,
            usable_group: envelope.usable_group,
            supported_endpoint: envelope.supported_endpoint,
            auto_groups: envelope.auto_groups,
            fetched_at: Utc::now(),
        })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Group facet candidates: the groups upstream says the caller may use.
    pub fn usable_groups(&self) -> Vec<String> {
        self.usable_group.keys().cloned().collect()
    }

    pub fn meta(&self) -> CatalogMetaBody {
        CatalogMetaBody {
            model_count: self.len(),
            fetched_at: self.fetched_at,
            vendors: self.vendors.clone(),
            group_ratio: self.group_ratio.clone(),
            usable_group: self.usable_group.clone(),
            supported_endpoint: self.supported_endpoint.clone(),
            auto_groups: self.auto_groups.clone(),
        }
    }
}
