//! Refreshing the catalog from the upstream pricing listing.
//!
//! A failed sync never clears the current snapshot; the previous listing keeps
//! serving until a later run succeeds.

use super::{CatalogHandle, CatalogSnapshot, loader};
use crate::config::UpstreamConfig;
use crate::error::PrismError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Results from a single sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncRunResult {
    /// Number of models in the catalog after sync.
    pub model_count: usize,
    /// Duration of the sync in milliseconds.
    pub duration_ms: u64,
}

#[derive(Clone)]
pub struct CatalogSync {
    client: reqwest::Client,
    upstream: Arc<UpstreamConfig>,
    catalog: CatalogHandle,
}

impl CatalogSync {
    pub fn new(client: reqwest::Client, upstream: Arc<UpstreamConfig>, catalog: CatalogHandle) -> Self {
        Self {
            client,
            upstream,
            catalog,
        }
    }

    /// Fetches, formats and installs one listing.
    pub async fn run_once(&self) -> Result<SyncRunResult, PrismError> {
        let start = Instant::now();
        let url = self.upstream.pricing_url()?;

        let envelope =
            loader::fetch_envelope(&self.client, &url, self.upstream.retry_max_times).await?;
        let snapshot = CatalogSnapshot::from_envelope(envelope)?;
        let model_count = self.catalog.replace(snapshot).await?;

        Ok(SyncRunResult {
            model_count,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Syncs immediately, then every `interval_secs` (never again when `0`).
    pub async fn run_periodic(self, interval_secs: u64) {
        info!(
            sync_interval_secs = interval_secs,
            base_url = %self.upstream.base_url,
            "Starting pricing catalog sync worker"
        );

        match self.run_once().await {
            Ok(result) => info!(
                model_count = result.model_count,
                duration_ms = result.duration_ms,
                "Initial pricing catalog sync complete"
            ),
            Err(e) => warn!(error = %e, "Initial pricing catalog sync failed"),
        }

        if interval_secs == 0 {
            return;
        }

        let interval = Duration::from_secs(interval_secs);
        loop {
            tokio::time::sleep(interval).await;

            match self.run_once().await {
                Ok(result) => debug!(
                    model_count = result.model_count,
                    duration_ms = result.duration_ms,
                    "Pricing catalog sync complete"
                ),
                Err(e) => warn!(error = %e, "Pricing catalog sync failed, keeping existing data"),
            }
        }
    }
}
