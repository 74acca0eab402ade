use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog snapshot, sync and query settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Optional pricing listing (same JSON as the upstream response) loaded at startup,
    /// before the first sync completes.
    /// TOML: `catalog.seed_path`. Default: unset.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Seconds between background syncs; `0` syncs once at startup only.
    /// TOML: `catalog.sync_interval_secs`. Default: `300`.
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,

    /// Max memoized subsets kept by the filter engine.
    /// TOML: `catalog.cache_capacity`. Default: `1024`.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,

    /// TOML: `catalog.default_page_size`. Default: `20`.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Upper bound for a requested page size.
    /// TOML: `catalog.max_page_size`. Default: `100`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            sync_interval_secs: default_sync_interval_secs(),
            cache_capacity: default_cache_capacity(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_sync_interval_secs() -> u64 {
    300
}

fn default_cache_capacity() -> u64 {
    1024
}

fn default_page_size() -> usize {
    20
}

fn default_max_page_size() -> usize {
    100
}
