use serde::{Deserialize, Serialize};
use url::Url;

/// Where the pricing catalog comes from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Gateway base URL.
    /// TOML: `upstream.base_url`. Default: `http://127.0.0.1:3000`.
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Path of the pricing listing, relative to `base_url` (a leading `/` is ignored).
    /// TOML: `upstream.pricing_path`. Default: `/api/pricing`.
    #[serde(default = "default_pricing_path")]
    pub pricing_path: String,

    /// Optional upstream HTTP proxy. If set, used for reqwest clients.
    /// TOML: `upstream.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Allow HTTP/2 multiplexing for reqwest clients; disabled forces HTTP/1.
    /// TOML: `upstream.enable_multiplexing`. Default: `false`.
    #[serde(default)]
    pub enable_multiplexing: bool,

    /// Max retry attempts for the pricing fetch.
    /// TOML: `upstream.retry_max_times`. Default: `3`.
    #[serde(default = "default_retry_max_times")]
    pub retry_max_times: usize,

    /// Per-request timeout.
    /// TOML: `upstream.timeout_secs`. Default: `30`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            pricing_path: default_pricing_path(),
            proxy: None,
            enable_multiplexing: false,
            retry_max_times: default_retry_max_times(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    /// `pricing_path` is resolved under the base URL's path, so a gateway
    /// mounted at `https://host/gateway` keeps its `/gateway` prefix.
    pub fn pricing_url(&self) -> Result<Url, url::ParseError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        base.join(self.pricing_path.trim_start_matches('/'))
    }
}

fn default_base_url() -> Url {
    Url::parse("http://127.0.0.1:3000").expect("valid default upstream base URL")
}

fn default_pricing_path() -> String {
    "/api/pricing".to_string()
}

fn default_retry_max_times() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    30
}
