use crate::config::UpstreamConfig;
use crate::error::{IsRetryable, PrismError};
use crate::utils::logging::with_pretty_json_debug;
use backon::{ExponentialBuilder, Retryable};
use prism_schema::PricingEnvelope;
use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

const PRISM_USER_AGENT: &str = concat!("prism/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client used for upstream pricing fetches.
pub fn build_client(cfg: &UpstreamConfig) -> Result<reqwest::Client, PrismError> {
    let mut headers = HeaderMap::new();

    let mut builder = reqwest::Client::builder()
        .user_agent(PRISM_USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(3))
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(cfg.timeout_secs.max(1)));

    if let Some(proxy_url) = cfg.proxy.as_ref() {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }

    if !cfg.enable_multiplexing {
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        builder = builder
            .http1_only()
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Duration::from_secs(0));
    } else {
        builder = builder.http2_adaptive_window(true);
    }

    Ok(builder.default_headers(headers).build()?)
}

/// Fetches and parses the pricing listing, retrying transport errors, 5xx and 429.
pub async fn fetch_envelope(
    client: &reqwest::Client,
    url: &Url,
    retry_max_times: usize,
) -> Result<PricingEnvelope, PrismError> {
    let policy = ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(200))
        .with_max_delay(Duration::from_secs(2))
        .with_max_times(retry_max_times)
        .with_jitter();

    let envelope = (|| fetch_once(client, url))
        .retry(policy)
        .when(|e: &PrismError| e.is_retryable())
        .notify(|err: &PrismError, dur: Duration| {
            warn!(
                url = %url,
                error = %err,
                retry_in_ms = dur.as_millis() as u64,
                "Pricing fetch failed, retrying"
            );
        })
        .await?;

    if !envelope.success {
        with_pretty_json_debug(&envelope, UPSTREAM_BODY_PREVIEW_CHARS, |body| {
            debug!(url = %url, body = %body, "Upstream pricing listing rejected");
        });
    }

    Ok(envelope)
}

async fn fetch_once(client: &reqwest::Client, url: &Url) -> Result<PricingEnvelope, PrismError> {
    let resp = client.get(url.clone()).send().await?;
    let status = resp.status();
    let bytes = resp.bytes().await?;

    if !status.is_success() {
        let raw_body = String::from_utf8_lossy(&bytes);
        let preview: String = raw_body.chars().take(UPSTREAM_BODY_PREVIEW_CHARS).collect();
        debug!(
            %status,
            url = %url,
            body = %preview,
            "Upstream pricing listing returned an error status"
        );
        return Err(PrismError::UpstreamStatus(status));
    }

    Ok(serde_json::from_slice(&bytes)?)
}

/// Reads a pricing listing saved to disk (same JSON shape as the upstream response).
pub async fn load_seed(path: &Path) -> Result<PricingEnvelope, PrismError> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[tokio::test]
    async fn seed_file_parses_into_envelope() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("prism-seed-{}-{}.json", std::process::id(), nanos));

        tokio::fs::write(
            &path,
            r#"{"success": true, "data": [{"model_name": "gpt-4o", "quota_type": 0}]}"#,
        )
        .await
        .expect("write seed file");

        let envelope = load_seed(&path).await.expect("load seed");
        assert!(envelope.success);
        assert_eq!(envelope.data[0].model_name, "gpt-4o");

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_seed_file_is_io_error() {
        let err = load_seed(Path::new("/nonexistent/prism/seed.json"))
            .await
            .expect_err("missing file must fail");
        assert!(matches!(err, PrismError::IoError(_)));
    }

    #[test]
    fn client_builds_from_default_config() {
        assert!(build_client(&UpstreamConfig::default()).is_ok());
    }
}
