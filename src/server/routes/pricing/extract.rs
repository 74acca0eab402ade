use crate::config::CatalogConfig;
use crate::error::PrismError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use prism_filter_core::{FilterSelection, Selector};
use serde::Deserialize;
use tracing::debug;

/// Raw selectors and paging as they arrive in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PricingQuery {
    pub category: Option<String>,
    pub group: Option<String>,
    pub quota_type: Option<String>,
    pub endpoint_type: Option<String>,
    pub vendor: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl PricingQuery {
    /// Missing and empty selectors both mean `all`.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            category: Selector::from(self.category.clone()),
            group: Selector::from(self.group.clone()),
            quota_type: Selector::from(self.quota_type.clone()),
            endpoint_type: Selector::from(self.endpoint_type.clone()),
            vendor: Selector::from(self.vendor.clone()),
            tag: Selector::from(self.tag.clone()),
            search: self.search.clone().unwrap_or_default(),
        }
    }

    /// 1-based page and effective page size, capped by `max_page_size`.
    pub fn page_window(&self, cfg: &CatalogConfig) -> Result<(usize, usize), PrismError> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(PrismError::InvalidQuery("page must be >= 1".to_string()));
        }

        let page_size = match self.page_size {
            Some(0) => {
                return Err(PrismError::InvalidQuery(
                    "page_size must be >= 1".to_string(),
                ));
            }
            Some(n) => n,
            None => cfg.default_page_size,
        };

        Ok((page, page_size.clamp(1, cfg.max_page_size.max(1))))
    }
}

/// `Query<PricingQuery>` with rejections reported as `INVALID_QUERY`.
pub struct PricingParams(pub PricingQuery);

impl<S> FromRequestParts<S> for PricingParams
where
    S: Send + Sync,
{
    type Rejection = PrismError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PricingQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection, "Rejected pricing query string");
                PrismError::InvalidQuery(rejection.body_text())
            })?;
        Ok(PricingParams(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_missing_selectors_mean_all() {
        let query = PricingQuery {
            vendor: Some(String::new()),
            tag: Some("all".to_string()),
            group: Some("vip".to_string()),
            ..Default::default()
        };
        let selection = query.selection();
        assert!(selection.vendor.is_all());
        assert!(selection.tag.is_all());
        assert!(selection.category.is_all());
        assert_eq!(selection.group.value(), Some("vip"));
        assert!(selection.search.is_empty());
    }

    #[test]
    fn page_window_defaults_and_caps() {
        let cfg = CatalogConfig::default();

        let defaults = PricingQuery::default().page_window(&cfg).expect("defaults");
        assert_eq!(defaults, (1, cfg.default_page_size));

        let capped = PricingQuery {
            page: Some(3),
            page_size: Some(10_000),
            ..Default::default()
        }
        .page_window(&cfg)
        .expect("capped");
        assert_eq!(capped, (3, cfg.max_page_size));
    }

    #[test]
    fn zero_page_is_rejected() {
        let cfg = CatalogConfig::default();
        let err = PricingQuery {
            page: Some(0),
            ..Default::default()
        }
        .page_window(&cfg)
        .expect_err("page 0 must fail");
        assert!(matches!(err, PrismError::InvalidQuery(_)));
    }
}
