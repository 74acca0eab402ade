use super::extract::PricingParams;
use crate::error::PrismError;
use crate::server::router::PrismState;
use axum::{Json, extract::State};
use prism_filter_core::build_facets;
use prism_schema::{CatalogMetaBody, FacetsBody, ModelPageBody, RefreshBody};
use tracing::{debug, info};

pub async fn list_models(
    State(state): State<PrismState>,
    PricingParams(query): PricingParams,
) -> Result<Json<ModelPageBody>, PrismError> {
    let (page, page_size) = query.page_window(&state.catalog_cfg)?;
    let view = state.catalog.query(query.selection()).await?;

    let filtered = &view.derived.filtered;
    let data = filtered
        .pick(view.snapshot.models.models())
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    Ok(Json(ModelPageBody {
        total: filtered.len(),
        page,
        page_size,
        data,
    }))
}

pub async fn facets(
    State(state): State<PrismState>,
    PricingParams(query): PricingParams,
) -> Result<Json<FacetsBody>, PrismError> {
    let selection = query.selection();
    let view = state.catalog.query(selection.clone()).await?;

    let snapshot = &view.snapshot;
    let facets = build_facets(
        snapshot.models.models(),
        &view.derived,
        &snapshot.usable_groups(),
    );

    Ok(Json(FacetsBody {
        total_models: snapshot.len(),
        filtered: view.derived.filtered.len(),
        selection,
        facets,
    }))
}

pub async fn meta(State(state): State<PrismState>) -> Result<Json<CatalogMetaBody>, PrismError> {
    let snapshot = state
        .catalog
        .snapshot()
        .await?
        .ok_or(PrismError::CatalogUnavailable)?;
    Ok(Json(snapshot.meta()))
}

pub async fn refresh(State(state): State<PrismState>) -> Result<Json<RefreshBody>, PrismError> {
    debug!("Manual pricing catalog refresh requested");
    let result = state.sync.run_once().await?;
    info!(
        model_count = result.model_count,
        duration_ms = result.duration_ms,
        "Manual pricing catalog refresh complete"
    );

    Ok(Json(RefreshBody {
        model_count: result.model_count,
        duration_ms: result.duration_ms,
    }))
}
