use crate::api::error::ApiError;
use crate::ax_state::AppState;
use crate::models::filter::DashboardFilters;
use crate::service::dashboard::{build_dashboard, DashboardView};
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

/// 主看板：按地区 / 年份拉取，再按卖家过滤并汇总
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Json(filters): Json<DashboardFilters>,
) -> Result<Json<DashboardView>, ApiError> {
    filters.validate()?;
    info!(
        "看板请求: region={}, year={:?}, sellers={}",
        filters.region.label(),
        filters.fetch_params().year,
        filters.sellers.len()
    );

    let base = state.client.fetch(&filters.fetch_params()).await?;
    Ok(Json(build_dashboard(&base, &filters)))
}
