use crate::api::error::ApiError;
use crate::ax_state::AppState;
use crate::core::domains::ColumnDomains;
use crate::infra::export::{export_filename, TableView};
use crate::models::filter::FetchParams;
use crate::models::request::{ExportRequest, RawDataRequest};
use crate::service::raw_data::{build_raw_view, filter_table, RawDataView};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

/// 原始数据页的控件候选值与区间边界 (全量基础表)
pub async fn domains(State(state): State<Arc<AppState>>) -> Result<Json<ColumnDomains>, ApiError> {
    let base = state.client.fetch(&FetchParams::default()).await?;
    Ok(Json(ColumnDomains::from_table(&base)))
}

pub async fn raw_data(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RawDataRequest>,
) -> Result<Json<RawDataView>, ApiError> {
    request.filters.validate()?;
    let base = state.client.fetch(&FetchParams::default()).await?;
    Ok(Json(build_raw_view(&base, &request)?))
}

/// 导出当前过滤结果为 CSV 附件
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    request.view.filters.validate()?;
    let base = state.client.fetch(&FetchParams::default()).await?;
    let table = filter_table(&base, &request.view)?;
    let bytes = state
        .csv_cache
        .get_or_encode(&TableView::new(&table.columns, &table.rows))?;

    let filename = export_filename(request.filename.as_deref());
    info!("CSV 导出: 文件={}, 行数={}", filename, table.rows.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes.to_vec(),
    )
        .into_response())
}
