use crate::core::domains::ColumnDomains;
use crate::core::filter_engine::apply;
use crate::models::filter::FilterError;
use crate::models::order::{Column, OrderRecord};
use crate::models::request::RawDataRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// 过滤后的行与可见列
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTable {
    pub columns: Vec<Column>,
    pub rows: Vec<OrderRecord>,
}

/// 原始数据页
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataView {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
    pub row_count: usize,
    pub column_count: usize,
    pub domains: ColumnDomains,
}

pub fn filter_table(base: &[OrderRecord], request: &RawDataRequest) -> Result<FilteredTable, FilterError> {
    request.filters.validate()?;
    let rows = apply(base, &request.filters.predicate_set());
    Ok(FilteredTable {
        columns: request.visible_columns(),
        rows,
    })
}

pub fn build_raw_view(base: &[OrderRecord], request: &RawDataRequest) -> Result<RawDataView, FilterError> {
    let table = filter_table(base, request)?;
    let rows: Vec<Vec<Value>> = table
        .rows
        .iter()
        .map(|r| table.columns.iter().map(|c| r.cell_value(*c)).collect())
        .collect();

    info!(
        "原始数据页: {} 行 x {} 列 (基础表 {} 行)",
        rows.len(),
        table.columns.len(),
        base.len()
    );

    Ok(RawDataView {
        row_count: rows.len(),
        column_count: table.columns.len(),
        columns: table.columns,
        rows,
        domains: ColumnDomains::from_table(base),
    })
}
