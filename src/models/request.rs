use crate::models::filter::RawDataFilters;
use crate::models::order::Column;
use serde::{Deserialize, Serialize};

/// 原始数据页请求：过滤条件 + 可见列
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDataRequest {
    pub filters: RawDataFilters,
    /// 缺省为全部列
    pub columns: Option<Vec<Column>>,
}

impl RawDataRequest {
    pub fn visible_columns(&self) -> Vec<Column> {
        match &self.columns {
            Some(columns) => columns.clone(),
            None => Column::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportRequest {
    #[serde(flatten)]
    pub view: RawDataRequest,
    pub filename: Option<String>,
}
