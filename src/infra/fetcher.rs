use crate::models::filter::FetchParams;
use crate::models::order::{parse_purchase_date, OrderRecord, RawOrderRecord};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// 上游拉取失败。没有重试，由调用方决定放弃本轮渲染
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build http client: {reason}")]
    Client { reason: String },

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("upstream responded with status {status}")]
    Http { status: u16 },

    #[error("response body is not a JSON array: {reason}")]
    Decode { reason: String },

    #[error("record {index} does not match the order schema: {reason}")]
    Schema { index: usize, reason: String },

    #[error("record {index} has an invalid purchase date {value:?}, expected DD/MM/YYYY")]
    InvalidDate { index: usize, value: String },
}

/// 销售数据接口客户端
#[derive(Debug, Clone)]
pub struct SalesClient {
    http: reqwest::Client,
    base_url: String,
}

impl SalesClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| FetchError::Client {
                reason: e.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 单次 GET，成功返回基础表
    #[instrument(skip(self, params), fields(region = ?params.region, year = ?params.year))]
    pub async fn fetch(&self, params: &FetchParams) -> Result<Vec<OrderRecord>, FetchError> {
        let started = Instant::now();

        let response = self
            .http
            .get(&self.base_url)
            .query(&params.query_pairs())
            .send()
            .await
            .map_err(|e| FetchError::Network {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("上游接口返回非成功状态: {}", status);
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Network {
            reason: format!("failed to read response body: {e}"),
        })?;

        let records = decode_orders(&body)?;
        info!(
            "订单拉取完成: 行数={}, 耗时={}ms",
            records.len(),
            started.elapsed().as_millis()
        );
        Ok(records)
    }
}

/// 解析响应体。任何一条记录缺字段或日期非法都让整批失败，不静默丢弃
pub fn decode_orders(body: &[u8]) -> Result<Vec<OrderRecord>, FetchError> {
    let values: Vec<Value> = serde_json::from_slice(body).map_err(|e| FetchError::Decode {
        reason: e.to_string(),
    })?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let raw: RawOrderRecord = serde_json::from_value(value).map_err(|e| {
                warn!("记录 {} 结构不符: {}", index, e);
                FetchError::Schema {
                    index,
                    reason: e.to_string(),
                }
            })?;
            let date = parse_purchase_date(&raw.purchase_date).map_err(|_| {
                warn!("记录 {} 日期非法: {}", index, raw.purchase_date);
                FetchError::InvalidDate {
                    index,
                    value: raw.purchase_date.clone(),
                }
            })?;
            Ok(raw.into_record(date))
        })
        .collect()
}
