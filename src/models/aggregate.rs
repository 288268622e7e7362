use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 分组内的归约方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReduceOp {
    /// 对数值列求和
    Sum,
    /// 统计行数，与归约列的取值无关
    Count,
}

/// 按单个类别列分组后的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: String,
    pub value: Decimal,
}

/// 按地点分组，附带该地点的经纬度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAggregate {
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    pub value: Decimal,
}

/// 按自然月分组。`month` 为英文月份名，同名月份靠 `year` 区分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// `YYYY-MM`
    pub period: String,
    pub year: i32,
    pub month: String,
    pub value: Decimal,
}

/// 卖家维度同时给出收入与销量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerAggregate {
    pub seller: String,
    pub revenue: Decimal,
    pub sales: u64,
}

/// 看板顶部的指标卡
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: Decimal,
    pub display: String,
}
