use crate::core::domains::LocationCoordinates;
use crate::models::aggregate::{
    AggregateRow, LocationAggregate, MonthlyAggregate, ReduceOp, SellerAggregate,
};
use crate::models::order::{CategoricalColumn, NumericColumn, OrderRecord};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

struct Group {
    total: Decimal,
    rows: u64,
}

impl Group {
    fn value(&self, op: ReduceOp) -> Decimal {
        match op {
            ReduceOp::Sum => self.total,
            ReduceOp::Count => Decimal::from(self.rows),
        }
    }
}

// 一个键只有在至少匹配一行时才会出现，不做补零
fn reduce_groups<K, F>(table: &[OrderRecord], key_of: F, column: NumericColumn) -> BTreeMap<K, Group>
where
    K: Ord,
    F: Fn(&OrderRecord) -> K,
{
    let mut groups: BTreeMap<K, Group> = BTreeMap::new();
    for r in table {
        let g = groups.entry(key_of(r)).or_insert(Group {
            total: Decimal::ZERO,
            rows: 0,
        });
        g.total += r.number(column);
        g.rows += 1;
    }
    groups
}

// 值降序，值相同时按键升序，保证结果稳定
fn by_value_desc(a: (&str, Decimal), b: (&str, Decimal)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// 按类别列分组并归约，结果按归约值降序 (Top-N 语义依赖此顺序)
pub fn aggregate(
    table: &[OrderRecord],
    group_by: CategoricalColumn,
    reduce_column: NumericColumn,
    op: ReduceOp,
) -> Vec<AggregateRow> {
    let mut rows: Vec<AggregateRow> = reduce_groups(table, |r| r.text(group_by).to_string(), reduce_column)
        .into_iter()
        .map(|(key, g)| AggregateRow {
            value: g.value(op),
            key,
        })
        .collect();
    rows.sort_by(|a, b| by_value_desc((a.key.as_str(), a.value), (b.key.as_str(), b.value)));
    rows
}

/// 按地点分组并附上经纬度。
///
/// 坐标取自基础表的地点映射；映射里缺失的地点退回到该组第一行的坐标。
pub fn by_location(
    table: &[OrderRecord],
    coordinates: &LocationCoordinates,
    op: ReduceOp,
) -> Vec<LocationAggregate> {
    let mut first_seen: HashMap<&str, (f64, f64)> = HashMap::new();
    for r in table {
        first_seen.entry(r.location.as_str()).or_insert((r.lat, r.lon));
    }

    let mut rows: Vec<LocationAggregate> =
        reduce_groups(table, |r| r.location.clone(), NumericColumn::Price)
            .into_iter()
            .map(|(location, g)| {
                let (lat, lon) = coordinates
                    .get(&location)
                    .or_else(|| first_seen.get(location.as_str()).copied())
                    .unwrap_or_default();
                LocationAggregate {
                    value: g.value(op),
                    location,
                    lat,
                    lon,
                }
            })
            .collect();
    rows.sort_by(|a, b| by_value_desc((a.location.as_str(), a.value), (b.location.as_str(), b.value)));
    rows
}

/// 按自然月分组 (丢弃日)，保持时间顺序而非数值顺序
pub fn by_month(table: &[OrderRecord], op: ReduceOp) -> Vec<MonthlyAggregate> {
    reduce_groups(
        table,
        |r| (r.purchase_date.year(), r.purchase_date.month()),
        NumericColumn::Price,
    )
    .into_iter()
    .map(|((year, month), g)| MonthlyAggregate {
        period: format!("{:04}-{:02}", year, month),
        year,
        month: month_name(year, month),
        value: g.value(op),
    })
    .collect()
}

fn month_name(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_default()
}

/// 每个卖家的收入与销量，按卖家名排序
pub fn by_seller(table: &[OrderRecord]) -> Vec<SellerAggregate> {
    reduce_groups(table, |r| r.seller.clone(), NumericColumn::Price)
        .into_iter()
        .map(|(seller, g)| SellerAggregate {
            seller,
            revenue: g.total,
            sales: g.rows,
        })
        .collect()
}

/// 收入最高的 n 个卖家
pub fn top_sellers_by_revenue(sellers: &[SellerAggregate], n: usize) -> Vec<SellerAggregate> {
    let mut sorted = sellers.to_vec();
    sorted.sort_by(|a, b| by_value_desc((a.seller.as_str(), a.revenue), (b.seller.as_str(), b.revenue)));
    sorted.truncate(n);
    sorted
}

/// 销量最高的 n 个卖家
pub fn top_sellers_by_count(sellers: &[SellerAggregate], n: usize) -> Vec<SellerAggregate> {
    let mut sorted = sellers.to_vec();
    sorted.sort_by(|a, b| b.sales.cmp(&a.sales).then_with(|| a.seller.cmp(&b.seller)));
    sorted.truncate(n);
    sorted
}

/// 降序表的前 n 行
pub fn top_n<T: Clone>(rows: &[T], n: usize) -> Vec<T> {
    rows.iter().take(n).cloned().collect()
}

/// 某数值列的总和；空表为零
pub fn total(table: &[OrderRecord], column: NumericColumn) -> Decimal {
    table.iter().map(|r| r.number(column)).sum()
}
