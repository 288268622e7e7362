use crate::models::filter::ValueRange;
use crate::models::order::{CategoricalColumn, OrderRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 地点名 -> 经纬度。同一地点的坐标恒定，取首次出现的行即可
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationCoordinates(HashMap<String, (f64, f64)>);

impl LocationCoordinates {
    pub fn from_table(table: &[OrderRecord]) -> Self {
        let mut map = HashMap::new();
        for r in table {
            map.entry(r.location.clone()).or_insert((r.lat, r.lon));
        }
        Self(map)
    }

    pub fn get(&self, location: &str) -> Option<(f64, f64)> {
        self.0.get(location).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 基础表各列的观测值域，每次拉取后计算一次，供控件默认值与区间边界复用。
///
/// 类别列按首次出现顺序去重；空表时所有区间为 `None`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnDomains {
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub sellers: Vec<String>,
    pub locations: Vec<String>,
    pub ratings: Vec<String>,
    pub payment_types: Vec<String>,
    pub price: Option<ValueRange<Decimal>>,
    pub purchase_date: Option<ValueRange<NaiveDate>>,
    pub freight: Option<ValueRange<Decimal>>,
    pub installments: Option<ValueRange<u32>>,
    pub coordinates: LocationCoordinates,
}

impl ColumnDomains {
    pub fn from_table(table: &[OrderRecord]) -> Self {
        Self {
            products: distinct(table, CategoricalColumn::Product),
            categories: distinct(table, CategoricalColumn::Category),
            sellers: distinct(table, CategoricalColumn::Seller),
            locations: distinct(table, CategoricalColumn::Location),
            ratings: distinct(table, CategoricalColumn::Rating),
            payment_types: distinct(table, CategoricalColumn::PaymentType),
            price: bounds(table.iter().map(|r| r.price)),
            purchase_date: bounds(table.iter().map(|r| r.purchase_date)),
            freight: bounds(table.iter().map(|r| r.freight)),
            installments: bounds(table.iter().map(|r| r.installments)),
            coordinates: LocationCoordinates::from_table(table),
        }
    }
}

/// 某类别列的去重取值 (首次出现顺序)
pub fn distinct(table: &[OrderRecord], column: CategoricalColumn) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .iter()
        .map(|r| r.text(column))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

fn bounds<T, I>(values: I) -> Option<ValueRange<T>>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = T>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some(ValueRange::new(v, v)),
        Some(r) => Some(ValueRange::new(
            if v < r.low { v } else { r.low },
            if v > r.high { v } else { r.high },
        )),
    })
}
