use crate::models::order::{CategoricalColumn, NumericColumn};
use crate::models::predicate::{Predicate, PredicateSet};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// 年份滑块的可选范围
pub const YEAR_RANGE: RangeInclusive<i32> = 2020..=2023;
/// "Top N 卖家" 输入框的取值范围
pub const TOP_SELLERS_RANGE: RangeInclusive<usize> = 2..=10;
pub const DEFAULT_TOP_SELLERS: usize = 5;
/// 州排行柱状图展示的条数
pub const TOP_LOCATIONS: usize = 5;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FilterError {
    #[error("year {0} is outside the supported range 2020..=2023")]
    YearOutOfRange(i32),

    #[error("a year must be selected when the all-period toggle is off")]
    MissingYear,

    #[error("top sellers count {0} is outside the supported range 2..=10")]
    TopSellersOutOfRange(usize),

    #[error("inverted range on {column}: low is greater than high")]
    InvertedRange { column: &'static str },
}

/// 闭区间
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub low: T,
    pub high: T,
}

impl<T: PartialOrd> ValueRange<T> {
    pub fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.low <= *value && *value <= self.high
    }

    fn check(&self, column: &'static str) -> Result<(), FilterError> {
        if self.low > self.high {
            return Err(FilterError::InvertedRange { column });
        }
        Ok(())
    }
}

/// 地区下拉框。`Brasil` 表示全国，不向上游传地区参数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    #[default]
    Brasil,
    #[serde(rename = "Centro-Oeste")]
    CentroOeste,
    Nordeste,
    Norte,
    Sudeste,
    Sul,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Brasil,
        Region::CentroOeste,
        Region::Nordeste,
        Region::Norte,
        Region::Sudeste,
        Region::Sul,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Region::Brasil => "Brasil",
            Region::CentroOeste => "Centro-Oeste",
            Region::Nordeste => "Nordeste",
            Region::Norte => "Norte",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }

    pub fn as_filter(self) -> Option<String> {
        match self {
            Region::Brasil => None,
            other => Some(other.label().to_string()),
        }
    }
}

/// 发往上游接口的查询条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchParams {
    pub region: Option<String>,
    pub year: Option<i32>,
}

impl FetchParams {
    /// 地区转小写后传输；未设置的参数整个省略，而不是传空值
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(region) = self.region.as_deref().filter(|r| !r.trim().is_empty()) {
            pairs.push(("região", region.trim().to_lowercase()));
        }
        if let Some(year) = self.year {
            pairs.push(("ano", year.to_string()));
        }
        pairs
    }
}

/// 主看板的控件快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardFilters {
    pub region: Region,
    pub all_years: bool,
    pub year: Option<i32>,
    /// 为空表示不按卖家过滤
    pub sellers: Vec<String>,
    pub top_sellers: usize,
}

impl Default for DashboardFilters {
    fn default() -> Self {
        Self {
            region: Region::Brasil,
            all_years: true,
            year: None,
            sellers: Vec::new(),
            top_sellers: DEFAULT_TOP_SELLERS,
        }
    }
}

impl DashboardFilters {
    pub fn validate(&self) -> Result<(), FilterError> {
        if !self.all_years {
            match self.year {
                None => return Err(FilterError::MissingYear),
                Some(y) if !YEAR_RANGE.contains(&y) => return Err(FilterError::YearOutOfRange(y)),
                Some(_) => {}
            }
        }
        if !TOP_SELLERS_RANGE.contains(&self.top_sellers) {
            return Err(FilterError::TopSellersOutOfRange(self.top_sellers));
        }
        Ok(())
    }

    pub fn fetch_params(&self) -> FetchParams {
        FetchParams {
            region: self.region.as_filter(),
            year: if self.all_years { None } else { self.year },
        }
    }

    pub fn predicate_set(&self) -> PredicateSet {
        let mut set = PredicateSet::new();
        if !self.sellers.is_empty() {
            set.push(Predicate::membership(
                CategoricalColumn::Seller,
                self.sellers.iter().cloned(),
            ));
        }
        set
    }
}

/// 原始数据页的控件快照。
///
/// 字段为 `None` 时取该列的完整值域 (不施加约束)；列表存在但为空时排除所有行。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDataFilters {
    pub products: Option<Vec<String>>,
    pub price: Option<ValueRange<Decimal>>,
    pub purchase_date: Option<ValueRange<NaiveDate>>,
    pub categories: Option<Vec<String>>,
    pub freight: Option<ValueRange<Decimal>>,
    pub sellers: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub ratings: Option<Vec<String>>,
    pub payment_types: Option<Vec<String>>,
    pub installments: Option<ValueRange<u32>>,
}

impl RawDataFilters {
    pub fn validate(&self) -> Result<(), FilterError> {
        if let Some(r) = &self.price {
            r.check("price")?;
        }
        if let Some(r) = &self.purchase_date {
            r.check("purchase_date")?;
        }
        if let Some(r) = &self.freight {
            r.check("freight")?;
        }
        if let Some(r) = &self.installments {
            r.check("installments")?;
        }
        Ok(())
    }

    /// 约束顺序与原始数据页的查询条件一致
    pub fn predicate_set(&self) -> PredicateSet {
        let mut set = PredicateSet::new();
        push_membership(&mut set, CategoricalColumn::Product, &self.products);
        if let Some(r) = self.price {
            set.push(Predicate::numeric_range(NumericColumn::Price, r.low, r.high));
        }
        if let Some(r) = self.purchase_date {
            set.push(Predicate::date_range(r.low, r.high));
        }
        push_membership(&mut set, CategoricalColumn::Category, &self.categories);
        if let Some(r) = self.freight {
            set.push(Predicate::numeric_range(NumericColumn::Freight, r.low, r.high));
        }
        push_membership(&mut set, CategoricalColumn::Seller, &self.sellers);
        push_membership(&mut set, CategoricalColumn::Location, &self.locations);
        push_membership(&mut set, CategoricalColumn::Rating, &self.ratings);
        push_membership(&mut set, CategoricalColumn::PaymentType, &self.payment_types);
        if let Some(r) = self.installments {
            set.push(Predicate::numeric_range(
                NumericColumn::Installments,
                Decimal::from(r.low),
                Decimal::from(r.high),
            ));
        }
        set
    }
}

fn push_membership(set: &mut PredicateSet, column: CategoricalColumn, allowed: &Option<Vec<String>>) {
    if let Some(allowed) = allowed {
        set.push(Predicate::membership(column, allowed.iter().cloned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brasil_sends_no_region() {
        let filters = DashboardFilters::default();
        assert!(filters.fetch_params().query_pairs().is_empty());
    }

    #[test]
    fn region_is_lowercased_and_year_kept() {
        let params = FetchParams {
            region: Some("Centro-Oeste".into()),
            year: Some(2022),
        };
        assert_eq!(
            params.query_pairs(),
            vec![("região", "centro-oeste".to_string()), ("ano", "2022".to_string())]
        );
    }

    #[test]
    fn all_years_toggle_drops_year() {
        let filters = DashboardFilters {
            region: Region::Sul,
            all_years: true,
            year: Some(2021),
            ..Default::default()
        };
        let params = filters.fetch_params();
        assert_eq!(params.year, None);
        assert_eq!(params.region.as_deref(), Some("Sul"));
    }

    #[test]
    fn validation_bounds_year_and_top_sellers() {
        let mut filters = DashboardFilters {
            all_years: false,
            ..Default::default()
        };
        assert_eq!(filters.validate(), Err(FilterError::MissingYear));
        filters.year = Some(2019);
        assert_eq!(filters.validate(), Err(FilterError::YearOutOfRange(2019)));
        filters.year = Some(2023);
        assert!(filters.validate().is_ok());
        filters.top_sellers = 11;
        assert_eq!(filters.validate(), Err(FilterError::TopSellersOutOfRange(11)));
    }

    #[test]
    fn empty_seller_selection_is_no_filter() {
        assert!(DashboardFilters::default().predicate_set().is_empty());
    }

    #[test]
    fn raw_filters_only_constrain_present_columns() {
        let filters = RawDataFilters {
            sellers: Some(vec![]),
            installments: Some(ValueRange::new(1, 3)),
            ..Default::default()
        };
        assert_eq!(filters.predicate_set().len(), 2);
        assert!(RawDataFilters::default().predicate_set().is_empty());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let filters = RawDataFilters {
            freight: Some(ValueRange::new(Decimal::from(10), Decimal::from(1))),
            ..Default::default()
        };
        assert_eq!(
            filters.validate(),
            Err(FilterError::InvertedRange { column: "freight" })
        );
    }

    #[test]
    fn region_labels_deserialize() {
        let region: Region = serde_json::from_str("\"Centro-Oeste\"").unwrap();
        assert_eq!(region, Region::CentroOeste);
        assert_eq!(Region::ALL.len(), 6);
    }
}
