use crate::models::filter::ValueRange;
use crate::models::order::{CategoricalColumn, NumericColumn};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// 单列约束
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// 列值必须属于允许集合；空集合排除所有行
    Membership {
        column: CategoricalColumn,
        allowed: HashSet<String>,
    },
    /// 闭区间 `low <= value <= high`
    NumericRange {
        column: NumericColumn,
        range: ValueRange<Decimal>,
    },
    /// 购买日期闭区间
    DateRange(ValueRange<NaiveDate>),
}

impl Predicate {
    pub fn membership<I, S>(column: CategoricalColumn, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::Membership {
            column,
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn numeric_range(column: NumericColumn, low: Decimal, high: Decimal) -> Self {
        Predicate::NumericRange {
            column,
            range: ValueRange::new(low, high),
        }
    }

    pub fn date_range(low: NaiveDate, high: NaiveDate) -> Self {
        Predicate::DateRange(ValueRange::new(low, high))
    }
}

/// 有序的约束集合，所有约束按逻辑与组合。未出现的列不施加任何限制
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }
}
