use crate::models::order::OrderRecord;
use crate::models::predicate::{Predicate, PredicateSet};
use tracing::debug;

impl Predicate {
    pub fn matches(&self, record: &OrderRecord) -> bool {
        match self {
            Predicate::Membership { column, allowed } => allowed.contains(record.text(*column)),
            Predicate::NumericRange { column, range } => range.contains(&record.number(*column)),
            Predicate::DateRange(range) => range.contains(&record.purchase_date),
        }
    }
}

impl PredicateSet {
    /// 所有约束同时满足
    pub fn matches(&self, record: &OrderRecord) -> bool {
        self.iter().all(|p| p.matches(record))
    }
}

/// 返回满足约束集合的行子集，保持原始行序，不修改输入表
pub fn apply(table: &[OrderRecord], predicates: &PredicateSet) -> Vec<OrderRecord> {
    if predicates.is_empty() {
        return table.to_vec();
    }
    let rows: Vec<OrderRecord> = table
        .iter()
        .filter(|r| predicates.matches(r))
        .cloned()
        .collect();
    debug!(
        "过滤完成: 约束数={}, 输入行数={}, 输出行数={}",
        predicates.len(),
        table.len(),
        rows.len()
    );
    rows
}
