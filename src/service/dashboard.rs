use crate::core::aggregator::{
    aggregate, by_location, by_month, by_seller, top_n, top_sellers_by_count,
    top_sellers_by_revenue, total,
};
use crate::core::domains::{distinct, LocationCoordinates};
use crate::core::filter_engine::apply;
use crate::core::format::format_decimal;
use crate::models::aggregate::{
    AggregateRow, LocationAggregate, Metric, MonthlyAggregate, ReduceOp, SellerAggregate,
};
use crate::models::filter::{DashboardFilters, TOP_LOCATIONS};
use crate::models::order::{CategoricalColumn, NumericColumn, OrderRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const REVENUE_PREFIX: &str = "R$";

/// 收入与销量两张指标卡，三个页签共用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub revenue: Metric,
    pub sales: Metric,
}

impl Metrics {
    pub fn from_rows(rows: &[OrderRecord]) -> Self {
        let revenue = total(rows, NumericColumn::Price);
        let sales = Decimal::from(rows.len() as u64);
        Self {
            revenue: Metric {
                label: "Receita".to_string(),
                display: format_decimal(revenue, REVENUE_PREFIX),
                value: revenue,
            },
            sales: Metric {
                label: "Quantidade de Vendas".to_string(),
                display: format_decimal(sales, ""),
                value: sales,
            },
        }
    }
}

/// 按地点 / 月份 / 类别的一组汇总表 (收入页签为求和，销量页签为计数)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownTab {
    pub by_location: Vec<LocationAggregate>,
    pub top_locations: Vec<LocationAggregate>,
    pub monthly: Vec<MonthlyAggregate>,
    pub by_category: Vec<AggregateRow>,
}

impl BreakdownTab {
    fn build(rows: &[OrderRecord], coordinates: &LocationCoordinates, op: ReduceOp) -> Self {
        let locations = by_location(rows, coordinates, op);
        Self {
            top_locations: top_n(&locations, TOP_LOCATIONS),
            by_location: locations,
            monthly: by_month(rows, op),
            by_category: aggregate(rows, CategoricalColumn::Category, NumericColumn::Price, op),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellersTab {
    pub top: usize,
    pub sellers: Vec<SellerAggregate>,
    pub top_by_revenue: Vec<SellerAggregate>,
    pub top_by_sales: Vec<SellerAggregate>,
}

/// 主看板的全部派生表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub metrics: Metrics,
    pub revenue: BreakdownTab,
    pub sales: BreakdownTab,
    pub sellers: SellersTab,
    /// 卖家下拉框的候选值 (卖家过滤之前)
    pub seller_options: Vec<String>,
}

/// 基于一次拉取的基础表，按控件快照重算全部视图。
///
/// 坐标映射取自过滤前的基础表；卖家过滤只影响汇总，不影响候选项。
pub fn build_dashboard(base: &[OrderRecord], filters: &DashboardFilters) -> DashboardView {
    let coordinates = LocationCoordinates::from_table(base);
    let seller_options = distinct(base, CategoricalColumn::Seller);
    let rows = apply(base, &filters.predicate_set());

    let sellers = by_seller(&rows);
    let view = DashboardView {
        metrics: Metrics::from_rows(&rows),
        revenue: BreakdownTab::build(&rows, &coordinates, ReduceOp::Sum),
        sales: BreakdownTab::build(&rows, &coordinates, ReduceOp::Count),
        sellers: SellersTab {
            top: filters.top_sellers,
            top_by_revenue: top_sellers_by_revenue(&sellers, filters.top_sellers),
            top_by_sales: top_sellers_by_count(&sellers, filters.top_sellers),
            sellers,
        },
        seller_options,
    };
    info!(
        "看板计算完成: 基础行数={}, 过滤后行数={}, 地点数={}",
        base.len(),
        rows.len(),
        view.revenue.by_location.len()
    );
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn order(seller: &str, location: &str, category: &str, price: i64, ymd: (i32, u32, u32)) -> OrderRecord {
        OrderRecord {
            product: "Smart TV".into(),
            category: category.into(),
            price: Decimal::from(price),
            purchase_date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            freight: Decimal::from(20),
            seller: seller.into(),
            location: location.into(),
            lat: match location {
                "SP" => -22.19,
                "RJ" => -22.25,
                _ => -13.29,
            },
            lon: match location {
                "SP" => -48.79,
                "RJ" => -42.66,
                _ => -41.71,
            },
            rating: "5".into(),
            payment_type: "cartao_credito".into(),
            installments: 10,
        }
    }

    fn base() -> Vec<OrderRecord> {
        vec![
            order("Ana", "SP", "eletronicos", 2000, (2022, 1, 3)),
            order("Bruno", "RJ", "eletronicos", 1500, (2022, 2, 14)),
            order("Ana", "SP", "livros", 50, (2023, 1, 9)),
            order("Carla", "BA", "moveis", 700, (2023, 3, 21)),
        ]
    }

    #[test]
    fn revenue_and_sales_tabs() {
        let view = build_dashboard(&base(), &DashboardFilters::default());

        assert_eq!(view.metrics.revenue.value, Decimal::from(4250));
        assert_eq!(view.metrics.revenue.display, "R$ 4.25 thousand");
        assert_eq!(view.metrics.sales.value, Decimal::from(4));
        assert_eq!(view.metrics.sales.display, " 4.00 ");

        let locations: Vec<_> = view.revenue.by_location.iter().map(|l| l.location.as_str()).collect();
        assert_eq!(locations, vec!["SP", "RJ", "BA"]);
        assert_eq!(view.revenue.by_location[0].value, Decimal::from(2050));

        assert_eq!(view.sales.by_location[0].location, "SP");
        assert_eq!(view.sales.by_location[0].value, Decimal::from(2));

        let months: Vec<_> = view.revenue.monthly.iter().map(|m| m.period.as_str()).collect();
        assert_eq!(months, vec!["2022-01", "2022-02", "2023-01", "2023-03"]);

        assert_eq!(view.revenue.by_category[0].key, "eletronicos");
        assert_eq!(view.sales.by_category[0].value, Decimal::from(2));
    }

    #[test]
    fn seller_filter_narrows_aggregates_but_keeps_options() {
        let filters = DashboardFilters {
            sellers: vec!["Ana".into()],
            ..Default::default()
        };
        let view = build_dashboard(&base(), &filters);
        assert_eq!(view.metrics.sales.value, Decimal::from(2));
        assert_eq!(view.revenue.by_location.len(), 1);
        assert_eq!(view.seller_options, vec!["Ana", "Bruno", "Carla"]);
    }

    #[test]
    fn top_sellers_respect_requested_size() {
        let filters = DashboardFilters {
            top_sellers: 2,
            ..Default::default()
        };
        let view = build_dashboard(&base(), &filters);
        let names: Vec<_> = view.sellers.top_by_revenue.iter().map(|s| s.seller.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
        assert_eq!(view.sellers.top_by_sales[0].seller, "Ana");
        assert_eq!(view.sellers.sellers.len(), 3);
    }

    #[test]
    fn empty_base_table_degrades_to_zero() {
        let view = build_dashboard(&[], &DashboardFilters::default());
        assert_eq!(view.metrics.revenue.value, Decimal::ZERO);
        assert_eq!(view.metrics.sales.value, Decimal::ZERO);
        assert_eq!(view.metrics.sales.display, " 0.00 ");
        assert!(view.revenue.by_location.is_empty());
        assert!(view.sales.monthly.is_empty());
        assert!(view.sellers.top_by_revenue.is_empty());
    }

    #[test]
    fn unknown_seller_gives_empty_views() {
        let filters = DashboardFilters {
            sellers: vec!["Ninguém".into()],
            ..Default::default()
        };
        let view = build_dashboard(&base(), &filters);
        assert!(view.revenue.by_category.is_empty());
        assert_eq!(view.metrics.revenue.value, Decimal::ZERO);
    }
}
