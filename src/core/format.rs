use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const UNITS: [&str; 2] = ["", "thousand"];
const LARGEST_UNIT: &str = "million";

/// 把大数折算成 "千" / "百万" 单位显示，保留两位小数。
///
/// 每一级阈值为 1000；值小于 1000 或已到最大单位时停止。
///
/// ```
/// use sales_dashboard::core::format::format_number;
/// assert_eq!(format_number(1500.0, "$"), "$ 1.50 thousand");
/// ```
pub fn format_number(value: f64, prefix: &str) -> String {
    let mut value = value;
    for unit in UNITS {
        if value < 1000.0 {
            return format!("{} {:.2} {}", prefix, value, unit);
        }
        value /= 1000.0;
    }
    format!("{} {:.2} {}", prefix, value, LARGEST_UNIT)
}

pub fn format_decimal(value: Decimal, prefix: &str) -> String {
    format_number(value.to_f64().unwrap_or_default(), prefix)
}
