use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// 上游接口的日期格式 (日/月/年)
pub const PURCHASE_DATE_FORMAT: &str = "%d/%m/%Y";

/// 上游接口返回的原始订单记录，购买日期尚未解析
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderRecord {
    #[serde(rename = "Produto")]
    pub product: String,
    #[serde(rename = "Categoria do Produto")]
    pub category: String,
    #[serde(rename = "Preço")]
    pub price: Decimal,
    #[serde(rename = "Data da Compra")]
    pub purchase_date: String,
    #[serde(rename = "Frete")]
    pub freight: Decimal,
    #[serde(rename = "Vendedor")]
    pub seller: String,
    #[serde(rename = "Local da compra")]
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "Avaliação da compra", deserialize_with = "text_or_number")]
    pub rating: String,
    #[serde(rename = "Tipo de pagamento")]
    pub payment_type: String,
    #[serde(rename = "Quantidade de parcelas")]
    pub installments: u32,
}

impl RawOrderRecord {
    pub fn into_record(self, purchase_date: NaiveDate) -> OrderRecord {
        OrderRecord {
            product: self.product,
            category: self.category,
            price: self.price,
            purchase_date,
            freight: self.freight,
            seller: self.seller,
            location: self.location,
            lat: self.lat,
            lon: self.lon,
            rating: self.rating,
            payment_type: self.payment_type,
            installments: self.installments,
        }
    }
}

/// 解析 `DD/MM/YYYY` 格式的购买日期
pub fn parse_purchase_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), PURCHASE_DATE_FORMAT)
}

/// 一笔订单。拉取后不可变，一次会话的全部订单即"基础表"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "Produto")]
    pub product: String,
    #[serde(rename = "Categoria do Produto")]
    pub category: String,
    #[serde(rename = "Preço")]
    pub price: Decimal,
    #[serde(rename = "Data da Compra")]
    pub purchase_date: NaiveDate,
    #[serde(rename = "Frete")]
    pub freight: Decimal,
    #[serde(rename = "Vendedor")]
    pub seller: String,
    #[serde(rename = "Local da compra")]
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "Avaliação da compra")]
    pub rating: String,
    #[serde(rename = "Tipo de pagamento")]
    pub payment_type: String,
    #[serde(rename = "Quantidade de parcelas")]
    pub installments: u32,
}

impl OrderRecord {
    pub fn text(&self, column: CategoricalColumn) -> &str {
        match column {
            CategoricalColumn::Product => &self.product,
            CategoricalColumn::Category => &self.category,
            CategoricalColumn::Seller => &self.seller,
            CategoricalColumn::Location => &self.location,
            CategoricalColumn::Rating => &self.rating,
            CategoricalColumn::PaymentType => &self.payment_type,
        }
    }

    pub fn number(&self, column: NumericColumn) -> Decimal {
        match column {
            NumericColumn::Price => self.price,
            NumericColumn::Freight => self.freight,
            NumericColumn::Installments => Decimal::from(self.installments),
        }
    }

    /// 单元格的文本形式 (CSV 导出与缓存指纹共用)
    pub fn cell_text(&self, column: Column) -> String {
        match column {
            Column::Product => self.product.clone(),
            Column::Category => self.category.clone(),
            Column::Price => self.price.to_string(),
            Column::PurchaseDate => self.purchase_date.to_string(),
            Column::Freight => self.freight.to_string(),
            Column::Seller => self.seller.clone(),
            Column::Location => self.location.clone(),
            Column::Lat => self.lat.to_string(),
            Column::Lon => self.lon.to_string(),
            Column::Rating => self.rating.clone(),
            Column::PaymentType => self.payment_type.clone(),
            Column::Installments => self.installments.to_string(),
        }
    }

    pub fn cell_value(&self, column: Column) -> Value {
        match column {
            Column::Product => json!(self.product),
            Column::Category => json!(self.category),
            Column::Price => json!(self.price),
            Column::PurchaseDate => json!(self.purchase_date),
            Column::Freight => json!(self.freight),
            Column::Seller => json!(self.seller),
            Column::Location => json!(self.location),
            Column::Lat => json!(self.lat),
            Column::Lon => json!(self.lon),
            Column::Rating => json!(self.rating),
            Column::PaymentType => json!(self.payment_type),
            Column::Installments => json!(self.installments),
        }
    }
}

/// 基础表的全部列，顺序即上游字段顺序 (也是导出顺序)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "Produto")]
    Product,
    #[serde(rename = "Categoria do Produto")]
    Category,
    #[serde(rename = "Preço")]
    Price,
    #[serde(rename = "Data da Compra")]
    PurchaseDate,
    #[serde(rename = "Frete")]
    Freight,
    #[serde(rename = "Vendedor")]
    Seller,
    #[serde(rename = "Local da compra")]
    Location,
    #[serde(rename = "lat")]
    Lat,
    #[serde(rename = "lon")]
    Lon,
    #[serde(rename = "Avaliação da compra")]
    Rating,
    #[serde(rename = "Tipo de pagamento")]
    PaymentType,
    #[serde(rename = "Quantidade de parcelas")]
    Installments,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::Product,
        Column::Category,
        Column::Price,
        Column::PurchaseDate,
        Column::Freight,
        Column::Seller,
        Column::Location,
        Column::Lat,
        Column::Lon,
        Column::Rating,
        Column::PaymentType,
        Column::Installments,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Product => "Produto",
            Column::Category => "Categoria do Produto",
            Column::Price => "Preço",
            Column::PurchaseDate => "Data da Compra",
            Column::Freight => "Frete",
            Column::Seller => "Vendedor",
            Column::Location => "Local da compra",
            Column::Lat => "lat",
            Column::Lon => "lon",
            Column::Rating => "Avaliação da compra",
            Column::PaymentType => "Tipo de pagamento",
            Column::Installments => "Quantidade de parcelas",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// 可做成员过滤与分组的类别列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalColumn {
    Product,
    Category,
    Seller,
    Location,
    Rating,
    PaymentType,
}

impl From<CategoricalColumn> for Column {
    fn from(column: CategoricalColumn) -> Self {
        match column {
            CategoricalColumn::Product => Column::Product,
            CategoricalColumn::Category => Column::Category,
            CategoricalColumn::Seller => Column::Seller,
            CategoricalColumn::Location => Column::Location,
            CategoricalColumn::Rating => Column::Rating,
            CategoricalColumn::PaymentType => Column::PaymentType,
        }
    }
}

/// 可做区间过滤与归约的数值列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    Price,
    Freight,
    Installments,
}

impl From<NumericColumn> for Column {
    fn from(column: NumericColumn) -> Self {
        match column {
            NumericColumn::Price => Column::Price,
            NumericColumn::Freight => Column::Freight,
            NumericColumn::Installments => Column::Installments,
        }
    }
}

// 评分字段上游有时给数字有时给字符串，统一按文本保存
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
