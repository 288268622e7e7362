use crate::models::order::{Column, OrderRecord};
use dashmap::DashMap;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;

pub const DEFAULT_EXPORT_NAME: &str = "dados";

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("static regex"));

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer could not be flushed: {0}")]
    Flush(String),
}

/// 表格的投影视图：可见列 + 已过滤的行
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    pub columns: &'a [Column],
    pub rows: &'a [OrderRecord],
}

impl<'a> TableView<'a> {
    pub fn new(columns: &'a [Column], rows: &'a [OrderRecord]) -> Self {
        Self { columns, rows }
    }

    /// 内容指纹：相同列、相同行得到相同摘要
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.columns.len() as u64).to_le_bytes());
        for c in self.columns {
            write_field(&mut hasher, c.header());
        }
        hasher.update(&(self.rows.len() as u64).to_le_bytes());
        for r in self.rows {
            for c in self.columns {
                write_field(&mut hasher, &r.cell_text(*c));
            }
        }
        hasher.finalize()
    }
}

// 长度前缀避免 "ab"+"c" 与 "a"+"bc" 撞车
fn write_field(hasher: &mut blake3::Hasher, field: &str) {
    hasher.update(&(field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}

/// UTF-8、带表头、逗号分隔、无索引列
pub fn encode_csv(view: &TableView<'_>) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(view.columns.iter().map(|c| c.header()))?;
    for r in view.rows {
        writer.write_record(view.columns.iter().map(|c| r.cell_text(*c)))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))
}

/// 清理用户输入的文件名，并强制 `.csv` 后缀
pub fn export_filename(requested: Option<&str>) -> String {
    let stem = requested.map(str::trim).unwrap_or_default();
    let stem = if stem.to_ascii_lowercase().ends_with(".csv") {
        &stem[..stem.len() - 4]
    } else {
        stem
    };
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(stem, "_");
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    if cleaned.is_empty() {
        format!("{}.csv", DEFAULT_EXPORT_NAME)
    } else {
        format!("{}.csv", cleaned)
    }
}

/// CSV 编码结果的记忆化缓存，按内容指纹索引。
///
/// 编码是输入的纯函数，命中直接返回已有字节。超过容量时随机淘汰一条。
pub struct CsvCache {
    entries: DashMap<blake3::Hash, Arc<Vec<u8>>>,
    capacity: usize,
}

impl CsvCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get_or_encode(&self, view: &TableView<'_>) -> Result<Arc<Vec<u8>>, ExportError> {
        let key = view.fingerprint();
        if let Some(hit) = self.entries.get(&key) {
            debug!("CSV 缓存命中: {}", key.to_hex());
            return Ok(hit.value().clone());
        }

        let bytes = Arc::new(encode_csv(view)?);
        if self.entries.len() >= self.capacity {
            let victim = self.entries.iter().next().map(|e| *e.key());
            if let Some(victim) = victim {
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(key, bytes.clone());
        debug!("CSV 已编码并缓存: {} 字节", bytes.len());
        Ok(bytes)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
