use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_SALES_API_URL: &str = "https://labdados.com/produtos";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CSV_CACHE_CAPACITY: usize = 32;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sales_api_url: String,
    pub bind_addr: SocketAddr,
    pub fetch_timeout: Duration,
    pub csv_cache_capacity: usize,
}

impl AppConfig {
    /// 从环境变量读取 (调用前先由 dotenvy 加载 `.env`)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sales_api_url = lookup("SALES_API_URL").unwrap_or_else(|| DEFAULT_SALES_API_URL.to_string());

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:3000")?;

        let fetch_timeout = match lookup("FETCH_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().context("FETCH_TIMEOUT_SECS must be an integer")?,
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        let csv_cache_capacity = match lookup("CSV_CACHE_CAPACITY") {
            Some(v) => v.parse::<usize>().context("CSV_CACHE_CAPACITY must be an integer")?,
            None => DEFAULT_CSV_CACHE_CAPACITY,
        };

        Ok(Self {
            sales_api_url,
            bind_addr,
            fetch_timeout: Duration::from_secs(fetch_timeout),
            csv_cache_capacity,
        })
    }
}
