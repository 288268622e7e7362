pub mod api;
pub mod core;
pub mod infra;
pub mod models;
pub mod service;

pub mod ax_state {
    use crate::infra::config::AppConfig;
    use crate::infra::export::CsvCache;
    use crate::infra::fetcher::{FetchError, SalesClient};

    pub struct AppState {
        pub client: SalesClient,
        pub csv_cache: CsvCache,
    }

    impl AppState {
        pub fn new(client: SalesClient, csv_cache: CsvCache) -> Self {
            Self { client, csv_cache }
        }

        pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
            let client = SalesClient::new(config.sales_api_url.clone(), config.fetch_timeout)?;
            Ok(Self::new(client, CsvCache::new(config.csv_cache_capacity)))
        }
    }
}
