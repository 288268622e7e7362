use sales_dashboard::api;
use sales_dashboard::ax_state::AppState;
use sales_dashboard::infra::config::AppConfig;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let state = Arc::new(AppState::from_config(&config)?);
    info!("上游销售数据接口: {}", state.client.base_url());

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("销售看板服务运行在 http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
