#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use sales_dashboard::api::router;
use sales_dashboard::ax_state::AppState;
use sales_dashboard::infra::export::CsvCache;
use sales_dashboard::infra::fetcher::SalesClient;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type SeenQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

#[allow(clippy::too_many_arguments)]
fn order(
    product: &str,
    category: &str,
    price: f64,
    date: &str,
    seller: &str,
    location: &str,
    rating: i64,
    payment: &str,
    installments: u32,
) -> Value {
    let (lat, lon) = match location {
        "SP" => (-22.19, -48.79),
        "RJ" => (-22.25, -42.66),
        "BA" => (-13.29, -41.71),
        _ => (-24.89, -51.55),
    };
    json!({
        "Produto": product,
        "Categoria do Produto": category,
        "Preço": price,
        "Frete": 12.5,
        "Data da Compra": date,
        "Vendedor": seller,
        "Local da compra": location,
        "Avaliação da compra": rating,
        "Tipo de pagamento": payment,
        "Quantidade de parcelas": installments,
        "lat": lat,
        "lon": lon
    })
}

/// 六条订单，覆盖四个州、三个年份、三个卖家
pub fn orders() -> Vec<Value> {
    vec![
        order("Geladeira", "eletrodomesticos", 2500.0, "15/01/2022", "Ana Souza", "SP", 5, "cartao_credito", 10),
        order("Livro de receitas", "livros", 45.5, "20/01/2023", "Bruno Lima", "SP", 4, "boleto", 1),
        order("Smartphone", "eletronicos", 1800.0, "03/02/2022", "Bruno Lima", "RJ", 3, "cartao_credito", 6),
        order("Mesa de jantar", "moveis", 950.0, "11/07/2021", "Carla Dias", "BA", 5, "boleto", 1),
        order("Bola de futebol", "esporte e lazer", 60.25, "28/02/2023", "Ana Souza", "PR", 2, "cartao_debito", 1),
        order("Cafeteira", "eletrodomesticos", 320.0, "05/11/2022", "Carla Dias", "BA", 1, "cartao_credito", 3),
    ]
}

fn region_of(location: &str) -> &'static str {
    match location {
        "SP" | "RJ" => "sudeste",
        "BA" => "nordeste",
        "PR" => "sul",
        _ => "norte",
    }
}

async fn produtos(
    State(seen): State<SeenQueries>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    seen.lock().unwrap().push(params.clone());
    let region = params.get("região").cloned();
    let year = params.get("ano").cloned();

    let rows: Vec<Value> = orders()
        .into_iter()
        .filter(|o| {
            let location = o["Local da compra"].as_str().unwrap_or_default();
            let date = o["Data da Compra"].as_str().unwrap_or_default();
            region.as_deref().map_or(true, |r| region_of(location) == r)
                && year.as_deref().map_or(true, |y| date.ends_with(y))
        })
        .collect();
    Json(Value::Array(rows))
}

pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// 模拟上游接口，返回基地址与收到的查询参数记录
pub async fn spawn_upstream() -> (String, SeenQueries) {
    let seen = SeenQueries::default();
    let app = Router::new()
        .route("/produtos", get(produtos))
        .route(
            "/indisponivel",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "fora do ar") }),
        )
        .route(
            "/data-invalida",
            get(|| async {
                let mut rows = orders();
                rows[3]["Data da Compra"] = json!("2021-07-11");
                Json(Value::Array(rows))
            }),
        )
        .route("/vazio", get(|| async { Json(json!([])) }))
        .with_state(seen.clone());
    (spawn(app).await, seen)
}

pub fn client(url: &str) -> SalesClient {
    SalesClient::new(url, Duration::from_secs(5)).unwrap()
}

/// 启动看板服务，指向给定的上游地址
pub async fn spawn_app(upstream_url: &str) -> String {
    let state = Arc::new(AppState::new(client(upstream_url), CsvCache::new(8)));
    spawn(router(state)).await
}
