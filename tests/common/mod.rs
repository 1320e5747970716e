#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use storefront::app::products::handler::AppState;
use storefront::create_router;
use storefront::infrastructure::catalog_client::CatalogGateway;
use tokio::net::TcpListener;

/// 记录假上游收到的请求路径
pub type Hits = Arc<Mutex<Vec<String>>>;

pub fn sample_catalog() -> Value {
    json!({
        "products": [
            { "id": 1, "title": "Red Shirt", "description": "Soft cotton tee", "price": 300 },
            { "id": 2, "title": "Blue Hat", "description": "Wool, one size", "price": 800 },
            { "id": 3, "title": "Green Shoe", "description": null, "price": 1500,
              "thumbnail": "https://cdn.example.com/3.png" }
        ],
        "total": 3,
        "skip": 0,
        "limit": 30
    })
}

pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// 启动一个提供 `/products` 与 `/products/:id` 的假目录
pub async fn spawn_catalog() -> (String, Hits) {
    let hits: Hits = Arc::default();
    let router = Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .with_state(hits.clone());
    (spawn(router).await, hits)
}

async fn list_products(State(hits): State<Hits>) -> Json<Value> {
    hits.lock().unwrap().push("/products".to_string());
    Json(sample_catalog())
}

async fn get_product(
    State(hits): State<Hits>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    hits.lock().unwrap().push(format!("/products/{}", id));
    let catalog = sample_catalog();
    let found = catalog["products"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"].to_string() == id)
        .cloned();

    match found {
        Some(product) => (StatusCode::OK, Json(product)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Product with id '{}' not found", id) })),
        ),
    }
}

/// 对任意路径都返回固定文本的上游
pub async fn spawn_fixed(status: StatusCode, body: &'static str) -> String {
    spawn(Router::new().fallback(move || async move { (status, body) })).await
}

/// 对任意路径都返回固定 JSON 的上游
pub async fn spawn_json(status: StatusCode, body: Value) -> String {
    spawn(Router::new().fallback(move || {
        let body = body.clone();
        async move { (status, Json(body)) }
    }))
    .await
}

/// 一个没有任何进程监听的地址
pub async fn unreachable_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn backend_router(catalog_base: &str) -> Router {
    let gateway = CatalogGateway::new(catalog_base).unwrap();
    create_router(AppState::new(Arc::new(gateway)))
}

/// 启动真实的后端，返回 API 根地址（带 `/api`）
pub async fn spawn_backend(catalog_base: &str) -> String {
    format!("{}/api", spawn(backend_router(catalog_base)).await)
}
