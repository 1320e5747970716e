//! 产品处理器
//!
//! 两个产品接口无论上游成败都返回 HTTP 200，失败只体现在信封的 `status` 中。

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::service::ProductService;
use crate::core::{error::CoreError, response::Envelope, service::ProductFeed};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(feed: Arc<dyn ProductFeed>) -> Self {
        Self {
            product_service: ProductService::new(feed),
        }
    }
}

pub async fn list_products(State(state): State<AppState>) -> Json<Envelope<Value>> {
    Json(state.product_service.list_products().await)
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Envelope<Value>> {
    Json(state.product_service.get_product(&id).await)
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "ok": true,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn invalid_route() -> CoreError {
    CoreError::InvalidRoute
}
