//! 应用层

pub mod products;
pub mod storefront;

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use products::handler::{self, AppState};

/// 创建 API 路由
///
/// 任何未匹配的路径或方法都返回 401 和固定的失败信封。
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(handler::list_products).fallback(handler::invalid_route),
        )
        .route(
            "/api/products/",
            get(handler::list_products).fallback(handler::invalid_route),
        )
        .route(
            "/api/products/:id",
            get(handler::get_product).fallback(handler::invalid_route),
        )
        .route(
            "/api/health",
            get(handler::health).fallback(handler::invalid_route),
        )
        .fallback(handler::invalid_route)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
