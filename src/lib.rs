//! 单词列表应用：基于 PostgreSQL 的 REST 服务，以及对应的终端客户端

use axum::{error_handling::HandleErrorLayer, routing::get, BoxError, Router};
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

use error::ApiError;
use store::WordStore;

// 全局状态，Handler 通过它访问存储
pub struct AppState {
    pub store: Arc<dyn WordStore>,
}

/// 构建路由
///
/// `max_in_flight` 限制同时处理的请求数，超出部分直接返回 503 而不是无限排队。
/// 该上限由所有路由和方法共享。
pub fn app(state: Arc<AppState>, max_in_flight: usize) -> Router {
    // 允许任意来源跨域访问
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/words",
            get(handlers::word_handler::list_words).post(handlers::word_handler::create_word),
        )
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_overload))
                .load_shed()
                // Router::layer 会对每个路由分别套一层，信号量必须共享
                .layer(GlobalConcurrencyLimitLayer::new(max_in_flight)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn handle_overload(err: BoxError) -> ApiError {
    if !err.is::<tower::load_shed::error::Overloaded>() {
        tracing::error!("Unexpected middleware error: {}", err);
    }
    ApiError::Overloaded
}
