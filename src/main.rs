use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use words_app::config::Config;
use words_app::store::PgWordStore;
use words_app::{app, AppState};

#[tokio::main]
async fn main() {
    // 1. 初始化日志系统
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // 2. 加载 .env 及环境变量
    let config = Config::from_env().context("Failed to load configuration")?;

    // 3. 初始化数据库连接池（首次请求时才连接）
    let store = PgWordStore::connect_lazy(&config);

    let shared_state = Arc::new(AppState { store: Arc::new(store) });

    // 4. 构建路由
    let app = app(shared_state, config.max_in_flight());

    // 5. 启动服务
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Server running on http://localhost:{}", config.server_port);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
