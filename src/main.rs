use std::sync::Arc;

use storefront::app::products::handler::AppState;
use storefront::config::load_config;
use storefront::create_router;
use storefront::infrastructure::{catalog_client::CatalogGateway, logger::Logger};
use tokio::{net::TcpListener, signal};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config()?;
    Logger::init(&config.logging);

    match &source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let gateway = CatalogGateway::from_config(&config.catalog)?;
    info!("上游目录: {}", gateway.base_url());

    let app = create_router(AppState::new(Arc::new(gateway)));

    let address = config.http.address();
    let listener = TcpListener::bind(&address).await?;

    info!("🚀 店面后端运行在 http://{}", address);
    info!("📖 API 端点:");
    info!("   GET    /api/products      - 获取整个目录");
    info!("   GET    /api/products/:id  - 获取单个产品");
    info!("   GET    /api/health        - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务器已关闭");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("无法监听 Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
    info!("收到 Ctrl+C，正在关闭");
}
