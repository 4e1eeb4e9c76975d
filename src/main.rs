mod app;
mod common;
mod model;
mod operations;
mod ui;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use model::arg::Args;
use model::config::Config;
use operations::OperationLog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 需要在日志初始化之前加载，RUST_LOG 可能写在其中
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("已加载环境文件: {}", path.display());
    }

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    config.apply_env()?;
    args.apply_to(&mut config);
    if let Some(path) = config.config_path() {
        tracing::debug!("配置文件: {}", path.display());
    }

    let log = OperationLog::open(&config.database_path)?;
    tracing::info!("操作记录数据库: {}", config.database_path.display());

    let app = app::create_app(&config, log);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("监听 {} 失败", addr))?;
    tracing::info!("启动 Playground 服务: http://{}", addr);
    tracing::info!("API 端点:");
    tracing::info!("  GET  /api/operations");
    tracing::info!("  POST /api/operations");

    axum::serve(listener, app).await?;
    Ok(())
}
