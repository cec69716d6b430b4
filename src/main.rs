// ==========================================
// 资产台账后台 - 服务主入口
// ==========================================
// 技术栈: axum + Rust + SQLite
// ==========================================

use anyhow::Context;
use asset_admin::app::{server, AppState};
use asset_admin::config::ServerConfig;
use asset_admin::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", asset_admin::APP_NAME);
    tracing::info!("系统版本: {}", asset_admin::VERSION);
    tracing::info!("==================================================");

    let config = ServerConfig::from_env().context("读取服务配置失败")?;
    tracing::info!(
        bind = %config.bind_address,
        db = %config.db_path,
        max_upload_bytes = config.max_upload_bytes,
        "服务配置已加载"
    );

    let state = AppState::new(&config).map_err(anyhow::Error::msg)?;
    server::run(state, config.bind_address)
        .await
        .context("HTTP 服务异常退出")?;

    Ok(())
}
