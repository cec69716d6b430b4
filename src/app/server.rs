// ==========================================
// 资产台账后台 - HTTP 服务启动
// ==========================================

use crate::app::routes::create_router;
use crate::app::state::AppState;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// 启动服务，直到收到 Ctrl+C / SIGTERM
pub async fn run(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    run_until(state, addr, shutdown_signal()).await
}

/// 启动服务，直到自定义关闭信号完成
pub async fn run_until<F>(state: AppState, addr: SocketAddr, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP 服务监听: {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP 服务已停止");
    Ok(())
}

/// 默认关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Ctrl+C 监听注册失败: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("SIGTERM 监听注册失败: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl+C，开始优雅关闭"),
        _ = terminate => info!("收到 SIGTERM，开始优雅关闭"),
    }
}
