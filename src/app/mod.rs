// ==========================================
// 资产台账后台 - 应用层
// ==========================================
// 职责: HTTP 集成（axum），连接路由与业务 API
// ==========================================

pub mod routes;
pub mod server;
pub mod state;

// 重导出
pub use routes::{create_router, ImportQuery};
pub use state::AppState;
