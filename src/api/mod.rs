// ==========================================
// 资产台账后台 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供 HTTP 路由调用
// ==========================================

pub mod error;
pub mod import_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use import_api::{ImportApi, TEMPLATE_FILE_NAME, XLSX_CONTENT_TYPE};
