// ==========================================
// 资产台账后台 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将导入/导出/仓储错误转换为 HTTP 响应
// - 批次前置条件不满足（无文件/无数据行/格式不支持）→ 400
// - 解析失败、数据库失败等未完成批次的错误 → 500
// 响应体: {"code": "...", "message": "..."}
// ==========================================

use crate::exporter::error::ExportError;
use crate::i18n::t;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调用方错误
    // ==========================================
    #[error("{0}")]
    InvalidInput(String),

    // ==========================================
    // 处理失败
    // ==========================================
    #[error("Import failed: {0}")]
    ImportError(String),

    #[error("Export failed: {0}")]
    ExportError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Database connection failed: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// JSON 错误响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误码（便于程序处理）
    pub code: String,
    /// 可读错误信息
    pub message: String,
}

impl ApiError {
    /// HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::ImportError(_)
            | ApiError::ExportError(_)
            | ApiError::DatabaseError(_)
            | ApiError::DatabaseConnectionError(_)
            | ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::ImportError(_) => "IMPORT_FAILED",
            ApiError::ExportError(_) => "EXPORT_FAILED",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_UNAVAILABLE",
            ApiError::Other(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "请求处理失败");
        } else {
            tracing::debug!(error = %self, "请求参数无效");
        }

        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::NoFile => ApiError::InvalidInput(t("import.no_file")),
            ImportError::EmptyInput => ApiError::InvalidInput(t("import.empty_input")),
            ImportError::Repository(repo_err) => ApiError::from(repo_err),
            other if other.is_client_error() => ApiError::InvalidInput(other.to_string()),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Repository(repo_err) => ApiError::from(repo_err),
            ExportError::Xlsx(e) => ApiError::ExportError(e.to_string()),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("lock poisoned: {}", msg))
            }
            RepositoryError::Other(e) => ApiError::Other(e),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_mapping() {
        let err = ApiError::from(ImportError::NoFile);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "No file uploaded");

        let err = ApiError::from(ImportError::EmptyInput);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(ImportError::UnsupportedFormat("pdf".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(ImportError::ExcelParseError("bad zip".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "IMPORT_FAILED");
        assert!(err.to_string().contains("bad zip"));
    }

    #[test]
    fn test_repository_error_mapping() {
        let err = ApiError::from(RepositoryError::DatabaseQueryError("boom".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }
}
