// ==========================================
// 资产台账后台 - 导出模块错误类型
// ==========================================

use crate::repository::error::RepositoryError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Spreadsheet generation failed: {0}")]
    Xlsx(#[from] XlsxError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
