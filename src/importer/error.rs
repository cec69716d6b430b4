// ==========================================
// 资产台账后台 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分两层:
// - ImportError: 整批失败（请求直接返回错误，不产生行报告）
// - RowFailure:  单行失败（记入 ImportReport.errors，批次继续）
// ==========================================

use crate::domain::import::RowErrorKind;
use crate::domain::types::AssetField;
use crate::i18n::t_with_args;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型（整批）
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 批次前置条件 =====
    #[error("No file uploaded")]
    NoFile,

    #[error("The uploaded file contains no data rows")]
    EmptyInput,

    // ===== 文件相关错误 =====
    #[error("Unsupported file format: {0} (expected .xlsx/.xls/.ods/.csv)")]
    UnsupportedFormat(String),

    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== 依赖层错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ImportError {
    /// 是否为调用方输入问题（映射为 HTTP 400）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ImportError::NoFile | ImportError::EmptyInput | ImportError::UnsupportedFormat(_)
        )
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

// ==========================================
// RowFailure - 单行失败
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowFailure {
    /// 资产编号为空
    #[error("{}", self.message())]
    MissingKey,

    /// 状态/成色取值不在固定集合内
    #[error("{}", self.message())]
    InvalidEnum {
        field: AssetField,
        value: String,
        valid: String,
    },

    /// 默认策略下资产编号已存在
    #[error("{}", self.message())]
    DuplicateKey { item_number: String },

    /// 仓储层意外失败
    #[error("{}", self.message())]
    PersistenceFailure(String),
}

impl RowFailure {
    pub fn kind(&self) -> RowErrorKind {
        match self {
            RowFailure::MissingKey => RowErrorKind::MissingKey,
            RowFailure::InvalidEnum { .. } => RowErrorKind::InvalidEnum,
            RowFailure::DuplicateKey { .. } => RowErrorKind::DuplicateKey,
            RowFailure::PersistenceFailure(_) => RowErrorKind::PersistenceFailure,
        }
    }

    /// 面向用户的错误描述（当前语言）
    pub fn message(&self) -> String {
        match self {
            RowFailure::MissingKey => t_with_args("import.missing_key", &[]),
            RowFailure::InvalidEnum { field, value, valid } => {
                let key = match field {
                    AssetField::Condition => "import.invalid_condition",
                    _ => "import.invalid_status",
                };
                t_with_args(key, &[("value", value), ("valid", valid)])
            }
            RowFailure::DuplicateKey { item_number } => {
                t_with_args("import.duplicate_key", &[("item", item_number)])
            }
            RowFailure::PersistenceFailure(reason) => {
                t_with_args("import.persistence_failure", &[("reason", reason)])
            }
        }
    }
}

impl From<RepositoryError> for RowFailure {
    fn from(err: RepositoryError) -> Self {
        RowFailure::PersistenceFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_failure_messages() {
        assert!(RowFailure::MissingKey.message().contains("required"));

        let invalid = RowFailure::InvalidEnum {
            field: AssetField::Status,
            value: "bogus".to_string(),
            valid: "In Use, In Stock".to_string(),
        };
        let msg = invalid.message();
        assert!(msg.starts_with("Invalid status"));
        assert!(msg.contains("bogus"));
        assert!(msg.contains("In Stock"));
        assert_eq!(invalid.kind(), RowErrorKind::InvalidEnum);

        let dup = RowFailure::DuplicateKey {
            item_number: "A1".to_string(),
        };
        assert!(dup.to_string().contains("already exists"));
    }

    #[test]
    fn test_row_failure_is_std_error() {
        let failure = RowFailure::PersistenceFailure("disk full".to_string());
        let expected = failure.message();
        let boxed: Box<dyn std::error::Error> = Box::new(failure);

        assert_eq!(boxed.to_string(), expected);
        assert!(boxed.to_string().contains("disk full"));
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ImportError::NoFile.is_client_error());
        assert!(ImportError::EmptyInput.is_client_error());
        assert!(ImportError::UnsupportedFormat("pdf".into()).is_client_error());
        assert!(!ImportError::ExcelParseError("bad zip".into()).is_client_error());
    }
}
