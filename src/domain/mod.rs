// ==========================================
// 资产台账后台 - 领域模型层
// ==========================================
// 职责: 定义资产实体、参照实体、导入中间结构
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod asset;
pub mod import;
pub mod types;

// 重导出核心类型
pub use asset::{Asset, AssetDraft, AssetExportRow, AssetFields, ReferenceEntity};
pub use import::{
    CellValue, ConflictAction, ConflictPolicy, ImportReport, NormalizedRow, RawRow, RowError,
    RowErrorKind, UploadedFile,
};
pub use types::{AssetCondition, AssetField, AssetStatus, ReferenceKind};
