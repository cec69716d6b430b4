// ==========================================
// 资产台账后台 - 导出层
// ==========================================
// 职责: 导入模板生成 + 全量资产导出（xlsx）
// ==========================================

pub mod asset_exporter;
pub mod error;
pub mod template_builder;

// 重导出核心类型
pub use asset_exporter::{export_cell, AssetExporter, ExportCell};
pub use error::{ExportError, ExportResult};
pub use template_builder::{write_header_row, TemplateBuilder, TemplateLists, LISTS_SHEET_NAME};
