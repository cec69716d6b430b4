// ==========================================
// 资产台账后台 - 导入层
// ==========================================
// 职责: 上传文件 → 逐行对账 → 导入结果
// 支持: Excel (.xlsx/.xls/.ods), CSV
// ==========================================

// 模块声明
pub mod asset_importer_impl;
pub mod asset_importer_trait;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod import_report;
pub mod lookup_resolver;
pub mod reconciliation;
pub mod row_validator;

// 重导出核心类型
pub use asset_importer_impl::AssetImporterImpl;
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult, RowFailure};
pub use field_mapper::{ColumnMap, FieldMapper};
pub use file_parser::{CsvParser, ExcelParser, SourceFormat, UniversalFileParser};
pub use import_report::ImportReportAggregator;
pub use lookup_resolver::{LookupCache, LookupResolver};
pub use reconciliation::{report_row_number, ImportDefaults, ReconciliationEngine};
pub use row_validator::RowValidator;

// 重导出 Trait 接口
pub use asset_importer_trait::{AssetImporter, FileParser};
