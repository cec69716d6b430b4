// ==========================================
// 资产台账后台 - 核心库
// ==========================================
// 技术栈: axum + Rust + SQLite
// 系统定位: 资产批量导入/导出（导入对账为核心）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 模板与全量导出
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/表结构）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AssetCondition, AssetField, AssetStatus, ReferenceKind};

// 领域实体
pub use domain::{Asset, AssetFields, ConflictPolicy, ImportReport, ReferenceEntity, RowError};

// 导入
pub use importer::{AssetImporter, AssetImporterImpl, ImportError, ReconciliationEngine};

// API
pub use api::ImportApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "资产台账后台";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
