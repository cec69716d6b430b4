// ==========================================
// 资产台账后台 - 配置层
// ==========================================
// 职责: 服务启动配置（环境变量）+ 业务配置（config_kv 表）
// ==========================================

pub mod config_manager;
pub mod import_config_trait;
pub mod server_config;

// 重导出核心配置
pub use config_manager::{config_defaults, config_keys, ConfigManager};
pub use import_config_trait::ImportConfigReader;
pub use server_config::{get_default_db_path, ConfigError, ServerConfig};
