// ==========================================
// 资产台账后台 - 配置管理器
// ==========================================
// 职责: 配置查询、覆写管理
// 存储: config_kv 表 (key-value)
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::db::open_sqlite_connection;
use crate::domain::types::{AssetCondition, AssetStatus};
use crate::repository::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// 配置键
pub mod config_keys {
    pub const DEFAULT_STATUS: &str = "import/default_status";
    pub const DEFAULT_CONDITION: &str = "import/default_condition";
    pub const TEMPLATE_ROW_COUNT: &str = "template/row_count";
    pub const DATA_SHEET_NAME: &str = "template/data_sheet_name";
}

/// 默认值
pub mod config_defaults {
    pub const TEMPLATE_ROW_COUNT: u32 = 500;
    pub const DATA_SHEET_NAME: &str = "Assets";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 从 config_kv 表读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// 读取并解析配置；不存在或无法解析时回落默认值
    fn get_parsed_or_default<T>(
        &self,
        key: &str,
        default: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> RepositoryResult<T> {
        match self.get_config_value(key)? {
            None => Ok(default),
            Some(raw) => match parse(&raw) {
                Some(v) => Ok(v),
                None => {
                    warn!(key = key, value = %raw, "配置值无法解析，使用默认值");
                    Ok(default)
                }
            },
        }
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_default_status(&self) -> RepositoryResult<AssetStatus> {
        self.get_parsed_or_default(
            config_keys::DEFAULT_STATUS,
            AssetStatus::FALLBACK,
            AssetStatus::from_label,
        )
    }

    async fn get_default_condition(&self) -> RepositoryResult<AssetCondition> {
        self.get_parsed_or_default(
            config_keys::DEFAULT_CONDITION,
            AssetCondition::FALLBACK,
            AssetCondition::from_label,
        )
    }

    async fn get_template_row_count(&self) -> RepositoryResult<u32> {
        self.get_parsed_or_default(
            config_keys::TEMPLATE_ROW_COUNT,
            config_defaults::TEMPLATE_ROW_COUNT,
            |raw| raw.trim().parse::<u32>().ok().filter(|n| *n > 0),
        )
    }

    async fn get_data_sheet_name(&self) -> RepositoryResult<String> {
        self.get_parsed_or_default(
            config_keys::DATA_SHEET_NAME,
            config_defaults::DATA_SHEET_NAME.to_string(),
            |raw| {
                let name = raw.trim();
                (!name.is_empty()).then(|| name.to_string())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    fn memory_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[tokio::test]
    async fn test_defaults_when_unset() {
        let manager = memory_manager();
        assert_eq!(manager.get_default_status().await.unwrap(), AssetStatus::InStock);
        assert_eq!(manager.get_default_condition().await.unwrap(), AssetCondition::Good);
        assert_eq!(manager.get_template_row_count().await.unwrap(), 500);
        assert_eq!(manager.get_data_sheet_name().await.unwrap(), "Assets");
    }

    #[tokio::test]
    async fn test_override_and_invalid_value() {
        let manager = memory_manager();
        manager
            .set_config_value(config_keys::DEFAULT_STATUS, "available")
            .unwrap();
        manager
            .set_config_value(config_keys::TEMPLATE_ROW_COUNT, "not-a-number")
            .unwrap();

        assert_eq!(manager.get_default_status().await.unwrap(), AssetStatus::Available);
        assert_eq!(manager.get_template_row_count().await.unwrap(), 500);
    }
}
