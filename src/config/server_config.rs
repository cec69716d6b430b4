// ==========================================
// 资产台账后台 - 服务启动配置
// ==========================================
// 来源: 环境变量（未设置时取默认值）
// - ASSET_ADMIN_BIND          监听地址，默认 0.0.0.0:8080
// - ASSET_ADMIN_DB            数据库路径，默认 <data_dir>/asset-admin/assets.db
// - ASSET_ADMIN_MAX_UPLOAD_MB 上传文件上限（MB），默认 20
// ==========================================

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_BIND: &str = "ASSET_ADMIN_BIND";
pub const ENV_DB: &str = "ASSET_ADMIN_DB";
pub const ENV_MAX_UPLOAD_MB: &str = "ASSET_ADMIN_MAX_UPLOAD_MB";

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_MAX_UPLOAD_MB: usize = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config value (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// 服务启动配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub db_path: String,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// 从环境变量读取配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置（便于测试）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_address = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: ENV_BIND.to_string(),
                value: bind_raw.clone(),
                message: e.to_string(),
            })?;

        let db_path = lookup(ENV_DB)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(get_default_db_path);

        let max_upload_mb = match lookup(ENV_MAX_UPLOAD_MB) {
            None => DEFAULT_MAX_UPLOAD_MB,
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| ConfigError::InvalidValue {
                key: ENV_MAX_UPLOAD_MB.to_string(),
                value: raw.clone(),
                message: e.to_string(),
            })?,
        };

        Ok(Self {
            bind_address,
            db_path,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}

/// 默认数据库路径: <系统数据目录>/asset-admin/assets.db
pub fn get_default_db_path() -> String {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("asset-admin");

    if let Err(e) = std::fs::create_dir_all(&path) {
        tracing::warn!("创建数据目录失败: {}", e);
    }

    path.push("assets.db");
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BIND, "127.0.0.1:9000"),
            (ENV_DB, "/tmp/assets-test.db"),
            (ENV_MAX_UPLOAD_MB, "5"),
        ]
        .into_iter()
        .collect();

        let config = ServerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.bind_address.port(), 9000);
        assert_eq!(config.db_path, "/tmp/assets-test.db");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_bind_is_error() {
        let result = ServerConfig::from_lookup(|k| (k == ENV_BIND).then(|| "nope".to_string()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
