// ==========================================
// 资产台账后台 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::ImportApi;
use crate::config::{ConfigManager, ImportConfigReader, ServerConfig};
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::{AssetRepository, AssetRepositoryImpl};

/// 应用状态
///
/// 包含API实例和共享资源，由 axum 路由以 State 方式注入
#[derive(Clone)]
pub struct AppState {
    /// 资产导入/导出API
    pub import_api: Arc<ImportApi>,

    /// 上传文件大小上限（字节）
    pub max_upload_bytes: usize,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库（统一 PRAGMA）并初始化表结构
    /// 2. 仓储与配置管理器共享同一连接
    /// 3. 创建API实例
    pub fn new(config: &ServerConfig) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", config.db_path);

        let conn = open_sqlite_connection(&config.db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("数据库表结构初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let repo: Arc<dyn AssetRepository> =
            Arc::new(AssetRepositoryImpl::from_connection(conn.clone()));
        let config_reader: Arc<dyn ImportConfigReader> =
            Arc::new(ConfigManager::from_connection(conn));

        let state = Self::with_components(repo, config_reader, config.max_upload_bytes);

        tracing::info!("AppState初始化完成");
        Ok(state)
    }

    /// 由现成组件组装（测试可注入内存仓储）
    pub fn with_components(
        repo: Arc<dyn AssetRepository>,
        config: Arc<dyn ImportConfigReader>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            import_api: Arc::new(ImportApi::new(repo, config)),
            max_upload_bytes,
        }
    }
}
