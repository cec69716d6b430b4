// ==========================================
// 资产台账后台 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入/模板模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::{AssetCondition, AssetStatus};
use crate::repository::RepositoryResult;
use async_trait::async_trait;
use std::sync::Arc;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 新建资产未填写状态时的默认状态
    ///
    /// # 默认值
    /// - In Stock
    async fn get_default_status(&self) -> RepositoryResult<AssetStatus>;

    /// 新建资产未填写成色时的默认成色
    ///
    /// # 默认值
    /// - GOOD
    async fn get_default_condition(&self) -> RepositoryResult<AssetCondition>;

    /// 模板中带下拉校验的数据行数
    ///
    /// # 默认值
    /// - 500
    async fn get_template_row_count(&self) -> RepositoryResult<u32>;

    /// 数据工作表名称（模板/导出写入，导入优先查找）
    ///
    /// # 默认值
    /// - Assets
    async fn get_data_sheet_name(&self) -> RepositoryResult<String>;
}

// 共享实例（API 层与导入器共用同一配置读取器）
#[async_trait]
impl<T> ImportConfigReader for Arc<T>
where
    T: ImportConfigReader + ?Sized,
{
    async fn get_default_status(&self) -> RepositoryResult<AssetStatus> {
        self.as_ref().get_default_status().await
    }

    async fn get_default_condition(&self) -> RepositoryResult<AssetCondition> {
        self.as_ref().get_default_condition().await
    }

    async fn get_template_row_count(&self) -> RepositoryResult<u32> {
        self.as_ref().get_template_row_count().await
    }

    async fn get_data_sheet_name(&self) -> RepositoryResult<String> {
        self.as_ref().get_data_sheet_name().await
    }
}
