// ==========================================
// 资产台账后台 - 资产 Repository Trait
// ==========================================
// 职责: 定义资产与参照实体的数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// 约束: 每次调用为独立语句，不跨行包事务
// ==========================================

use crate::domain::asset::{Asset, AssetExportRow, AssetFields, ReferenceEntity};
use crate::domain::types::ReferenceKind;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// AssetRepository Trait
// ==========================================
// 实现者: AssetRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait AssetRepository: Send + Sync {
    // ===== 资产 =====

    /// 按业务主键（资产编号，大小写敏感）查询资产
    async fn find_by_item_number(&self, item_number: &str) -> RepositoryResult<Option<Asset>>;

    /// 新建资产
    ///
    /// # 返回
    /// - Ok(i64): 新资产 id
    /// - Err(UniqueConstraintViolation): 资产编号已存在（并发导入竞争）
    async fn insert_asset(&self, item_number: &str, fields: &AssetFields) -> RepositoryResult<i64>;

    /// 覆盖资产全部可变字段（资产编号不变）
    async fn update_asset(&self, id: i64, fields: &AssetFields) -> RepositoryResult<()>;

    /// 导出用：全部资产，外键解析为名称，按资产编号排序
    async fn list_export_rows(&self) -> RepositoryResult<Vec<AssetExportRow>>;

    /// 统计资产数量
    async fn count_assets(&self) -> RepositoryResult<usize>;

    // ===== 参照实体 =====

    /// 列出某类参照实体（按名称排序）
    async fn list_references(&self, kind: ReferenceKind) -> RepositoryResult<Vec<ReferenceEntity>>;

    /// 按名称查找参照实体，不存在则创建
    ///
    /// # 参数
    /// - name: 已去首尾空白、保留原始大小写的名称
    ///
    /// # 返回
    /// - Ok(i64): 已有或新建实体的 id（名称大小写不敏感匹配）
    async fn create_reference_if_absent(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> RepositoryResult<i64>;
}
