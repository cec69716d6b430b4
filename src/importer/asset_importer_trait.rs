// ==========================================
// 资产台账后台 - 资产导入 Trait
// ==========================================
// 职责: 定义导入管道接口（不包含实现）
// 流程: 上传文件 → FileParser → RowValidator → ReconciliationEngine → ImportReport
// ==========================================

use crate::domain::import::{ConflictPolicy, ImportReport, RawRow, UploadedFile};
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// AssetImporter Trait
// ==========================================
// 用途: 资产导入主接口
// 实现者: AssetImporterImpl
#[async_trait]
pub trait AssetImporter: Send + Sync {
    /// 导入一个上传文件
    ///
    /// # 参数
    /// - upload: 上传文件（xlsx/xls/ods/csv，按媒体类型或扩展名识别）
    /// - policy: 重复资产编号处理策略
    ///
    /// # 返回
    /// - Ok(ImportReport): 批次完成（逐行错误在 report.errors 中）
    /// - Err(ImportError): 批次未开始（无文件/无数据行/解析失败/依赖失败）
    async fn import(&self, upload: UploadedFile, policy: ConflictPolicy)
        -> ImportResult<ImportReport>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 源格式适配（CSV / 电子表格）
// 实现者: CsvParser, ExcelParser
// 约定: 两种实现输出相同的 AssetField 字段集合
pub trait FileParser: Send + Sync {
    /// 解析文件内容为原始行（不含表头、不含空白行）
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>>;
}
