// ==========================================
// 资产导入/导出API
// ==========================================
// 职责: 封装模板下载、资产导入、资产导出
// - template: 数据表 + 隐藏下拉表
// - import:   上传文件 + 冲突策略 → ImportReport
// - export:   全量资产 xlsx
// ==========================================

use crate::api::error::ApiResult;
use crate::config::ImportConfigReader;
use crate::domain::import::{ConflictPolicy, ImportReport, UploadedFile};
use crate::domain::types::ReferenceKind;
use crate::exporter::{AssetExporter, TemplateBuilder, TemplateLists};
use crate::importer::{AssetImporter, AssetImporterImpl, ImportError};
use crate::repository::AssetRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

/// xlsx 媒体类型
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 导入模板文件名
pub const TEMPLATE_FILE_NAME: &str = "asset-import-template.xlsx";

/// 资产导入/导出API
pub struct ImportApi {
    repo: Arc<dyn AssetRepository>,
    config: Arc<dyn ImportConfigReader>,
    importer: Box<dyn AssetImporter>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    ///
    /// # 参数
    /// - repo: 资产仓储
    /// - config: 导入配置读取器
    pub fn new(repo: Arc<dyn AssetRepository>, config: Arc<dyn ImportConfigReader>) -> Self {
        let importer = AssetImporterImpl::new(repo.clone(), config.clone());
        Self {
            repo,
            config,
            importer: Box::new(importer),
        }
    }

    /// 生成导入模板
    ///
    /// # 返回
    /// - xlsx 字节（Lists 表中包含当前全部参照实体名称）
    #[instrument(skip(self))]
    pub async fn download_template(&self) -> ApiResult<Vec<u8>> {
        let mut lists = TemplateLists::default();
        for kind in ReferenceKind::ALL {
            let names = self
                .repo
                .list_references(kind)
                .await?
                .into_iter()
                .map(|entity| entity.name)
                .collect();
            lists.set(kind, names);
        }

        let sheet_name = self.config.get_data_sheet_name().await?;
        let row_count = self.config.get_template_row_count().await?;
        let bytes = TemplateBuilder::new(sheet_name, row_count).build(&lists)?;

        info!(size = bytes.len(), row_count = row_count, "导入模板已生成");
        Ok(bytes)
    }

    /// 导入资产
    ///
    /// # 参数
    /// - upload: 上传文件（None 表示请求中没有文件）
    /// - policy: 冲突策略
    ///
    /// # 返回
    /// - Ok(ImportReport): 批次完成
    /// - Err(ApiError::InvalidInput): 无文件/无数据行/格式不支持
    /// - Err(其他): 解析失败或批次开始前的依赖失败
    pub async fn import_assets(
        &self,
        upload: Option<UploadedFile>,
        policy: ConflictPolicy,
    ) -> ApiResult<ImportReport> {
        let upload = upload.ok_or(ImportError::NoFile)?;
        Ok(self.importer.import(upload, policy).await?)
    }

    /// 导出全部资产
    #[instrument(skip(self))]
    pub async fn export_assets(&self) -> ApiResult<Vec<u8>> {
        let rows = self.repo.list_export_rows().await?;
        let sheet_name = self.config.get_data_sheet_name().await?;
        let bytes = AssetExporter::new(sheet_name).export(&rows)?;

        info!(assets = rows.len(), size = bytes.len(), "资产导出完成");
        Ok(bytes)
    }

    /// 导出文件名（按当前日期）
    pub fn export_file_name(&self) -> String {
        format!("assets-export-{}.xlsx", Utc::now().format("%Y%m%d"))
    }
}

