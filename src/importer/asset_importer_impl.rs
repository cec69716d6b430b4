// ==========================================
// 资产台账后台 - 资产导入器实现
// ==========================================
// 职责: 整合导入流程，从上传文件到对账结果
// 流程: 格式识别 → 解析 → 空批次检查 → 读取默认值 → 预热参照缓存 → 逐行对账
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::import::{ConflictPolicy, ImportReport, UploadedFile};
use crate::importer::asset_importer_trait::AssetImporter;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{SourceFormat, UniversalFileParser};
use crate::importer::lookup_resolver::LookupResolver;
use crate::importer::reconciliation::{ImportDefaults, ReconciliationEngine};
use crate::repository::AssetRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// AssetImporterImpl - 资产导入器实现
// ==========================================
pub struct AssetImporterImpl<R, C>
where
    R: AssetRepository + ?Sized,
    C: ImportConfigReader,
{
    // 数据访问层
    repo: Arc<R>,

    // 配置读取器
    config: C,
}

impl<R, C> AssetImporterImpl<R, C>
where
    R: AssetRepository + ?Sized,
    C: ImportConfigReader,
{
    /// 创建新的 AssetImporter 实例
    ///
    /// # 参数
    /// - repo: 资产仓储（与导出共享）
    /// - config: 配置读取器
    pub fn new(repo: Arc<R>, config: C) -> Self {
        Self { repo, config }
    }

    async fn load_defaults(&self) -> ImportResult<ImportDefaults> {
        Ok(ImportDefaults {
            status: self.config.get_default_status().await?,
            condition: self.config.get_default_condition().await?,
        })
    }
}

#[async_trait]
impl<R, C> AssetImporter for AssetImporterImpl<R, C>
where
    R: AssetRepository + ?Sized,
    C: ImportConfigReader,
{
    #[instrument(
        skip(self, upload),
        fields(
            run_id = tracing::field::Empty,
            file_name = upload.file_name.as_deref().unwrap_or("unknown"),
            skip_duplicates = policy.skip_duplicates,
            update_existing = policy.update_existing,
        )
    )]
    async fn import(
        &self,
        upload: UploadedFile,
        policy: ConflictPolicy,
    ) -> ImportResult<ImportReport> {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        if upload.bytes.is_empty() {
            return Err(ImportError::EmptyInput);
        }

        // === 步骤 1: 格式识别与解析 ===
        let format =
            SourceFormat::detect(upload.content_type.as_deref(), upload.file_name.as_deref())?;
        let sheet_name = self.config.get_data_sheet_name().await?;
        debug!(format = ?format, sheet = %sheet_name, "步骤 1: 解析文件");

        let rows = UniversalFileParser::new(sheet_name)
            .parse(format, &upload.bytes)
            .map_err(|e| {
                error!(error = %e, "文件解析失败");
                e
            })?;

        if rows.is_empty() {
            info!("文件无数据行，终止导入");
            return Err(ImportError::EmptyInput);
        }
        info!(total_rows = rows.len(), "文件解析完成");

        // === 步骤 2: 读取默认值并预热参照缓存 ===
        let defaults = self.load_defaults().await?;
        let mut resolver = LookupResolver::seed_from_repository(self.repo.as_ref()).await?;

        // === 步骤 3: 逐行对账 ===
        let engine = ReconciliationEngine::new(self.repo.as_ref(), policy, defaults);
        let report = engine.process_batch(&rows, &mut resolver).await;

        info!(
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            errors = report.errors.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "导入完成"
        );

        Ok(report)
    }
}
