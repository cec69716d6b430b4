// ==========================================
// 资产台账后台 - 导入对账引擎
// ==========================================
// 职责: 逐行 校验 → 按资产编号查重 → 参照解析 → 冲突策略 → 计数
// 约定:
// - 严格按输入顺序串行处理（后续行需看到前面行新建的参照实体）
// - 无批次事务: 每行的读写相互独立，已处理行的结果保留
// - 单行任何失败只记入错误列表，不终止批次
// - 参照解析在冲突判定之前执行，被跳过/拒绝的行同样会新建参照实体
// ==========================================

use crate::domain::asset::{Asset, AssetDraft, AssetFields};
use crate::domain::import::{ConflictAction, ConflictPolicy, ImportReport, NormalizedRow, RawRow};
use crate::domain::types::{AssetCondition, AssetStatus, ReferenceKind};
use crate::importer::error::RowFailure;
use crate::importer::import_report::ImportReportAggregator;
use crate::importer::lookup_resolver::LookupResolver;
use crate::importer::row_validator::RowValidator;
use crate::repository::asset_repo::AssetRepository;
use tracing::{debug, warn};

/// 新建资产时未填写状态/成色的默认值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportDefaults {
    pub status: AssetStatus,
    pub condition: AssetCondition,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            status: AssetStatus::FALLBACK,
            condition: AssetCondition::FALLBACK,
        }
    }
}

/// 数据行 index（0 起）→ 报告行号（表头为第 1 行）
pub fn report_row_number(index: usize) -> usize {
    index + 2
}

// ==========================================
// ReconciliationEngine
// ==========================================
pub struct ReconciliationEngine<'a, R>
where
    R: AssetRepository + ?Sized,
{
    repo: &'a R,
    validator: RowValidator,
    policy: ConflictPolicy,
    defaults: ImportDefaults,
}

impl<'a, R> ReconciliationEngine<'a, R>
where
    R: AssetRepository + ?Sized,
{
    pub fn new(repo: &'a R, policy: ConflictPolicy, defaults: ImportDefaults) -> Self {
        Self {
            repo,
            validator: RowValidator::new(),
            policy,
            defaults,
        }
    }

    /// 处理一批原始行
    ///
    /// # 参数
    /// - rows: 源适配器输出的行（已去除表头与空白行）
    /// - resolver: 本次导入独占的参照解析器（调用方负责预热）
    pub async fn process_batch(
        &self,
        rows: &[RawRow],
        resolver: &mut LookupResolver,
    ) -> ImportReport {
        let mut aggregator = ImportReportAggregator::new();

        for (idx, raw) in rows.iter().enumerate() {
            let row_number = report_row_number(idx);

            let normalized = match self.validator.validate(raw) {
                Ok(row) => row,
                Err(failure) => {
                    debug!(row = row_number, error = %failure, "行校验失败");
                    aggregator.record_error(row_number, &failure);
                    continue;
                }
            };

            match self.reconcile_row(normalized, resolver).await {
                Ok(action) => aggregator.record_action(action),
                Err(failure) => {
                    if matches!(failure, RowFailure::PersistenceFailure(_)) {
                        warn!(row = row_number, error = %failure, "行落库失败");
                    }
                    aggregator.record_error(row_number, &failure);
                }
            }
        }

        aggregator.finish()
    }

    async fn reconcile_row(
        &self,
        row: NormalizedRow,
        resolver: &mut LookupResolver,
    ) -> Result<ConflictAction, RowFailure> {
        let existing = self.repo.find_by_item_number(&row.item_number).await?;
        let draft = self.build_draft(row, resolver).await?;

        match existing {
            None => {
                let fields =
                    AssetFields::from_draft(&draft, self.defaults.status, self.defaults.condition);
                self.repo.insert_asset(&draft.item_number, &fields).await?;
                Ok(ConflictAction::Create)
            }
            Some(asset) => self.apply_policy(asset, draft).await,
        }
    }

    async fn apply_policy(
        &self,
        asset: Asset,
        draft: AssetDraft,
    ) -> Result<ConflictAction, RowFailure> {
        match self.policy.resolve(true) {
            ConflictAction::Update => {
                let fields = asset.fields.merged_with(&draft);
                self.repo.update_asset(asset.id, &fields).await?;
                Ok(ConflictAction::Update)
            }
            ConflictAction::Skip => Ok(ConflictAction::Skip),
            ConflictAction::Create | ConflictAction::Reject => Err(RowFailure::DuplicateKey {
                item_number: draft.item_number,
            }),
        }
    }

    /// 解析四类参照并组装草稿
    async fn build_draft(
        &self,
        row: NormalizedRow,
        resolver: &mut LookupResolver,
    ) -> Result<AssetDraft, RowFailure> {
        let mut draft = AssetDraft {
            item_number: row.item_number,
            serial_number: row.serial_number,
            model: row.model,
            description: row.description,
            status: row.status,
            condition: row.condition,
            acquired_date: row.acquired_date,
            purchase_price: row.purchase_price,
            order_number: row.order_number,
            hostname: row.hostname,
            device_username: row.device_username,
            device_password: row.device_password,
            lan_mac: row.lan_mac,
            wlan_mac: row.wlan_mac,
            ip_addresses: row.ip_addresses,
            assigned_to: row.assigned_to,
            warranty_expiration: row.warranty_expiration,
            end_of_life_date: row.end_of_life_date,
            comments: row.comments,
            ..AssetDraft::default()
        };

        let names = [
            (ReferenceKind::Manufacturer, row.manufacturer),
            (ReferenceKind::Category, row.category),
            (ReferenceKind::Supplier, row.supplier),
            (ReferenceKind::Location, row.location),
        ];
        for (kind, name) in names {
            let id = resolver.resolve(self.repo, kind, name.as_deref()).await?;
            draft.set_reference(kind, id);
        }

        Ok(draft)
    }
}
