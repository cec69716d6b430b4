// ==========================================
// 资产台账后台 - 导入结果汇总
// ==========================================
// 职责: 累加 created/updated/skipped 计数与逐行错误
// 约定: 错误按记录顺序保留；单行失败不终止批次
// ==========================================

use crate::domain::import::{ConflictAction, ImportReport, RowError};
use crate::importer::error::RowFailure;

#[derive(Debug, Clone, Default)]
pub struct ImportReportAggregator {
    report: ImportReport,
}

impl ImportReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_created(&mut self) {
        self.report.created += 1;
    }

    pub fn record_updated(&mut self) {
        self.report.updated += 1;
    }

    pub fn record_skipped(&mut self) {
        self.report.skipped += 1;
    }

    /// 按落库动作计数（Reject 不计数，由 record_error 记录）
    pub fn record_action(&mut self, action: ConflictAction) {
        match action {
            ConflictAction::Create => self.record_created(),
            ConflictAction::Update => self.record_updated(),
            ConflictAction::Skip => self.record_skipped(),
            ConflictAction::Reject => {}
        }
    }

    /// 记录单行错误（row 为含表头的 1 起行号）
    pub fn record_error(&mut self, row: usize, failure: &RowFailure) {
        self.report.errors.push(RowError {
            row,
            message: failure.message(),
            kind: Some(failure.kind()),
        });
    }

    pub fn error_count(&self) -> usize {
        self.report.errors.len()
    }

    pub fn finish(self) -> ImportReport {
        self.report
    }
}
