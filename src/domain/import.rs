// ==========================================
// 资产台账后台 - 导入领域模型
// ==========================================
// 职责: 导入管道的中间产物与结果汇总
// 流程: 文件 → RawRow → NormalizedRow → AssetDraft → ImportReport
// ==========================================

use crate::domain::types::{AssetCondition, AssetField, AssetStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// CellValue - 单元格值
// ==========================================
// 由文件解析器一次性解码；公式单元格保留缓存结果
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    FormulaResult(Box<CellValue>),
}

impl CellValue {
    /// 剥离公式包装，返回实际值
    pub fn resolved(&self) -> &CellValue {
        match self {
            CellValue::FormulaResult(inner) => inner.resolved(),
            other => other,
        }
    }

    /// 转为去空白文本；空白返回 None
    ///
    /// 整数值数字输出不带小数（资产编号常被 Excel 识别为数字）
    pub fn as_text(&self) -> Option<String> {
        let text = match self.resolved() {
            CellValue::Empty | CellValue::FormulaResult(_) => return None,
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        };

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn is_blank(&self) -> bool {
        self.as_text().is_none()
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

// ==========================================
// RawRow - 原始行
// ==========================================
// 字段名已统一为 AssetField，值尚未校验
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<AssetField, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 测试/CSV 便捷构造
    pub fn from_pairs(pairs: &[(AssetField, &str)]) -> Self {
        let mut row = Self::new();
        for (field, value) in pairs {
            row.insert(*field, CellValue::from(*value));
        }
        row
    }

    pub fn insert(&mut self, field: AssetField, value: CellValue) {
        self.cells.insert(field, value);
    }

    pub fn get(&self, field: AssetField) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(&field).unwrap_or(&EMPTY)
    }

    pub fn text(&self, field: AssetField) -> Option<String> {
        self.get(field).as_text()
    }

    /// 整行是否全为空白
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_blank)
    }
}

// ==========================================
// NormalizedRow - 校验后行
// ==========================================
// None 表示"未设置"，参照字段保留原始名称待解析
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    pub item_number: String,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub status: Option<AssetStatus>,
    pub condition: Option<AssetCondition>,
    pub acquired_date: Option<NaiveDate>,
    pub purchase_price: Option<f64>,
    pub supplier: Option<String>,
    pub order_number: Option<String>,
    pub hostname: Option<String>,
    pub device_username: Option<String>,
    pub device_password: Option<String>,
    pub lan_mac: Option<String>,
    pub wlan_mac: Option<String>,
    pub ip_addresses: Option<Vec<String>>,
    pub assigned_to: Option<String>,
    pub location: Option<String>,
    pub warranty_expiration: Option<NaiveDate>,
    pub end_of_life_date: Option<NaiveDate>,
    pub comments: Option<String>,
}

// ==========================================
// ConflictPolicy - 重复业务主键处理策略
// ==========================================
// 查询参数: ?skipDuplicates=<bool>&updateExisting=<bool>
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictPolicy {
    #[serde(default)]
    pub skip_duplicates: bool,
    #[serde(default)]
    pub update_existing: bool,
}

/// 对单行采取的落库动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictAction {
    Create,
    Update,
    Skip,
    Reject,
}

impl ConflictPolicy {
    pub fn reject() -> Self {
        Self::default()
    }

    pub fn skip() -> Self {
        Self {
            skip_duplicates: true,
            update_existing: false,
        }
    }

    pub fn update() -> Self {
        Self {
            skip_duplicates: false,
            update_existing: true,
        }
    }

    /// 判定动作：update_existing 先于 skip_duplicates 检查
    pub fn resolve(&self, exists: bool) -> ConflictAction {
        if !exists {
            ConflictAction::Create
        } else if self.update_existing {
            ConflictAction::Update
        } else if self.skip_duplicates {
            ConflictAction::Skip
        } else {
            ConflictAction::Reject
        }
    }
}

// ==========================================
// ImportReport - 导入结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<RowError>,
}

/// 行错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowErrorKind {
    MissingKey,
    InvalidEnum,
    DuplicateKey,
    PersistenceFailure,
}

/// 单行错误（row 为含表头的 1 起行号）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    pub message: String,
    #[serde(skip)]
    pub kind: Option<RowErrorKind>,
}

// ==========================================
// UploadedFile - 上传文件
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_text() {
        assert_eq!(CellValue::Text("  A1 ".into()).as_text(), Some("A1".to_string()));
        assert_eq!(CellValue::Text("   ".into()).as_text(), None);
        assert_eq!(CellValue::Number(1001.0).as_text(), Some("1001".to_string()));
        assert_eq!(CellValue::Number(12.5).as_text(), Some("12.5".to_string()));
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_formula_result_unwraps() {
        let cell = CellValue::FormulaResult(Box::new(CellValue::Text("X".into())));
        assert_eq!(cell.resolved(), &CellValue::Text("X".into()));
        assert_eq!(cell.as_text(), Some("X".to_string()));
    }

    #[test]
    fn test_policy_update_wins() {
        let both = ConflictPolicy {
            skip_duplicates: true,
            update_existing: true,
        };
        assert_eq!(both.resolve(true), ConflictAction::Update);
        assert_eq!(both.resolve(false), ConflictAction::Create);
        assert_eq!(ConflictPolicy::skip().resolve(true), ConflictAction::Skip);
        assert_eq!(ConflictPolicy::reject().resolve(true), ConflictAction::Reject);
    }

    #[test]
    fn test_report_json_shape() {
        let report = ImportReport {
            created: 1,
            updated: 0,
            skipped: 2,
            errors: vec![RowError {
                row: 3,
                message: "x".to_string(),
                kind: Some(RowErrorKind::DuplicateKey),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "created": 1, "updated": 0, "skipped": 2,
                "errors": [{"row": 3, "message": "x"}]
            })
        );
    }
}
