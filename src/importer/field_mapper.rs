// ==========================================
// 资产台账后台 - 字段映射器实现
// ==========================================
// 职责: 表头 → AssetField 列映射（CSV 与电子表格共用）
// 规则: 表头转小写并去除非字母字符，按固定顺序做子串匹配
//       同一字段只取第一个匹配列
// ==========================================

use crate::domain::types::AssetField;

/// 表头匹配规则（顺序敏感）
///
/// - WLAN MAC 须先于 LAN MAC（"wlanmac" 包含 "lanmac"）
/// - IP 只匹配 "ipaddress"/"ipaddr"（"description" 含 "ip"）
/// - 各类编号先于通用词
const HEADER_PATTERNS: &[(AssetField, &[&str])] = &[
    (AssetField::ItemNumber, &["itemnumber", "itemno", "assettag"]),
    (AssetField::SerialNumber, &["serial"]),
    (AssetField::OrderNumber, &["ordernumber", "orderno", "ponumber"]),
    (AssetField::WlanMac, &["wlanmac", "wifimac"]),
    (AssetField::LanMac, &["lanmac", "ethernetmac"]),
    (AssetField::IpAddress, &["ipaddress", "ipaddr"]),
    (AssetField::DeviceUsername, &["username"]),
    (AssetField::DevicePassword, &["password"]),
    (AssetField::Hostname, &["hostname"]),
    (AssetField::Manufacturer, &["manufacturer", "make", "brand"]),
    (AssetField::Model, &["model"]),
    (AssetField::Category, &["category", "type"]),
    (AssetField::Description, &["description"]),
    (AssetField::Status, &["status"]),
    (AssetField::Condition, &["condition"]),
    (AssetField::AcquiredDate, &["acquired", "purchasedate"]),
    (AssetField::PurchasePrice, &["price", "unitcost", "purchasecost"]),
    (AssetField::Supplier, &["supplier", "vendor"]),
    (AssetField::AssignedTo, &["assignedto", "assignee"]),
    (AssetField::Location, &["location"]),
    (AssetField::WarrantyExpiration, &["warranty"]),
    (AssetField::EndOfLifeDate, &["endoflife", "eol"]),
    (AssetField::Comments, &["comment", "notes"]),
];

// ==========================================
// ColumnMap - 列索引映射
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: Vec<(usize, AssetField)>,
}

impl ColumnMap {
    /// 字段对应的列索引
    pub fn get(&self, field: AssetField) -> Option<usize> {
        self.columns
            .iter()
            .find(|(_, f)| *f == field)
            .map(|(idx, _)| *idx)
    }

    /// (列索引, 字段)，按列顺序
    pub fn iter(&self) -> impl Iterator<Item = (usize, AssetField)> + '_ {
        self.columns.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ==========================================
// FieldMapper
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper;

impl FieldMapper {
    /// 表头标准化: 小写 + 仅保留字母
    pub fn normalize_header(header: &str) -> String {
        header
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }

    /// 单个表头 → 字段
    pub fn match_header(&self, header: &str) -> Option<AssetField> {
        let normalized = Self::normalize_header(header);
        if normalized.is_empty() {
            return None;
        }

        HEADER_PATTERNS
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| normalized.contains(p)))
            .map(|(field, _)| *field)
    }

    /// 表头行 → 列映射
    pub fn map_headers<S: AsRef<str>>(&self, headers: &[S]) -> ColumnMap {
        let mut columns: Vec<(usize, AssetField)> = Vec::new();

        for (idx, header) in headers.iter().enumerate() {
            let Some(field) = self.match_header(header.as_ref()) else {
                continue;
            };
            if columns.iter().any(|(_, f)| *f == field) {
                continue;
            }
            columns.push((idx, field));
        }

        ColumnMap { columns }
    }
}
