// ==========================================
// 资产台账后台 - 领域类型定义
// ==========================================
// 职责: 资产状态/成色枚举、参照实体类型、导入列定义
// 序列化格式: 与模板下拉列表、数据库存储值一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 资产状态 (Asset Status)
// ==========================================
// 固定 15 个标签，导入时大小写不敏感匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetStatus {
    #[serde(rename = "In Use")]
    InUse,
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Assigned")]
    Assigned,
    #[serde(rename = "Deployed")]
    Deployed,
    #[serde(rename = "Reserved")]
    Reserved,
    #[serde(rename = "Loaned")]
    Loaned,
    #[serde(rename = "Ordered")]
    Ordered,
    #[serde(rename = "In Repair")]
    InRepair,
    #[serde(rename = "Awaiting Repair")]
    AwaitingRepair,
    #[serde(rename = "Lost")]
    Lost,
    #[serde(rename = "Stolen")]
    Stolen,
    #[serde(rename = "Pending Disposal")]
    PendingDisposal,
    #[serde(rename = "Retired")]
    Retired,
    #[serde(rename = "Disposed")]
    Disposed,
}

impl AssetStatus {
    /// 全部状态（模板下拉顺序）
    pub const ALL: [AssetStatus; 15] = [
        AssetStatus::InUse,
        AssetStatus::InStock,
        AssetStatus::Available,
        AssetStatus::Assigned,
        AssetStatus::Deployed,
        AssetStatus::Reserved,
        AssetStatus::Loaned,
        AssetStatus::Ordered,
        AssetStatus::InRepair,
        AssetStatus::AwaitingRepair,
        AssetStatus::Lost,
        AssetStatus::Stolen,
        AssetStatus::PendingDisposal,
        AssetStatus::Retired,
        AssetStatus::Disposed,
    ];

    /// 新建资产未填写状态时的默认值
    pub const FALLBACK: AssetStatus = AssetStatus::InStock;

    pub fn label(&self) -> &'static str {
        match self {
            AssetStatus::InUse => "In Use",
            AssetStatus::InStock => "In Stock",
            AssetStatus::Available => "Available",
            AssetStatus::Assigned => "Assigned",
            AssetStatus::Deployed => "Deployed",
            AssetStatus::Reserved => "Reserved",
            AssetStatus::Loaned => "Loaned",
            AssetStatus::Ordered => "Ordered",
            AssetStatus::InRepair => "In Repair",
            AssetStatus::AwaitingRepair => "Awaiting Repair",
            AssetStatus::Lost => "Lost",
            AssetStatus::Stolen => "Stolen",
            AssetStatus::PendingDisposal => "Pending Disposal",
            AssetStatus::Retired => "Retired",
            AssetStatus::Disposed => "Disposed",
        }
    }

    /// 大小写不敏感匹配标签（首尾空白忽略）
    pub fn from_label(value: &str) -> Option<AssetStatus> {
        let needle = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.label().eq_ignore_ascii_case(needle))
    }

    /// 全部标签，逗号分隔（用于错误提示）
    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// 资产成色 (Asset Condition)
// ==========================================
// 序列化格式: 全大写（与数据库一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCondition {
    New,
    Good,
    Fair,
    Poor,
    Broken,
}

impl AssetCondition {
    pub const ALL: [AssetCondition; 5] = [
        AssetCondition::New,
        AssetCondition::Good,
        AssetCondition::Fair,
        AssetCondition::Poor,
        AssetCondition::Broken,
    ];

    /// 新建资产未填写成色时的默认值
    pub const FALLBACK: AssetCondition = AssetCondition::Good;

    pub fn label(&self) -> &'static str {
        match self {
            AssetCondition::New => "NEW",
            AssetCondition::Good => "GOOD",
            AssetCondition::Fair => "FAIR",
            AssetCondition::Poor => "POOR",
            AssetCondition::Broken => "BROKEN",
        }
    }

    /// 先转大写，再精确匹配
    pub fn from_label(value: &str) -> Option<AssetCondition> {
        let upper = value.trim().to_uppercase();
        Self::ALL.iter().copied().find(|c| c.label() == upper)
    }

    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AssetCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// 参照实体类型 (Reference Kind)
// ==========================================
// 四张按名称查找的参照表，名称在各自表内大小写不敏感唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Manufacturer,
    Category,
    Supplier,
    Location,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 4] = [
        ReferenceKind::Manufacturer,
        ReferenceKind::Category,
        ReferenceKind::Supplier,
        ReferenceKind::Location,
    ];

    /// 对应的数据库表名（仅内部常量，不接受外部输入）
    pub fn table_name(&self) -> &'static str {
        match self {
            ReferenceKind::Manufacturer => "manufacturer",
            ReferenceKind::Category => "category",
            ReferenceKind::Supplier => "supplier",
            ReferenceKind::Location => "location",
        }
    }

    pub fn field(&self) -> AssetField {
        match self {
            ReferenceKind::Manufacturer => AssetField::Manufacturer,
            ReferenceKind::Category => AssetField::Category,
            ReferenceKind::Supplier => AssetField::Supplier,
            ReferenceKind::Location => AssetField::Location,
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

// ==========================================
// 导入/导出列 (Asset Field)
// ==========================================
// 列顺序固定，模板、导出、导入三处共用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetField {
    ItemNumber,
    SerialNumber,
    Manufacturer,
    Model,
    Category,
    Description,
    Status,
    Condition,
    AcquiredDate,
    PurchasePrice,
    Supplier,
    OrderNumber,
    Hostname,
    DeviceUsername,
    DevicePassword,
    LanMac,
    WlanMac,
    IpAddress,
    AssignedTo,
    Location,
    WarrantyExpiration,
    EndOfLifeDate,
    Comments,
}

impl AssetField {
    pub const ALL: [AssetField; 23] = [
        AssetField::ItemNumber,
        AssetField::SerialNumber,
        AssetField::Manufacturer,
        AssetField::Model,
        AssetField::Category,
        AssetField::Description,
        AssetField::Status,
        AssetField::Condition,
        AssetField::AcquiredDate,
        AssetField::PurchasePrice,
        AssetField::Supplier,
        AssetField::OrderNumber,
        AssetField::Hostname,
        AssetField::DeviceUsername,
        AssetField::DevicePassword,
        AssetField::LanMac,
        AssetField::WlanMac,
        AssetField::IpAddress,
        AssetField::AssignedTo,
        AssetField::Location,
        AssetField::WarrantyExpiration,
        AssetField::EndOfLifeDate,
        AssetField::Comments,
    ];

    /// 模板表头（带 * 为必填）
    pub fn header(&self) -> &'static str {
        match self {
            AssetField::ItemNumber => "Item Number*",
            AssetField::SerialNumber => "Serial Number",
            AssetField::Manufacturer => "Manufacturer",
            AssetField::Model => "Model",
            AssetField::Category => "Category",
            AssetField::Description => "Description",
            AssetField::Status => "Status",
            AssetField::Condition => "Condition",
            AssetField::AcquiredDate => "Acquired Date",
            AssetField::PurchasePrice => "Purchase Price",
            AssetField::Supplier => "Supplier",
            AssetField::OrderNumber => "Order Number",
            AssetField::Hostname => "Hostname",
            AssetField::DeviceUsername => "Device Username",
            AssetField::DevicePassword => "Device Password",
            AssetField::LanMac => "LAN MAC",
            AssetField::WlanMac => "WLAN MAC",
            AssetField::IpAddress => "IP Address",
            AssetField::AssignedTo => "Assigned To",
            AssetField::Location => "Location",
            AssetField::WarrantyExpiration => "Warranty Expiration",
            AssetField::EndOfLifeDate => "End of Life Date",
            AssetField::Comments => "Comments",
        }
    }

    /// 规范字段名（camelCase，与 JSON/CSV 机读表头一致）
    pub fn key(&self) -> &'static str {
        match self {
            AssetField::ItemNumber => "itemNumber",
            AssetField::SerialNumber => "serialNumber",
            AssetField::Manufacturer => "manufacturer",
            AssetField::Model => "model",
            AssetField::Category => "category",
            AssetField::Description => "description",
            AssetField::Status => "status",
            AssetField::Condition => "condition",
            AssetField::AcquiredDate => "acquiredDate",
            AssetField::PurchasePrice => "purchasePrice",
            AssetField::Supplier => "supplier",
            AssetField::OrderNumber => "orderNumber",
            AssetField::Hostname => "hostname",
            AssetField::DeviceUsername => "deviceUsername",
            AssetField::DevicePassword => "devicePassword",
            AssetField::LanMac => "lanMac",
            AssetField::WlanMac => "wlanMac",
            AssetField::IpAddress => "ipAddress",
            AssetField::AssignedTo => "assignedTo",
            AssetField::Location => "location",
            AssetField::WarrantyExpiration => "warrantyExpiration",
            AssetField::EndOfLifeDate => "endOfLifeDate",
            AssetField::Comments => "comments",
        }
    }

    /// 列序号（0 起）
    pub fn column_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|f| f == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for AssetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
