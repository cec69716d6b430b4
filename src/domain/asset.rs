// ==========================================
// 资产台账后台 - 资产领域模型
// ==========================================
// 职责: 资产主数据、参照实体、导出行
// 红线: item_number 为业务主键，创建后不可修改
// ==========================================

use crate::domain::types::{AssetCondition, AssetStatus, ReferenceKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Asset - 资产主数据
// ==========================================
// 对齐: asset 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    // ===== 主键 =====
    pub id: i64,
    pub item_number: String, // 资产编号（业务主键，大小写敏感）

    // ===== 可变字段 =====
    #[serde(flatten)]
    pub fields: AssetFields,

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// AssetFields - 资产可变字段
// ==========================================
// 新建与更新共用；外键保存参照实体 id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    // ===== 基础信息 =====
    pub serial_number: Option<String>,
    pub manufacturer_id: Option<i64>,
    pub model: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub status: AssetStatus,
    pub condition: AssetCondition,

    // ===== 采购信息 =====
    pub acquired_date: Option<NaiveDate>,
    pub purchase_price: Option<f64>, // 非负
    pub supplier_id: Option<i64>,
    pub order_number: Option<String>,

    // ===== 网络标识 =====
    pub hostname: Option<String>,
    pub device_username: Option<String>,
    pub device_password: Option<String>,
    pub lan_mac: Option<String>,
    pub wlan_mac: Option<String>,
    pub ip_addresses: Vec<String>,

    // ===== 使用与生命周期 =====
    pub assigned_to: Option<String>,
    pub location_id: Option<i64>,
    pub warranty_expiration: Option<NaiveDate>,
    pub end_of_life_date: Option<NaiveDate>,
    pub comments: Option<String>,
}

impl AssetFields {
    /// 由导入草稿生成新资产字段（未填写的状态/成色取默认值）
    pub fn from_draft(
        draft: &AssetDraft,
        default_status: AssetStatus,
        default_condition: AssetCondition,
    ) -> Self {
        Self {
            serial_number: draft.serial_number.clone(),
            manufacturer_id: draft.manufacturer_id,
            model: draft.model.clone(),
            category_id: draft.category_id,
            description: draft.description.clone(),
            status: draft.status.unwrap_or(default_status),
            condition: draft.condition.unwrap_or(default_condition),
            acquired_date: draft.acquired_date,
            purchase_price: draft.purchase_price,
            supplier_id: draft.supplier_id,
            order_number: draft.order_number.clone(),
            hostname: draft.hostname.clone(),
            device_username: draft.device_username.clone(),
            device_password: draft.device_password.clone(),
            lan_mac: draft.lan_mac.clone(),
            wlan_mac: draft.wlan_mac.clone(),
            ip_addresses: draft.ip_addresses.clone().unwrap_or_default(),
            assigned_to: draft.assigned_to.clone(),
            location_id: draft.location_id,
            warranty_expiration: draft.warranty_expiration,
            end_of_life_date: draft.end_of_life_date,
            comments: draft.comments.clone(),
        }
    }

    /// 用导入草稿覆盖已有字段
    ///
    /// # 规则
    /// - 文本字段/状态/成色: 草稿未设置则保留原值
    /// - 参照外键/日期/价格: 一律以草稿为准（空值即清空）
    pub fn merged_with(&self, draft: &AssetDraft) -> Self {
        fn keep(new: &Option<String>, old: &Option<String>) -> Option<String> {
            new.clone().or_else(|| old.clone())
        }

        Self {
            serial_number: keep(&draft.serial_number, &self.serial_number),
            manufacturer_id: draft.manufacturer_id,
            model: keep(&draft.model, &self.model),
            category_id: draft.category_id,
            description: keep(&draft.description, &self.description),
            status: draft.status.unwrap_or(self.status),
            condition: draft.condition.unwrap_or(self.condition),
            acquired_date: draft.acquired_date,
            purchase_price: draft.purchase_price,
            supplier_id: draft.supplier_id,
            order_number: keep(&draft.order_number, &self.order_number),
            hostname: keep(&draft.hostname, &self.hostname),
            device_username: keep(&draft.device_username, &self.device_username),
            device_password: keep(&draft.device_password, &self.device_password),
            lan_mac: keep(&draft.lan_mac, &self.lan_mac),
            wlan_mac: keep(&draft.wlan_mac, &self.wlan_mac),
            ip_addresses: draft
                .ip_addresses
                .clone()
                .unwrap_or_else(|| self.ip_addresses.clone()),
            assigned_to: keep(&draft.assigned_to, &self.assigned_to),
            location_id: draft.location_id,
            warranty_expiration: draft.warranty_expiration,
            end_of_life_date: draft.end_of_life_date,
            comments: keep(&draft.comments, &self.comments),
        }
    }
}

// ==========================================
// AssetDraft - 导入草稿
// ==========================================
// 用途: 行校验 + 参照解析之后、落库之前的中间结构
// 生命周期: 仅在一次导入调用内
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetDraft {
    pub item_number: String,
    pub serial_number: Option<String>,
    pub manufacturer_id: Option<i64>,
    pub model: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub status: Option<AssetStatus>,
    pub condition: Option<AssetCondition>,
    pub acquired_date: Option<NaiveDate>,
    pub purchase_price: Option<f64>,
    pub supplier_id: Option<i64>,
    pub order_number: Option<String>,
    pub hostname: Option<String>,
    pub device_username: Option<String>,
    pub device_password: Option<String>,
    pub lan_mac: Option<String>,
    pub wlan_mac: Option<String>,
    pub ip_addresses: Option<Vec<String>>,
    pub assigned_to: Option<String>,
    pub location_id: Option<i64>,
    pub warranty_expiration: Option<NaiveDate>,
    pub end_of_life_date: Option<NaiveDate>,
    pub comments: Option<String>,
}

impl AssetDraft {
    /// 设置参照外键
    pub fn set_reference(&mut self, kind: ReferenceKind, id: Option<i64>) {
        match kind {
            ReferenceKind::Manufacturer => self.manufacturer_id = id,
            ReferenceKind::Category => self.category_id = id,
            ReferenceKind::Supplier => self.supplier_id = id,
            ReferenceKind::Location => self.location_id = id,
        }
    }
}

// ==========================================
// ReferenceEntity - 参照实体（厂商/分类/供应商/位置）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntity {
    pub id: i64,
    pub name: String,
}

// ==========================================
// AssetExportRow - 导出行
// ==========================================
// 外键已解析为显示名称
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetExportRow {
    pub item_number: String,
    pub fields: AssetFields,
    pub manufacturer: Option<String>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_fields() -> AssetFields {
        AssetFields {
            serial_number: Some("SN-OLD".to_string()),
            manufacturer_id: Some(1),
            model: Some("T480".to_string()),
            category_id: Some(2),
            description: None,
            status: AssetStatus::InUse,
            condition: AssetCondition::Fair,
            acquired_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            purchase_price: Some(999.0),
            supplier_id: Some(3),
            order_number: None,
            hostname: Some("old-host".to_string()),
            device_username: None,
            device_password: None,
            lan_mac: None,
            wlan_mac: None,
            ip_addresses: vec!["10.0.0.1".to_string()],
            assigned_to: Some("alice".to_string()),
            location_id: Some(4),
            warranty_expiration: None,
            end_of_life_date: None,
            comments: None,
        }
    }

    #[test]
    fn test_from_draft_applies_fallbacks() {
        let draft = AssetDraft {
            item_number: "A1".to_string(),
            ..Default::default()
        };
        let fields = AssetFields::from_draft(&draft, AssetStatus::InStock, AssetCondition::Good);
        assert_eq!(fields.status, AssetStatus::InStock);
        assert_eq!(fields.condition, AssetCondition::Good);
        assert!(fields.ip_addresses.is_empty());
    }

    #[test]
    fn test_merge_keeps_unset_text_and_clears_references() {
        let draft = AssetDraft {
            item_number: "A1".to_string(),
            model: Some("T490".to_string()),
            ..Default::default()
        };
        let merged = existing_fields().merged_with(&draft);

        assert_eq!(merged.model, Some("T490".to_string()));
        assert_eq!(merged.serial_number, Some("SN-OLD".to_string()));
        assert_eq!(merged.hostname, Some("old-host".to_string()));
        assert_eq!(merged.status, AssetStatus::InUse);
        assert_eq!(merged.condition, AssetCondition::Fair);
        assert_eq!(merged.ip_addresses, vec!["10.0.0.1".to_string()]);

        assert_eq!(merged.manufacturer_id, None);
        assert_eq!(merged.location_id, None);
        assert_eq!(merged.acquired_date, None);
        assert_eq!(merged.purchase_price, None);
    }
}
