// ==========================================
// 资产台账后台 - 行校验器
// ==========================================
// 职责: 单行校验与标准化 RawRow → NormalizedRow
// 规则:
// - 资产编号必填（TRIM 后非空）
// - 状态: 大小写不敏感匹配 15 个固定标签
// - 成色: 转大写后精确匹配 5 个固定标签
// - 状态/成色为空 → 未设置（新建取默认值，更新保留原值）
// - 日期/价格无法解析 → None，不报错
// ==========================================

use crate::domain::import::{NormalizedRow, RawRow};
use crate::domain::types::{AssetCondition, AssetField, AssetStatus};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::RowFailure;

#[derive(Debug, Clone, Copy, Default)]
pub struct RowValidator {
    cleaner: DataCleaner,
}

impl RowValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 校验并标准化一行
    ///
    /// # 返回
    /// - Ok(NormalizedRow): 校验通过
    /// - Err(RowFailure::MissingKey | RowFailure::InvalidEnum): 整行跳过
    pub fn validate(&self, row: &RawRow) -> Result<NormalizedRow, RowFailure> {
        let item_number = row
            .text(AssetField::ItemNumber)
            .ok_or(RowFailure::MissingKey)?;

        let status = self.validate_status(row)?;
        let condition = self.validate_condition(row)?;

        let text = |field: AssetField| self.cleaner.normalize_text(row.get(field));
        let date = |field: AssetField| self.cleaner.parse_date(row.get(field));

        Ok(NormalizedRow {
            item_number,
            serial_number: text(AssetField::SerialNumber),
            manufacturer: text(AssetField::Manufacturer),
            model: text(AssetField::Model),
            category: text(AssetField::Category),
            description: text(AssetField::Description),
            status,
            condition,
            acquired_date: date(AssetField::AcquiredDate),
            purchase_price: self.cleaner.parse_price(row.get(AssetField::PurchasePrice)),
            supplier: text(AssetField::Supplier),
            order_number: text(AssetField::OrderNumber),
            hostname: text(AssetField::Hostname),
            device_username: text(AssetField::DeviceUsername),
            device_password: text(AssetField::DevicePassword),
            lan_mac: text(AssetField::LanMac),
            wlan_mac: text(AssetField::WlanMac),
            ip_addresses: self
                .cleaner
                .split_ip_addresses(row.get(AssetField::IpAddress)),
            assigned_to: text(AssetField::AssignedTo),
            location: text(AssetField::Location),
            warranty_expiration: date(AssetField::WarrantyExpiration),
            end_of_life_date: date(AssetField::EndOfLifeDate),
            comments: text(AssetField::Comments),
        })
    }

    fn validate_status(&self, row: &RawRow) -> Result<Option<AssetStatus>, RowFailure> {
        let Some(raw) = row.text(AssetField::Status) else {
            return Ok(None);
        };

        AssetStatus::from_label(&raw)
            .map(Some)
            .ok_or_else(|| RowFailure::InvalidEnum {
                field: AssetField::Status,
                value: raw,
                valid: AssetStatus::valid_labels(),
            })
    }

    fn validate_condition(&self, row: &RawRow) -> Result<Option<AssetCondition>, RowFailure> {
        let Some(raw) = row.text(AssetField::Condition) else {
            return Ok(None);
        };

        AssetCondition::from_label(&raw)
            .map(Some)
            .ok_or_else(|| RowFailure::InvalidEnum {
                field: AssetField::Condition,
                value: raw,
                valid: AssetCondition::valid_labels(),
            })
    }
}
