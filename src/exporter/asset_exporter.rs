// ==========================================
// 资产台账后台 - 资产导出
// ==========================================
// 输出: 单个数据表，列布局与导入模板一致（23 列）
// - 参照外键输出为名称
// - 日期输出为 YYYY-MM-DD 文本，价格为数字
// - IP 地址以 ", " 拼接
// 导出文件可直接作为导入文件回传
// ==========================================

use crate::domain::asset::AssetExportRow;
use crate::domain::types::AssetField;
use crate::exporter::error::ExportResult;
use crate::exporter::template_builder::write_header_row;
use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, Worksheet};

/// 导出单元格
#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone)]
pub struct AssetExporter {
    data_sheet_name: String,
}

impl AssetExporter {
    pub fn new(data_sheet_name: impl Into<String>) -> Self {
        Self {
            data_sheet_name: data_sheet_name.into(),
        }
    }

    /// 生成导出 xlsx 字节
    pub fn export(&self, rows: &[AssetExportRow]) -> ExportResult<Vec<u8>> {
        let mut sheet = Worksheet::new();
        sheet.set_name(&self.data_sheet_name)?;
        write_header_row(&mut sheet)?;

        for (idx, asset) in rows.iter().enumerate() {
            let row = idx as u32 + 1;
            for field in AssetField::ALL {
                let col = field.column_index() as u16;
                match export_cell(asset, field) {
                    Some(ExportCell::Text(text)) => {
                        sheet.write_string(row, col, text)?;
                    }
                    Some(ExportCell::Number(n)) => {
                        sheet.write_number(row, col, n)?;
                    }
                    None => {}
                }
            }
        }

        let mut workbook = Workbook::new();
        workbook.push_worksheet(sheet);
        Ok(workbook.save_to_buffer()?)
    }
}

/// 单个资产在指定列上的取值
pub fn export_cell(asset: &AssetExportRow, field: AssetField) -> Option<ExportCell> {
    let fields = &asset.fields;
    let text = |value: &Option<String>| value.clone().map(ExportCell::Text);
    let date = |value: &Option<NaiveDate>| {
        value.map(|d| ExportCell::Text(d.format("%Y-%m-%d").to_string()))
    };

    match field {
        AssetField::ItemNumber => Some(ExportCell::Text(asset.item_number.clone())),
        AssetField::SerialNumber => text(&fields.serial_number),
        AssetField::Manufacturer => text(&asset.manufacturer),
        AssetField::Model => text(&fields.model),
        AssetField::Category => text(&asset.category),
        AssetField::Description => text(&fields.description),
        AssetField::Status => Some(ExportCell::Text(fields.status.label().to_string())),
        AssetField::Condition => Some(ExportCell::Text(fields.condition.label().to_string())),
        AssetField::AcquiredDate => date(&fields.acquired_date),
        AssetField::PurchasePrice => fields.purchase_price.map(ExportCell::Number),
        AssetField::Supplier => text(&asset.supplier),
        AssetField::OrderNumber => text(&fields.order_number),
        AssetField::Hostname => text(&fields.hostname),
        AssetField::DeviceUsername => text(&fields.device_username),
        AssetField::DevicePassword => text(&fields.device_password),
        AssetField::LanMac => text(&fields.lan_mac),
        AssetField::WlanMac => text(&fields.wlan_mac),
        AssetField::IpAddress => {
            if fields.ip_addresses.is_empty() {
                None
            } else {
                Some(ExportCell::Text(fields.ip_addresses.join(", ")))
            }
        }
        AssetField::AssignedTo => text(&fields.assigned_to),
        AssetField::Location => text(&asset.location),
        AssetField::WarrantyExpiration => date(&fields.warranty_expiration),
        AssetField::EndOfLifeDate => date(&fields.end_of_life_date),
        AssetField::Comments => text(&fields.comments),
    }
}
