// ==========================================
// 资产台账后台 - 导入模板生成
// ==========================================
// 结构:
// - 数据表（默认 "Assets"）: 23 列固定表头
// - 隐藏表 "Lists": 厂商/分类/供应商/位置现有名称 + 状态/成色固定枚举
// - 数据表前 N 行（默认 500）对上述 6 列设置下拉列表
//   参照列允许输入新名称（导入时自动创建），状态/成色列严格限制
// ==========================================

use crate::domain::types::{AssetCondition, AssetField, AssetStatus, ReferenceKind};
use crate::exporter::error::ExportResult;
use rust_xlsxwriter::{
    DataValidation, DataValidationErrorStyle, Format, Formula, Workbook, Worksheet,
};
use std::collections::HashMap;

pub const LISTS_SHEET_NAME: &str = "Lists";

const COLUMN_WIDTH: f64 = 18.0;

/// 模板下拉数据（参照实体名称）
#[derive(Debug, Clone, Default)]
pub struct TemplateLists {
    names: HashMap<ReferenceKind, Vec<String>>,
}

impl TemplateLists {
    pub fn set(&mut self, kind: ReferenceKind, names: Vec<String>) {
        self.names.insert(kind, names);
    }

    pub fn names(&self, kind: ReferenceKind) -> &[String] {
        self.names.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Lists 表中的一列
struct ListColumn {
    field: AssetField,
    values: Vec<String>,
    strict: bool,
}

// ==========================================
// TemplateBuilder
// ==========================================
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    data_sheet_name: String,
    row_count: u32,
}

impl TemplateBuilder {
    pub fn new(data_sheet_name: impl Into<String>, row_count: u32) -> Self {
        Self {
            data_sheet_name: data_sheet_name.into(),
            row_count,
        }
    }

    /// 生成模板 xlsx 字节
    pub fn build(&self, lists: &TemplateLists) -> ExportResult<Vec<u8>> {
        let columns = self.list_columns(lists);

        let mut data_sheet = Worksheet::new();
        data_sheet.set_name(&self.data_sheet_name)?;
        write_header_row(&mut data_sheet)?;
        self.add_validations(&mut data_sheet, &columns)?;

        let mut lists_sheet = Worksheet::new();
        lists_sheet.set_name(LISTS_SHEET_NAME)?;
        write_lists(&mut lists_sheet, &columns)?;
        lists_sheet.set_hidden(true);

        let mut workbook = Workbook::new();
        workbook.push_worksheet(data_sheet);
        workbook.push_worksheet(lists_sheet);

        Ok(workbook.save_to_buffer()?)
    }

    fn list_columns(&self, lists: &TemplateLists) -> Vec<ListColumn> {
        let mut columns: Vec<ListColumn> = ReferenceKind::ALL
            .iter()
            .map(|kind| ListColumn {
                field: kind.field(),
                values: lists.names(*kind).to_vec(),
                strict: false,
            })
            .collect();

        columns.push(ListColumn {
            field: AssetField::Status,
            values: AssetStatus::ALL.iter().map(|s| s.label().to_string()).collect(),
            strict: true,
        });
        columns.push(ListColumn {
            field: AssetField::Condition,
            values: AssetCondition::ALL
                .iter()
                .map(|c| c.label().to_string())
                .collect(),
            strict: true,
        });

        columns
    }

    fn add_validations(&self, sheet: &mut Worksheet, columns: &[ListColumn]) -> ExportResult<()> {
        if self.row_count == 0 {
            return Ok(());
        }

        for (list_idx, column) in columns.iter().enumerate() {
            // 空列表无法构成有效区域引用
            if column.values.is_empty() {
                continue;
            }

            let letter = column_letter(list_idx);
            let formula = format!(
                "={}!${}$2:${}${}",
                LISTS_SHEET_NAME,
                letter,
                letter,
                column.values.len() + 1
            );
            let style = if column.strict {
                DataValidationErrorStyle::Stop
            } else {
                DataValidationErrorStyle::Information
            };
            let validation = DataValidation::new()
                .allow_list_formula(Formula::new(&formula))
                .ignore_blank(true)
                .set_error_style(style);

            let col = column.field.column_index() as u16;
            sheet.add_data_validation(1, col, self.row_count, col, &validation)?;
        }

        Ok(())
    }
}

/// 写入 23 列表头（第 1 行，加粗）
pub fn write_header_row(sheet: &mut Worksheet) -> ExportResult<()> {
    let bold = Format::new().set_bold();
    for field in AssetField::ALL {
        let col = field.column_index() as u16;
        sheet.write_string_with_format(0, col, field.header(), &bold)?;
        sheet.set_column_width(col, COLUMN_WIDTH)?;
    }
    Ok(())
}

fn write_lists(sheet: &mut Worksheet, columns: &[ListColumn]) -> ExportResult<()> {
    for (idx, column) in columns.iter().enumerate() {
        let col = idx as u16;
        sheet.write_string(0, col, column.field.header())?;
        for (row, value) in column.values.iter().enumerate() {
            sheet.write_string(row as u32 + 1, col, value)?;
        }
    }
    Ok(())
}

/// 0 → A, 1 → B ...（Lists 表不超过 26 列）
fn column_letter(idx: usize) -> char {
    (b'A' + idx as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_auto_from_rs, Reader};
    use std::io::Cursor;

    #[test]
    fn test_template_sheets_and_headers() {
        let mut lists = TemplateLists::default();
        lists.set(
            ReferenceKind::Manufacturer,
            vec!["Dell".to_string(), "HP".to_string()],
        );

        let bytes = TemplateBuilder::new("Assets", 500).build(&lists).unwrap();
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            vec!["Assets".to_string(), LISTS_SHEET_NAME.to_string()]
        );

        let data = workbook.worksheet_range("Assets").unwrap();
        let headers: Vec<String> = data.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
        let expected: Vec<String> = AssetField::ALL.iter().map(|f| f.header().to_string()).collect();
        assert_eq!(headers, expected);

        let lists_range = workbook.worksheet_range(LISTS_SHEET_NAME).unwrap();
        let rows: Vec<Vec<String>> = lists_range
            .rows()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        assert_eq!(rows[0][0], "Manufacturer");
        assert_eq!(rows[1][0], "Dell");
        assert_eq!(rows[2][0], "HP");
        assert_eq!(rows[0][4], "Status");
        assert_eq!(rows[1][4], "In Use");
        assert_eq!(rows[15][4], "Disposed");
        assert_eq!(rows[5][5], "BROKEN");
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), 'A');
        assert_eq!(column_letter(5), 'F');
    }
}
