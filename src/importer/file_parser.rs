// ==========================================
// 资产台账后台 - 文件解析器实现
// ==========================================
// 支持: 电子表格 (.xlsx/.xls/.ods) / CSV (.csv)
// 输出: 统一的 RawRow（AssetField → CellValue），两种格式字段集合一致
// - CSV: 首行为表头，空白行跳过
// - 电子表格: 优先读取指定名称的工作表，否则第一个工作表；
//   首行为表头；资产编号为空的行在此丢弃
//   行号按丢弃后的顺序计算，可能小于工作表中的实际行号
// ==========================================

use crate::domain::import::{CellValue, RawRow};
use crate::domain::types::AssetField;
use crate::importer::asset_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{ColumnMap, FieldMapper};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use std::io::Cursor;
use tracing::debug;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// ==========================================
// SourceFormat - 源格式识别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    DelimitedText,
}

impl SourceFormat {
    /// 按扩展名识别，其次按媒体类型
    ///
    /// 扩展名优先: 部分浏览器为 .csv 声明 application/vnd.ms-excel
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> ImportResult<Self> {
        let ext = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.trim().to_ascii_lowercase());

        if let Some(format) = ext.as_deref().and_then(Self::from_extension) {
            return Ok(format);
        }

        let mime = content_type
            .map(|ct| {
                ct.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_ascii_lowercase()
            })
            .filter(|ct| !ct.is_empty());

        if let Some(format) = mime.as_deref().and_then(Self::from_media_type) {
            return Ok(format);
        }

        Err(ImportError::UnsupportedFormat(
            ext.or(mime).unwrap_or_else(|| "unknown".to_string()),
        ))
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(SourceFormat::Spreadsheet),
            "csv" => Some(SourceFormat::DelimitedText),
            _ => None,
        }
    }

    fn from_media_type(mime: &str) -> Option<Self> {
        match mime {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel"
            | "application/vnd.ms-excel.sheet.macroenabled.12"
            | "application/vnd.oasis.opendocument.spreadsheet" => Some(SourceFormat::Spreadsheet),
            "text/csv" | "application/csv" | "text/plain" => Some(SourceFormat::DelimitedText),
            _ => None,
        }
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser {
    mapper: FieldMapper,
}

impl FileParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .trim(Trim::All)
            .from_reader(content);

        // 读取表头
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let columns = self.mapper.map_headers(&headers);
        debug!(headers = headers.len(), mapped = columns.len(), "CSV 表头映射完成");

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = RawRow::new();
            for (idx, field) in columns.iter() {
                let value = record.get(idx).unwrap_or_default();
                row.insert(field, text_cell(value));
            }

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

fn text_cell(value: &str) -> CellValue {
    if value.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(value.to_string())
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
#[derive(Debug, Clone)]
pub struct ExcelParser {
    sheet_name: String,
    mapper: FieldMapper,
}

impl ExcelParser {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            mapper: FieldMapper,
        }
    }

    /// 数据工作表: 同名（不区分大小写）优先，否则第一个
    fn pick_sheet(&self, sheet_names: &[String]) -> ImportResult<String> {
        sheet_names
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&self.sheet_name))
            .or_else(|| sheet_names.first())
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no worksheets".to_string()))
    }
}

impl FileParser for ExcelParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let sheet_name = self.pick_sheet(&workbook.sheet_names())?;
        let range = workbook.worksheet_range(&sheet_name)?;
        // 公式读取失败不影响取值，只是不再标记为公式结果
        let formulas = workbook.worksheet_formula(&sheet_name).ok();

        let Some((start_row, start_col)) = range.start() else {
            return Ok(Vec::new());
        };

        let mut range_rows = range.rows();
        let Some(header_row) = range_rows.next() else {
            return Ok(Vec::new());
        };

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();
        let columns = self.mapper.map_headers(&headers);
        debug!(
            sheet = %sheet_name,
            headers = headers.len(),
            mapped = columns.len(),
            "工作表表头映射完成"
        );

        let mut rows = Vec::new();
        for (offset, data_row) in range_rows.enumerate() {
            let abs_row = start_row + 1 + offset as u32;
            let row = decode_row(data_row, &columns, |col| {
                is_formula(formulas.as_ref(), abs_row, start_col + col as u32)
            });

            if row.is_blank() || row.get(AssetField::ItemNumber).is_blank() {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

fn decode_row(cells: &[Data], columns: &ColumnMap, is_formula: impl Fn(usize) -> bool) -> RawRow {
    let mut row = RawRow::new();
    for (idx, field) in columns.iter() {
        let value = cells.get(idx).map(decode_cell).unwrap_or(CellValue::Empty);
        let value = if is_formula(idx) && value != CellValue::Empty {
            CellValue::FormulaResult(Box::new(value))
        } else {
            value
        };
        row.insert(field, value);
    }
    row
}

fn is_formula(formulas: Option<&Range<String>>, row: u32, col: u32) -> bool {
    formulas
        .and_then(|range| range.get_value((row, col)))
        .is_some_and(|f| !f.is_empty())
}

/// 单元格一次性解码为 CellValue
fn decode_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => text_cell(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => CellValue::Date(value.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .map(CellValue::Date)
            .unwrap_or_else(|| text_cell(s)),
        Data::DurationIso(s) => text_cell(s),
    }
}

// ==========================================
// 通用文件解析器（根据格式自动选择）
// ==========================================
#[derive(Debug, Clone)]
pub struct UniversalFileParser {
    data_sheet_name: String,
}

impl UniversalFileParser {
    pub fn new(data_sheet_name: impl Into<String>) -> Self {
        Self {
            data_sheet_name: data_sheet_name.into(),
        }
    }

    pub fn parse(&self, format: SourceFormat, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        match format {
            SourceFormat::DelimitedText => CsvParser::default().parse_bytes(bytes),
            SourceFormat::Spreadsheet => ExcelParser::new(&self.data_sheet_name).parse_bytes(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            SourceFormat::detect(None, Some("assets.XLSX")).unwrap(),
            SourceFormat::Spreadsheet
        );
        assert_eq!(
            SourceFormat::detect(Some("application/vnd.ms-excel"), Some("assets.csv")).unwrap(),
            SourceFormat::DelimitedText
        );
        assert_eq!(
            SourceFormat::detect(Some("text/csv; charset=utf-8"), Some("upload")).unwrap(),
            SourceFormat::DelimitedText
        );
        assert!(matches!(
            SourceFormat::detect(Some("application/pdf"), Some("assets.pdf")),
            Err(ImportError::UnsupportedFormat(ext)) if ext == "pdf"
        ));
        assert!(matches!(
            SourceFormat::detect(None, None),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_csv_parser_maps_headers_and_skips_blank_lines() {
        let csv = "\u{feff}Item Number*,Model,Status,IP Address\nA1, X1 ,in use,10.0.0.1\n,,,\n\nA2,,,\n";
        let rows = CsvParser::default().parse_bytes(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(AssetField::ItemNumber), Some("A1".to_string()));
        assert_eq!(rows[0].text(AssetField::Model), Some("X1".to_string()));
        assert_eq!(rows[0].text(AssetField::IpAddress), Some("10.0.0.1".to_string()));
        assert_eq!(rows[1].text(AssetField::ItemNumber), Some("A2".to_string()));
        assert!(rows[1].get(AssetField::Model).is_blank());
    }

    #[test]
    fn test_csv_keeps_rows_without_key() {
        // CSV 不在解析阶段丢弃缺少资产编号的行，由行校验报告
        let csv = "itemNumber,model\n,X1\n";
        let rows = CsvParser::default().parse_bytes(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].get(AssetField::ItemNumber).is_blank());
    }

    #[test]
    fn test_decode_cell_variants() {
        assert_eq!(decode_cell(&Data::Empty), CellValue::Empty);
        assert_eq!(decode_cell(&Data::String("  ".into())), CellValue::Empty);
        assert_eq!(decode_cell(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(
            decode_cell(&Data::DateTimeIso("2024-02-03T00:00:00".into())),
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap())
        );
    }

    #[test]
    fn test_invalid_spreadsheet_is_parse_error() {
        let result = ExcelParser::new("Assets").parse_bytes(b"definitely not a zip");
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }
}
