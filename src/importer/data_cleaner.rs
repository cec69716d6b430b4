// ==========================================
// 资产台账后台 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 日期与金额解析 / IP 列表拆分
// 约定: 可选字段解析失败一律返回 None，不产生行错误
// ==========================================

use crate::domain::import::CellValue;
use chrono::{Duration, NaiveDate};

/// 支持的文本日期格式（按顺序尝试）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

/// Excel 序列日期上限（9999-12-31）
const EXCEL_SERIAL_MAX: f64 = 2_958_465.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct DataCleaner;

impl DataCleaner {
    /// 文本字段: TRIM，空白 → None
    pub fn normalize_text(&self, value: &CellValue) -> Option<String> {
        value.as_text()
    }

    /// 日期字段
    ///
    /// - 日期单元格: 原样返回
    /// - 数字: 视为 Excel 序列日期（超出范围时尝试 YYYYMMDD）
    /// - 文本: 按 DATE_FORMATS 解析，兼容 RFC 3339 前缀
    pub fn parse_date(&self, value: &CellValue) -> Option<NaiveDate> {
        match value.resolved() {
            CellValue::Date(d) => Some(*d),
            CellValue::Number(n) => parse_excel_serial(*n).or_else(|| parse_compact_number(*n)),
            CellValue::Text(s) => parse_date_text(s.trim()),
            CellValue::Empty | CellValue::FormulaResult(_) => None,
        }
    }

    /// 采购价格: 非负小数
    ///
    /// 文本会去掉货币符号、千分位与空白；负数/非有限值 → None
    /// 逗号出现在最后一个小数点之后（如 "1.299,50"）视为无法识别
    pub fn parse_price(&self, value: &CellValue) -> Option<f64> {
        let price = match value.resolved() {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => {
                if let (Some(comma), Some(dot)) = (s.rfind(','), s.rfind('.')) {
                    if comma > dot {
                        return None;
                    }
                }
                let cleaned: String = s
                    .trim()
                    .chars()
                    .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ',' | '_') && !c.is_whitespace())
                    .collect();
                cleaned.parse::<f64>().ok()?
            }
            _ => return None,
        };

        if price.is_finite() && price >= 0.0 {
            Some(price)
        } else {
            None
        }
    }

    /// IP 地址列表: 按逗号/分号/空白拆分
    ///
    /// 空白单元格 → None（更新时保留原值）
    pub fn split_ip_addresses(&self, value: &CellValue) -> Option<Vec<String>> {
        let text = value.as_text()?;
        Some(
            text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    // 2024-01-15T08:00:00Z / 2024-01-15 08:00:00
    text.get(..10)
        .filter(|_| text.len() > 10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn parse_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=EXCEL_SERIAL_MAX).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn parse_compact_number(value: f64) -> Option<NaiveDate> {
    if value.fract() != 0.0 {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{}", value as i64), "%Y%m%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_text() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_text(&"  hello  ".into()), Some("hello".to_string()));
        assert_eq!(cleaner.normalize_text(&"   ".into()), None);
        assert_eq!(cleaner.normalize_text(&CellValue::Empty), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let cleaner = DataCleaner;
        let expected = ymd(2024, 1, 15);
        for raw in [
            "2024-01-15",
            "2024/01/15",
            "01/15/2024",
            "15.01.2024",
            "20240115",
            "2024-01-15T08:30:00Z",
        ] {
            assert_eq!(cleaner.parse_date(&raw.into()), Some(expected), "{}", raw);
        }
    }

    #[test]
    fn test_parse_date_cells() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_date(&CellValue::Date(ymd(2023, 6, 1))), Some(ymd(2023, 6, 1)));
        // 45306 = 2024-01-15
        assert_eq!(cleaner.parse_date(&CellValue::Number(45306.0)), Some(ymd(2024, 1, 15)));
        assert_eq!(
            cleaner.parse_date(&CellValue::FormulaResult(Box::new(CellValue::Number(45306.0)))),
            Some(ymd(2024, 1, 15))
        );
        assert_eq!(cleaner.parse_date(&CellValue::Number(20240115.0)), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_parse_date_invalid_is_none() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_date(&"not a date".into()), None);
        assert_eq!(cleaner.parse_date(&"2024-13-45".into()), None);
        assert_eq!(cleaner.parse_date(&"".into()), None);
        assert_eq!(cleaner.parse_date(&CellValue::Number(-3.0)), None);
    }

    #[test]
    fn test_parse_price() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_price(&CellValue::Number(1299.5)), Some(1299.5));
        assert_eq!(cleaner.parse_price(&"$1,299.50".into()), Some(1299.5));
        assert_eq!(cleaner.parse_price(&" 42 ".into()), Some(42.0));
        assert_eq!(cleaner.parse_price(&"-5".into()), None);
        assert_eq!(cleaner.parse_price(&"abc".into()), None);
        assert_eq!(cleaner.parse_price(&CellValue::Empty), None);
    }

    #[test]
    fn test_parse_price_rejects_decimal_comma() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_price(&"1.299,50".into()), None);
        assert_eq!(cleaner.parse_price(&"€1.299,50".into()), None);
        assert_eq!(cleaner.parse_price(&"1,299".into()), Some(1299.0));
    }

    #[test]
    fn test_split_ip_addresses() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.split_ip_addresses(&"10.0.0.1, 10.0.0.2;10.0.0.3 10.0.0.4".into()),
            Some(vec![
                "10.0.0.1".to_string(),
                "10.0.0.2".to_string(),
                "10.0.0.3".to_string(),
                "10.0.0.4".to_string(),
            ])
        );
        assert_eq!(cleaner.split_ip_addresses(&"".into()), None);
    }
}
