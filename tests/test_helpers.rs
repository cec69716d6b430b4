// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、可观测仓储、测试文件构造
// ==========================================

#![allow(dead_code)]

use asset_admin::config::ConfigManager;
use asset_admin::db::{init_schema, open_sqlite_connection};
use asset_admin::domain::{
    Asset, AssetExportRow, AssetField, AssetFields, ReferenceEntity, ReferenceKind, UploadedFile,
};
use asset_admin::repository::{
    AssetRepository, AssetRepositoryImpl, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use rusqlite::Connection;
use rust_xlsxwriter::Workbook;
use std::collections::HashSet;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库（已初始化表结构）
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().ok_or("invalid temp path")?.to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库的共享连接
pub fn open_shared_connection(db_path: &str) -> Arc<Mutex<Connection>> {
    let conn = open_sqlite_connection(db_path).expect("open test db");
    Arc::new(Mutex::new(conn))
}

/// 基于同一连接创建仓储与配置管理器
pub fn create_components(db_path: &str) -> (Arc<AssetRepositoryImpl>, Arc<ConfigManager>) {
    let conn = open_shared_connection(db_path);
    (
        Arc::new(AssetRepositoryImpl::from_connection(conn.clone())),
        Arc::new(ConfigManager::from_connection(conn)),
    )
}

// ==========================================
// ObservedRepository - 可观测仓储
// ==========================================
// 包装真实仓储：统计参照实体创建次数，可按资产编号注入写入失败
pub struct ObservedRepository {
    inner: AssetRepositoryImpl,
    reference_creates: AtomicUsize,
    inserts: AtomicUsize,
    updates: AtomicUsize,
    failing_items: Mutex<HashSet<String>>,
}

impl ObservedRepository {
    pub fn new(db_path: &str) -> Self {
        Self {
            inner: AssetRepositoryImpl::new(db_path).expect("open test repository"),
            reference_creates: AtomicUsize::new(0),
            inserts: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            failing_items: Mutex::new(HashSet::new()),
        }
    }

    /// 该资产编号的新建/更新将返回数据库错误
    pub fn fail_writes_for(&self, item_number: &str) {
        self.failing_items
            .lock()
            .unwrap()
            .insert(item_number.to_string());
    }

    pub fn reference_creates(&self) -> usize {
        self.reference_creates.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn check_failure(&self, item_number: &str) -> RepositoryResult<()> {
        if self.failing_items.lock().unwrap().contains(item_number) {
            return Err(RepositoryError::DatabaseQueryError(
                "disk I/O error".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AssetRepository for ObservedRepository {
    async fn find_by_item_number(&self, item_number: &str) -> RepositoryResult<Option<Asset>> {
        self.inner.find_by_item_number(item_number).await
    }

    async fn insert_asset(&self, item_number: &str, fields: &AssetFields) -> RepositoryResult<i64> {
        self.check_failure(item_number)?;
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_asset(item_number, fields).await
    }

    async fn update_asset(&self, id: i64, fields: &AssetFields) -> RepositoryResult<()> {
        let failing = self.failing_items.lock().unwrap().clone();
        for item in failing {
            if let Some(asset) = self.inner.find_by_item_number(&item).await? {
                if asset.id == id {
                    self.check_failure(&item)?;
                }
            }
        }
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_asset(id, fields).await
    }

    async fn list_export_rows(&self) -> RepositoryResult<Vec<AssetExportRow>> {
        self.inner.list_export_rows().await
    }

    async fn count_assets(&self) -> RepositoryResult<usize> {
        self.inner.count_assets().await
    }

    async fn list_references(&self, kind: ReferenceKind) -> RepositoryResult<Vec<ReferenceEntity>> {
        self.inner.list_references(kind).await
    }

    async fn create_reference_if_absent(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> RepositoryResult<i64> {
        self.reference_creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create_reference_if_absent(kind, name).await
    }
}

// ==========================================
// 测试文件构造
// ==========================================

/// CSV 上传（表头使用模板显示名）
pub fn csv_upload(headers: &[AssetField], rows: &[Vec<&str>]) -> UploadedFile {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers.iter().map(|f| f.header()))
        .unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    let bytes = writer.into_inner().unwrap();

    UploadedFile {
        file_name: Some("assets.csv".to_string()),
        content_type: Some("text/csv".to_string()),
        bytes,
    }
}

/// 测试工作表: 表头 + 文本行
pub struct SheetFixture<'a> {
    pub name: &'a str,
    pub headers: &'a [AssetField],
    pub rows: &'a [Vec<&'a str>],
}

/// 写入一个工作表（表头第 1 行，空字符串不写）
pub fn write_sheet(workbook: &mut Workbook, fixture: &SheetFixture<'_>) {
    let sheet = workbook.add_worksheet();
    sheet.set_name(fixture.name).unwrap();

    for (col, field) in fixture.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, field.header()).unwrap();
    }
    for (r, row) in fixture.rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet
                    .write_string((r + 1) as u32, col as u16, *value)
                    .unwrap();
            }
        }
    }
}

pub const XLSX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 由已构建的工作簿生成 xlsx 上传
pub fn workbook_upload(workbook: &mut Workbook) -> UploadedFile {
    UploadedFile {
        file_name: Some("assets.xlsx".to_string()),
        content_type: Some(XLSX_MEDIA_TYPE.to_string()),
        bytes: workbook.save_to_buffer().unwrap(),
    }
}

/// xlsx 上传（多个工作表，按顺序写入）
pub fn xlsx_sheets_upload(sheets: &[SheetFixture<'_>]) -> UploadedFile {
    let mut workbook = Workbook::new();
    for fixture in sheets {
        write_sheet(&mut workbook, fixture);
    }
    workbook_upload(&mut workbook)
}

/// xlsx 上传（单个数据表，全部写为文本）
pub fn xlsx_upload(sheet_name: &str, headers: &[AssetField], rows: &[Vec<&str>]) -> UploadedFile {
    xlsx_sheets_upload(&[SheetFixture {
        name: sheet_name,
        headers,
        rows,
    }])
}

/// 常用列: 资产编号/厂商/分类/状态/成色/位置
pub fn basic_headers() -> Vec<AssetField> {
    vec![
        AssetField::ItemNumber,
        AssetField::Manufacturer,
        AssetField::Category,
        AssetField::Status,
        AssetField::Condition,
        AssetField::Location,
    ]
}
