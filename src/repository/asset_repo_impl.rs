// ==========================================
// 资产台账后台 - 资产 Repository 实现
// ==========================================
// 职责: 实现资产与参照实体数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::asset::{Asset, AssetExportRow, AssetFields, ReferenceEntity};
use crate::domain::types::{AssetCondition, AssetStatus, ReferenceKind};
use crate::repository::asset_repo::AssetRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// asset 表可变字段列（顺序与 fields_params 一致）
const FIELD_COLUMNS: &str = "serial_number, manufacturer_id, model, category_id, description, \
     status, asset_condition, acquired_date, purchase_price, supplier_id, order_number, \
     hostname, device_username, device_password, lan_mac, wlan_mac, ip_addresses, \
     assigned_to, location_id, warranty_expiration, end_of_life_date, comments";

fn conversion_error(idx: usize, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

#[derive(Debug, thiserror::Error)]
#[error("unknown label: {0}")]
struct UnknownLabel(String);

/// 从第 `offset` 列开始读取 AssetFields（列顺序同 FIELD_COLUMNS）
fn read_fields(row: &Row, offset: usize) -> rusqlite::Result<AssetFields> {
    let status_raw: String = row.get(offset + 5)?;
    let status = AssetStatus::from_label(&status_raw)
        .ok_or_else(|| conversion_error(offset + 5, UnknownLabel(status_raw.clone())))?;

    let condition_raw: String = row.get(offset + 6)?;
    let condition = AssetCondition::from_label(&condition_raw)
        .ok_or_else(|| conversion_error(offset + 6, UnknownLabel(condition_raw.clone())))?;

    let ip_raw: String = row.get(offset + 16)?;
    let ip_addresses: Vec<String> =
        serde_json::from_str(&ip_raw).map_err(|e| conversion_error(offset + 16, e))?;

    Ok(AssetFields {
        serial_number: row.get(offset)?,
        manufacturer_id: row.get(offset + 1)?,
        model: row.get(offset + 2)?,
        category_id: row.get(offset + 3)?,
        description: row.get(offset + 4)?,
        status,
        condition,
        acquired_date: row.get(offset + 7)?,
        purchase_price: row.get(offset + 8)?,
        supplier_id: row.get(offset + 9)?,
        order_number: row.get(offset + 10)?,
        hostname: row.get(offset + 11)?,
        device_username: row.get(offset + 12)?,
        device_password: row.get(offset + 13)?,
        lan_mac: row.get(offset + 14)?,
        wlan_mac: row.get(offset + 15)?,
        ip_addresses,
        assigned_to: row.get(offset + 17)?,
        location_id: row.get(offset + 18)?,
        warranty_expiration: row.get(offset + 19)?,
        end_of_life_date: row.get(offset + 20)?,
        comments: row.get(offset + 21)?,
    })
}

// ==========================================
// AssetRepositoryImpl
// ==========================================
pub struct AssetRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl AssetRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（连接需已应用统一 PRAGMA）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn ip_json(fields: &AssetFields) -> RepositoryResult<String> {
        Ok(serde_json::to_string(&fields.ip_addresses)?)
    }
}

#[async_trait]
impl AssetRepository for AssetRepositoryImpl {
    async fn find_by_item_number(&self, item_number: &str) -> RepositoryResult<Option<Asset>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT id, item_number, created_at, updated_at, {FIELD_COLUMNS} \
             FROM asset WHERE item_number = ?1"
        );

        let asset = conn
            .query_row(&sql, params![item_number], |row| {
                Ok(Asset {
                    id: row.get(0)?,
                    item_number: row.get(1)?,
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                    fields: read_fields(row, 4)?,
                })
            })
            .optional()?;

        Ok(asset)
    }

    async fn insert_asset(&self, item_number: &str, fields: &AssetFields) -> RepositoryResult<i64> {
        let ip_json = Self::ip_json(fields)?;
        let now = Utc::now();
        let conn = self.lock()?;

        conn.execute(
            &format!(
                "INSERT INTO asset (item_number, {FIELD_COLUMNS}, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, \
                 ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)"
            ),
            params![
                item_number,
                fields.serial_number,
                fields.manufacturer_id,
                fields.model,
                fields.category_id,
                fields.description,
                fields.status.label(),
                fields.condition.label(),
                fields.acquired_date,
                fields.purchase_price,
                fields.supplier_id,
                fields.order_number,
                fields.hostname,
                fields.device_username,
                fields.device_password,
                fields.lan_mac,
                fields.wlan_mac,
                ip_json,
                fields.assigned_to,
                fields.location_id,
                fields.warranty_expiration,
                fields.end_of_life_date,
                fields.comments,
                now,
                now,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    async fn update_asset(&self, id: i64, fields: &AssetFields) -> RepositoryResult<()> {
        let ip_json = Self::ip_json(fields)?;
        let conn = self.lock()?;

        let affected = conn.execute(
            r#"
            UPDATE asset SET
                serial_number = ?2, manufacturer_id = ?3, model = ?4, category_id = ?5,
                description = ?6, status = ?7, asset_condition = ?8, acquired_date = ?9,
                purchase_price = ?10, supplier_id = ?11, order_number = ?12, hostname = ?13,
                device_username = ?14, device_password = ?15, lan_mac = ?16, wlan_mac = ?17,
                ip_addresses = ?18, assigned_to = ?19, location_id = ?20,
                warranty_expiration = ?21, end_of_life_date = ?22, comments = ?23,
                updated_at = ?24
            WHERE id = ?1
            "#,
            params![
                id,
                fields.serial_number,
                fields.manufacturer_id,
                fields.model,
                fields.category_id,
                fields.description,
                fields.status.label(),
                fields.condition.label(),
                fields.acquired_date,
                fields.purchase_price,
                fields.supplier_id,
                fields.order_number,
                fields.hostname,
                fields.device_username,
                fields.device_password,
                fields.lan_mac,
                fields.wlan_mac,
                ip_json,
                fields.assigned_to,
                fields.location_id,
                fields.warranty_expiration,
                fields.end_of_life_date,
                fields.comments,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "asset".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_export_rows(&self) -> RepositoryResult<Vec<AssetExportRow>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT a.item_number, m.name, c.name, s.name, l.name, {cols} \
             FROM asset a \
             LEFT JOIN manufacturer m ON m.id = a.manufacturer_id \
             LEFT JOIN category c ON c.id = a.category_id \
             LEFT JOIN supplier s ON s.id = a.supplier_id \
             LEFT JOIN location l ON l.id = a.location_id \
             ORDER BY a.item_number",
            cols = FIELD_COLUMNS
                .split(", ")
                .map(|c| format!("a.{}", c.trim()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(AssetExportRow {
                item_number: row.get(0)?,
                manufacturer: row.get(1)?,
                category: row.get(2)?,
                supplier: row.get(3)?,
                location: row.get(4)?,
                fields: read_fields(row, 5)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    async fn count_assets(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM asset", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    async fn list_references(&self, kind: ReferenceKind) -> RepositoryResult<Vec<ReferenceEntity>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name FROM {} ORDER BY name",
            kind.table_name()
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(ReferenceEntity {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    async fn create_reference_if_absent(
        &self,
        kind: ReferenceKind,
        name: &str,
    ) -> RepositoryResult<i64> {
        let conn = self.lock()?;
        let table = kind.table_name();

        // name 列为 COLLATE NOCASE UNIQUE：大小写不同的同名实体视为已存在
        conn.execute(
            &format!("INSERT INTO {table} (name) VALUES (?1) ON CONFLICT(name) DO NOTHING"),
            params![name],
        )?;

        let id: i64 = conn.query_row(
            &format!("SELECT id FROM {table} WHERE name = ?1"),
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};

    fn memory_repo() -> AssetRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        AssetRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn sample_fields() -> AssetFields {
        AssetFields {
            serial_number: Some("SN1".to_string()),
            manufacturer_id: None,
            model: Some("X1".to_string()),
            category_id: None,
            description: None,
            status: AssetStatus::InUse,
            condition: AssetCondition::Good,
            acquired_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1),
            purchase_price: Some(1299.5),
            supplier_id: None,
            order_number: None,
            hostname: Some("ws-01".to_string()),
            device_username: None,
            device_password: None,
            lan_mac: None,
            wlan_mac: None,
            ip_addresses: vec!["10.1.1.5".to_string(), "10.1.1.6".to_string()],
            assigned_to: None,
            location_id: None,
            warranty_expiration: None,
            end_of_life_date: None,
            comments: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = memory_repo();
        let id = repo.insert_asset("A1", &sample_fields()).await.unwrap();

        let found = repo.find_by_item_number("A1").await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.fields, sample_fields());

        // 业务主键大小写敏感
        assert!(repo.find_by_item_number("a1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_item_number_is_unique_violation() {
        let repo = memory_repo();
        repo.insert_asset("A1", &sample_fields()).await.unwrap();

        let err = repo.insert_asset("A1", &sample_fields()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let repo = memory_repo();
        let id = repo.insert_asset("A1", &sample_fields()).await.unwrap();

        let mut fields = sample_fields();
        fields.model = None;
        fields.status = AssetStatus::Retired;
        repo.update_asset(id, &fields).await.unwrap();

        let found = repo.find_by_item_number("A1").await.unwrap().unwrap();
        assert_eq!(found.fields.model, None);
        assert_eq!(found.fields.status, AssetStatus::Retired);
        assert_eq!(found.item_number, "A1");
    }

    #[tokio::test]
    async fn test_update_missing_asset_is_not_found() {
        let repo = memory_repo();
        let err = repo.update_asset(42, &sample_fields()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_reference_if_absent_is_case_insensitive() {
        let repo = memory_repo();
        let first = repo
            .create_reference_if_absent(ReferenceKind::Manufacturer, "Lenovo")
            .await
            .unwrap();
        let second = repo
            .create_reference_if_absent(ReferenceKind::Manufacturer, "LENOVO")
            .await
            .unwrap();

        assert_eq!(first, second);
        let all = repo.list_references(ReferenceKind::Manufacturer).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Lenovo");
    }

    #[tokio::test]
    async fn test_export_rows_resolve_names() {
        let repo = memory_repo();
        let location_id = repo
            .create_reference_if_absent(ReferenceKind::Location, "HQ 3F")
            .await
            .unwrap();

        let mut fields = sample_fields();
        fields.location_id = Some(location_id);
        repo.insert_asset("B2", &fields).await.unwrap();
        repo.insert_asset("A1", &sample_fields()).await.unwrap();

        let rows = repo.list_export_rows().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item_number, "A1");
        assert_eq!(rows[1].location, Some("HQ 3F".to_string()));
        assert_eq!(rows[1].manufacturer, None);
        assert_eq!(repo.count_assets().await.unwrap(), 2);
    }
}
