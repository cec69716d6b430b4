// ==========================================
// 资产台账后台 - HTTP 路由
// ==========================================
// GET  /health                   健康检查
// GET  /admin/import/template    下载导入模板（xlsx）
// POST /admin/import/assets      上传导入（multipart 字段 "file"）
//      ?skipDuplicates=<bool>&updateExisting=<bool>
// GET  /admin/export             全量导出（xlsx）
// ==========================================

use crate::api::{ApiError, ApiResult, TEMPLATE_FILE_NAME, XLSX_CONTENT_TYPE};
use crate::app::state::AppState;
use crate::domain::import::{ConflictPolicy, ImportReport, UploadedFile};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// 上传文件的表单字段名
pub const UPLOAD_FIELD: &str = "file";

/// 导入查询参数
///
/// 取值 "true"/"1"/"yes"（不区分大小写）为真，其余为假
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportQuery {
    pub skip_duplicates: Option<String>,
    pub update_existing: Option<String>,
}

impl ImportQuery {
    pub fn policy(&self) -> ConflictPolicy {
        ConflictPolicy {
            skip_duplicates: flag(self.skip_duplicates.as_deref()),
            update_existing: flag(self.update_existing.as_deref()),
        }
    }
}

fn flag(value: Option<&str>) -> bool {
    value
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// 构建路由
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/admin/import/template", get(download_template))
        .route("/admin/import/assets", post(import_assets))
        .route("/admin/export", get(export_assets))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

async fn download_template(State(state): State<AppState>) -> ApiResult<Response> {
    let bytes = state.import_api.download_template().await?;
    Ok(xlsx_attachment(TEMPLATE_FILE_NAME, bytes))
}

async fn import_assets(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ImportReport>> {
    let upload = match multipart {
        Ok(mut multipart) => read_upload(&mut multipart).await?,
        Err(rejection) => {
            debug!(error = %rejection, "请求不是 multipart 表单");
            None
        }
    };

    let report = state
        .import_api
        .import_assets(upload, query.policy())
        .await?;
    Ok(Json(report))
}

async fn export_assets(State(state): State<AppState>) -> ApiResult<Response> {
    let bytes = state.import_api.export_assets().await?;
    let file_name = state.import_api.export_file_name();
    Ok(xlsx_attachment(&file_name, bytes))
}

/// 读取第一个文件字段（名为 "file" 或带文件名）
async fn read_upload(multipart: &mut Multipart) -> ApiResult<Option<UploadedFile>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) && field.file_name().is_none() {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidInput(e.body_text()))?;

        debug!(
            file_name = file_name.as_deref().unwrap_or("unknown"),
            size = bytes.len(),
            "收到上传文件"
        );
        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

fn xlsx_attachment(file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_flags() {
        let query = ImportQuery {
            skip_duplicates: Some("TRUE".to_string()),
            update_existing: Some("no".to_string()),
        };
        assert_eq!(query.policy(), ConflictPolicy::skip());

        assert_eq!(ImportQuery::default().policy(), ConflictPolicy::reject());
        assert!(flag(Some("1")));
        assert!(!flag(Some("")));
    }
}
