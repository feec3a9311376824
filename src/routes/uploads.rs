use axum::{
    extract::{
        rejection::{BytesRejection, JsonRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    context::RequestContext,
    error::AppError,
    models::{CellValue, Upload, UploadSummary},
    services::{
        excel::{read_first_sheet, RawSheet},
        pipeline,
    },
    AppState,
};

const DEFAULT_FILE_NAME: &str = "upload";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/uploads", post(upload_workbook).get(list_uploads))
        .route("/uploads/table", post(upload_table))
        .route("/uploads/:id", get(get_upload).delete(delete_upload))
}

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    filename: Option<String>,
}

/// A sheet that was already parsed by the client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpload {
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    header: Option<Vec<String>>,
    #[serde(default)]
    rows: Vec<Vec<CellValue>>,
}

async fn upload_workbook(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Query(params): Query<UploadParams>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<UploadSummary>), AppError> {
    // The body limit layer rejects oversized uploads while buffering.
    let body = body?;
    let file_name = params.filename.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
    tracing::info!(
        "Received workbook {} from {}, size: {}KB",
        file_name,
        ctx.user_id,
        body.len() / 1024
    );

    if body.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()));
    }

    let sheet = read_first_sheet(body)?;
    let upload = pipeline::create_upload(&ctx, &file_name, sheet)?;
    let upload = state.store.insert_upload(upload);

    Ok((StatusCode::CREATED, Json(upload.summary())))
}

async fn upload_table(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    table: Result<Json<TableUpload>, JsonRejection>,
) -> Result<(StatusCode, Json<UploadSummary>), AppError> {
    let Json(table) = table?;
    let file_name = table
        .file_name
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
    let sheet = RawSheet {
        header: table.header,
        rows: table.rows,
    };

    let upload = pipeline::create_upload(&ctx, &file_name, sheet)?;
    let upload = state.store.insert_upload(upload);

    Ok((StatusCode::CREATED, Json(upload.summary())))
}

async fn list_uploads(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Json<Vec<UploadSummary>> {
    let summaries = state
        .store
        .uploads(&ctx.user_id)
        .iter()
        .map(|upload| upload.summary())
        .collect();
    Json(summaries)
}

async fn get_upload(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Upload>, AppError> {
    let upload = state.store.upload(&ctx.user_id, id)?;
    Ok(Json(Upload::clone(&upload)))
}

async fn delete_upload(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete_upload(&ctx.user_id, id)?;
    tracing::info!("Deleted upload {} for {}", id, ctx.user_id);
    Ok(StatusCode::NO_CONTENT)
}
