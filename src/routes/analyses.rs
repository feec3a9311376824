use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    context::RequestContext,
    error::AppError,
    models::Analysis,
    services::pipeline::{self, AnalysisRequest},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/uploads/:id/analyses", post(create_analysis))
        .route("/analyses", get(list_analyses))
        .route("/analyses/:id", get(get_analysis).delete(delete_analysis))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisFilter {
    upload_id: Option<Uuid>,
}

async fn create_analysis(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(upload_id): Path<Uuid>,
    Json(request): Json<AnalysisRequest>,
) -> Result<(StatusCode, Json<Analysis>), AppError> {
    tracing::info!(
        "Analysis requested by {} on upload {}: {:?} of {} vs {}",
        ctx.user_id,
        upload_id,
        request.chart_type,
        request.y_axis.column,
        request.x_axis.column
    );

    let upload = state.store.upload(&ctx.user_id, upload_id)?;
    let analysis = pipeline::create_analysis(&ctx, &upload, request)?;
    let analysis = state.store.insert_analysis(analysis)?;

    Ok((StatusCode::CREATED, Json(Analysis::clone(&analysis))))
}

async fn list_analyses(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Query(filter): Query<AnalysisFilter>,
) -> Json<Vec<Analysis>> {
    let analyses = state
        .store
        .analyses(&ctx.user_id, filter.upload_id)
        .iter()
        .map(|analysis| Analysis::clone(analysis))
        .collect();
    Json(analyses)
}

async fn get_analysis(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Analysis>, AppError> {
    let analysis = state.store.analysis(&ctx.user_id, id)?;
    Ok(Json(Analysis::clone(&analysis)))
}

async fn delete_analysis(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete_analysis(&ctx.user_id, id)?;
    tracing::info!("Deleted analysis {} for {}", id, ctx.user_id);
    Ok(StatusCode::NO_CONTENT)
}
