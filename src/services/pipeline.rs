use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::AppError;
use crate::models::{Analysis, AxisSelection, ChartType, Upload};
use crate::services::chart::build_chart;
use crate::services::excel::{column_values, ingest, RawSheet};
use crate::services::statistics;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub x_axis: AxisSelection,
    pub y_axis: AxisSelection,
    pub chart_type: ChartType,
    #[serde(default = "default_include_statistics")]
    pub include_statistics: bool,
}

fn default_include_statistics() -> bool {
    true
}

/// Ingests one sheet into a new upload owned by the caller.
pub fn create_upload(ctx: &RequestContext, file_name: &str, sheet: RawSheet) -> Result<Upload, AppError> {
    let start = std::time::Instant::now();
    let ingested = ingest(sheet)?;

    tracing::info!(
        "Ingested {} for {}: {} columns, {} rows in {:?}",
        file_name,
        ctx.user_id,
        ingested.columns.len(),
        ingested.row_count,
        start.elapsed()
    );

    Ok(Upload {
        id: Uuid::new_v4(),
        owner: ctx.user_id.clone(),
        file_name: file_name.to_string(),
        columns: ingested.columns,
        rows: ingested.rows,
        row_count: ingested.row_count,
        created_at: Utc::now(),
    })
}

/// Builds an analysis of `upload` for the requested axis pair. The upload is
/// only read.
pub fn create_analysis(
    ctx: &RequestContext,
    upload: &Upload,
    request: AnalysisRequest,
) -> Result<Analysis, AppError> {
    for axis in [&request.x_axis, &request.y_axis] {
        if !upload.has_column(&axis.column) {
            return Err(AppError::UnknownColumn(axis.column.clone()));
        }
    }

    let start = std::time::Instant::now();
    let chart = build_chart(&upload.rows, &request.x_axis, &request.y_axis, request.chart_type)?;

    let statistics = if request.include_statistics {
        statistics::compute(column_values(&upload.rows, &request.y_axis.column))
    } else {
        None
    };

    tracing::info!(
        "Built {:?} analysis of {} ({} vs {}) in {:?}",
        request.chart_type,
        upload.id,
        request.y_axis.column,
        request.x_axis.column,
        start.elapsed()
    );

    Ok(Analysis {
        id: Uuid::new_v4(),
        owner: ctx.user_id.clone(),
        upload_id: upload.id,
        x_axis: request.x_axis,
        y_axis: request.y_axis,
        chart_type: request.chart_type,
        chart_data: chart.data,
        chart_config: chart.options,
        statistics,
        created_at: Utc::now(),
    })
}
