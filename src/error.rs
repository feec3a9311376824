use axum::{
    extract::rejection::{BytesRejection, JsonRejection},
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Sheet contains no rows")]
    EmptySheet,
    #[error("Sheet has no header row")]
    NoHeaders,
    #[error("Dataset contains no rows to chart")]
    EmptyDataset,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Missing caller identity")]
    Unauthorized,
    #[error("Request body exceeds the maximum upload size")]
    PayloadTooLarge,
    #[error("File processing error: {0}")]
    FileProcessingError(String),
}

impl AppError {
    /// Stable label reported next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::EmptySheet => "EmptySheet",
            AppError::NoHeaders => "NoHeaders",
            AppError::EmptyDataset => "EmptyDataset",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::UnknownColumn(_) => "UnknownColumn",
            AppError::NotFound(_) => "NotFound",
            AppError::Unauthorized => "Unauthorized",
            AppError::PayloadTooLarge => "PayloadTooLarge",
            AppError::FileProcessingError(_) => "FileProcessingError",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::EmptySheet
            | AppError::NoHeaders
            | AppError::EmptyDataset
            | AppError::UnknownColumn(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::FileProcessingError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<calamine::Error> for AppError {
    fn from(err: calamine::Error) -> Self {
        AppError::FileProcessingError(err.to_string())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::InvalidInput(rejection.body_text())
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::InvalidInput(rejection.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!("Request failed with {}: {}", self.kind(), self);

        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}
