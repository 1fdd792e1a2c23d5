// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rootscale_store::StoreError;
use serde::Serialize;
use serde_json::json;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ApiErrorCode {
    StoreUnavailable,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

pub(crate) fn api_error_response(status: StatusCode, err: ApiError) -> Response {
    (status, Json(json!({ "error": err }))).into_response()
}

pub(crate) fn store_error_response(err: &StoreError) -> Response {
    error!(error = %err, "dimension store failure");
    api_error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiError::new(ApiErrorCode::StoreUnavailable, err.to_string()),
    )
}

pub(crate) fn internal_error_response(message: &str) -> Response {
    error!(%message, "internal error");
    api_error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiError::new(ApiErrorCode::Internal, message),
    )
}
