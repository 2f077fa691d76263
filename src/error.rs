use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;

pub const USERNAME_TAKEN: &str = "El nombre de usuario ya está en uso";
pub const INVALID_TOKEN: &str = "Token inválido o expirado";
const SERVER_ERROR: &str = "Error del servidor";

/// Failure taxonomy shared by every handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Upstream(&'static str),

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Duplicate usernames share the 400 of other client mistakes.
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(e) => {
                error!(error = ?e, "request failed");
                SERVER_ERROR.to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UsernameTaken => AppError::Conflict(USERNAME_TAKEN),
            StoreError::Other(e) => AppError::Internal(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(reason = %rejection.body_text(), "rejected request body");
        AppError::Validation("Cuerpo de la petición inválido")
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        warn!(reason = %rejection.body_text(), "rejected path parameter");
        AppError::Validation("Parámetro de ruta inválido")
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(reason = %rejection.body_text(), "rejected query string");
        AppError::Validation("Parámetros de consulta inválidos")
    }
}

// Axum's own extractors reject with plain text; these answer in the API's
// `{"error": ...}` shape instead.

#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

pub type AppResult<T> = Result<T, AppError>;
