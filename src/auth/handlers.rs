use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::instrument;

use super::{
    dto::{AuthResponse, LoginRequest, RegisterRequest},
    services,
};
use crate::{
    error::{ApiJson, AppResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let session = services::register(state.store.as_ref(), &state.keys, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Usuario registrado con éxito",
            user: session.user.into(),
            token: session.token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let session = services::login(state.store.as_ref(), &state.keys, payload).await?;
    Ok(Json(AuthResponse {
        message: "Inicio de sesión exitoso",
        user: session.user.into(),
        token: session.token,
    }))
}
