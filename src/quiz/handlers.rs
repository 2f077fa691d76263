use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    categories::{Category, CATEGORIES},
    dto::{GameItem, ProfileResponse, RankingItem, SubmitResultRequest, SubmitResultResponse},
    services,
};
use crate::{
    auth::extractors::AuthUser,
    error::{ApiJson, AppResult},
    state::AppState,
};

pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/quiz/categories", get(list_categories))
        .route("/quiz/results", post(submit_result))
        .route("/ranking", get(ranking))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(profile))
        .route("/user/games", get(recent_games))
}

pub async fn list_categories() -> Json<&'static [Category]> {
    Json(CATEGORIES)
}

#[instrument(skip(state, payload))]
pub async fn submit_result(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<SubmitResultRequest>,
) -> AppResult<(StatusCode, Json<SubmitResultResponse>)> {
    let result_id = services::submit_result(state.store.as_ref(), user_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitResultResponse {
            message: "Resultado guardado con éxito",
            result_id,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    Ok(Json(services::get_profile(state.store.as_ref(), user_id).await?))
}

#[instrument(skip(state))]
pub async fn recent_games(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<GameItem>>> {
    let games = services::get_recent_games(state.store.as_ref(), user_id).await?;
    Ok(Json(games.into_iter().map(GameItem::from).collect()))
}

#[instrument(skip(state))]
pub async fn ranking(State(state): State<AppState>) -> AppResult<Json<Vec<RankingItem>>> {
    let rows = services::get_ranking(state.store.as_ref()).await?;
    Ok(Json(rows.into_iter().map(RankingItem::from).collect()))
}
