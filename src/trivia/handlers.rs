use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{services, QuizQuestion};
use crate::{
    auth::extractors::AuthUser,
    error::{ApiPath, ApiQuery, AppResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    pub amount: Option<u8>,
}

pub fn trivia_routes() -> Router<AppState> {
    Router::new().route("/quiz/questions/:category_id", get(questions))
}

#[instrument(skip(state))]
pub async fn questions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(category_id): ApiPath<u32>,
    ApiQuery(query): ApiQuery<QuestionsQuery>,
) -> AppResult<Json<Vec<QuizQuestion>>> {
    let amount = services::clamp_amount(query.amount);
    let quiz = services::load_quiz(
        state.questions.as_ref(),
        Arc::clone(&state.translator),
        category_id,
        amount,
    )
    .await?;
    debug!(%user_id, category_id, served = quiz.len(), "quiz served");
    Ok(Json(quiz))
}
