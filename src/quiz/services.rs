use tracing::info;
use uuid::Uuid;

use super::{
    categories,
    dto::{ProfileResponse, SubmitResultRequest},
    repo_types::{NewQuizResult, QuizResult, RankingRow},
};
use crate::{
    error::{AppError, AppResult},
    store::Store,
};

pub const RECENT_GAMES_LIMIT: i64 = 10;
pub const RANKING_LIMIT: i64 = 10;

/// Stores one result row. Identical resubmissions are stored again; there is
/// no idempotency key.
pub async fn submit_result(
    store: &dyn Store,
    user_id: Uuid,
    req: SubmitResultRequest,
) -> AppResult<Uuid> {
    let (Some(category_id), Some(score), Some(total_questions)) = (
        req.category_id.filter(|id| *id != 0),
        req.score,
        req.total_questions.filter(|n| *n != 0),
    ) else {
        return Err(AppError::Validation("Datos incompletos"));
    };

    let category = categories::label_for(category_id);
    let id = store
        .insert_result(NewQuizResult {
            user_id,
            category,
            score,
            total_questions,
        })
        .await?;
    info!(%user_id, result_id = %id, category_id, score, total_questions, "result saved");
    Ok(id)
}

pub async fn get_profile(store: &dyn Store, user_id: Uuid) -> AppResult<ProfileResponse> {
    let user = store
        .find_user_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("Usuario no encontrado"))?;
    let stats = store.profile_stats(user_id).await?;
    Ok(ProfileResponse {
        user: user.into(),
        stats: stats.into(),
    })
}

pub async fn get_recent_games(store: &dyn Store, user_id: Uuid) -> AppResult<Vec<QuizResult>> {
    Ok(store.recent_results(user_id, RECENT_GAMES_LIMIT).await?)
}

pub async fn get_ranking(store: &dyn Store) -> AppResult<Vec<RankingRow>> {
    Ok(store.ranking(RANKING_LIMIT).await?)
}
