use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One completed quiz attempt. Rows are never updated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub score: i32,
    pub total_questions: i32,
    pub played_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewQuizResult {
    pub user_id: Uuid,
    pub category: String,
    pub score: i32,
    pub total_questions: i32,
}

/// Aggregates over every result of one user.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats {
    pub total_games: i64,
    pub average_score: f64,
    pub highest_score: i32,
    pub favorite_category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RankingRow {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub best_score: i32,
    pub games_played: i64,
    pub average_score: f64,
}
