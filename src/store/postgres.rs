use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::{
    auth::repo_types::{NewUser, User},
    quiz::repo_types::{NewQuizResult, ProfileStats, QuizResult, RankingRow},
};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, full_name, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .context("find user by username")?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, full_name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let res = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, full_name)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, full_name, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .fetch_one(&self.db)
        .await;

        match res {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::UsernameTaken)
            }
            Err(e) => Err(anyhow::Error::new(e).context("insert user").into()),
        }
    }

    async fn insert_result(&self, result: NewQuizResult) -> StoreResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO quiz_results (user_id, category, score, total_questions)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(result.user_id)
        .bind(&result.category)
        .bind(result.score)
        .bind(result.total_questions)
        .fetch_one(&self.db)
        .await
        .context("insert quiz result")?;
        Ok(id)
    }

    async fn profile_stats(&self, user_id: Uuid) -> StoreResult<ProfileStats> {
        let (total_games, average_score, highest_score): (i64, f64, i32) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(ROUND(AVG(score)::numeric, 1), 0)::float8,
                   COALESCE(MAX(score), 0)
            FROM quiz_results
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .context("aggregate profile stats")?;

        let favorite_category: Option<String> = sqlx::query_scalar(
            r#"
            SELECT category
            FROM quiz_results
            WHERE user_id = $1
            GROUP BY category
            ORDER BY COUNT(*) DESC, category ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("favorite category")?;

        Ok(ProfileStats {
            total_games,
            average_score,
            highest_score,
            favorite_category,
        })
    }

    async fn recent_results(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<QuizResult>> {
        let rows = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT id, user_id, category, score, total_questions, played_at
            FROM quiz_results
            WHERE user_id = $1
            ORDER BY played_at DESC, seq DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list recent results")?;
        Ok(rows)
    }

    async fn ranking(&self, limit: i64) -> StoreResult<Vec<RankingRow>> {
        let rows = sqlx::query_as::<_, RankingRow>(
            r#"
            SELECT u.id,
                   u.username,
                   u.full_name,
                   MAX(r.score) AS best_score,
                   COUNT(r.id) AS games_played,
                   ROUND(AVG(r.score)::numeric, 2)::float8 AS average_score
            FROM quiz_results r
            JOIN users u ON u.id = r.user_id
            GROUP BY u.id, u.username, u.full_name
            ORDER BY best_score DESC, average_score DESC, u.username ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("global ranking")?;
        Ok(rows)
    }
}
