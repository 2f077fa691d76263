//! Credential and result persistence.
//!
//! Handlers only see the [`Store`] trait; PostgreSQL backs it in production and
//! an in-memory store backs it in tests.

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    auth::repo_types::{NewUser, User},
    quiz::repo_types::{NewQuizResult, ProfileStats, QuizResult, RankingRow},
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already taken")]
    UsernameTaken,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Fails with [`StoreError::UsernameTaken`] when the username exists.
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    /// Appends a result row and returns its id. No deduplication.
    async fn insert_result(&self, result: NewQuizResult) -> StoreResult<Uuid>;

    /// Averages are rounded to one decimal; favorite category ties resolve
    /// alphabetically.
    async fn profile_stats(&self, user_id: Uuid) -> StoreResult<ProfileStats>;

    /// Newest first.
    async fn recent_results(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<QuizResult>>;

    /// Best score desc, average (two decimals) desc, username asc.
    async fn ranking(&self, limit: i64) -> StoreResult<Vec<RankingRow>>;
}
