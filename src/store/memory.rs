//! In-memory store for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::{
    auth::repo_types::{NewUser, User},
    quiz::repo_types::{NewQuizResult, ProfileStats, QuizResult, RankingRow},
};

/// Rounds half away from zero, matching SQL `ROUND(numeric, n)`.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    // Insertion order doubles as the submission sequence.
    results: RwLock<Vec<QuizResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::UsernameTaken);
        }
        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            full_name: user.full_name,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn insert_result(&self, result: NewQuizResult) -> StoreResult<Uuid> {
        if !self.users.read().await.contains_key(&result.user_id) {
            return Err(anyhow::anyhow!("foreign key violation: user {}", result.user_id).into());
        }
        let row = QuizResult {
            id: Uuid::new_v4(),
            user_id: result.user_id,
            category: result.category,
            score: result.score,
            total_questions: result.total_questions,
            played_at: OffsetDateTime::now_utc(),
        };
        let id = row.id;
        self.results.write().await.push(row);
        Ok(id)
    }

    async fn profile_stats(&self, user_id: Uuid) -> StoreResult<ProfileStats> {
        let results = self.results.read().await;
        let mine: Vec<&QuizResult> = results.iter().filter(|r| r.user_id == user_id).collect();
        if mine.is_empty() {
            return Ok(ProfileStats {
                total_games: 0,
                average_score: 0.0,
                highest_score: 0,
                favorite_category: None,
            });
        }

        let total: i64 = mine.iter().map(|r| i64::from(r.score)).sum();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for r in &mine {
            *counts.entry(r.category.as_str()).or_default() += 1;
        }
        let favorite_category = counts
            .into_iter()
            .min_by(|(a_cat, a_n), (b_cat, b_n)| b_n.cmp(a_n).then_with(|| a_cat.cmp(b_cat)))
            .map(|(cat, _)| cat.to_string());

        Ok(ProfileStats {
            total_games: mine.len() as i64,
            average_score: round_to(total as f64 / mine.len() as f64, 1),
            highest_score: mine.iter().map(|r| r.score).max().unwrap_or(0),
            favorite_category,
        })
    }

    async fn recent_results(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        let mut mine: Vec<(usize, &QuizResult)> = results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.user_id == user_id)
            .collect();
        mine.sort_by(|(a_seq, a), (b_seq, b)| {
            b.played_at.cmp(&a.played_at).then_with(|| b_seq.cmp(a_seq))
        });
        Ok(mine
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn ranking(&self, limit: i64) -> StoreResult<Vec<RankingRow>> {
        let users = self.users.read().await;
        let results = self.results.read().await;

        let mut per_user: HashMap<Uuid, Vec<i32>> = HashMap::new();
        for r in results.iter() {
            per_user.entry(r.user_id).or_default().push(r.score);
        }

        let mut rows: Vec<RankingRow> = per_user
            .into_iter()
            .filter_map(|(user_id, scores)| {
                let user = users.get(&user_id)?;
                let sum: i64 = scores.iter().map(|s| i64::from(*s)).sum();
                Some(RankingRow {
                    id: user.id,
                    username: user.username.clone(),
                    full_name: user.full_name.clone(),
                    best_score: scores.iter().copied().max().unwrap_or(0),
                    games_played: scores.len() as i64,
                    average_score: round_to(sum as f64 / scores.len() as f64, 2),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.best_score
                .cmp(&a.best_score)
                .then_with(|| b.average_score.total_cmp(&a.average_score))
                .then_with(|| a.username.cmp(&b.username))
        });
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn user(store: &MemoryStore, name: &str) -> Uuid {
        store
            .create_user(NewUser {
                username: name.into(),
                password_hash: "hash".into(),
                full_name: format!("{name} full"),
            })
            .await
            .unwrap()
            .id
    }

    async fn play(store: &MemoryStore, user_id: Uuid, category: &str, score: i32) -> Uuid {
        store
            .insert_result(NewQuizResult {
                user_id,
                category: category.into(),
                score,
                total_questions: 10,
            })
            .await
            .unwrap()
    }

    #[test]
    fn round_to_matches_sql_round() {
        assert_eq!(round_to(7.25, 1), 7.3);
        assert_eq!(round_to(6.666_666, 1), 6.7);
        assert_eq!(round_to(6.666_666, 2), 6.67);
        assert_eq!(round_to(8.0, 1), 8.0);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        user(&store, "ana").await;
        let err = store
            .create_user(NewUser {
                username: "ana".into(),
                password_hash: "other".into(),
                full_name: "Other".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken));
    }

    #[tokio::test]
    async fn result_for_unknown_user_fails() {
        let store = MemoryStore::new();
        let err = store
            .insert_result(NewQuizResult {
                user_id: Uuid::new_v4(),
                category: "Ciencias".into(),
                score: 1,
                total_questions: 10,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Other(_)));
    }

    #[tokio::test]
    async fn empty_profile_is_all_zero() {
        let store = MemoryStore::new();
        let id = user(&store, "ana").await;
        let stats = store.profile_stats(id).await.unwrap();
        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.highest_score, 0);
        assert_eq!(stats.favorite_category, None);
    }

    #[tokio::test]
    async fn profile_aggregates_and_breaks_ties_alphabetically() {
        let store = MemoryStore::new();
        let id = user(&store, "ana").await;
        play(&store, id, "Historia", 4).await;
        play(&store, id, "Ciencias", 9).await;
        play(&store, id, "Historia", 7).await;
        play(&store, id, "Ciencias", 5).await;

        let stats = store.profile_stats(id).await.unwrap();
        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.highest_score, 9);
        assert_eq!(stats.average_score, 6.3);
        assert_eq!(stats.favorite_category.as_deref(), Some("Ciencias"));
    }

    #[tokio::test]
    async fn recent_results_are_capped_and_newest_first() {
        let store = MemoryStore::new();
        let id = user(&store, "ana").await;
        let other = user(&store, "bob").await;
        play(&store, other, "Música", 3).await;

        let mut ids = Vec::new();
        for score in 0..12 {
            ids.push(play(&store, id, "Ciencias", score).await);
        }

        let recent = store.recent_results(id, 10).await.unwrap();
        assert_eq!(recent.len(), 10);
        let expected: Vec<Uuid> = ids.iter().rev().take(10).copied().collect();
        let got: Vec<Uuid> = recent.iter().map(|r| r.id).collect();
        assert_eq!(got, expected);
        assert!(recent.iter().all(|r| r.user_id == id));
    }

    #[tokio::test]
    async fn ranking_orders_by_best_then_average() {
        let store = MemoryStore::new();
        let a = user(&store, "ana").await;
        let b = user(&store, "bea").await;
        let c = user(&store, "carl").await;
        user(&store, "idle").await;

        play(&store, a, "Ciencias", 9).await;
        play(&store, a, "Ciencias", 3).await; // best 9, avg 6
        play(&store, b, "Historia", 9).await;
        play(&store, b, "Historia", 8).await; // best 9, avg 8.5
        play(&store, c, "Música", 10).await; // best 10

        let ranking = store.ranking(10).await.unwrap();
        let names: Vec<&str> = ranking.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["carl", "bea", "ana"]);
        assert_eq!(ranking[1].average_score, 8.5);
        assert_eq!(ranking[2].games_played, 2);
    }

    #[tokio::test]
    async fn ranking_is_capped() {
        let store = MemoryStore::new();
        for i in 0..12 {
            let id = user(&store, &format!("player{i:02}")).await;
            play(&store, id, "Ciencias", i).await;
        }
        let ranking = store.ranking(10).await.unwrap();
        assert_eq!(ranking.len(), 10);
        assert_eq!(ranking[0].best_score, 11);
    }
}
