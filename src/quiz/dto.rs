use serde::{Deserialize, Deserializer, Serialize};
use time::{macros::format_description, OffsetDateTime};
use uuid::Uuid;

use super::repo_types::{ProfileStats, QuizResult, RankingRow};
use crate::auth::PublicUser;

/// `POST /quiz/results` body. Every field is optional so that absence is a
/// validation error rather than a decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultRequest {
    #[serde(default, deserialize_with = "number_or_string")]
    pub category_id: Option<u32>,
    pub score: Option<i32>,
    pub total_questions: Option<i32>,
}

/// Route params reach the client as strings, so `"17"` and `17` are both
/// accepted.
fn number_or_string<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Str(String),
    }

    match Option::<Raw>::deserialize(de)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Str(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultResponse {
    pub message: &'static str,
    pub result_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_games: i64,
    pub average_score: f64,
    pub highest_score: i32,
    pub favorite_category: String,
}

impl From<ProfileStats> for StatsResponse {
    fn from(s: ProfileStats) -> Self {
        Self {
            total_games: s.total_games,
            average_score: s.average_score,
            highest_score: s.highest_score,
            favorite_category: s.favorite_category.unwrap_or_else(|| "Ninguna".into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
    pub stats: StatsResponse,
}

#[derive(Debug, Serialize)]
pub struct GameItem {
    pub id: Uuid,
    pub date: String,
    pub category: String,
    pub score: i32,
    pub total: i32,
}

fn day(at: OffsetDateTime) -> String {
    at.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

impl From<QuizResult> for GameItem {
    fn from(r: QuizResult) -> Self {
        Self {
            id: r.id,
            date: day(r.played_at),
            category: r.category,
            score: r.score,
            total: r.total_questions,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingItem {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub best_score: i32,
    pub games_played: i64,
    pub average_score: f64,
}

impl From<RankingRow> for RankingItem {
    fn from(r: RankingRow) -> Self {
        Self {
            id: r.id,
            username: r.username,
            full_name: r.full_name,
            best_score: r.best_score,
            games_played: r.games_played,
            average_score: r.average_score,
        }
    }
}
