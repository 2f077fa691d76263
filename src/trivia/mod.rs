//! Questions from the external trivia provider, localized through the
//! translation provider before they reach the client.

pub mod handlers;
pub mod opentdb;
pub mod services;
pub mod translate;

use async_trait::async_trait;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub use opentdb::OpenTdbClient;
pub use translate::LibreTranslateClient;

/// A multiple-choice question as the provider hands it out.
#[derive(Debug, Clone, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// A localized question with its answers already shuffled.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub all_answers: Vec<String>,
}

#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch(&self, category_id: u32, amount: u8) -> anyhow::Result<Vec<TriviaQuestion>>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> anyhow::Result<String>;
}

pub fn router() -> Router<AppState> {
    handlers::trivia_routes()
}
