use std::sync::Arc;

use anyhow::Context;
use rand::seq::SliceRandom;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::{QuestionSource, QuizQuestion, Translator, TriviaQuestion};
use crate::error::{AppError, AppResult};

pub const DEFAULT_AMOUNT: u8 = 10;
pub const MAX_AMOUNT: u8 = 50;

pub fn clamp_amount(requested: Option<u8>) -> u8 {
    requested.unwrap_or(DEFAULT_AMOUNT).clamp(1, MAX_AMOUNT)
}

/// Fetches a batch of questions and localizes every text in it. Questions are
/// localized concurrently; their order is preserved.
pub async fn load_quiz(
    source: &dyn QuestionSource,
    translator: Arc<dyn Translator>,
    category_id: u32,
    amount: u8,
) -> AppResult<Vec<QuizQuestion>> {
    let raw = source.fetch(category_id, amount).await.map_err(|e| {
        warn!(error = %e, category_id, "could not load questions");
        AppError::Upstream("No se pudieron cargar las preguntas")
    })?;

    let mut tasks = JoinSet::new();
    for (idx, question) in raw.into_iter().enumerate() {
        let translator = Arc::clone(&translator);
        tasks.spawn(async move { (idx, localize_question(translator.as_ref(), question).await) });
    }

    let mut localized = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        localized.push(joined.context("localize question task")?);
    }
    localized.sort_by_key(|(idx, _)| *idx);
    Ok(localized.into_iter().map(|(_, q)| q).collect())
}

async fn localize_question(translator: &dyn Translator, q: TriviaQuestion) -> QuizQuestion {
    let question = localize(translator, &q.question).await;
    let correct_answer = localize(translator, &q.correct_answer).await;
    let mut incorrect_answers = Vec::with_capacity(q.incorrect_answers.len());
    for answer in &q.incorrect_answers {
        incorrect_answers.push(localize(translator, answer).await);
    }
    let all_answers = shuffled_answers(&correct_answer, &incorrect_answers);

    QuizQuestion {
        question,
        correct_answer,
        incorrect_answers,
        all_answers,
    }
}

/// Decodes the provider's HTML entities, then translates. Falls back to the
/// decoded text on any translation failure.
async fn localize(translator: &dyn Translator, text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text).into_owned();
    match translator.translate(&decoded).await {
        Ok(translated) => translated,
        Err(e) => {
            debug!(error = %e, "translation failed; keeping original text");
            decoded
        }
    }
}

fn shuffled_answers(correct: &str, incorrect: &[String]) -> Vec<String> {
    let mut all: Vec<String> = incorrect.to_vec();
    all.push(correct.to_string());
    all.shuffle(&mut rand::thread_rng());
    all
}
