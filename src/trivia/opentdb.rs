use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{QuestionSource, TriviaQuestion};

/// Client for the Open Trivia Database.
#[derive(Clone)]
pub struct OpenTdbClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OpenTdbResponse {
    response_code: i32,
    #[serde(default)]
    results: Vec<TriviaQuestion>,
}

impl OpenTdbClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl QuestionSource for OpenTdbClient {
    async fn fetch(&self, category_id: u32, amount: u8) -> anyhow::Result<Vec<TriviaQuestion>> {
        let url = format!("{}/api.php", self.base_url);
        let body: OpenTdbResponse = self
            .http
            .get(&url)
            .query(&[
                ("amount", amount.to_string()),
                ("category", category_id.to_string()),
                ("type", "multiple".to_string()),
            ])
            .send()
            .await
            .context("request trivia questions")?
            .error_for_status()
            .context("trivia provider status")?
            .json()
            .await
            .context("decode trivia response")?;

        debug!(category_id, amount, code = body.response_code, n = body.results.len(), "trivia fetched");
        if body.response_code != 0 {
            bail!("trivia provider answered with code {}", body.response_code);
        }
        if body.results.is_empty() {
            bail!("trivia provider returned no questions");
        }
        Ok(body.results)
    }
}
