use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Translator;

pub const TARGET_LANGUAGE: &str = "es";

/// Client for a LibreTranslate instance.
#[derive(Clone)]
pub struct LibreTranslateClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct Detection {
    language: String,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn detect(&self, text: &str) -> anyhow::Result<Option<String>> {
        let detections: Vec<Detection> = self
            .http
            .post(format!("{}/detect", self.base_url))
            .json(&DetectRequest {
                q: text,
                api_key: self.api_key.as_deref(),
            })
            .send()
            .await
            .context("detect language")?
            .error_for_status()?
            .json()
            .await
            .context("decode detection")?;
        Ok(detections.into_iter().next().map(|d| d.language))
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(&self, text: &str) -> anyhow::Result<String> {
        let source = self.detect(text).await?.unwrap_or_else(|| "en".into());
        if source == TARGET_LANGUAGE {
            return Ok(text.to_string());
        }

        let body: TranslateResponse = self
            .http
            .post(format!("{}/translate", self.base_url))
            .json(&TranslateRequest {
                q: text,
                source: &source,
                target: TARGET_LANGUAGE,
                format: "text",
                api_key: self.api_key.as_deref(),
            })
            .send()
            .await
            .context("translate text")?
            .error_for_status()?
            .json()
            .await
            .context("decode translation")?;

        Ok(body
            .translated_text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| text.to_string()))
    }
}
