use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Third-party collaborators used by the question endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TriviaConfig {
    pub questions_url: String,
    pub translate_url: String,
    pub translate_api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub trivia: TriviaConfig,
}

/// Seven days, the lifetime of every issued session token.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 7 * 24 * 60;

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "entremente".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "entremente-users".into()),
            ttl_minutes: parsed_or("JWT_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES),
        };
        let trivia = TriviaConfig {
            questions_url: std::env::var("TRIVIA_API_URL")
                .unwrap_or_else(|_| "https://opentdb.com".into()),
            translate_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| "https://libretranslate.com".into()),
            translate_api_key: std::env::var("TRANSLATE_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            timeout_secs: parsed_or("UPSTREAM_TIMEOUT_SECS", 10),
        };
        Ok(Self {
            database_url,
            db_max_connections: parsed_or("DB_MAX_CONNECTIONS", 10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parsed_or("APP_PORT", 3001),
            jwt,
            trivia,
        })
    }
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparseable value, using default");
            default
        }),
        Err(_) => default,
    }
}
