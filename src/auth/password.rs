//! Argon2id password hashing. Every call runs on the blocking pool since a
//! single hash takes tens of milliseconds of CPU.

use anyhow::{anyhow, Context};
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Well-formed hash with the default cost parameters that no password matches.
/// Checked against when the username is unknown so both login failures cost
/// one verification.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$hZ4Xh5Bdb9KO/VTPnLquKQ$J4vjmcNYhaflGDWRV+n2e1y5LLgoA87VneFU1UpLrEY";

fn digest(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow!("argon2 hashing failed: {e}"))
}

fn matches(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| anyhow!("stored hash is malformed: {e}"))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("argon2 verification failed: {e}")),
    }
}

pub async fn hash(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || digest(&plain))
        .await
        .context("hashing task")?
}

pub async fn verify(plain: String, stored: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || matches(&plain, &stored))
        .await
        .context("verification task")?
}

/// Spends the same work as [`verify`] without a stored hash to compare with.
pub async fn verify_decoy(plain: String) {
    // Always false; only the time spent matters.
    let _ = verify(plain, DECOY_HASH.to_string()).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashed_password_verifies() {
        let stored = hash("pw1234".into()).await.unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(verify("pw1234".into(), stored.clone()).await.unwrap());
        assert!(!verify("pw12345".into(), stored).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_gets_distinct_salts() {
        let a = hash("pw1234".into()).await.unwrap();
        let b = hash("pw1234".into()).await.unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("pw1234"));
    }

    #[tokio::test]
    async fn malformed_stored_hash_is_an_error() {
        assert!(verify("anything".into(), "not-a-valid-hash".into()).await.is_err());
    }

    #[tokio::test]
    async fn decoy_hash_parses_and_matches_nothing() {
        let parsed = PasswordHash::new(DECOY_HASH).unwrap();
        let fresh = hash("pw1234".into()).await.unwrap();
        let fresh = PasswordHash::new(&fresh).unwrap();
        assert_eq!(parsed.algorithm, fresh.algorithm);
        assert_eq!(parsed.params, fresh.params);

        for guess in ["", "pw1234", "password"] {
            assert!(!verify(guess.into(), DECOY_HASH.into()).await.unwrap());
        }
    }
}
