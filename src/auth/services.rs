use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{LoginRequest, RegisterRequest},
    jwt::JwtKeys,
    password,
    repo_types::{NewUser, User},
};
use crate::{
    error::{AppError, AppResult, INVALID_TOKEN, USERNAME_TAKEN},
    store::Store,
};

const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

/// A user together with a freshly signed session token.
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub token: String,
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}

pub async fn register(store: &dyn Store, keys: &JwtKeys, req: RegisterRequest) -> AppResult<Session> {
    let (Some(username), Some(plain), Some(full_name)) = (
        required(req.username),
        required(req.password),
        required(req.full_name),
    ) else {
        return Err(AppError::Validation("Todos los campos son requeridos"));
    };
    let username = username.trim().to_string();

    if store.find_user_by_username(&username).await?.is_some() {
        warn!(%username, "username already registered");
        return Err(AppError::Conflict(USERNAME_TAKEN));
    }

    let password_hash = password::hash(plain).await?;

    // A concurrent registration can still win the race; the store reports it
    // as a conflict through the unique constraint.
    let user = store
        .create_user(NewUser {
            username,
            password_hash,
            full_name: full_name.trim().to_string(),
        })
        .await?;

    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(Session { user, token })
}

pub async fn login(store: &dyn Store, keys: &JwtKeys, req: LoginRequest) -> AppResult<Session> {
    let (Some(username), Some(plain)) = (required(req.username), required(req.password)) else {
        return Err(AppError::Validation("Nombre de usuario y contraseña requeridos"));
    };
    let username = username.trim();

    let Some(user) = store.find_user_by_username(username).await? else {
        warn!(%username, "login unknown username");
        password::verify_decoy(plain).await;
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS));
    };

    if !password::verify(plain, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS));
    }

    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Session { user, token })
}

/// No refresh path: once a token expires the client has to log in again.
pub fn verify_token(keys: &JwtKeys, token: &str) -> AppResult<Uuid> {
    keys.verify(token).map(|claims| claims.sub).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        AppError::Unauthorized(INVALID_TOKEN)
    })
}
