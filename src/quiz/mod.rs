pub mod categories;
mod dto;
pub mod handlers;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::quiz_routes())
        .merge(handlers::user_routes())
}
