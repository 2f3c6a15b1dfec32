use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod error;
pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod pagination;
mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::user_routes())
}
