use crate::state::AppState;
use axum::{
    routing::get,
    Router,
};

mod dto;
pub mod handlers;
pub mod password;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", get(handlers::register_page).post(handlers::register))
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/logout", get(handlers::logout))
}
