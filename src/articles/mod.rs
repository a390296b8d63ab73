use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

mod dto;
pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/articles", get(handlers::list_articles))
        .route("/article/:id", get(handlers::show_article))
        .route("/dashboard", get(handlers::dashboard))
        .route(
            "/add_article",
            get(handlers::add_article_page).post(handlers::add_article),
        )
        .route(
            "/edit_article/:id",
            get(handlers::edit_article_page).post(handlers::edit_article),
        )
        .route("/delete_article/:id", post(handlers::delete_article))
}
