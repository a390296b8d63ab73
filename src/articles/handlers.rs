use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use tower_sessions::Session;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    articles::dto::{ArticleForm, ArticlePage, ArticlesPage},
    error::AppError,
    session::{push_notice, take_notices, CurrentUser, Notice},
    state::AppState,
};

#[instrument(skip(state, session))]
pub async fn list_articles(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ArticlesPage>, AppError> {
    let articles = state.articles.list_all().await?;
    let notices = take_notices(&session).await?;
    Ok(Json(ArticlesPage::new(articles, notices)))
}

#[instrument(skip(state, session))]
pub async fn show_article(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ArticlePage>, AppError> {
    let article = state
        .articles
        .article(id)
        .await?
        .ok_or(AppError::NotFound("Article not found"))?;
    let notices = take_notices(&session).await?;
    Ok(Json(ArticlePage { article: article.into(), notices }))
}

#[instrument(skip(state, session))]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    session: Session,
) -> Result<Json<ArticlesPage>, AppError> {
    let articles = state.articles.list_by_author(&username).await?;
    let notices = take_notices(&session).await?;
    Ok(Json(ArticlesPage::new(articles, notices)))
}

#[instrument(skip(_user, session))]
pub async fn add_article_page(
    _user: CurrentUser,
    session: Session,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = take_notices(&session).await?;
    Ok(Json(serde_json::json!({ "page": "add_article", "notices": notices })))
}

#[instrument(skip(state, session, form))]
pub async fn add_article(
    State(state): State<AppState>,
    CurrentUser(author): CurrentUser,
    session: Session,
    Form(form): Form<ArticleForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;

    let article = state
        .articles
        .insert_article(&form.title, &form.body, &author)
        .await?;

    info!(article_id = %article.id, %author, "article created");
    push_notice(&session, Notice::success("Article Created")).await?;
    Ok(Redirect::to("/dashboard"))
}

#[instrument(skip(state, _user, session))]
pub async fn edit_article_page(
    State(state): State<AppState>,
    _user: CurrentUser,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ArticlePage>, AppError> {
    let article = state
        .articles
        .article(id)
        .await?
        .ok_or(AppError::NotFound("Article not found"))?;
    let notices = take_notices(&session).await?;
    Ok(Json(ArticlePage { article: article.into(), notices }))
}

// Edits and deletes are gated on authentication only; the acting user is
// never compared against the article's author. The flow tests assert this.
#[instrument(skip(state, session, form))]
pub async fn edit_article(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    session: Session,
    Path(id): Path<Uuid>,
    Form(form): Form<ArticleForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;

    let updated = state
        .articles
        .update_article(id, &form.title, &form.body)
        .await?;
    if !updated {
        return Err(AppError::NotFound("Article not found"));
    }

    info!(article_id = %id, %username, "article updated");
    push_notice(&session, Notice::success("Article Updated")).await?;
    Ok(Redirect::to("/dashboard"))
}

#[instrument(skip(state, session))]
pub async fn delete_article(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    state.articles.delete_article(id).await?;

    info!(article_id = %id, %username, "article deleted");
    push_notice(&session, Notice::success("Article Deleted")).await?;
    Ok(Redirect::to("/dashboard"))
}
