use axum::{
    extract::State,
    response::Redirect,
    Form, Json,
};
use serde_json::{json, Value};
use tower_sessions::Session;
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        password::{hash_password, verify_password},
    },
    error::AppError,
    session::{push_notice, sign_in, take_notices, CurrentUser, Notice},
    state::AppState,
    store::NewUser,
};

#[instrument(skip(session))]
pub async fn register_page(session: Session) -> Result<Json<Value>, AppError> {
    let notices = take_notices(&session).await?;
    Ok(Json(json!({ "page": "register", "notices": notices })))
}

#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;

    let password_hash = hash_password(&form.password)?;
    let user = state
        .users
        .insert_user(NewUser {
            name: form.name,
            username: form.username,
            email: form.email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    push_notice(&session, Notice::success("You are now registered")).await?;
    Ok(Redirect::to("/login"))
}

#[instrument(skip(session))]
pub async fn login_page(session: Session) -> Result<Json<Value>, AppError> {
    let notices = take_notices(&session).await?;
    Ok(Json(json!({ "page": "login", "notices": notices })))
}

#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let user = state
        .users
        .find_by_username(&form.username)
        .await?
        .ok_or(AppError::NotFound("Username not found"))?;

    if !verify_password(&form.password, &user.password_hash) {
        return Err(AppError::WrongPassword);
    }

    sign_in(&session, &user.username).await?;
    info!(username = %user.username, "user logged in");
    push_notice(&session, Notice::success("You are now logged in")).await?;
    Ok(Redirect::to("/dashboard"))
}

#[instrument(skip(session))]
pub async fn logout(
    CurrentUser(username): CurrentUser,
    session: Session,
) -> Result<Redirect, AppError> {
    session.clear().await;
    info!(%username, "user logged out");
    push_notice(&session, Notice::success("You are now logged out")).await?;
    Ok(Redirect::to("/login"))
}
