use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::warn;

use crate::error::AppError;

/// Session key for the authentication flag.
pub const LOGGED_IN_KEY: &str = "logged_in";
/// Session key for the authenticated username.
pub const USERNAME_KEY: &str = "username";
/// Session key for the pending one-shot notices.
const FLASH_KEY: &str = "_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Success,
    Danger,
}

/// One-shot status notice: queued by a mutating operation, rendered on the
/// next page load, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub category: Category,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), category: Category::Success }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self { message: message.into(), category: Category::Danger }
    }
}

/// Queue a notice for the next page load.
pub async fn push_notice(session: &Session, notice: Notice) -> Result<(), AppError> {
    let mut notices: Vec<Notice> = session.get(FLASH_KEY).await?.unwrap_or_default();
    notices.push(notice);
    session.insert(FLASH_KEY, notices).await?;
    Ok(())
}

/// Drain all pending notices. They are removed from the session as they are
/// returned.
pub async fn take_notices(session: &Session) -> Result<Vec<Notice>, AppError> {
    Ok(session.remove::<Vec<Notice>>(FLASH_KEY).await?.unwrap_or_default())
}

/// Mark the session as authenticated for `username`.
pub async fn sign_in(session: &Session, username: &str) -> Result<(), AppError> {
    session.insert(LOGGED_IN_KEY, true).await?;
    session.insert(USERNAME_KEY, username).await?;
    Ok(())
}

/// Guard extractor: the authenticated session username.
///
/// Handlers that take `CurrentUser` never run for anonymous callers; the
/// request is answered with a "Please login" notice and a redirect to the
/// login page instead.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejection.into_response())?;

        let logged_in = session
            .get::<bool>(LOGGED_IN_KEY)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);
        let username = session.get::<String>(USERNAME_KEY).await.ok().flatten();

        if let (true, Some(username)) = (logged_in, username) {
            return Ok(CurrentUser(username));
        }

        warn!(path = %parts.uri.path(), "anonymous access to guarded route");
        if let Err(e) = push_notice(&session, Notice::danger("Please login")).await {
            return Err(e.into_response());
        }
        Err(Redirect::to("/login").into_response())
    }
}
