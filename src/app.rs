use std::net::SocketAddr;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{Expiry, SessionManagerLayer};

use crate::error::AppError;
use crate::session::take_notices;
use crate::state::AppState;
use crate::{articles, auth};

pub fn build_app(state: AppState) -> Router {
    // Sessions are ephemeral by design: an in-process store keyed by a
    // session-end cookie, no expiry policy.
    let session_layer = SessionManagerLayer::new(tower_sessions::MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnSessionEnd);

    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/health", get(|| async { "ok" }))
        .merge(auth::router())
        .merge(articles::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn home(session: tower_sessions::Session) -> Result<Json<Value>, AppError> {
    let notices = take_notices(&session).await?;
    Ok(Json(json!({ "page": "home", "notices": notices })))
}

async fn about(session: tower_sessions::Session) -> Result<Json<Value>, AppError> {
    let notices = take_notices(&session).await?;
    Ok(Json(json!({ "page": "about", "notices": notices })))
}
