//! HTTP server exposing route data as JSON

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::cache::PostCache;
use crate::config::SiteConfig;
use crate::error::ContentError;
use crate::routes::{self, About, PostHistory, PostPreview, ReadPost};
use crate::Blog;

/// Server state
pub struct AppState {
    pub config: SiteConfig,
    pub cache: PostCache,
    pub about_path: PathBuf,
}

type SharedState = Arc<AppState>;

/// Build the router
///
/// - `GET /health`
/// - `GET /posts`
/// - `GET /posts/:page`
/// - `GET /read/:id`
/// - `GET /tags`
/// - `GET /tags/:tag`
/// - `GET /about`
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/posts", get(posts))
        .route("/posts/:page", get(post_history))
        .route("/read/:id", get(read_post))
        .route("/tags", get(tags))
        .route("/tags/:tag", get(tag_posts))
        .route("/about", get(about))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState {
        config: blog.config.clone(),
        cache: blog.cache()?,
        about_path: blog.about_path.clone(),
    });

    if !state.cache.mode().is_development() {
        // Fail at startup rather than on the first request
        state.cache.get().await?;
    }

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if blog.mode.is_development() {
        println!("Development mode: posts are re-read on every request.");
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn posts(State(state): State<SharedState>) -> Result<Json<Vec<PostPreview>>, ContentError> {
    let index = state.cache.get().await?;
    Ok(Json(routes::posts(&index, &state.config)))
}

async fn post_history(
    State(state): State<SharedState>,
    Path(page): Path<String>,
) -> Result<Json<PostHistory>, ContentError> {
    let index = state.cache.get().await?;
    Ok(Json(routes::post_history(&index, &page, &state.config)?))
}

async fn read_post(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ReadPost>, ContentError> {
    let index = state.cache.get().await?;
    Ok(Json(routes::read_post(&index, &id)?))
}

async fn tags(State(state): State<SharedState>) -> Result<Json<Vec<String>>, ContentError> {
    let index = state.cache.get().await?;
    Ok(Json(routes::tags(&index)))
}

/// `tag` arrives percent-decoded
async fn tag_posts(
    State(state): State<SharedState>,
    Path(tag): Path<String>,
) -> Result<Json<Vec<PostPreview>>, ContentError> {
    let index = state.cache.get().await?;
    Ok(Json(routes::tag_posts(&index, &tag, &state.config)?))
}

async fn about(State(state): State<SharedState>) -> Result<Json<About>, ContentError> {
    Ok(Json(state.cache.loader().load_about(&state.about_path).await?))
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let (status, message) = match self.root() {
            ContentError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ContentError::InvalidPage(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            _ => {
                tracing::error!(error = %self, "failed to serve content");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
