//! Static HTML pages and the listing of the pages directory.

use std::path::{Path as FsPath, PathBuf};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{info, instrument, warn};

use crate::state::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/pages/contact", get(contact_form).post(contact))
        .route("/pages/:file", get(page))
}

/// Mounted under `/api`.
pub fn listing_routes() -> Router<AppState> {
    Router::new().route("/get-html-files", get(list_pages))
}

async fn index(State(state): State<AppState>) -> Response {
    serve(state.config.pages_dir.join("index.html")).await
}

#[instrument(skip(state))]
async fn page(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    match page_path(&state.config.pages_dir, &file) {
        Some(path) => serve(path).await,
        None => {
            warn!(file = %file, "rejected page name");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn contact_form(State(state): State<AppState>) -> Response {
    serve(state.config.pages_dir.join("contact.html")).await
}

async fn contact(State(state): State<AppState>, body: String) -> Response {
    info!(bytes = body.len(), "contact form received");
    serve(state.config.pages_dir.join("contact_done.html")).await
}

#[instrument(skip(state))]
async fn list_pages(State(state): State<AppState>) -> Json<Vec<String>> {
    let files = list_dir(&state.config.pages_dir).await.unwrap_or_else(|e| {
        warn!(error = %e, dir = %state.config.pages_dir.display(), "list pages failed");
        Vec::new()
    });
    Json(files)
}

/// `<dir>/<name>.html`, or `None` if `name` could escape `dir`.
fn page_path(dir: &FsPath, name: &str) -> Option<PathBuf> {
    let bad = name.is_empty()
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    (!bad).then(|| dir.join(format!("{name}.html")))
}

async fn list_dir(dir: &FsPath) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

async fn serve(path: PathBuf) -> Response {
    match ServeFile::new(path).oneshot(Request::new(Body::empty())).await {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}
