//! Axum server rendering the shell for every request path.

use anyhow::{Context, Result};
use axum::extract::{RawQuery, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use metashell::{MetaShell, Status};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    shell: Arc<MetaShell>,
    /// Re-read the template from here on every request when set.
    template_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(shell: MetaShell) -> Self {
        Self {
            shell: Arc::new(shell),
            template_path: None,
        }
    }

    /// Read the template from `path` per request instead of the stored copy.
    pub fn reload_template_from(mut self, path: PathBuf) -> Self {
        self.template_path = Some(path);
        self
    }

    pub fn shell(&self) -> &MetaShell {
        &self.shell
    }
}

/// Build the router. All paths fall through to the shell renderer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(render_shell)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "metashell listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("metashell stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("received shutdown signal");
}

async fn render_shell(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = uri.path();
    let language = language_from_query(query.as_deref());
    let language = language.as_deref();

    let rendered = match &state.template_path {
        Some(template_path) => match tokio::fs::read_to_string(template_path).await {
            Ok(template) => state.shell.render_template(path, &template, language),
            Err(e) => {
                error!(path = %template_path.display(), "failed to read template: {e}");
                return (StatusCode::INTERNAL_SERVER_ERROR, "template unavailable").into_response();
            }
        },
        None => state
            .shell
            .render_template(path, state.shell.template(), language),
    };

    (status_code(rendered.status), Html(rendered.html)).into_response()
}

/// First non-empty `lang` parameter. Malformed or repeated parameters never
/// reject the request.
fn language_from_query(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "lang")
        .map(|(_, value)| value.into_owned())
        .filter(|lang| !lang.is_empty())
}

fn status_code(status: Status) -> StatusCode {
    match status {
        Status::Found => StatusCode::OK,
        Status::NotFound => StatusCode::NOT_FOUND,
    }
}
