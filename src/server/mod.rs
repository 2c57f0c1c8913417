//! Preview server exposing the content views as JSON

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::cms::CmsClient;
use crate::content::ContentCollection;
use crate::Site;

/// Server state
struct ServerState {
    site: Site,
    client: CmsClient,
}

impl ServerState {
    fn content(&self) -> ContentCollection<'_> {
        ContentCollection::with_client(&self.site, self.client.clone())
    }
}

/// Build the router for a site
pub fn router(site: Site) -> Result<Router> {
    let client = CmsClient::new(&site.config)?;
    let state = Arc::new(ServerState { site, client });

    Ok(Router::new()
        .route("/api/posts", get(posts_handler))
        .route("/api/posts/:slug", get(post_handler))
        .route("/api/tags", get(tags_handler))
        .route("/api/categories", get(categories_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the preview server
pub async fn start(site: Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(site)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}/api/posts", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Map a view result to a JSON response
fn json_or_error<T: Serialize>(result: Result<T>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch content: {:#}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

async fn posts_handler(State(state): State<Arc<ServerState>>) -> Response {
    json_or_error(state.content().get_sorted_posts_list().await)
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.content().get_post_by_slug(&slug).await {
        Some(entry) => Json(entry).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

async fn tags_handler(State(state): State<Arc<ServerState>>) -> Response {
    json_or_error(state.content().get_tag_list().await)
}

async fn categories_handler(State(state): State<Arc<ServerState>>) -> Response {
    json_or_error(state.content().get_category_list().await)
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
