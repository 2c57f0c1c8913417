//! In-process fake of the CMS API used by tests

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use crate::config::SiteConfig;

pub(crate) const TEST_API_KEY: &str = "test-key";

/// Content served by the fake CMS
#[derive(Debug, Clone, Default)]
pub(crate) struct CmsFixture {
    /// Posts, already ordered newest first
    pub posts: Vec<Value>,
    pub categories: Vec<Value>,
    pub tags: Vec<Value>,
}

/// A request received by the fake CMS
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
}

struct FakeState {
    fixture: CmsFixture,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Handle to a running fake CMS
pub(crate) struct FakeCms {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeCms {
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    /// Site configuration pointing at this server
    pub fn config(&self) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.api_base_url = Some(self.base_url());
        config.api_key = TEST_API_KEY.to_string();
        config
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

/// Start a fake CMS on an ephemeral port
pub(crate) async fn fake_cms(fixture: CmsFixture) -> FakeCms {
    let state = Arc::new(FakeState {
        fixture,
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/api/v1/:endpoint", get(list_handler))
        .route("/api/v1/:endpoint/:id", get(detail_handler))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeCms { addr, state }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-microcms-api-key")
        .and_then(|v| v.to_str().ok())
        == Some(TEST_API_KEY)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "X-MICROCMS-API-KEY header is invalid." })),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Content is not found." }))).into_response()
}

impl FakeState {
    fn record(&self, path: String, query: HashMap<String, String>) {
        self.requests
            .lock()
            .unwrap()
            .push(RecordedRequest { path, query });
    }

    fn collection(&self, endpoint: &str) -> Option<&[Value]> {
        match endpoint {
            "blogs" => Some(self.fixture.posts.as_slice()),
            "categories" => Some(self.fixture.categories.as_slice()),
            "tags" => Some(self.fixture.tags.as_slice()),
            _ => None,
        }
    }
}

async fn list_handler(
    State(state): State<Arc<FakeState>>,
    Path(endpoint): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.record(format!("/api/v1/{}", endpoint), query.clone());
    if !authorized(&headers) {
        return unauthorized();
    }
    let Some(items) = state.collection(&endpoint) else {
        return not_found();
    };

    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let offset: usize = query.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);

    let matching: Vec<&Value> = items
        .iter()
        .filter(|item| match query.get("filters") {
            Some(filters) => matches_filters(item, filters),
            None => true,
        })
        .collect();
    let contents: Vec<&Value> = matching.iter().skip(offset).take(limit).copied().collect();

    Json(json!({
        "contents": contents,
        "totalCount": matching.len(),
        "offset": offset,
        "limit": limit,
    }))
    .into_response()
}

async fn detail_handler(
    State(state): State<Arc<FakeState>>,
    Path((endpoint, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    state.record(format!("/api/v1/{}/{}", endpoint, id), HashMap::new());
    if !authorized(&headers) {
        return unauthorized();
    }
    state
        .collection(&endpoint)
        .and_then(|items| items.iter().find(|item| item["id"] == id.as_str()))
        .map(|item| Json(item.clone()).into_response())
        .unwrap_or_else(not_found)
}

/// Evaluate the subset of the filter syntax the library emits
fn matches_filters(item: &Value, filters: &str) -> bool {
    filters.split("[and]").all(|condition| {
        if let Some((field, value)) = condition.split_once("[equals]") {
            match (field, &item[field]) {
                ("category", category) => category["id"] == value,
                ("draft", Value::Null) => value == "false",
                (_, Value::Bool(b)) => b.to_string() == value,
                (_, other) => *other == value,
            }
        } else if let Some((field, value)) = condition.split_once("[contains]") {
            item[field]
                .as_array()
                .map(|refs| refs.iter().any(|r| r["id"] == value))
                .unwrap_or(false)
        } else {
            false
        }
    })
}

fn timestamps(day: u32) -> Value {
    let at = format!("2024-01-{:02}T00:00:00.000Z", day);
    json!({ "createdAt": at, "updatedAt": at, "publishedAt": at, "revisedAt": at })
}

fn with_timestamps(mut value: Value, day: u32) -> Value {
    if let (Value::Object(map), Value::Object(times)) = (&mut value, timestamps(day)) {
        map.extend(times);
    }
    value
}

pub(crate) fn tag(id: &str, name: &str) -> Value {
    with_timestamps(json!({ "id": id, "name": name, "slug": id }), 1)
}

pub(crate) fn category(id: &str, name: &str) -> Value {
    with_timestamps(json!({ "id": id, "name": name, "slug": id }), 1)
}

/// A post published on 2024-01-`day`
pub(crate) fn post(
    id: &str,
    title: &str,
    day: u32,
    tags: Vec<Value>,
    category: Option<Value>,
    draft: bool,
) -> Value {
    let mut value = json!({
        "id": id,
        "title": title,
        "content": format!("<p>{} body</p>", title),
        "description": format!("About {}", title),
        "tags": tags,
        "draft": draft,
    });
    if let Some(category) = category {
        value["category"] = category;
    }
    with_timestamps(value, day)
}

/// Three posts A, B, C published on days 3, 2, 1
///
/// A: Tech, tags Rust + web. B: life, tag Rust, draft. C: no category, tags ai + web.
pub(crate) fn sample_fixture() -> CmsFixture {
    let rust = tag("rust", "Rust");
    let web = tag("web", "web");
    let ai = tag("ai", "ai");
    let tech = category("tech", "Tech");
    let life = category("life", "life");

    CmsFixture {
        posts: vec![
            post("post-a", "A", 3, vec![rust.clone(), web.clone()], Some(tech.clone()), false),
            post("post-b", "B", 2, vec![rust.clone()], Some(life.clone()), true),
            post("post-c", "C", 1, vec![ai.clone(), web.clone()], None, false),
        ],
        categories: vec![tech, life],
        tags: vec![rust, web, ai],
    }
}
