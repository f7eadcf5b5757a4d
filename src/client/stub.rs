// In-process stub of the stats backend for tests
//
// Serves canned JSON on an ephemeral port and counts hits per path so tests
// can assert which calls were (or were not) issued.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

struct StubState {
    stats: Mutex<Value>,
    hits: Mutex<HashMap<String, usize>>,
    fail_commands: AtomicBool,
}

impl StubState {
    fn record(&self, path: &str) {
        *self
            .hits
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_insert(0) += 1;
    }
}

#[derive(Clone)]
pub(crate) struct StubBackend {
    state: Arc<StubState>,
}

impl StubBackend {
    /// Start the stub and return it with its base URL
    pub async fn spawn() -> (Self, String) {
        let state = Arc::new(StubState {
            stats: Mutex::new(sample_stats()),
            hits: Mutex::new(HashMap::new()),
            fail_commands: AtomicBool::new(false),
        });

        let router = Router::new()
            .route("/api/stats", get(stats))
            .route("/api/start", post(command))
            .route("/api/stop", post(command))
            .route("/api/reset", post(command))
            .route("/api/test_algorithms", get(test_algorithms))
            .route("/api/check_user", post(check_user))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (Self { state }, format!("http://{}", addr))
    }

    pub fn set_stats(&self, value: Value) {
        *self.state.stats.lock().unwrap() = value;
    }

    pub fn fail_commands(&self, fail: bool) {
        self.state.fail_commands.store(fail, Ordering::SeqCst);
    }

    pub fn hits(&self, path: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

/// A small but complete stats payload
pub(crate) fn sample_stats() -> Value {
    json!({
        "is_simulating": false,
        "timestamp": "10:00:03",
        "stats": {
            "posts_count": 3,
            "bloom": {"capacity": 5000, "count": 3, "memory_kb": 5.85, "load": 0.0006},
            "hll": {"estimate": 3, "registers": 1024, "memory_kb": 1.0},
            "cms": {"total_count": 12, "memory_kb": 7.81},
            "recent_posts": [
                {"user": "ivan", "platform": "Mastodon", "text": "first", "hashtag": "#Rust",
                 "timestamp": "10:00:01", "likes": 4}
            ]
        },
        "metrics": [
            {"time": "10:00:01", "unique_users": 1, "total_posts": 1},
            {"time": "10:00:02", "unique_users": 2, "total_posts": 2},
            {"time": "10:00:03", "unique_users": 3, "total_posts": 3}
        ],
        "trending": [{"item": "#Rust", "count": 2}, {"item": "#Go", "count": 1}]
    })
}

async fn stats(State(state): State<Arc<StubState>>) -> Json<Value> {
    state.record("/api/stats");
    let body = state.stats.lock().unwrap().clone();
    Json(body)
}

async fn command(State(state): State<Arc<StubState>>, uri: Uri) -> Response {
    state.record(uri.path());
    if state.fail_commands.load(Ordering::SeqCst) {
        (StatusCode::INTERNAL_SERVER_ERROR, "simulator unavailable").into_response()
    } else {
        Json(json!({"status": "ok", "message": uri.path()})).into_response()
    }
}

async fn test_algorithms(State(state): State<Arc<StubState>>) -> Response {
    state.record("/api/test_algorithms");
    if state.fail_commands.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(json!({
        "bloom_accuracy": 98.5,
        "hll_error": 3.2,
        "hll_estimate": 98,
        "hll_actual": 101
    }))
    .into_response()
}

async fn check_user(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Json<Value> {
    state.record("/api/check_user");
    let user = body["user"].as_str().unwrap_or_default().to_string();
    let (bloom, exact) = match user.as_str() {
        "alice" => (true, false),
        "bob" => (true, true),
        _ => (false, false),
    };
    Json(json!({
        "user": user,
        "bloom_result": bloom,
        "exact_result": exact,
        "is_false_positive": bloom && !exact
    }))
}
