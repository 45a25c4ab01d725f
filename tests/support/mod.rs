#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use taskboard::models::Task;
use taskboard::state::AuthMode;
use taskboard::ui::View;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

pub fn init_tracing() {
    Lazy::force(&TRACING);
}

pub fn unique_data_path(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "taskboard_{tag}_{}_{nanos}.json",
        std::process::id()
    ));
    path
}

// ---------------------------------------------------------------------------
// In-process stub backend
// ---------------------------------------------------------------------------

/// Task row as the real backend serializes it: integer id, nullable
/// priority.
#[derive(Debug, Clone, Serialize)]
pub struct StubTask {
    pub id: u64,
    pub text: String,
    pub status: String,
    pub priority: Option<String>,
}

/// Shared, inspectable state of the stub: the task store, the per-request
/// hit log, and failure toggles the tests flip mid-scenario.
#[derive(Debug, Default)]
pub struct StubState {
    tasks: Mutex<Vec<StubTask>>,
    tokens: Mutex<HashSet<String>>,
    hits: Mutex<Vec<String>>,
    reject_bearer: AtomicBool,
    fail_generate: AtomicBool,
    fail_mutations: AtomicBool,
    next_id: AtomicU64,
}

impl StubState {
    pub fn seed_task(&self, text: &str, status: &str, priority: Option<&str>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.tasks.lock().unwrap().push(StubTask {
            id,
            text: text.to_string(),
            status: status.to_string(),
            priority: priority.map(str::to_owned),
        });
        id
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    /// Makes every authenticated call answer 401 from now on, simulating an
    /// expired token.
    pub fn reject_bearer(&self) {
        self.reject_bearer.store(true, Ordering::SeqCst);
    }

    pub fn fail_generate(&self) {
        self.fail_generate.store(true, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self) {
        self.fail_mutations.store(true, Ordering::SeqCst);
    }

    fn record(&self, method: &str, path: &str) {
        self.hits.lock().unwrap().push(format!("{method} {path}"));
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
        let denied = (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid token" })),
        );
        if self.reject_bearer.load(Ordering::SeqCst) {
            return Err(denied);
        }
        let token = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));
        match token {
            Some(token) if self.tokens.lock().unwrap().contains(token) => Ok(()),
            _ => Err(denied),
        }
    }
}

pub struct StubBackend {
    pub base_url: String,
    pub state: Arc<StubState>,
}

pub async fn spawn_stub() -> StubBackend {
    init_tracing();
    let state = Arc::new(StubState::default());
    let router = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/tasks", get(list_tasks))
        .route("/generate-tasks", post(generate_tasks))
        .route("/tasks/:id/complete", post(complete_task))
        .route("/tasks/:id", delete(delete_task))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    StubBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// A base URL nothing listens on, for transport-failure scenarios.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn login(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state.record("POST", "/login");
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if email == "a@x.com" && password == "p" {
        state.tokens.lock().unwrap().insert("tok1".to_string());
        Ok(Json(json!({
            "access_token": "tok1",
            "token_type": "bearer",
            "user": email,
        })))
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid credentials" })),
        ))
    }
}

async fn register(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state.record("POST", "/register");
    let email = body["email"].as_str().unwrap_or_default();
    if email == "taken@x.com" {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Email already registered" })),
        ));
    }
    state.tokens.lock().unwrap().insert("tok-new".to_string());
    Ok(Json(json!({
        "access_token": "tok-new",
        "token_type": "bearer",
        "user": email,
    })))
}

async fn list_tasks(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<StubTask>>, (StatusCode, Json<Value>)> {
    state.record("GET", "/tasks");
    state.authorize(&headers)?;
    Ok(Json(state.tasks.lock().unwrap().clone()))
}

async fn generate_tasks(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    state.record("POST", "/generate-tasks");
    state.authorize(&headers)?;
    if state.fail_generate.load(Ordering::SeqCst) {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "generation failed" })),
        ));
    }
    let transcript = body["transcript"].as_str().unwrap_or_default().to_string();
    let mut count = 0;
    for line in transcript.lines().filter(|line| !line.trim().is_empty()) {
        state.seed_task(line.trim(), "pending", None);
        count += 1;
    }
    Ok(Json(json!({ "count": count })))
}

async fn complete_task(
    State(state): State<Arc<StubState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state.record("POST", &format!("/tasks/{id}/complete"));
    state.authorize(&headers)?;
    if state.fail_mutations.load(Ordering::SeqCst) {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "mutation failed" })),
        ));
    }
    let mut tasks = state.tasks.lock().unwrap();
    if let Some(task) = tasks.iter_mut().find(|task| task.id == id) {
        task.status = "completed".to_string();
    }
    Ok(StatusCode::OK)
}

async fn delete_task(
    State(state): State<Arc<StubState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    state.record("DELETE", &format!("/tasks/{id}"));
    state.authorize(&headers)?;
    if state.fail_mutations.load(Ordering::SeqCst) {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "mutation failed" })),
        ));
    }
    state.tasks.lock().unwrap().retain(|task| task.id != id);
    Ok(StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Recording view
// ---------------------------------------------------------------------------

/// View double that records every call the controller makes, so tests can
/// assert on the exact UI state after a scenario.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub logged_in: Option<bool>,
    pub modal_visible: bool,
    pub modal_mode: Option<AuthMode>,
    pub auth_errors: Vec<String>,
    pub alerts: Vec<String>,
    pub tasks: Vec<Task>,
    pub summary: Option<(usize, usize)>,
    pub transcript: String,
    pub busy: bool,
    pub busy_toggles: usize,
}

impl View for RecordingView {
    fn apply_auth_ui(&mut self, logged_in: bool) {
        self.logged_in = Some(logged_in);
    }

    fn show_modal(&mut self, mode: AuthMode) {
        self.modal_visible = true;
        self.modal_mode = Some(mode);
    }

    fn hide_modal(&mut self) {
        self.modal_visible = false;
    }

    fn show_auth_error(&mut self, message: &str) {
        self.auth_errors.push(message.to_string());
    }

    fn clear_auth_error(&mut self) {
        self.auth_errors.clear();
    }

    fn render_tasks(&mut self, tasks: &[Task]) {
        self.tasks = tasks.to_vec();
    }

    fn clear_tasks(&mut self) {
        self.tasks.clear();
    }

    fn render_summary(&mut self, completed: usize, pending: usize) {
        self.summary = Some((completed, pending));
    }

    fn transcript(&self) -> String {
        self.transcript.clone()
    }

    fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.busy_toggles += 1;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
