//! Web front-end: the chat page plus a small JSON API.

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    serve, Json, Router,
};
use minijinja::{path_loader, Environment};
use minijinja_autoreload::AutoReloader;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::category::ChallengeCategory;
use crate::gemini::{ChallengeError, GeminiClient};
use crate::library;
use crate::{Conversation, Origin, FALLBACK_MESSAGE};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    templates: Arc<AutoReloader>,
    client: Arc<GeminiClient>,
    conversation: Arc<Mutex<Conversation>>,
    // One generation at a time; set for the duration of a turn.
    busy: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(client: GeminiClient) -> Result<Self> {
        let templates = create_minijinja_env().context("Failed to initialize template engine")?;
        Ok(Self {
            templates: Arc::new(templates),
            client: Arc::new(client),
            conversation: Arc::new(Mutex::new(Conversation::new())),
            busy: Arc::new(AtomicBool::new(false)),
        })
    }
}

// Minijinja Environment setup
fn create_minijinja_env() -> Result<AutoReloader> {
    // Use AutoReloader for development convenience
    let reloader = AutoReloader::new(|notifier| {
        let loader = path_loader("templates");
        let mut env = Environment::new();
        env.set_loader(loader);
        // Watch the templates directory for changes
        notifier.watch_path("templates", true);
        Ok(env)
    });
    Ok(reloader)
}

async fn index_handler(
    State(state): State<AppState>,
) -> Result<axum::response::Html<String>, axum::response::Html<String>> {
    state
        .templates
        .acquire_env()
        .and_then(|env| {
            env.get_template("index.html").and_then(|tmpl| {
                let context = minijinja::context! {
                    title => "Challenge Bot",
                };
                tmpl.render(context)
            })
        })
        .map(axum::response::Html)
        .map_err(|e| {
            error!("Failed to get or render template: {}", e);
            axum::response::Html(format!("Internal Server Error: {}", e))
        })
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

// One full chat turn: append the user's text, generate, append the reply (or
// the fixed fallback line on any failure). A second request while one is
// pending is rejected and leaves the transcript untouched.
async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let input = request.message.trim().to_string();
    if input.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "message must not be empty"})),
        );
    }

    if state.busy.swap(true, Ordering::SeqCst) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"error": "A challenge is already being generated. Please wait."})),
        );
    }

    state
        .conversation
        .lock()
        .await
        .append(Origin::User, input.clone());

    let result = state.client.request_challenge(&input).await;
    state.busy.store(false, Ordering::SeqCst);

    match result {
        Ok(challenge) => {
            state
                .conversation
                .lock()
                .await
                .append(Origin::Assistant, challenge.text.clone());
            (
                StatusCode::OK,
                Json(json!({
                    "reply": challenge.text,
                    "category": challenge.category.label(),
                })),
            )
        }
        Err(e) => {
            warn!("challenge generation failed: {e}");
            state
                .conversation
                .lock()
                .await
                .append(Origin::Assistant, FALLBACK_MESSAGE.to_string());
            (
                status_for(&e),
                Json(json!({
                    "reply": FALLBACK_MESSAGE,
                    "error": e.to_string(),
                })),
            )
        }
    }
}

async fn history_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let conversation = state.conversation.lock().await;
    let entries: Vec<_> = conversation
        .entries()
        .iter()
        .map(|entry| {
            json!({
                "timestamp": entry.timestamp,
                "text": entry.text,
                "origin": entry.origin.as_str(),
            })
        })
        .collect();
    Json(json!({"entries": entries}))
}

async fn daily_handler() -> Json<serde_json::Value> {
    Json(json!({"challenge": library::daily_challenge()}))
}

async fn category_challenge_handler(Path(category): Path<String>) -> Json<serde_json::Value> {
    let challenge = ChallengeCategory::from_label(&category).and_then(library::random_challenge);
    match challenge {
        Some(challenge) => Json(json!({"challenge": challenge})),
        None => Json(json!({"challenge": "Invalid category selected."})),
    }
}

fn status_for(error: &ChallengeError) -> StatusCode {
    match error {
        ChallengeError::ConfigurationMissing => StatusCode::SERVICE_UNAVAILABLE,
        ChallengeError::BadRequest => StatusCode::BAD_REQUEST,
        ChallengeError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ChallengeError::Unauthorized
        | ChallengeError::Provider(_)
        | ChallengeError::InvalidResponseShape
        | ChallengeError::Unknown => StatusCode::BAD_GATEWAY,
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/history", get(history_handler))
        .route("/api/daily", get(daily_handler))
        .route("/api/challenge/:category", get(category_challenge_handler))
        // Route for static files must be nested under a path like /static
        // or it will conflict with other routes.
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(TraceLayer::new_for_http()) // Add request logging
}

pub async fn start_web_server(port: u16, client: GeminiClient) -> Result<()> {
    let state = AppState::new(client)?;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {}", addr))?;

    serve(listener, app.into_make_service())
        .await
        .context("Web server failed")?;

    Ok(())
}
