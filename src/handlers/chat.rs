use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::engine::templates;
use crate::errors::AppError;
use crate::models::{ChatMessage, Language, SessionSnapshot};
use crate::services::session;
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct CreateSession {
    /// Browser locale; falls back to the Accept-Language header.
    pub locale: Option<String>,
    /// Seconds spent on the page before the widget opened.
    #[serde(default)]
    pub visit_seconds: u64,
}

#[derive(Serialize)]
pub struct SessionCreated {
    pub session: SessionSnapshot,
    pub suggested_questions: [&'static str; 4],
}

// POST /api/chat/session
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Option<Json<CreateSession>>,
) -> Json<SessionCreated> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let locale = payload.locale.or_else(|| {
        headers
            .get("accept-language")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or("").to_string())
    });

    let snapshot = session::create_session(&state, locale.as_deref(), payload.visit_seconds);
    let questions = templates::suggested_questions(snapshot.language);

    Json(SessionCreated {
        session: snapshot,
        suggested_questions: questions,
    })
}

// GET /api/chat/session/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(session::snapshot(&state, &id)?))
}

// DELETE /api/chat/session/:id
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if session::teardown(&state, &id) {
        Ok(Json(serde_json::json!({ "closed": true })))
    } else {
        Err(AppError::SessionNotFound(id))
    }
}

#[derive(Deserialize)]
pub struct SendMessage {
    pub text: String,
}

#[derive(Serialize)]
pub struct MessageReply {
    pub message: ChatMessage,
}

// POST /api/chat/session/:id/message
//
// Also serves suggested-question clicks; the widget sends the question text
// through the same pipeline as typed input.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<SendMessage>,
) -> Result<Json<MessageReply>, AppError> {
    let message = session::process_message(&state, &id, &payload.text).await?;
    Ok(Json(MessageReply { message }))
}

#[derive(Deserialize)]
pub struct SuggestionsQuery {
    pub lang: Option<String>,
}

// GET /api/chat/suggestions
pub async fn suggestions(Query(query): Query<SuggestionsQuery>) -> Json<serde_json::Value> {
    let language = query
        .lang
        .as_deref()
        .map(Language::parse)
        .unwrap_or_default();
    Json(serde_json::json!({
        "language": language.as_str(),
        "questions": templates::suggested_questions(language),
    }))
}
