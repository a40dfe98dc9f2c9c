use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{ChatMessage, Toast};
use crate::services::session;
use crate::state::AppState;

#[derive(Serialize)]
pub struct FormResponse {
    pub message: ChatMessage,
    pub toast: Toast,
}

#[derive(Deserialize)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

// POST /api/chat/session/:id/lead
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(form): Json<LeadForm>,
) -> Result<Json<FormResponse>, AppError> {
    let (message, toast) =
        session::submit_lead(&state, &id, &form.name, &form.email, form.phone.as_deref()).await?;
    Ok(Json(FormResponse { message, toast }))
}

#[derive(Deserialize)]
pub struct BookingForm {
    pub date: String,
    pub time: String,
    pub timezone: String,
}

// POST /api/chat/session/:id/booking
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(form): Json<BookingForm>,
) -> Result<Json<FormResponse>, AppError> {
    let (message, toast) =
        session::submit_booking(&state, &id, &form.date, &form.time, &form.timezone).await?;
    Ok(Json(FormResponse { message, toast }))
}
