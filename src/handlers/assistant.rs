use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{GenerationRequest, MessageVariant, Toast};
use crate::state::AppState;

#[derive(Serialize)]
pub struct GenerationResponse {
    pub variants: Vec<MessageVariant>,
    pub toast: Toast,
}

// POST /api/assistant/generate
//
// Generator failure maps to 502 with a retryable message, never a
// half-built draft.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    if request.idea.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter your message idea first.".to_string(),
        ));
    }

    match state.generator.generate(&request).await {
        Ok(variants) => Ok(Json(GenerationResponse {
            toast: Toast::info(
                "Messages Generated",
                format!("AI has created {} message variants for you.", variants.len()),
            ),
            variants,
        })),
        Err(e) => {
            tracing::error!(error = %e, "message generation failed");
            Err(AppError::Generation(
                "Failed to generate messages. Please try again.".to_string(),
            ))
        }
    }
}
