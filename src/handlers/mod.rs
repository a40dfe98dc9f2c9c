pub mod admin;
pub mod assistant;
pub mod chat;
pub mod forms;

pub mod health {
    use axum::Json;

    pub async fn health() -> Json<serde_json::Value> {
        Json(serde_json::json!({ "status": "ok" }))
    }
}
