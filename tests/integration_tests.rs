use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tokio::sync::broadcast;
use tower::ServiceExt;

use klario_chat::app_router;
use klario_chat::config::AppConfig;
use klario_chat::db;
use klario_chat::errors::AppError;
use klario_chat::models::{BookingRecord, GenerationRequest, LeadRecord, MessageVariant};
use klario_chat::services::assistant::{MessageGenerator, MockGenerator};
use klario_chat::services::crm::CrmSink;
use klario_chat::services::session;
use klario_chat::state::AppState;

// ── Mock sinks ──

#[derive(Default)]
struct MockCrm {
    leads: Arc<Mutex<Vec<LeadRecord>>>,
    bookings: Arc<Mutex<Vec<BookingRecord>>>,
}

#[async_trait]
impl CrmSink for MockCrm {
    async fn record_lead(&self, lead: &LeadRecord) -> anyhow::Result<()> {
        self.leads.lock().unwrap().push(lead.clone());
        Ok(())
    }

    async fn record_booking(&self, booking: &BookingRecord) -> anyhow::Result<()> {
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(())
    }
}

struct FailingGenerator;

#[async_trait]
impl MessageGenerator for FailingGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> anyhow::Result<Vec<MessageVariant>> {
        anyhow::bail!("upstream unavailable")
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        admin_token: "test-token".to_string(),
        crm_webhook_url: String::new(),
        typing_delay_min_ms: 0,
        typing_delay_max_ms: 0,
        session_ttl_minutes: 30,
    }
}

fn test_state() -> Arc<AppState> {
    let (activity_tx, _) = broadcast::channel(64);
    Arc::new(AppState {
        sessions: Mutex::new(HashMap::new()),
        db: Arc::new(Mutex::new(db::init_db(":memory:").unwrap())),
        config: test_config(),
        crm: Box::new(MockCrm::default()),
        generator: Box::new(MockGenerator::new(0)),
        activity_tx,
    })
}

fn test_state_with_crm() -> (Arc<AppState>, Arc<Mutex<Vec<LeadRecord>>>) {
    let leads = Arc::new(Mutex::new(vec![]));
    let crm = MockCrm {
        leads: Arc::clone(&leads),
        bookings: Arc::new(Mutex::new(vec![])),
    };
    let (activity_tx, _) = broadcast::channel(64);
    let state = Arc::new(AppState {
        sessions: Mutex::new(HashMap::new()),
        db: Arc::new(Mutex::new(db::init_db(":memory:").unwrap())),
        config: test_config(),
        crm: Box::new(crm),
        generator: Box::new(MockGenerator::new(0)),
        activity_tx,
    });
    (state, leads)
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn open_session(app: &Router) -> (String, serde_json::Value) {
    let res = app
        .clone()
        .oneshot(post_json("/api/chat/session", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    let id = json["session"]["id"].as_str().unwrap().to_string();
    (id, json)
}

async fn send_message(app: &Router, session_id: &str, text: &str) -> serde_json::Value {
    let res = app
        .clone()
        .oneshot(post_json(
            &format!("/api/chat/session/{session_id}/message"),
            serde_json::json!({ "text": text }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    body_json(res).await["message"].clone()
}

// ── Session lifecycle ──

#[tokio::test]
async fn test_health() {
    let app = app_router(test_state());
    let res = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_starts_with_welcome_and_suggestions() {
    let app = app_router(test_state());
    let (_, json) = open_session(&app).await;

    let messages = json["session"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender"], "bot");
    assert!(messages[0]["text"].as_str().unwrap().contains("Elena"));
    assert_eq!(json["suggested_questions"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_accept_language_seeds_swedish() {
    let app = app_router(test_state());
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat/session")
                .header("Content-Type", "application/json")
                .header("Accept-Language", "sv-SE,sv;q=0.9")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json["session"]["language"], "sv");
    let welcome = json["session"]["messages"][0]["text"].as_str().unwrap();
    assert!(welcome.contains("Välkommen till KLARIO"));
}

#[tokio::test]
async fn test_long_visit_changes_welcome_wording() {
    let app = app_router(test_state());
    let res = app
        .oneshot(post_json(
            "/api/chat/session",
            serde_json::json!({ "visit_seconds": 45 }),
        ))
        .await
        .unwrap();
    let json = body_json(res).await;
    let welcome = json["session"]["messages"][0]["text"].as_str().unwrap();
    assert!(welcome.contains("you've been exploring"));
}

#[tokio::test]
async fn test_unknown_session_is_404() {
    let app = app_router(test_state());
    let res = app
        .oneshot(post_json(
            "/api/chat/session/nope/message",
            serde_json::json!({ "text": "hello" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_session_stops_answering() {
    let app = app_router(test_state());
    let (id, _) = open_session(&app).await;

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/chat/session/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(post_json(
            &format!("/api/chat/session/{id}/message"),
            serde_json::json!({ "text": "hello" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_suggestions_follow_language_param() {
    let app = app_router(test_state());
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/chat/suggestions?lang=sv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["language"], "sv");
    assert_eq!(json["questions"][0], "Vilka prisplaner har ni?");
}

// ── Rule engine over HTTP ──

#[tokio::test]
async fn test_fresh_pricing_question_no_lead_form() {
    let app = app_router(test_state());
    let (id, _) = open_session(&app).await;

    let message = send_message(&app, &id, "What are your pricing plans?").await;
    assert!(message["text"].as_str().unwrap().contains("three plans"));
    // Serialized only when true.
    assert!(message.get("show_lead_form").is_none());
}

#[tokio::test]
async fn test_third_pricing_question_attaches_lead_form() {
    let app = app_router(test_state());
    let (id, _) = open_session(&app).await;

    let first = send_message(&app, &id, "What are your pricing plans?").await;
    assert!(first.get("show_lead_form").is_none());
    let second = send_message(&app, &id, "What are your pricing plans?").await;
    assert!(second.get("show_lead_form").is_none());
    // Two questions already asked and an interest keyword present.
    let third = send_message(&app, &id, "What are your pricing plans?").await;
    assert_eq!(third["show_lead_form"], true);
}

#[tokio::test]
async fn test_swedish_message_flips_language_and_template() {
    let app = app_router(test_state());
    let (id, _) = open_session(&app).await;

    let message = send_message(&app, &id, "Hej, vad kostar det?").await;
    assert!(message["text"].as_str().unwrap().contains("399 SEK/månad"));

    let res = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/chat/session/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let snapshot = body_json(res).await;
    assert_eq!(snapshot["language"], "sv");
}

#[tokio::test]
async fn test_booking_question_attaches_booking_form() {
    let app = app_router(test_state());
    let (id, _) = open_session(&app).await;

    let message = send_message(&app, &id, "Can I book a demo?").await;
    assert_eq!(message["show_booking_form"], true);
}

#[tokio::test]
async fn test_empty_message_rejected() {
    let app = app_router(test_state());
    let (id, _) = open_session(&app).await;

    let res = app
        .oneshot(post_json(
            &format!("/api/chat/session/{id}/message"),
            serde_json::json!({ "text": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Lead capture ──

#[tokio::test]
async fn test_lead_submission_personalizes_later_greeting() {
    let (state, crm_leads) = test_state_with_crm();
    let app = app_router(Arc::clone(&state));
    let (id, _) = open_session(&app).await;

    let res = app
        .clone()
        .oneshot(post_json(
            &format!("/api/chat/session/{id}/lead"),
            serde_json::json!({ "name": "Anna", "email": "a@b.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert!(json["message"]["text"].as_str().unwrap().contains("Anna"));
    assert_eq!(json["toast"]["title"], "Thank you!");

    // The sink saw the record.
    assert_eq!(crm_leads.lock().unwrap().len(), 1);
    assert_eq!(crm_leads.lock().unwrap()[0].email, "a@b.com");

    // Greetings now use the captured name.
    let greeting = send_message(&app, &id, "hello").await;
    assert!(greeting["text"].as_str().unwrap().contains("Hello Anna!"));
}

#[tokio::test]
async fn test_lead_validation_failures() {
    let app = app_router(test_state());
    let (id, _) = open_session(&app).await;

    for payload in [
        serde_json::json!({ "name": "A", "email": "a@b.com" }),
        serde_json::json!({ "name": "Anna", "email": "not-an-email" }),
        serde_json::json!({ "name": "Anna", "email": "a@b.com", "phone": "abc" }),
    ] {
        let res = app
            .clone()
            .oneshot(post_json(&format!("/api/chat/session/{id}/lead"), payload))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

// ── Booking ──

#[tokio::test]
async fn test_booking_confirmation_contains_values_verbatim() {
    let app = app_router(test_state());
    let (id, _) = open_session(&app).await;

    let res = app
        .clone()
        .oneshot(post_json(
            &format!("/api/chat/session/{id}/booking"),
            serde_json::json!({ "date": "2024-06-01", "time": "10:00", "timezone": "CET" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    let text = json["message"]["text"].as_str().unwrap();
    assert!(text.contains("2024-06-01"));
    assert!(text.contains("10:00"));
    assert!(text.contains("CET"));
    assert_eq!(json["toast"]["title"], "Meeting booked!");
}

#[tokio::test]
async fn test_booking_requires_all_fields() {
    let app = app_router(test_state());
    let (id, _) = open_session(&app).await;

    let res = app
        .oneshot(post_json(
            &format!("/api/chat/session/{id}/booking"),
            serde_json::json!({ "date": "", "time": "10:00", "timezone": "CET" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Overlapping sends / teardown during delay ──

#[tokio::test]
async fn test_second_send_while_reply_pending_is_rejected() {
    let state = test_state();
    let snapshot = session::create_session(&state, None, 0);
    {
        let mut sessions = state.sessions.lock().unwrap();
        sessions.get_mut(&snapshot.id).unwrap().reply_pending = true;
    }

    let err = session::process_message(&state, &snapshot.id, "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReplyPending));
}

#[tokio::test]
async fn test_teardown_during_typing_delay_drops_reply() {
    let mut config = test_config();
    config.typing_delay_min_ms = 100;
    config.typing_delay_max_ms = 100;

    let (activity_tx, _) = broadcast::channel(64);
    let state = Arc::new(AppState {
        sessions: Mutex::new(HashMap::new()),
        db: Arc::new(Mutex::new(db::init_db(":memory:").unwrap())),
        config,
        crm: Box::new(MockCrm::default()),
        generator: Box::new(MockGenerator::new(0)),
        activity_tx,
    });

    let snapshot = session::create_session(&state, None, 0);
    let task_state = Arc::clone(&state);
    let session_id = snapshot.id.clone();
    let task =
        tokio::spawn(async move { session::process_message(&task_state, &session_id, "hi").await });

    // Tear the session down while the bot is "typing".
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(session::teardown(&state, &snapshot.id));

    let result = task.await.unwrap();
    assert!(matches!(result, Err(AppError::SessionClosed)));
    assert!(state.sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_disconnected_send_releases_the_pending_guard() {
    let mut config = test_config();
    config.typing_delay_min_ms = 200;
    config.typing_delay_max_ms = 200;

    let (activity_tx, _) = broadcast::channel(64);
    let state = Arc::new(AppState {
        sessions: Mutex::new(HashMap::new()),
        db: Arc::new(Mutex::new(db::init_db(":memory:").unwrap())),
        config,
        crm: Box::new(MockCrm::default()),
        generator: Box::new(MockGenerator::new(0)),
        activity_tx,
    });

    let snapshot = session::create_session(&state, None, 0);
    let task_state = Arc::clone(&state);
    let session_id = snapshot.id.clone();
    let task =
        tokio::spawn(async move { session::process_message(&task_state, &session_id, "hi").await });

    // The client goes away while the bot is "typing"; the dropped request
    // must not leave the session refusing input.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    let message = session::process_message(&state, &snapshot.id, "what does it cost?")
        .await
        .unwrap();
    assert!(message.text.contains("three plans"));
}

// ── Assistant ──

#[tokio::test]
async fn test_assistant_generates_variants() {
    let app = app_router(test_state());
    let res = app
        .oneshot(post_json(
            "/api/assistant/generate",
            serde_json::json!({ "idea": "20% off this week", "tone": "friendly", "channel": "sms" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["variants"].as_array().unwrap().len(), 3);
    assert_eq!(json["toast"]["title"], "Messages Generated");
}

#[tokio::test]
async fn test_assistant_rejects_empty_idea() {
    let app = app_router(test_state());
    let res = app
        .oneshot(post_json(
            "/api/assistant/generate",
            serde_json::json!({ "idea": "  ", "tone": "friendly", "channel": "sms" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_assistant_generation_failure_is_bad_gateway() {
    let (activity_tx, _) = broadcast::channel(64);
    let state = Arc::new(AppState {
        sessions: Mutex::new(HashMap::new()),
        db: Arc::new(Mutex::new(db::init_db(":memory:").unwrap())),
        config: test_config(),
        crm: Box::new(MockCrm::default()),
        generator: Box::new(FailingGenerator),
        activity_tx,
    });

    let app = app_router(state);
    let res = app
        .oneshot(post_json(
            "/api/assistant/generate",
            serde_json::json!({ "idea": "deal", "tone": "casual", "channel": "email" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
}

// ── Admin API ──

#[tokio::test]
async fn test_admin_requires_auth() {
    let app = app_router(test_state());
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_wrong_token() {
    let app = app_router(test_state());
    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/status")
                .header("Authorization", "Bearer wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_sees_captured_leads_and_bookings() {
    let state = test_state();
    let app = app_router(Arc::clone(&state));
    let (id, _) = open_session(&app).await;

    app.clone()
        .oneshot(post_json(
            &format!("/api/chat/session/{id}/lead"),
            serde_json::json!({ "name": "Anna", "email": "a@b.com", "phone": "+46701234567" }),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_json(
            &format!("/api/chat/session/{id}/booking"),
            serde_json::json!({ "date": "2024-06-01", "time": "10:00", "timezone": "CET" }),
        ))
        .await
        .unwrap();

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/leads")
                .header("Authorization", "Bearer test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let leads = body_json(res).await;
    assert_eq!(leads.as_array().unwrap().len(), 1);
    assert_eq!(leads[0]["name"], "Anna");

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/status")
                .header("Authorization", "Bearer test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = body_json(res).await;
    assert_eq!(status["active_sessions"], 1);
    assert_eq!(status["lead_count"], 1);
    assert_eq!(status["booking_count"], 1);
}
