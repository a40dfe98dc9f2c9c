use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::db::queries;
use crate::engine;
use crate::engine::templates;
use crate::errors::AppError;
use crate::models::{
    ActivityKind, BookingRecord, ChatMessage, ChatSession, Language, LeadRecord, ReplyKind,
    SessionContext, SessionSnapshot, Toast,
};
use crate::services::activity::record_activity;
use crate::services::validation;
use crate::state::AppState;

/// Create a fresh session seeded from the browser locale and post the one
/// spontaneous bot message there will ever be: the welcome.
pub fn create_session(
    state: &Arc<AppState>,
    locale: Option<&str>,
    page_seconds: u64,
) -> SessionSnapshot {
    let language = locale.map(Language::from_locale).unwrap_or_default();
    let id = uuid::Uuid::new_v4().to_string();

    let mut session = ChatSession::new(
        id.clone(),
        SessionContext::new(language, page_seconds),
        state.config.session_ttl_minutes,
    );

    session
        .messages
        .push(ChatMessage::bot(&templates::welcome(language, page_seconds)));
    session.last_reply = Some(ReplyKind::Welcome);

    tracing::info!(session = %id, language = language.as_str(), "session started");
    record_activity(state, &id, ActivityKind::SessionStarted, language.as_str());

    let snapshot = SessionSnapshot::of(&session);
    state.sessions.lock().unwrap().insert(id, session);
    snapshot
}

/// Handle one user message end to end: context mutation, reply selection,
/// simulated typing delay, delivery. A second send while a reply is in
/// flight is rejected rather than queued, and a session torn down during
/// the delay never receives the stale reply.
pub async fn process_message(
    state: &Arc<AppState>,
    session_id: &str,
    text: &str,
) -> Result<ChatMessage, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let reply = {
        let mut sessions = state.sessions.lock().unwrap();
        let session = live_session(&mut sessions, session_id)?;

        if session.reply_pending {
            return Err(AppError::ReplyPending);
        }
        session.reply_pending = true;

        session.context.language = engine::detect_language(text, session.context.language);
        session.context.shows_interest |= engine::shows_interest(text);

        session.messages.push(ChatMessage::user(text));
        // The lead predicate counts questions *before* this one, so the
        // counter is bumped after reply selection: the third pricing
        // question is the first that can attach the lead form.
        let reply = engine::generate_reply(text, session);
        session.context.questions_asked += 1;
        session.touch(state.config.session_ttl_minutes);

        tracing::info!(
            session = %session_id,
            kind = ?reply.kind,
            questions = session.context.questions_asked,
            language = session.context.language.as_str(),
            "reply selected"
        );
        reply
    };

    let mut pending = PendingGuard {
        state: Arc::clone(state),
        session_id: session_id.to_string(),
        armed: true,
    };

    tokio::time::sleep(typing_delay(state)).await;

    let mut sessions = state.sessions.lock().unwrap();
    let Some(session) = sessions.get_mut(session_id) else {
        // Torn down while "typing"; drop the reply instead of resurrecting
        // the session.
        tracing::debug!(session = %session_id, "session closed mid-reply, dropping");
        return Err(AppError::SessionClosed);
    };

    let message = reply.into_message();
    session.messages.push(message.clone());
    session.reply_pending = false;
    pending.armed = false;

    record_activity(state, session_id, ActivityKind::MessageHandled, &message.text);
    Ok(message)
}

/// Lead form submission: validate, capture contact fields (first write
/// wins), persist, hand to the CRM sink, thank the visitor.
pub async fn submit_lead(
    state: &Arc<AppState>,
    session_id: &str,
    name: &str,
    email: &str,
    phone: Option<&str>,
) -> Result<(ChatMessage, Toast), AppError> {
    let (record, message, toast) = {
        let mut sessions = state.sessions.lock().unwrap();
        let session = live_session(&mut sessions, session_id)?;
        let language = session.context.language;

        validation::validate_lead(name, email, phone, language).map_err(AppError::Validation)?;

        let ctx = &mut session.context;
        if ctx.name.is_none() {
            ctx.name = Some(name.trim().to_string());
        }
        if ctx.email.is_none() {
            ctx.email = Some(email.trim().to_string());
        }
        if ctx.phone.is_none() {
            ctx.phone = phone
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string);
        }

        let record = LeadRecord {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.map(str::trim).filter(|p| !p.is_empty()).map(str::to_string),
            created_at: chrono::Utc::now().naive_utc(),
        };

        let message = ChatMessage::bot(&templates::lead_thanks(language, name.trim()));
        session.messages.push(message.clone());
        session.last_reply = Some(ReplyKind::LeadThanks);
        session.touch(state.config.session_ttl_minutes);

        let toast = match language {
            Language::En => Toast::info(
                "Thank you!",
                "We'll contact you soon with relevant information.",
            ),
            Language::Sv => Toast::info(
                "Tack!",
                "Vi kommer att kontakta dig snart med relevant information.",
            ),
        };
        (record, message, toast)
    };

    {
        let db = state.db.lock().unwrap();
        queries::insert_lead(&db, &record)?;
    }
    if let Err(e) = state.crm.record_lead(&record).await {
        // The visitor already got their confirmation; the sink is
        // best-effort.
        tracing::error!(error = %e, session = %session_id, "CRM lead delivery failed");
    }
    record_activity(state, session_id, ActivityKind::LeadCaptured, &record.name);

    Ok((message, toast))
}

/// Booking form submission: confirmation only, no context mutation.
pub async fn submit_booking(
    state: &Arc<AppState>,
    session_id: &str,
    date: &str,
    time: &str,
    timezone: &str,
) -> Result<(ChatMessage, Toast), AppError> {
    let (record, message, toast) = {
        let mut sessions = state.sessions.lock().unwrap();
        let session = live_session(&mut sessions, session_id)?;
        let language = session.context.language;

        validation::validate_booking(date, time, timezone, language)
            .map_err(AppError::Validation)?;

        let record = BookingRecord {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            date: date.trim().to_string(),
            time: time.trim().to_string(),
            timezone: timezone.trim().to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        let message = ChatMessage::bot(&templates::booking_confirmation(
            language,
            &record.date,
            &record.time,
            &record.timezone,
        ));
        session.messages.push(message.clone());
        session.last_reply = Some(ReplyKind::BookingConfirmation);
        session.touch(state.config.session_ttl_minutes);

        let toast = match language {
            Language::En => Toast::info(
                "Meeting booked!",
                format!("Your meeting is booked for {} at {}", record.date, record.time),
            ),
            Language::Sv => Toast::info(
                "Möte bokat!",
                format!("Ditt möte är bokat för {} kl {}", record.date, record.time),
            ),
        };
        (record, message, toast)
    };

    {
        let db = state.db.lock().unwrap();
        queries::insert_booking(&db, &record)?;
    }
    if let Err(e) = state.crm.record_booking(&record).await {
        tracing::error!(error = %e, session = %session_id, "CRM booking delivery failed");
    }
    record_activity(
        state,
        session_id,
        ActivityKind::BookingScheduled,
        &format!("{} {} ({})", record.date, record.time, record.timezone),
    );

    Ok((message, toast))
}

pub fn snapshot(state: &Arc<AppState>, session_id: &str) -> Result<SessionSnapshot, AppError> {
    let mut sessions = state.sessions.lock().unwrap();
    let session = live_session(&mut sessions, session_id)?;
    Ok(SessionSnapshot::of(session))
}

/// Explicit teardown from the widget's unload hook.
pub fn teardown(state: &Arc<AppState>, session_id: &str) -> bool {
    let removed = state.sessions.lock().unwrap().remove(session_id).is_some();
    if removed {
        tracing::info!(session = %session_id, "session torn down");
    }
    removed
}

/// Drop idle sessions; called from the periodic sweeper task.
pub fn sweep_expired(state: &Arc<AppState>) -> usize {
    let mut sessions = state.sessions.lock().unwrap();
    let before = sessions.len();
    sessions.retain(|_, s| !s.is_expired());
    before - sessions.len()
}

fn live_session<'a>(
    sessions: &'a mut std::collections::HashMap<String, ChatSession>,
    session_id: &str,
) -> Result<&'a mut ChatSession, AppError> {
    // Lazy expiry: an expired session behaves exactly like a closed one.
    if sessions.get(session_id).is_some_and(|s| s.is_expired()) {
        sessions.remove(session_id);
        return Err(AppError::SessionClosed);
    }
    sessions
        .get_mut(session_id)
        .ok_or_else(|| AppError::SessionNotFound(session_id.to_string()))
}

/// Clears a session's pending flag when dropped while still armed. The
/// request future can be dropped mid-delay (client disconnect); without
/// this the session would answer 409 to every send until its TTL.
struct PendingGuard {
    state: Arc<AppState>,
    session_id: String,
    armed: bool,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut sessions) = self.state.sessions.lock() {
            if let Some(session) = sessions.get_mut(&self.session_id) {
                session.reply_pending = false;
            }
        }
    }
}

fn typing_delay(state: &Arc<AppState>) -> Duration {
    let min = state.config.typing_delay_min_ms;
    let max = state.config.typing_delay_max_ms.max(min);
    let ms = if max > min {
        rand::thread_rng().gen_range(min..=max)
    } else {
        min
    };
    Duration::from_millis(ms)
}
