use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::models::{ActivityEvent, ChatSession};
use crate::services::assistant::MessageGenerator;
use crate::services::crm::CrmSink;

pub struct AppState {
    /// Live widget sessions, keyed by session id. Memory only; a session
    /// never survives the process or its own idle TTL.
    pub sessions: Mutex<HashMap<String, ChatSession>>,
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub crm: Box<dyn CrmSink>,
    pub generator: Box<dyn MessageGenerator>,
    pub activity_tx: broadcast::Sender<ActivityEvent>,
}
