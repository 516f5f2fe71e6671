use std::sync::Arc;

use tokio::sync::Mutex;

use crate::gateway::Gateway;
use crate::interview::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Injected content generator. Default: `LlmGateway` over the Groq client.
    pub gateway: Arc<dyn Gateway>,
    /// Question count used when a start request does not name one.
    pub default_total_questions: u32,
    /// The single active interview. The mutex serializes callers; it is held
    /// across gateway calls so each request sees a consistent session.
    pub interview: Arc<Mutex<Option<Session>>>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, default_total_questions: u32) -> Self {
        Self {
            gateway,
            default_total_questions,
            interview: Arc::new(Mutex::new(None)),
        }
    }
}
