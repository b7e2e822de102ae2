// src/services/chat_service.rs
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use super::chatbot::{Reply, select_reply_with};
use super::history_store::{ChatExchange, HISTORY_LIMIT, HistoryStore};
use super::metrics_manager::MetricsManager;
use crate::error::{AppError, AppResult};

/// Accept only a present, string-typed, non-blank message.
pub fn validate_message(message: Option<&Value>) -> AppResult<&str> {
    match message {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.as_str()),
        Some(Value::String(_)) => Err(AppError::BadRequest("Message cannot be empty".to_string())),
        _ => Err(AppError::BadRequest("Message is required and must be a string".to_string())),
    }
}

#[derive(Clone)]
pub struct ChatService {
    history: Arc<dyn HistoryStore>,
    metrics: MetricsManager,
}

impl ChatService {
    pub fn new(history: Arc<dyn HistoryStore>, metrics: MetricsManager) -> Self {
        Self { history, metrics }
    }

    pub fn metrics(&self) -> &MetricsManager {
        &self.metrics
    }

    /// Compute a reply. With an identity, both sides of the exchange are
    /// appended to its history; a failed append is logged and the reply is
    /// still returned.
    pub async fn respond(&self, identity: Option<&str>, message: &str) -> String {
        let reply = select_reply_with(message, &mut rand::thread_rng());
        self.finish(identity, message, reply).await
    }

    /// Same as [`ChatService::respond`] with an injected random source.
    pub async fn respond_with<R: rand::Rng + Send>(
        &self,
        identity: Option<&str>,
        message: &str,
        rng: &mut R,
    ) -> String {
        let reply = select_reply_with(message, rng);
        self.finish(identity, message, reply).await
    }

    async fn finish(&self, identity: Option<&str>, message: &str, reply: Reply) -> String {
        debug!(
            category = reply.category.map(|c| c.as_str()).unwrap_or("fallback"),
            kind = reply.kind.as_str(),
            authenticated = identity.is_some(),
            "reply selected"
        );
        self.metrics.record_reply(&reply, identity.is_none()).await;

        if let Some(identity) = identity {
            let exchanges = [ChatExchange::user(message), ChatExchange::bot(reply.text.as_str())];
            for exchange in &exchanges {
                if let Err(e) = self.history.append_exchange(identity, exchange).await {
                    error!(identity, "failed to persist chat exchange: {}", e);
                    self.metrics.record_persistence_failure().await;
                    break;
                }
            }
        }

        reply.text
    }

    pub async fn health_check(&self) -> AppResult<()> {
        Ok(self.history.health_check().await?)
    }

    pub async fn history(&self, identity: &str) -> AppResult<Vec<ChatExchange>> {
        Ok(self.history.history(identity, HISTORY_LIMIT).await?)
    }
}
