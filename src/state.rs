// src/state.rs
use std::sync::Arc;

use crate::config::{AppConfig, StoreKind};
use crate::services::chat_service::ChatService;
use crate::services::history_store::{HistoryStore, JsonlHistoryStore, MemoryHistoryStore, StorageResult};
use crate::services::metrics_manager::MetricsManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: AppConfig,
    pub chat: ChatService,
}

impl AppState {
    pub fn new(config: AppConfig, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            config,
            chat: ChatService::new(history, MetricsManager::new()),
        }
    }

    /// Build the history backend named in the config.
    pub async fn from_config(config: AppConfig) -> StorageResult<Self> {
        let history: Arc<dyn HistoryStore> = match config.store {
            StoreKind::Memory => Arc::new(MemoryHistoryStore::new()),
            StoreKind::Jsonl => Arc::new(JsonlHistoryStore::new(&config.data_dir).await?),
        };
        Ok(Self::new(config, history))
    }

    pub fn identity_for_token(&self, token: &str) -> Option<&str> {
        self.config.api_tokens.get(token).map(String::as_str)
    }
}
