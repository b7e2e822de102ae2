// src/services/history_store.rs
use std::{
    collections::HashMap,
    fmt::{Debug, Write as _},
    path::PathBuf,
    sync::Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};

/// Upper bound on exchanges returned by a history fetch.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatExchange {
    pub fn new(sender: Sender, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { sender, text: text.into(), timestamp }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text, Utc::now())
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text, Utc::now())
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid identity: {0:?}")]
    InvalidIdentity(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable, append-only chat history keyed by identity.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one exchange. Retried deliveries are not de-duplicated.
    async fn append_exchange(&self, identity: &str, exchange: &ChatExchange) -> StorageResult<()>;

    /// Most-recent-first, at most `min(limit, HISTORY_LIMIT)` entries.
    async fn history(&self, identity: &str, limit: usize) -> StorageResult<Vec<ChatExchange>>;

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}

fn check_identity(identity: &str) -> StorageResult<()> {
    if identity.trim().is_empty() {
        return Err(StorageError::InvalidIdentity(identity.to_string()));
    }
    Ok(())
}

fn newest_first(exchanges: &[ChatExchange], limit: usize) -> Vec<ChatExchange> {
    exchanges
        .iter()
        .rev()
        .take(limit.min(HISTORY_LIMIT))
        .cloned()
        .collect()
}

#[derive(Clone, Default)]
pub struct MemoryHistoryStore {
    inner: Arc<RwLock<HashMap<String, Vec<ChatExchange>>>>,
}

impl Debug for MemoryHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHistoryStore").finish_non_exhaustive()
    }
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities with at least one exchange
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append_exchange(&self, identity: &str, exchange: &ChatExchange) -> StorageResult<()> {
        check_identity(identity)?;
        let mut guard = self.inner.write().await;
        guard.entry(identity.to_string()).or_default().push(exchange.clone());
        Ok(())
    }

    async fn history(&self, identity: &str, limit: usize) -> StorageResult<Vec<ChatExchange>> {
        check_identity(identity)?;
        let guard = self.inner.read().await;
        Ok(guard
            .get(identity)
            .map(|exchanges| newest_first(exchanges, limit))
            .unwrap_or_default())
    }
}

/// One `<hex(identity)>.jsonl` file per identity under `base_dir`.
#[derive(Debug, Clone)]
pub struct JsonlHistoryStore {
    base_dir: PathBuf,
}

impl JsonlHistoryStore {
    pub async fn new(base_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    // Hex keeps arbitrary identities filesystem-safe and collision-free.
    fn path_for(&self, identity: &str) -> PathBuf {
        let mut name = String::with_capacity(identity.len() * 2 + 6);
        for byte in identity.as_bytes() {
            let _ = write!(name, "{:02x}", byte);
        }
        name.push_str(".jsonl");
        self.base_dir.join(name)
    }
}

#[async_trait]
impl HistoryStore for JsonlHistoryStore {
    async fn append_exchange(&self, identity: &str, exchange: &ChatExchange) -> StorageResult<()> {
        check_identity(identity)?;
        let mut line = serde_json::to_string(exchange)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(identity))
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn history(&self, identity: &str, limit: usize) -> StorageResult<Vec<ChatExchange>> {
        check_identity(identity)?;
        let path = self.path_for(identity);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut exchanges = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ChatExchange>(line) {
                Ok(exchange) => exchanges.push(exchange),
                Err(e) => tracing::warn!(path = %path.display(), line = index + 1, "skipping unreadable history line: {}", e),
            }
        }
        Ok(newest_first(&exchanges, limit))
    }

    async fn health_check(&self) -> StorageResult<()> {
        fs::metadata(&self.base_dir).await?;
        Ok(())
    }
}
