use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::chatbot::Reply;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub total_messages: u64,
    pub public_messages: u64,
    pub category_usage: HashMap<String, u64>,
    pub match_kind_usage: HashMap<String, u64>,
    pub persistence_failures: u64,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_reply(&self, reply: &Reply, anonymous: bool) {
        let mut data = self.inner.write().await;
        data.total_messages += 1;
        if anonymous {
            data.public_messages += 1;
        }
        let category = reply.category.map(|c| c.as_str()).unwrap_or("fallback");
        *data.category_usage.entry(category.to_string()).or_insert(0) += 1;
        *data.match_kind_usage.entry(reply.kind.as_str().to_string()).or_insert(0) += 1;
    }

    pub async fn record_persistence_failure(&self) {
        self.inner.write().await.persistence_failures += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
