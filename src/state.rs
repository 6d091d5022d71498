use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    models::alert::{AlertSnapshot, RefreshResult},
    pipeline::PresentationSink,
};

/// Holds the most recent published result for the HTTP API.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    latest: Arc<RwLock<Option<AlertSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn latest(&self) -> Option<AlertSnapshot> {
        self.latest.read().await.clone()
    }

    /// Active warning count, 0 before the first refresh.
    pub async fn active_warnings(&self) -> usize {
        self.latest
            .read()
            .await
            .as_ref()
            .map_or(0, |snapshot| snapshot.result.count())
    }
}

#[async_trait]
impl PresentationSink for SnapshotStore {
    async fn publish(&self, result: RefreshResult) {
        *self.latest.write().await = Some(AlertSnapshot::new(result));
    }
}
