//! JSON-file backed store

use std::path::PathBuf;

use async_trait::async_trait;
use testflow_model::Flow;
use tracing::debug;

use crate::api::FlowStore;
use crate::errors::StoreError;

/// Stores the flow document as pretty-printed JSON at a fixed path.
///
/// Writes go to a sibling temp file first and are moved into place, so a
/// crashed save never leaves a half-written document behind.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

#[async_trait]
impl FlowStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Flow>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let flow = serde_json::from_slice(&bytes)?;
        Ok(Some(flow))
    }

    async fn save(&self, flow: &Flow) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(flow)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, &json).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        debug!(path = %self.path.display(), bytes = json.len(), "Flow saved");
        Ok(())
    }
}
