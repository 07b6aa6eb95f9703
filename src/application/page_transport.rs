// Transport trait for pushing page state to the dashboard service
use crate::domain::page::Page;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to encode page {route}: {source}")]
    Encode {
        route: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to reach dashboard service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("dashboard service rejected sync with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait PageTransport: Send + Sync {
    /// Send the full page state, returning once the service accepted it
    async fn sync(&self, page: &Page) -> Result<(), SyncError>;
}
