//! Health check operations.

use super::BoatrentClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Body of `/healthz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StorageHealth {
    pub status: String,
}

impl BoatrentClient {
    /// Liveness probe. Succeeds when the server answers 200.
    pub async fn livez(&self) -> Result<()> {
        let response = self.get("/livez").send().await?;
        self.handle_empty_response(response).await
    }

    /// Storage health check.
    pub async fn healthz(&self) -> Result<StorageHealth> {
        let response = self.get("/healthz").send().await?;
        self.handle_response(response).await
    }
}
