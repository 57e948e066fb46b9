//! Connection-related API endpoints

use crate::BlockClient;
use crate::error::Result;
use serde_json::Value;

impl BlockClient {
    /// List the connections visible to this API key
    ///
    /// A successful call is how a stored credential gets verified.
    pub async fn list_connections(&self) -> Result<Value> {
        let response = self.get("/v1/connections").send().await?;

        self.handle_response(response).await
    }
}
