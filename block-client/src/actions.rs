//! Action-related API endpoints

use crate::BlockClient;
use crate::error::Result;
use block_core::dto::action::{ActionRequest, ActionResponse};
use reqwest::RequestBuilder;
use tracing::debug;

impl BlockClient {
    // =============================================================================
    // Actions
    // =============================================================================

    /// Submit an action against a connection
    ///
    /// The service answers with the identifier of the job it queued. Whether
    /// that identifier is present is left to the caller to judge.
    ///
    /// # Arguments
    /// * `req` - The action request
    pub async fn submit_action(&self, req: &ActionRequest) -> Result<ActionResponse> {
        debug!(
            "Submitting {} action on connection {}",
            req.action, req.connection_id
        );
        let response = self.submit_action_request(req).send().await?;

        self.handle_response(response).await
    }

    fn submit_action_request(&self, req: &ActionRequest) -> RequestBuilder {
        self.post("/v1/actions").json(req)
    }
}
