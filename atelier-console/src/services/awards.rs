use async_trait::async_trait;
use atelier_core::RequestError;
use atelier_core::api::{utils, v1};
use atelier_model::{
    Award, AwardId, ContestId, CreateAwardBatchRequest, UpdateAwardRequest,
};
use std::sync::Arc;

use crate::api_client::ApiClient;

#[async_trait]
pub trait AwardService: Send + Sync {
    async fn list_awards(
        &self,
        contest_id: ContestId,
    ) -> Result<Vec<Award>, RequestError>;

    /// Creates every award in the batch or none.
    async fn create_awards(
        &self,
        batch: &CreateAwardBatchRequest,
    ) -> Result<Vec<Award>, RequestError>;

    async fn update_award(
        &self,
        id: AwardId,
        request: &UpdateAwardRequest,
    ) -> Result<Award, RequestError>;

    async fn delete_award(&self, id: AwardId) -> Result<(), RequestError>;
}

#[derive(Debug, Clone)]
pub struct AwardApiAdapter {
    client: Arc<ApiClient>,
}

impl AwardApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AwardService for AwardApiAdapter {
    async fn list_awards(
        &self,
        contest_id: ContestId,
    ) -> Result<Vec<Award>, RequestError> {
        let path = utils::replace_param(
            v1::awards::BY_CONTEST,
            "{contest_id}",
            contest_id.to_string(),
        );
        self.client.get(&path, &[]).await
    }

    async fn create_awards(
        &self,
        batch: &CreateAwardBatchRequest,
    ) -> Result<Vec<Award>, RequestError> {
        self.client.post(v1::awards::BATCH, batch).await
    }

    async fn update_award(
        &self,
        id: AwardId,
        request: &UpdateAwardRequest,
    ) -> Result<Award, RequestError> {
        let path = utils::replace_param(v1::awards::ITEM, "{id}", id.to_string());
        self.client.put(&path, request).await
    }

    async fn delete_award(&self, id: AwardId) -> Result<(), RequestError> {
        let path = utils::replace_param(v1::awards::ITEM, "{id}", id.to_string());
        self.client.delete(&path).await
    }
}
