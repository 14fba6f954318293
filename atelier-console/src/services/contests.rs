use async_trait::async_trait;
use atelier_core::RequestError;
use atelier_core::api::{utils, v1};
use atelier_model::{
    Contest, ContestId, ContestStatus, ListParams, Paginated, Round, RoundId,
    RoundStatus, SetStatusRequest, UpdateContestRequest, UpdateRoundRequest,
};
use std::sync::Arc;

use crate::api_client::ApiClient;

#[async_trait]
pub trait ContestService: Send + Sync {
    async fn list_contests(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Contest>, RequestError>;

    /// Full contest including its rounds.
    async fn get_contest(&self, id: ContestId) -> Result<Contest, RequestError>;

    async fn update_contest(
        &self,
        id: ContestId,
        request: &UpdateContestRequest,
    ) -> Result<Contest, RequestError>;

    async fn set_contest_status(
        &self,
        id: ContestId,
        status: ContestStatus,
    ) -> Result<(), RequestError>;
}

#[async_trait]
pub trait RoundService: Send + Sync {
    async fn get_round(&self, id: RoundId) -> Result<Round, RequestError>;

    async fn update_round(
        &self,
        id: RoundId,
        request: &UpdateRoundRequest,
    ) -> Result<Round, RequestError>;

    async fn set_round_status(
        &self,
        id: RoundId,
        status: RoundStatus,
    ) -> Result<(), RequestError>;
}

/// Contests and their rounds share the staff contest endpoints.
#[derive(Debug, Clone)]
pub struct ContestApiAdapter {
    client: Arc<ApiClient>,
}

impl ContestApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContestService for ContestApiAdapter {
    async fn list_contests(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Contest>, RequestError> {
        self.client
            .get(v1::contests::COLLECTION, &params.to_query_pairs())
            .await
    }

    async fn get_contest(&self, id: ContestId) -> Result<Contest, RequestError> {
        let path =
            utils::replace_param(v1::contests::ITEM, "{id}", id.to_string());
        self.client.get(&path, &[]).await
    }

    async fn update_contest(
        &self,
        id: ContestId,
        request: &UpdateContestRequest,
    ) -> Result<Contest, RequestError> {
        let path =
            utils::replace_param(v1::contests::ITEM, "{id}", id.to_string());
        self.client.put(&path, request).await
    }

    async fn set_contest_status(
        &self,
        id: ContestId,
        status: ContestStatus,
    ) -> Result<(), RequestError> {
        let path =
            utils::replace_param(v1::contests::STATUS, "{id}", id.to_string());
        self.client
            .patch_no_content(&path, &SetStatusRequest::new(status))
            .await
    }
}

#[async_trait]
impl RoundService for ContestApiAdapter {
    async fn get_round(&self, id: RoundId) -> Result<Round, RequestError> {
        let path = utils::replace_param(v1::rounds::ITEM, "{id}", id.to_string());
        self.client.get(&path, &[]).await
    }

    async fn update_round(
        &self,
        id: RoundId,
        request: &UpdateRoundRequest,
    ) -> Result<Round, RequestError> {
        let path = utils::replace_param(v1::rounds::ITEM, "{id}", id.to_string());
        self.client.put(&path, request).await
    }

    async fn set_round_status(
        &self,
        id: RoundId,
        status: RoundStatus,
    ) -> Result<(), RequestError> {
        let path =
            utils::replace_param(v1::rounds::STATUS, "{id}", id.to_string());
        self.client
            .patch_no_content(&path, &SetStatusRequest::new(status))
            .await
    }
}
