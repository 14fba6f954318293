use async_trait::async_trait;
use atelier_core::RequestError;
use atelier_core::api::{utils, v1};
use atelier_model::{
    Campaign, CampaignId, CampaignStatus, CreateCampaignRequest, ListParams,
    Paginated, SetStatusRequest, Sponsor, UpdateCampaignRequest,
};
use std::sync::Arc;

use crate::api_client::ApiClient;

#[async_trait]
pub trait CampaignService: Send + Sync {
    async fn list_campaigns(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Campaign>, RequestError>;

    async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, RequestError>;

    async fn create_campaign(
        &self,
        request: &CreateCampaignRequest,
    ) -> Result<Campaign, RequestError>;

    async fn update_campaign(
        &self,
        id: CampaignId,
        request: &UpdateCampaignRequest,
    ) -> Result<Campaign, RequestError>;

    async fn list_sponsors(
        &self,
        id: CampaignId,
        params: &ListParams,
    ) -> Result<Paginated<Sponsor>, RequestError>;

    async fn set_campaign_status(
        &self,
        id: CampaignId,
        status: CampaignStatus,
    ) -> Result<(), RequestError>;
}

#[derive(Debug, Clone)]
pub struct CampaignApiAdapter {
    client: Arc<ApiClient>,
}

impl CampaignApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CampaignService for CampaignApiAdapter {
    async fn list_campaigns(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Campaign>, RequestError> {
        self.client
            .get(v1::campaigns::COLLECTION, &params.to_query_pairs())
            .await
    }

    async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, RequestError> {
        let path =
            utils::replace_param(v1::campaigns::ITEM, "{id}", id.to_string());
        self.client.get(&path, &[]).await
    }

    async fn create_campaign(
        &self,
        request: &CreateCampaignRequest,
    ) -> Result<Campaign, RequestError> {
        self.client.post(v1::campaigns::COLLECTION, request).await
    }

    async fn update_campaign(
        &self,
        id: CampaignId,
        request: &UpdateCampaignRequest,
    ) -> Result<Campaign, RequestError> {
        let path =
            utils::replace_param(v1::campaigns::ITEM, "{id}", id.to_string());
        self.client.put(&path, request).await
    }

    async fn list_sponsors(
        &self,
        id: CampaignId,
        params: &ListParams,
    ) -> Result<Paginated<Sponsor>, RequestError> {
        let path =
            utils::replace_param(v1::campaigns::SPONSORS, "{id}", id.to_string());
        self.client.get(&path, &params.to_query_pairs()).await
    }

    async fn set_campaign_status(
        &self,
        id: CampaignId,
        status: CampaignStatus,
    ) -> Result<(), RequestError> {
        let path =
            utils::replace_param(v1::campaigns::STATUS, "{id}", id.to_string());
        self.client
            .patch_no_content(&path, &SetStatusRequest::new(status))
            .await
    }
}
