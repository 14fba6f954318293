use async_trait::async_trait;
use atelier_core::query::FilterState;
use atelier_core::stats::progress_percent;
use atelier_core::{
    Fetched, ListSource, ListViewController, RequestError, StatusAction,
    SubmitError, TransitionPort, Validate,
};
use atelier_model::{
    Campaign, CampaignId, CampaignStatus, CreateCampaignRequest, ListParams,
    Paginated, Sponsor, UpdateCampaignRequest,
};
use std::sync::Arc;

use super::{Services, after_mutation, editable, report};
use crate::services::CampaignService;

struct CampaignBackend {
    service: Arc<dyn CampaignService>,
}

#[async_trait]
impl ListSource<Campaign> for CampaignBackend {
    async fn fetch(
        &self,
        filters: &FilterState<CampaignStatus>,
    ) -> Result<Fetched<Campaign>, RequestError> {
        let page = self
            .service
            .list_campaigns(&filters.to_list_params())
            .await?;
        Ok(Fetched::Page(page.into()))
    }
}

#[async_trait]
impl TransitionPort<Campaign> for CampaignBackend {
    async fn apply(
        &self,
        id: CampaignId,
        _action: StatusAction,
        target: CampaignStatus,
    ) -> Result<(), RequestError> {
        self.service.set_campaign_status(id, target).await
    }
}

/// Sponsorship campaigns page.
pub struct CampaignsPage {
    list: ListViewController<Campaign>,
    service: Arc<dyn CampaignService>,
}

impl std::fmt::Debug for CampaignsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampaignsPage")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

impl CampaignsPage {
    pub fn new(services: &Services, page_size: u32) -> Self {
        let backend = Arc::new(CampaignBackend {
            service: Arc::clone(&services.campaigns),
        });
        Self {
            list: ListViewController::new(backend.clone(), backend, page_size)
                .with_reconcile(services.reconcile),
            service: Arc::clone(&services.campaigns),
        }
    }

    pub fn list(&self) -> &ListViewController<Campaign> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListViewController<Campaign> {
        &mut self.list
    }

    pub async fn create(
        &mut self,
        request: CreateCampaignRequest,
    ) -> Result<Campaign, SubmitError> {
        let result = match request.validate() {
            Ok(()) => self
                .service
                .create_campaign(&request)
                .await
                .map_err(SubmitError::from),
            Err(errors) => Err(errors.into()),
        };
        match result {
            Ok(campaign) => {
                after_mutation(
                    &mut self.list,
                    format!("Created {}", campaign.title),
                )
                .await;
                Ok(campaign)
            }
            Err(err) => Err(report(&mut self.list, err)),
        }
    }

    /// Partial update; only the fields present are checked and sent.
    pub async fn update(
        &mut self,
        id: CampaignId,
        request: UpdateCampaignRequest,
    ) -> Result<Campaign, SubmitError> {
        let result = match editable(&self.list, &id) {
            Ok(_) => match request.validate() {
                Ok(()) => self
                    .service
                    .update_campaign(id, &request)
                    .await
                    .map_err(SubmitError::from),
                Err(errors) => Err(errors.into()),
            },
            Err(err) => Err(err),
        };
        match result {
            Ok(campaign) => {
                after_mutation(&mut self.list, format!("Saved {}", campaign.title))
                    .await;
                Ok(campaign)
            }
            Err(err) => Err(report(&mut self.list, err)),
        }
    }

    /// Funding progress of a campaign, 0 to 100.
    pub fn progress(campaign: &Campaign) -> u8 {
        progress_percent(campaign.current_amount, campaign.goal_amount)
    }

    pub async fn sponsors(
        &self,
        id: CampaignId,
        page: u32,
        page_size: u32,
    ) -> Result<Paginated<Sponsor>, RequestError> {
        self.service
            .list_sponsors(id, &ListParams::new(page.max(1), page_size.max(1)))
            .await
    }
}
