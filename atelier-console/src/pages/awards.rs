//! Award management for one contest.
//!
//! Awards carry no status, so this page keeps its own small list state
//! instead of a [`ListViewController`](atelier_core::ListViewController).

use atelier_core::query::{PageResult, clamp_page, paginate};
use atelier_core::{
    LoadState, Notice, RequestError, SubmitError, TransitionError, Validate,
};
use atelier_model::{
    Award, AwardId, ContestId, CreateAwardBatchRequest, NewAward,
    UpdateAwardRequest,
};
use std::sync::Arc;
use tracing::warn;

use super::Services;
use crate::services::AwardService;

pub struct AwardsPage {
    contest_id: ContestId,
    service: Arc<dyn AwardService>,
    awards: Vec<Award>,
    page: u32,
    page_size: u32,
    state: LoadState,
    notice: Option<Notice>,
}

impl std::fmt::Debug for AwardsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwardsPage")
            .field("contest_id", &self.contest_id)
            .field("awards", &self.awards.len())
            .field("page", &self.page)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl AwardsPage {
    pub fn new(services: &Services, contest_id: ContestId, page_size: u32) -> Self {
        Self {
            contest_id,
            service: Arc::clone(&services.awards),
            awards: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            state: LoadState::Idle,
            notice: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn refresh(&mut self) -> Result<(), RequestError> {
        self.state = LoadState::Loading;
        match self.service.list_awards(self.contest_id).await {
            Ok(awards) => {
                self.awards = awards;
                self.state = LoadState::Loaded;
                self.page =
                    clamp_page(self.page, self.awards.len() as u64, self.page_size);
                Ok(())
            }
            Err(err) => {
                warn!(contest = %self.contest_id, error = %err, "award fetch failed");
                self.state = LoadState::Errored(err.user_message().to_string());
                Err(err)
            }
        }
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = clamp_page(page, self.awards.len() as u64, self.page_size);
    }

    pub fn view(&self) -> PageResult<Award> {
        paginate(&self.awards, self.page, self.page_size)
    }

    /// Create several awards at once. Ranks must be unique within the batch.
    pub async fn create(
        &mut self,
        awards: Vec<NewAward>,
    ) -> Result<Vec<Award>, SubmitError> {
        let batch = CreateAwardBatchRequest {
            contest_id: self.contest_id,
            awards,
        };
        let result = match batch.validate() {
            Ok(()) => self
                .service
                .create_awards(&batch)
                .await
                .map_err(SubmitError::from),
            Err(errors) => Err(errors.into()),
        };
        let created = self.settle(result)?;
        self.done(format!("Created {} awards", created.len())).await;
        Ok(created)
    }

    pub async fn update(
        &mut self,
        id: AwardId,
        request: UpdateAwardRequest,
    ) -> Result<Award, SubmitError> {
        let result = if !self.awards.iter().any(|a| a.id == id) {
            Err(SubmitError::NotFound { entity: "award" })
        } else {
            match request.validate() {
                Ok(()) => self
                    .service
                    .update_award(id, &request)
                    .await
                    .map_err(SubmitError::from),
                Err(errors) => Err(errors.into()),
            }
        };
        let award = self.settle(result)?;
        self.done(format!("Saved {}", award.name)).await;
        Ok(award)
    }

    pub async fn delete(&mut self, id: AwardId) -> Result<(), TransitionError> {
        let Some(name) = self
            .awards
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.clone())
        else {
            let err = TransitionError::NotFound { entity: "award" };
            self.notice = Some(Notice::error(err.user_message()));
            return Err(err);
        };
        if let Err(err) = self.service.delete_award(id).await {
            let err = TransitionError::from(err);
            self.notice = Some(Notice::error(err.user_message()));
            return Err(err);
        }
        self.done(format!("Deleted {name}")).await;
        Ok(())
    }

    fn settle<R>(&mut self, result: Result<R, SubmitError>) -> Result<R, SubmitError> {
        result.inspect_err(|err| {
            self.notice = Some(Notice::error(err.user_message()));
        })
    }

    async fn done(&mut self, message: String) {
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "refetch after award change failed");
        }
        self.notice = Some(Notice::success(message));
    }
}
