use async_trait::async_trait;
use atelier_core::query::FilterState;
use atelier_core::{
    Fetched, ListSource, ListViewController, RequestError, StatusAction,
    SubmitError, TransitionPort, Validate,
};
use atelier_model::{
    Contest, ContestId, ContestStatus, Round, RoundId, RoundStatus,
    UpdateContestRequest, UpdateRoundRequest,
};
use std::sync::Arc;

use super::{Services, after_mutation, editable, report};
use crate::services::{ContestService, RoundService};

struct ContestBackend {
    service: Arc<dyn ContestService>,
}

#[async_trait]
impl ListSource<Contest> for ContestBackend {
    async fn fetch(
        &self,
        filters: &FilterState<ContestStatus>,
    ) -> Result<Fetched<Contest>, RequestError> {
        let page = self
            .service
            .list_contests(&filters.to_list_params())
            .await?;
        Ok(Fetched::Page(page.into()))
    }
}

#[async_trait]
impl TransitionPort<Contest> for ContestBackend {
    async fn apply(
        &self,
        id: ContestId,
        _action: StatusAction,
        target: ContestStatus,
    ) -> Result<(), RequestError> {
        self.service.set_contest_status(id, target).await
    }
}

pub struct ContestsPage {
    list: ListViewController<Contest>,
    service: Arc<dyn ContestService>,
}

impl std::fmt::Debug for ContestsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContestsPage")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

impl ContestsPage {
    pub fn new(services: &Services, page_size: u32) -> Self {
        let backend = Arc::new(ContestBackend {
            service: Arc::clone(&services.contests),
        });
        Self {
            list: ListViewController::new(backend.clone(), backend, page_size)
                .with_reconcile(services.reconcile),
            service: Arc::clone(&services.contests),
        }
    }

    pub fn list(&self) -> &ListViewController<Contest> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListViewController<Contest> {
        &mut self.list
    }

    /// Save the contest form. Completed and cancelled contests are locked.
    pub async fn edit(
        &mut self,
        id: ContestId,
        request: UpdateContestRequest,
    ) -> Result<Contest, SubmitError> {
        let result = match editable(&self.list, &id) {
            Ok(_) => self.save(id, &request).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(contest) => {
                after_mutation(&mut self.list, format!("Saved {}", contest.title))
                    .await;
                Ok(contest)
            }
            Err(err) => Err(report(&mut self.list, err)),
        }
    }

    async fn save(
        &self,
        id: ContestId,
        request: &UpdateContestRequest,
    ) -> Result<Contest, SubmitError> {
        request.validate()?;
        Ok(self.service.update_contest(id, request).await?)
    }
}

/// Rounds are embedded in their contest; the list is the contest's round
/// set, filtered and paginated locally.
struct RoundBackend {
    contests: Arc<dyn ContestService>,
    rounds: Arc<dyn RoundService>,
    contest_id: ContestId,
}

#[async_trait]
impl ListSource<Round> for RoundBackend {
    async fn fetch(
        &self,
        _filters: &FilterState<RoundStatus>,
    ) -> Result<Fetched<Round>, RequestError> {
        let contest = self.contests.get_contest(self.contest_id).await?;
        Ok(Fetched::Complete(contest.rounds))
    }
}

#[async_trait]
impl TransitionPort<Round> for RoundBackend {
    async fn apply(
        &self,
        id: RoundId,
        _action: StatusAction,
        target: RoundStatus,
    ) -> Result<(), RequestError> {
        self.rounds.set_round_status(id, target).await
    }
}

pub struct RoundsPage {
    contest_id: ContestId,
    list: ListViewController<Round>,
    service: Arc<dyn RoundService>,
}

impl std::fmt::Debug for RoundsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundsPage")
            .field("contest_id", &self.contest_id)
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

impl RoundsPage {
    pub fn new(services: &Services, contest_id: ContestId, page_size: u32) -> Self {
        let backend = Arc::new(RoundBackend {
            contests: Arc::clone(&services.contests),
            rounds: Arc::clone(&services.rounds),
            contest_id,
        });
        Self {
            contest_id,
            list: ListViewController::new(backend.clone(), backend, page_size)
                .with_reconcile(services.reconcile),
            service: Arc::clone(&services.rounds),
        }
    }

    pub fn contest_id(&self) -> ContestId {
        self.contest_id
    }

    pub fn list(&self) -> &ListViewController<Round> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListViewController<Round> {
        &mut self.list
    }

    /// Closed rounds are locked.
    pub async fn edit(
        &mut self,
        id: RoundId,
        request: UpdateRoundRequest,
    ) -> Result<Round, SubmitError> {
        let result = match editable(&self.list, &id) {
            Ok(_) => self.save(id, &request).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(round) => {
                after_mutation(&mut self.list, format!("Saved {}", round.name))
                    .await;
                Ok(round)
            }
            Err(err) => Err(report(&mut self.list, err)),
        }
    }

    async fn save(
        &self,
        id: RoundId,
        request: &UpdateRoundRequest,
    ) -> Result<Round, SubmitError> {
        request.validate()?;
        Ok(self.service.update_round(id, request).await?)
    }
}
