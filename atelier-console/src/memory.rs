//! In-memory implementations of every service trait.
//!
//! Backs the `--demo` mode of the CLI and the page tests. List endpoints
//! behave like the real API: they filter by the same query parameters and
//! answer with `Paginated` pages.

use async_trait::async_trait;
use atelier_core::query::{
    CategoryFilter, FilterState, Listable, StatusFilter, filter_items,
    paginate,
};
use atelier_core::validation::ImageUpload;
use atelier_core::{RequestError, StatusWorkflow};
use atelier_model::page::PageMeta;
use atelier_model::{
    Award, AwardId, Campaign, CampaignId, CampaignStatus, Contest, ContestId,
    ContestStatus, CreateAwardBatchRequest, CreateCampaignRequest,
    CurrentUser, Examiner, ExaminerId, ExaminerStatus, Exhibition,
    ExhibitionId, ExhibitionStatus, ListParams, Paginated, Post, PostId,
    PostStatus, RejectSubmissionRequest, Round, RoundId, RoundStatus,
    Sponsor, Submission, SubmissionId, SubmissionStatus, UpdateAwardRequest,
    UpdateCampaignRequest, UpdateContestRequest, UpdateExhibitionRequest,
    UpdateRoundRequest, UploadPaintingRequest, User, UserId, UserStatus,
};
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::services::{
    AuthService, AwardService, CampaignService, ContestService,
    ExaminerService, ExhibitionService, PaintingService, PostService,
    RoundService, SubmissionService, UserAdminService,
};

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    contests: Vec<Contest>,
    submissions: Vec<Submission>,
    awards: Vec<Award>,
    campaigns: Vec<Campaign>,
    sponsors: Vec<Sponsor>,
    exhibitions: Vec<Exhibition>,
    posts: Vec<Post>,
    examiners: Vec<Examiner>,
    current_user: Option<CurrentUser>,
    fail_next: Option<RequestError>,
    mutations: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<RwLock<Inner>>,
}

fn not_found(entity: &str) -> RequestError {
    RequestError::with_status(404, format!("{entity} not found"))
}

/// Apply list parameters the way the API does.
fn query<T: Listable>(records: &[T], params: &ListParams) -> Paginated<T> {
    let mut filters = FilterState::<T::Status>::with_page_size(params.limit);
    filters.search_query = params.search.clone().unwrap_or_default();
    filters.category = params
        .category
        .as_deref()
        .map(CategoryFilter::parse)
        .unwrap_or_default();
    filters.page = params.page.max(1);

    if let Some(raw) = params.status.as_deref() {
        let wanted = T::Status::variants()
            .iter()
            .copied()
            .find(|status| status.to_string().eq_ignore_ascii_case(raw.trim()));
        match wanted {
            Some(status) => filters.status = StatusFilter::Only(status),
            None => {
                return Paginated {
                    data: Vec::new(),
                    meta: PageMeta::compute(0, filters.page, filters.page_size),
                };
            }
        }
    }

    let matching = filter_items(records, &filters);
    let page = paginate(&matching, filters.page, filters.page_size);
    Paginated {
        data: page.items.into_iter().cloned().collect(),
        meta: page.meta,
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.inner.write().users = users;
        self
    }

    pub fn with_contests(self, contests: Vec<Contest>) -> Self {
        self.inner.write().contests = contests;
        self
    }

    pub fn with_submissions(self, submissions: Vec<Submission>) -> Self {
        self.inner.write().submissions = submissions;
        self
    }

    pub fn with_awards(self, awards: Vec<Award>) -> Self {
        self.inner.write().awards = awards;
        self
    }

    pub fn with_campaigns(self, campaigns: Vec<Campaign>) -> Self {
        self.inner.write().campaigns = campaigns;
        self
    }

    pub fn with_sponsors(self, sponsors: Vec<Sponsor>) -> Self {
        self.inner.write().sponsors = sponsors;
        self
    }

    pub fn with_exhibitions(self, exhibitions: Vec<Exhibition>) -> Self {
        self.inner.write().exhibitions = exhibitions;
        self
    }

    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        self.inner.write().posts = posts;
        self
    }

    pub fn with_examiners(self, examiners: Vec<Examiner>) -> Self {
        self.inner.write().examiners = examiners;
        self
    }

    pub fn with_current_user(self, user: CurrentUser) -> Self {
        self.inner.write().current_user = Some(user);
        self
    }

    /// Make the next mutation fail with `err`.
    pub fn fail_next_mutation(&self, err: RequestError) {
        self.inner.write().fail_next = Some(err);
    }

    /// Mutations that reached the store, failed ones excluded.
    pub fn mutation_count(&self) -> usize {
        self.inner.read().mutations
    }

    pub fn users(&self) -> Vec<User> {
        self.inner.read().users.clone()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.inner.read().submissions.clone()
    }

    pub fn awards(&self) -> Vec<Award> {
        self.inner.read().awards.clone()
    }

    pub fn campaigns(&self) -> Vec<Campaign> {
        self.inner.read().campaigns.clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.inner.read().posts.clone()
    }

    pub fn exhibitions(&self) -> Vec<Exhibition> {
        self.inner.read().exhibitions.clone()
    }

    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Inner) -> Result<R, RequestError>,
    ) -> Result<R, RequestError> {
        let mut inner = self.inner.write();
        if let Some(err) = inner.fail_next.take() {
            return Err(err);
        }
        let result = f(&mut *inner)?;
        inner.mutations += 1;
        Ok(result)
    }
}

fn set_status<T: Listable>(
    records: &mut [T],
    id: T::Id,
    status: T::Status,
) -> Result<(), RequestError> {
    let record = records
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| not_found(T::Status::ENTITY))?;
    record.set_status(status);
    Ok(())
}

#[async_trait]
impl UserAdminService for MemoryBackend {
    async fn list_users(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<User>, RequestError> {
        Ok(query(&self.inner.read().users, params))
    }

    async fn ban_user(&self, id: UserId) -> Result<(), RequestError> {
        self.mutate(|inner| set_status(&mut inner.users, id, UserStatus::Suspended))
    }

    async fn activate_user(&self, id: UserId) -> Result<(), RequestError> {
        self.mutate(|inner| set_status(&mut inner.users, id, UserStatus::Active))
    }
}

#[async_trait]
impl ContestService for MemoryBackend {
    async fn list_contests(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Contest>, RequestError> {
        Ok(query(&self.inner.read().contests, params))
    }

    async fn get_contest(&self, id: ContestId) -> Result<Contest, RequestError> {
        self.inner
            .read()
            .contests
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("contest"))
    }

    async fn update_contest(
        &self,
        id: ContestId,
        request: &UpdateContestRequest,
    ) -> Result<Contest, RequestError> {
        self.mutate(|inner| {
            let contest = inner
                .contests
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| not_found("contest"))?;
            contest.title = request.title.clone();
            contest.description = request.description.clone();
            contest.start_date = request.start_date;
            contest.end_date = request.end_date;
            contest.banner_url = request.banner_url.clone();
            Ok(contest.clone())
        })
    }

    async fn set_contest_status(
        &self,
        id: ContestId,
        status: ContestStatus,
    ) -> Result<(), RequestError> {
        self.mutate(|inner| set_status(&mut inner.contests, id, status))
    }
}

fn find_round(inner: &mut Inner, id: RoundId) -> Result<&mut Round, RequestError> {
    inner
        .contests
        .iter_mut()
        .flat_map(|contest| contest.rounds.iter_mut())
        .find(|round| round.id == id)
        .ok_or_else(|| not_found("round"))
}

#[async_trait]
impl RoundService for MemoryBackend {
    async fn get_round(&self, id: RoundId) -> Result<Round, RequestError> {
        self.inner
            .read()
            .contests
            .iter()
            .flat_map(|contest| contest.rounds.iter())
            .find(|round| round.id == id)
            .cloned()
            .ok_or_else(|| not_found("round"))
    }

    async fn update_round(
        &self,
        id: RoundId,
        request: &UpdateRoundRequest,
    ) -> Result<Round, RequestError> {
        self.mutate(|inner| {
            let round = find_round(inner, id)?;
            round.name = request.name.clone();
            round.table = request.table.clone();
            round.start_date = request.start_date;
            round.end_date = request.end_date;
            Ok(round.clone())
        })
    }

    async fn set_round_status(
        &self,
        id: RoundId,
        status: RoundStatus,
    ) -> Result<(), RequestError> {
        self.mutate(|inner| {
            find_round(inner, id)?.status = status;
            Ok(())
        })
    }
}

#[async_trait]
impl SubmissionService for MemoryBackend {
    async fn list_submissions(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Submission>, RequestError> {
        Ok(query(&self.inner.read().submissions, params))
    }

    async fn get_submission(
        &self,
        id: SubmissionId,
    ) -> Result<Submission, RequestError> {
        self.inner
            .read()
            .submissions
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| not_found("submission"))
    }

    async fn accept_submission(&self, id: SubmissionId) -> Result<(), RequestError> {
        self.mutate(|inner| {
            let submission = inner
                .submissions
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| not_found("submission"))?;
            if submission.status != SubmissionStatus::Pending {
                return Err(RequestError::with_status(
                    409,
                    "Submission has already been reviewed",
                ));
            }
            submission.status = SubmissionStatus::Accepted;
            submission.reviewed_at = Some(Utc::now());
            Ok(())
        })
    }

    async fn reject_submission(
        &self,
        id: SubmissionId,
        request: &RejectSubmissionRequest,
    ) -> Result<(), RequestError> {
        self.mutate(|inner| {
            let submission = inner
                .submissions
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| not_found("submission"))?;
            if submission.status != SubmissionStatus::Pending {
                return Err(RequestError::with_status(
                    409,
                    "Submission has already been reviewed",
                ));
            }
            submission.status = SubmissionStatus::Rejected;
            submission.reject_reason = Some(request.reason.trim().to_string());
            submission.reviewed_at = Some(Utc::now());
            Ok(())
        })
    }
}

impl MemoryBackend {
    fn store_painting(
        &self,
        request: &UploadPaintingRequest,
        image: &ImageUpload,
    ) -> Result<Submission, RequestError> {
        self.mutate(|inner| {
            let contest = inner
                .contests
                .iter()
                .find(|c| c.id == request.contest_id)
                .ok_or_else(|| not_found("contest"))?;
            let round_name = request.round_id.and_then(|round_id| {
                contest
                    .rounds
                    .iter()
                    .find(|r| r.id == round_id)
                    .map(|r| r.name.clone())
            });
            let competitor_name = inner
                .users
                .iter()
                .find(|u| u.id == request.competitor_id)
                .map(|u| u.full_name.clone())
                .unwrap_or_else(|| "Unknown competitor".to_string());

            let submission = Submission {
                id: SubmissionId::new(),
                title: request.title.trim().to_string(),
                description: request.description.clone(),
                competitor_id: request.competitor_id,
                competitor_name,
                contest_id: request.contest_id,
                round_id: request.round_id,
                round_name,
                image_url: format!("memory://paintings/{}", image.file_name),
                status: SubmissionStatus::Pending,
                reject_reason: None,
                reviewed_at: None,
                created_at: Utc::now(),
            };
            inner.submissions.push(submission.clone());
            Ok(submission)
        })
    }
}

#[async_trait]
impl PaintingService for MemoryBackend {
    async fn upload_painting(
        &self,
        request: &UploadPaintingRequest,
        image: ImageUpload,
    ) -> Result<Submission, RequestError> {
        self.store_painting(request, &image)
    }

    async fn upload_round2_painting(
        &self,
        request: &UploadPaintingRequest,
        image: ImageUpload,
    ) -> Result<Submission, RequestError> {
        if request.round_id.is_none() {
            return Err(RequestError::with_status(
                400,
                "Round 2 uploads require a round",
            ));
        }
        self.store_painting(request, &image)
    }
}

#[async_trait]
impl AwardService for MemoryBackend {
    async fn list_awards(
        &self,
        contest_id: ContestId,
    ) -> Result<Vec<Award>, RequestError> {
        let mut awards: Vec<Award> = self
            .inner
            .read()
            .awards
            .iter()
            .filter(|a| a.contest_id == contest_id)
            .cloned()
            .collect();
        awards.sort_by_key(|a| a.rank);
        Ok(awards)
    }

    async fn create_awards(
        &self,
        batch: &CreateAwardBatchRequest,
    ) -> Result<Vec<Award>, RequestError> {
        self.mutate(|inner| {
            let taken = inner.awards.iter().find(|existing| {
                existing.contest_id == batch.contest_id
                    && batch.awards.iter().any(|new| new.rank == existing.rank)
            });
            if let Some(existing) = taken {
                return Err(RequestError::with_status(
                    409,
                    format!("Rank {} is already awarded", existing.rank),
                ));
            }
            let created: Vec<Award> = batch
                .awards
                .iter()
                .map(|new| Award {
                    id: AwardId::new(),
                    contest_id: batch.contest_id,
                    name: new.name.trim().to_string(),
                    rank: new.rank,
                    quantity: new.quantity,
                    prize: new.prize,
                    created_at: Utc::now(),
                })
                .collect();
            inner.awards.extend(created.iter().cloned());
            Ok(created)
        })
    }

    async fn update_award(
        &self,
        id: AwardId,
        request: &UpdateAwardRequest,
    ) -> Result<Award, RequestError> {
        self.mutate(|inner| {
            let award = inner
                .awards
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| not_found("award"))?;
            award.name = request.name.clone();
            award.rank = request.rank;
            award.quantity = request.quantity;
            award.prize = request.prize;
            Ok(award.clone())
        })
    }

    async fn delete_award(&self, id: AwardId) -> Result<(), RequestError> {
        self.mutate(|inner| {
            let before = inner.awards.len();
            inner.awards.retain(|a| a.id != id);
            if inner.awards.len() == before {
                return Err(not_found("award"));
            }
            Ok(())
        })
    }
}

#[async_trait]
impl CampaignService for MemoryBackend {
    async fn list_campaigns(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Campaign>, RequestError> {
        Ok(query(&self.inner.read().campaigns, params))
    }

    async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, RequestError> {
        self.inner
            .read()
            .campaigns
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("campaign"))
    }

    async fn create_campaign(
        &self,
        request: &CreateCampaignRequest,
    ) -> Result<Campaign, RequestError> {
        self.mutate(|inner| {
            let campaign = Campaign {
                id: CampaignId::new(),
                title: request.title.trim().to_string(),
                description: request.description.clone(),
                goal_amount: request.goal_amount,
                current_amount: 0.0,
                status: CampaignStatus::Draft,
                start_date: request.start_date,
                end_date: request.end_date,
                created_at: Utc::now(),
            };
            inner.campaigns.insert(0, campaign.clone());
            Ok(campaign)
        })
    }

    async fn update_campaign(
        &self,
        id: CampaignId,
        request: &UpdateCampaignRequest,
    ) -> Result<Campaign, RequestError> {
        self.mutate(|inner| {
            let campaign = inner
                .campaigns
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| not_found("campaign"))?;
            if let Some(title) = &request.title {
                campaign.title = title.clone();
            }
            if let Some(description) = &request.description {
                campaign.description = description.clone();
            }
            if let Some(goal) = request.goal_amount {
                campaign.goal_amount = goal;
            }
            if let Some(start) = request.start_date {
                campaign.start_date = start;
            }
            if let Some(end) = request.end_date {
                campaign.end_date = end;
            }
            Ok(campaign.clone())
        })
    }

    async fn list_sponsors(
        &self,
        id: CampaignId,
        params: &ListParams,
    ) -> Result<Paginated<Sponsor>, RequestError> {
        let sponsors: Vec<Sponsor> = self
            .inner
            .read()
            .sponsors
            .iter()
            .filter(|s| s.campaign_id == id)
            .cloned()
            .collect();
        let page = paginate(&sponsors, params.page, params.limit);
        Ok(Paginated {
            data: page.items,
            meta: page.meta,
        })
    }

    async fn set_campaign_status(
        &self,
        id: CampaignId,
        status: CampaignStatus,
    ) -> Result<(), RequestError> {
        self.mutate(|inner| set_status(&mut inner.campaigns, id, status))
    }
}

#[async_trait]
impl ExhibitionService for MemoryBackend {
    async fn list_exhibitions(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Exhibition>, RequestError> {
        Ok(query(&self.inner.read().exhibitions, params))
    }

    async fn get_exhibition(
        &self,
        id: ExhibitionId,
    ) -> Result<Exhibition, RequestError> {
        self.inner
            .read()
            .exhibitions
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| not_found("exhibition"))
    }

    async fn update_exhibition(
        &self,
        id: ExhibitionId,
        request: &UpdateExhibitionRequest,
    ) -> Result<Exhibition, RequestError> {
        self.mutate(|inner| {
            let exhibition = inner
                .exhibitions
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| not_found("exhibition"))?;
            exhibition.title = request.title.clone();
            exhibition.description = request.description.clone();
            exhibition.location = request.location.clone();
            exhibition.start_date = request.start_date;
            exhibition.end_date = request.end_date;
            Ok(exhibition.clone())
        })
    }

    async fn delete_exhibition(&self, id: ExhibitionId) -> Result<(), RequestError> {
        self.mutate(|inner| {
            let before = inner.exhibitions.len();
            inner.exhibitions.retain(|e| e.id != id);
            if inner.exhibitions.len() == before {
                return Err(not_found("exhibition"));
            }
            Ok(())
        })
    }

    async fn set_exhibition_status(
        &self,
        id: ExhibitionId,
        status: ExhibitionStatus,
    ) -> Result<(), RequestError> {
        self.mutate(|inner| set_status(&mut inner.exhibitions, id, status))
    }
}

#[async_trait]
impl PostService for MemoryBackend {
    async fn list_posts(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Post>, RequestError> {
        Ok(query(&self.inner.read().posts, params))
    }

    async fn delete_post(&self, id: PostId) -> Result<(), RequestError> {
        self.mutate(|inner| {
            let before = inner.posts.len();
            inner.posts.retain(|p| p.id != id);
            if inner.posts.len() == before {
                return Err(not_found("post"));
            }
            Ok(())
        })
    }

    async fn set_post_status(
        &self,
        id: PostId,
        status: PostStatus,
    ) -> Result<(), RequestError> {
        self.mutate(|inner| set_status(&mut inner.posts, id, status))
    }
}

#[async_trait]
impl ExaminerService for MemoryBackend {
    async fn list_examiners(&self) -> Result<Vec<Examiner>, RequestError> {
        Ok(self.inner.read().examiners.clone())
    }

    async fn set_examiner_status(
        &self,
        id: ExaminerId,
        status: ExaminerStatus,
    ) -> Result<(), RequestError> {
        self.mutate(|inner| set_status(&mut inner.examiners, id, status))
    }
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn current_user(&self) -> Result<CurrentUser, RequestError> {
        self.inner
            .read()
            .current_user
            .clone()
            .ok_or_else(|| RequestError::with_status(401, "Not signed in"))
    }
}
