//! Entity-specific field accessors for the shared list machinery.

use crate::workflow::StatusWorkflow;
use atelier_model::{
    Campaign, CampaignId, CampaignStatus, Contest, ContestId, ContestStatus,
    Examiner, ExaminerId, ExaminerStatus, Exhibition, ExhibitionId,
    ExhibitionStatus, Post, PostId, PostStatus, Round, RoundId, RoundStatus,
    Submission, SubmissionId, SubmissionStatus, User, UserId, UserStatus,
};
use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A record that can be shown in a filterable, paginated list view.
pub trait Listable: Clone + Debug + Send + Sync + 'static {
    type Id: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;
    type Status: StatusWorkflow;

    fn id(&self) -> Self::Id;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);

    fn created_at(&self) -> DateTime<Utc>;

    /// Primary label for tables and messages.
    fn display_name(&self) -> &str;

    /// Fixed set of fields the search box looks at.
    fn searchable_fields(&self) -> Vec<&str>;

    /// Category values. Empty when the entity has no category dimension.
    fn categories(&self) -> Vec<&str> {
        Vec::new()
    }
}

impl Listable for User {
    type Id = UserId;
    type Status = UserStatus;

    fn id(&self) -> UserId {
        self.id
    }

    fn status(&self) -> UserStatus {
        self.status
    }

    fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.full_name.as_str(),
            self.username.as_str(),
            self.email.as_str(),
        ]
    }

    fn categories(&self) -> Vec<&str> {
        vec![self.role.api_name()]
    }
}

impl Listable for Contest {
    type Id = ContestId;
    type Status = ContestStatus;

    fn id(&self) -> ContestId {
        self.id
    }

    fn status(&self) -> ContestStatus {
        self.status
    }

    fn set_status(&mut self, status: ContestStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

impl Listable for Round {
    type Id = RoundId;
    type Status = RoundStatus;

    fn id(&self) -> RoundId {
        self.id
    }

    fn status(&self) -> RoundStatus {
        self.status
    }

    fn set_status(&mut self, status: RoundStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(table) = &self.table {
            fields.push(table);
        }
        fields
    }

    fn categories(&self) -> Vec<&str> {
        self.table.as_deref().into_iter().collect()
    }
}

impl Listable for Submission {
    type Id = SubmissionId;
    type Status = SubmissionStatus;

    fn id(&self) -> SubmissionId {
        self.id
    }

    fn status(&self) -> SubmissionStatus {
        self.status
    }

    fn set_status(&mut self, status: SubmissionStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.competitor_name.as_str(),
        ]
    }

    fn categories(&self) -> Vec<&str> {
        self.round_name.as_deref().into_iter().collect()
    }
}

impl Listable for Campaign {
    type Id = CampaignId;
    type Status = CampaignStatus;

    fn id(&self) -> CampaignId {
        self.id
    }

    fn status(&self) -> CampaignStatus {
        self.status
    }

    fn set_status(&mut self, status: CampaignStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

impl Listable for Exhibition {
    type Id = ExhibitionId;
    type Status = ExhibitionStatus;

    fn id(&self) -> ExhibitionId {
        self.id
    }

    fn status(&self) -> ExhibitionStatus {
        self.status
    }

    fn set_status(&mut self, status: ExhibitionStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        if let Some(location) = &self.location {
            fields.push(location);
        }
        fields
    }
}

impl Listable for Post {
    type Id = PostId;
    type Status = PostStatus;

    fn id(&self) -> PostId {
        self.id
    }

    fn status(&self) -> PostStatus {
        self.status
    }

    fn set_status(&mut self, status: PostStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.excerpt.as_str(),
            self.author_name.as_str(),
        ]
    }

    fn categories(&self) -> Vec<&str> {
        vec![self.category.as_str()]
    }
}

impl Listable for Examiner {
    type Id = ExaminerId;
    type Status = ExaminerStatus;

    fn id(&self) -> ExaminerId {
        self.id
    }

    fn status(&self) -> ExaminerStatus {
        self.status
    }

    fn set_status(&mut self, status: ExaminerStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.full_name.as_str(), self.email.as_str()]
    }

    fn categories(&self) -> Vec<&str> {
        self.specializations.iter().map(String::as_str).collect()
    }
}
