//! One service trait per API resource, each with an adapter over
//! [`ApiClient`](crate::api_client::ApiClient). Pages depend on the traits
//! so the in-memory implementations in [`crate::memory`] can stand in.

pub mod auth;
pub mod awards;
pub mod campaigns;
pub mod content;
pub mod contests;
pub mod submissions;
pub mod users;

pub use auth::{AuthApiAdapter, AuthService};
pub use awards::{AwardApiAdapter, AwardService};
pub use campaigns::{CampaignApiAdapter, CampaignService};
pub use content::{
    ContentApiAdapter, ExaminerService, ExhibitionService, PostService,
};
pub use contests::{ContestApiAdapter, ContestService, RoundService};
pub use submissions::{PaintingService, SubmissionApiAdapter, SubmissionService};
pub use users::{UserAdminApiAdapter, UserAdminService};
