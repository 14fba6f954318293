//! Core data model definitions shared across Atelier crates.
#![allow(missing_docs)]

pub mod campaigns;
pub mod content;
pub mod contests;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod page;
pub mod prelude;
pub mod status;
pub mod submissions;
pub mod users;

pub use campaigns::{
    Campaign, CreateCampaignRequest, Sponsor, UpdateCampaignRequest,
};
pub use content::{Examiner, Exhibition, Post, UpdateExhibitionRequest};
pub use contests::{
    Award, Contest, CreateAwardBatchRequest, NewAward, Round,
    UpdateAwardRequest, UpdateContestRequest, UpdateRoundRequest,
};
pub use envelope::{ApiResponse, SetStatusRequest};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{
    AwardId, CampaignId, ContestId, ExaminerId, ExhibitionId, PostId, RoundId,
    SponsorId, SubmissionId, UserId,
};
pub use page::{ListParams, PageMeta, Paginated};
pub use status::{
    CampaignStatus, ContestStatus, ExaminerStatus, ExhibitionStatus,
    PostStatus, RoundStatus, SubmissionStatus, UserRole, UserStatus,
};
pub use submissions::{
    RejectSubmissionRequest, Submission, UploadPaintingRequest,
};
pub use users::{CurrentUser, User};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn user_uses_camel_case_and_wire_status() {
        let json = r#"{
            "id": "0190b9a4-5c4e-7d2a-9a56-3b8f4c1d2e3f",
            "username": "jdoe",
            "fullName": "John Doe",
            "email": "john@example.com",
            "role": "COMPETITOR",
            "status": "SUSPENDED",
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name, "John Doe");
        assert_eq!(user.status, UserStatus::Suspended);
        assert!(user.phone.is_none());
    }

    #[test]
    fn paginated_meta_reads_total_pages() {
        let json = r#"{"data": [], "meta": {"total": 0, "page": 1, "limit": 10, "totalPages": 1}}"#;
        let page: Paginated<User> = serde_json::from_str(json).unwrap();
        assert_eq!(page.meta.total_pages, 1);
    }

    fn decode<T: serde::de::DeserializeOwned>(json: &str) -> ApiResponse<T> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn error_envelope_without_data_decodes_for_any_payload() {
        let json = r#"{"status": "error", "error": "Forbidden", "message": "Staff only"}"#;
        let response: ApiResponse<User> = decode(json);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("Staff only"));
    }
}
