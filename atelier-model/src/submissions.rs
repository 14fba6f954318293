use crate::ids::{ContestId, RoundId, SubmissionId, UserId};
use crate::status::SubmissionStatus;
use chrono::{DateTime, Utc};

/// A painting submitted to a contest round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Submission {
    pub id: SubmissionId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub competitor_id: UserId,
    pub competitor_name: String,
    pub contest_id: ContestId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub round_id: Option<RoundId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub round_name: Option<String>,
    pub image_url: String,
    pub status: SubmissionStatus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reject_reason: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RejectSubmissionRequest {
    pub reason: String,
}

/// Metadata sent alongside the image file when uploading a painting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UploadPaintingRequest {
    pub contest_id: ContestId,
    pub competitor_id: UserId,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub round_id: Option<RoundId>,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}
