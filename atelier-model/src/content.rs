//! Exhibitions, posts and examiners: the remaining list-managed records.

use crate::ids::{ExaminerId, ExhibitionId, PostId};
use crate::status::{ExaminerStatus, ExhibitionStatus, PostStatus};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Exhibition {
    pub id: ExhibitionId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
    pub status: ExhibitionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub painting_count: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UpdateExhibitionRequest {
    pub title: String,
    pub description: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<&Exhibition> for UpdateExhibitionRequest {
    fn from(exhibition: &Exhibition) -> Self {
        Self {
            title: exhibition.title.clone(),
            description: exhibition.description.clone(),
            location: exhibition.location.clone(),
            start_date: exhibition.start_date,
            end_date: exhibition.end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Post {
    pub id: PostId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub excerpt: String,
    pub author_name: String,
    pub category: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Examiner {
    pub id: ExaminerId,
    pub full_name: String,
    pub email: String,
    /// Multi-valued; the examiners page filters on membership.
    #[cfg_attr(feature = "serde", serde(default))]
    pub specializations: Vec<String>,
    pub status: ExaminerStatus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub assigned_count: u32,
    pub created_at: DateTime<Utc>,
}
