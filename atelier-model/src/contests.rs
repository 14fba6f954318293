use crate::ids::{AwardId, ContestId, RoundId};
use crate::status::{ContestStatus, RoundStatus};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Contest {
    pub id: ContestId,
    pub title: String,
    pub description: String,
    pub status: ContestStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub banner_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rounds: Vec<Round>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Round {
    pub id: RoundId,
    pub contest_id: ContestId,
    pub name: String,
    /// Judging table / group label, when the round is split.
    #[cfg_attr(feature = "serde", serde(default))]
    pub table: Option<String>,
    pub status: RoundStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Award {
    pub id: AwardId,
    pub contest_id: ContestId,
    pub name: String,
    /// 1 is the top prize.
    pub rank: u32,
    pub quantity: u32,
    pub prize: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UpdateContestRequest {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub banner_url: Option<String>,
}

impl From<&Contest> for UpdateContestRequest {
    fn from(contest: &Contest) -> Self {
        Self {
            title: contest.title.clone(),
            description: contest.description.clone(),
            start_date: contest.start_date,
            end_date: contest.end_date,
            banner_url: contest.banner_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UpdateRoundRequest {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub table: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<&Round> for UpdateRoundRequest {
    fn from(round: &Round) -> Self {
        Self {
            name: round.name.clone(),
            table: round.table.clone(),
            start_date: round.start_date,
            end_date: round.end_date,
        }
    }
}

/// One row of a batch award creation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NewAward {
    pub name: String,
    pub rank: u32,
    pub quantity: u32,
    pub prize: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CreateAwardBatchRequest {
    pub contest_id: ContestId,
    pub awards: Vec<NewAward>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UpdateAwardRequest {
    pub name: String,
    pub rank: u32,
    pub quantity: u32,
    pub prize: f64,
}
