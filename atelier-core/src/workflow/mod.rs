//! Status state machines.
//!
//! Each entity status enum describes its legal moves as a static
//! `(from, action, to)` table. Everything else (which buttons a row shows,
//! whether an edit is allowed, what the executor may send) is derived from
//! that table so the rules live in exactly one place.

mod tables;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// A staff-triggered status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    Activate,
    Suspend,
    Publish,
    Complete,
    Cancel,
    Open,
    Close,
    Accept,
    Reject,
    Archive,
    Deactivate,
}

impl StatusAction {
    pub fn all() -> &'static [StatusAction] {
        use StatusAction::*;
        &[
            Activate, Suspend, Publish, Complete, Cancel, Open, Close, Accept,
            Reject, Archive, Deactivate,
        ]
    }

    pub fn verb(&self) -> &'static str {
        match self {
            StatusAction::Activate => "activate",
            StatusAction::Suspend => "suspend",
            StatusAction::Publish => "publish",
            StatusAction::Complete => "complete",
            StatusAction::Cancel => "cancel",
            StatusAction::Open => "open",
            StatusAction::Close => "close",
            StatusAction::Accept => "accept",
            StatusAction::Reject => "reject",
            StatusAction::Archive => "archive",
            StatusAction::Deactivate => "deactivate",
        }
    }
}

impl Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

impl FromStr for StatusAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StatusAction::all()
            .iter()
            .copied()
            .find(|a| a.verb().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown action: {wanted}"))
    }
}

/// One legal edge of a status machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    pub from: S,
    pub action: StatusAction,
    pub to: S,
}

/// Implemented by every entity status enum.
pub trait StatusWorkflow:
    Copy + Eq + Hash + Debug + Display + Send + Sync + 'static
{
    /// Lowercase entity noun used in messages ("submission", "user").
    const ENTITY: &'static str;

    fn variants() -> &'static [Self];

    fn transitions() -> &'static [Transition<Self>];

    /// Actions offered from this status, in table order.
    fn actions(&self) -> Vec<StatusAction> {
        Self::transitions()
            .iter()
            .filter(|t| t.from == *self)
            .map(|t| t.action)
            .collect()
    }

    /// Target status, or `None` when the action is not legal from here.
    fn apply(&self, action: StatusAction) -> Option<Self> {
        Self::transitions()
            .iter()
            .find(|t| t.from == *self && t.action == action)
            .map(|t| t.to)
    }

    fn can(&self, action: StatusAction) -> bool {
        self.apply(action).is_some()
    }

    fn is_terminal(&self) -> bool {
        !Self::transitions().iter().any(|t| t.from == *self)
    }

    /// Whether the record's form may be edited in this status.
    fn is_editable(&self) -> bool {
        !self.is_terminal()
    }

    fn is_deletable(&self) -> bool {
        false
    }
}

/// Everything a table row can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Edit,
    Delete,
    Status(StatusAction),
}

impl Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowAction::Edit => f.write_str("edit"),
            RowAction::Delete => f.write_str("delete"),
            RowAction::Status(action) => Display::fmt(action, f),
        }
    }
}

/// Row actions offered for a record in `status`. Read-only records get none.
pub fn row_actions<S: StatusWorkflow>(status: S) -> Vec<RowAction> {
    let mut actions = Vec::new();
    if status.is_editable() {
        actions.push(RowAction::Edit);
    }
    actions.extend(status.actions().into_iter().map(RowAction::Status));
    if status.is_deletable() {
        actions.push(RowAction::Delete);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_model::{SubmissionStatus, UserStatus};

    #[test]
    fn user_toggle_round_trips() {
        let suspended = UserStatus::Active.apply(StatusAction::Suspend).unwrap();
        assert_eq!(suspended, UserStatus::Suspended);
        let back = suspended.apply(StatusAction::Activate).unwrap();
        assert_eq!(back, UserStatus::Active);
    }

    #[test]
    fn reviewed_submissions_are_read_only() {
        for status in [SubmissionStatus::Accepted, SubmissionStatus::Rejected] {
            assert!(status.is_terminal());
            assert!(row_actions(status).is_empty());
            assert!(!status.can(StatusAction::Accept));
        }
    }

    #[test]
    fn pending_submission_offers_review_actions() {
        assert_eq!(
            row_actions(SubmissionStatus::Pending),
            vec![
                RowAction::Edit,
                RowAction::Status(StatusAction::Accept),
                RowAction::Status(StatusAction::Reject),
            ]
        );
    }

    #[test]
    fn actions_parse_from_cli_words() {
        assert_eq!("Suspend".parse::<StatusAction>(), Ok(StatusAction::Suspend));
        assert!("ban".parse::<StatusAction>().is_err());
    }
}
