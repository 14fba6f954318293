//! Closed status and role enums.
//!
//! Every enum carries its wire name (the SCREAMING_CASE value the API speaks),
//! an English label for plain output, and round-trips through `FromStr`
//! case-insensitively so CLI input like `active` resolves to `ACTIVE`.

use crate::error::ModelError;
use std::fmt;
use std::str::FromStr;

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $wire))]
                $variant,
            )+
        }

        impl $name {
            pub fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }

            pub fn api_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.api_name())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::all()
                    .iter()
                    .copied()
                    .find(|v| v.api_name().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ModelError::UnknownVariant {
                        kind: $kind,
                        value: wanted.to_string(),
                    })
            }
        }
    };
}

closed_enum!(
    /// Account state. Only `ACTIVE`/`SUSPENDED` toggle back and forth.
    UserStatus, "user status" {
        Active => ("ACTIVE", "Active"),
        Suspended => ("SUSPENDED", "Suspended"),
        Pending => ("PENDING", "Pending"),
    }
);

closed_enum!(
    /// Account role, used as the accounts page category filter.
    UserRole, "user role" {
        Competitor => ("COMPETITOR", "Competitor"),
        Guardian => ("GUARDIAN", "Guardian"),
        Examiner => ("EXAMINER", "Examiner"),
        Staff => ("STAFF", "Staff"),
        Admin => ("ADMIN", "Admin"),
    }
);

closed_enum!(
    ContestStatus, "contest status" {
        Draft => ("DRAFT", "Draft"),
        Active => ("ACTIVE", "Active"),
        Completed => ("COMPLETED", "Completed"),
        Cancelled => ("CANCELLED", "Cancelled"),
    }
);

closed_enum!(
    RoundStatus, "round status" {
        Upcoming => ("UPCOMING", "Upcoming"),
        Open => ("OPEN", "Open"),
        Closed => ("CLOSED", "Closed"),
    }
);

closed_enum!(
    /// Review state of a painting. Leaves `PENDING` at most once.
    SubmissionStatus, "submission status" {
        Pending => ("PENDING", "Pending"),
        Accepted => ("ACCEPTED", "Accepted"),
        Rejected => ("REJECTED", "Rejected"),
    }
);

closed_enum!(
    CampaignStatus, "campaign status" {
        Draft => ("DRAFT", "Draft"),
        Active => ("ACTIVE", "Active"),
        Closed => ("CLOSED", "Closed"),
        Cancelled => ("CANCELLED", "Cancelled"),
    }
);

closed_enum!(
    ExhibitionStatus, "exhibition status" {
        Draft => ("DRAFT", "Draft"),
        Published => ("PUBLISHED", "Published"),
        Archived => ("ARCHIVED", "Archived"),
    }
);

closed_enum!(
    PostStatus, "post status" {
        Draft => ("DRAFT", "Draft"),
        Published => ("PUBLISHED", "Published"),
        Archived => ("ARCHIVED", "Archived"),
    }
);

closed_enum!(
    ExaminerStatus, "examiner status" {
        Active => ("ACTIVE", "Active"),
        Inactive => ("INACTIVE", "Inactive"),
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("active".parse::<UserStatus>().unwrap(), UserStatus::Active);
        assert_eq!(
            " Rejected ".parse::<SubmissionStatus>().unwrap(),
            SubmissionStatus::Rejected
        );
    }

    #[test]
    fn unknown_value_names_the_kind() {
        let err = "LIVE".parse::<ContestStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown contest status: LIVE");
    }

    #[test]
    fn display_uses_wire_name() {
        assert_eq!(CampaignStatus::Cancelled.to_string(), "CANCELLED");
        assert_eq!(CampaignStatus::Cancelled.label(), "Cancelled");
        assert_eq!(ExaminerStatus::all().len(), 2);
    }
}
