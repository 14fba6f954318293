use crate::error::ModelError;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            pub fn new() -> Self {
                $name(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                $name(value)
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ModelError::InvalidId(
                        concat!(stringify!($name), " cannot be empty").to_string(),
                    ));
                }
                Uuid::parse_str(trimmed)
                    .map($name)
                    .map_err(|_| ModelError::InvalidId(trimmed.to_string()))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Strongly typed ID for platform accounts
    UserId
);
define_id!(
    /// Strongly typed ID for contests
    ContestId
);
define_id!(
    /// Strongly typed ID for contest rounds
    RoundId
);
define_id!(
    /// Strongly typed ID for painting submissions
    SubmissionId
);
define_id!(
    /// Strongly typed ID for awards attached to a contest
    AwardId
);
define_id!(
    /// Strongly typed ID for sponsorship campaigns
    CampaignId
);
define_id!(SponsorId);
define_id!(ExhibitionId);
define_id!(PostId);
define_id!(ExaminerId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uuid_strings() {
        let raw = "0190b9a4-5c4e-7d2a-9a56-3b8f4c1d2e3f";
        let id: UserId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!("".parse::<ContestId>().is_err());
        assert!("not-a-uuid".parse::<ContestId>().is_err());
    }
}
