use super::{Constraint, Rules, Validate, ValidationErrors};
use atelier_model::{
    CreateAwardBatchRequest, CreateCampaignRequest, NewAward,
    RejectSubmissionRequest, UpdateAwardRequest, UpdateCampaignRequest,
    UpdateContestRequest, UpdateExhibitionRequest, UpdateRoundRequest,
    UploadPaintingRequest,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

const TITLE: &[Constraint] = &[
    Constraint::Required,
    Constraint::MinLength(3),
    Constraint::MaxLength(200),
];
const LONG_TEXT: &[Constraint] = &[Constraint::MaxLength(5000)];
const MAX_RANK: f64 = 100.0;
const MAX_QUANTITY: f64 = 1000.0;

fn after_start(start: DateTime<Utc>) -> Constraint {
    Constraint::After {
        field: "startDate",
        instant: start,
    }
}

impl Validate for UpdateContestRequest {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut rules = Rules::at(now);
        rules
            .text("title", &self.title, TITLE)
            .text("description", &self.description, LONG_TEXT)
            .date("endDate", self.end_date, &[after_start(self.start_date)])
            .optional_text(
                "bannerUrl",
                self.banner_url.as_deref(),
                &[Constraint::MaxLength(2048)],
            );
        rules.finish()
    }
}

impl Validate for UpdateRoundRequest {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut rules = Rules::at(now);
        rules
            .text(
                "name",
                &self.name,
                &[Constraint::Required, Constraint::MaxLength(100)],
            )
            .optional_text(
                "table",
                self.table.as_deref(),
                &[Constraint::MaxLength(50)],
            )
            .date("endDate", self.end_date, &[after_start(self.start_date)]);
        rules.finish()
    }
}

impl Validate for CreateCampaignRequest {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut rules = Rules::at(now);
        rules
            .text("title", &self.title, TITLE)
            .text("description", &self.description, LONG_TEXT)
            .number("goalAmount", self.goal_amount, &[Constraint::Positive])
            .date(
                "endDate",
                self.end_date,
                &[Constraint::FutureDate, after_start(self.start_date)],
            );
        rules.finish()
    }
}

impl Validate for UpdateCampaignRequest {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut rules = Rules::at(now);
        if let Some(title) = &self.title {
            rules.text("title", title, TITLE);
        }
        rules.optional_text(
            "description",
            self.description.as_deref(),
            LONG_TEXT,
        );
        if let Some(goal) = self.goal_amount {
            rules.number("goalAmount", goal, &[Constraint::Positive]);
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            rules.date("endDate", end, &[after_start(start)]);
        }
        rules.finish()
    }
}

fn award_rules(
    rules: &mut Rules,
    prefix: &str,
    name: &str,
    rank: u32,
    quantity: u32,
    prize: f64,
) {
    rules
        .text(
            &format!("{prefix}name"),
            name,
            &[Constraint::Required, Constraint::MaxLength(100)],
        )
        .number(
            &format!("{prefix}rank"),
            f64::from(rank),
            &[Constraint::Range {
                min: 1.0,
                max: MAX_RANK,
            }],
        )
        .number(
            &format!("{prefix}quantity"),
            f64::from(quantity),
            &[Constraint::Range {
                min: 1.0,
                max: MAX_QUANTITY,
            }],
        );
    if prize.is_nan() || prize < 0.0 {
        rules.fail(&format!("{prefix}prize"), "must not be negative");
    }
}

impl Validate for NewAward {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut rules = Rules::at(now);
        award_rules(&mut rules, "", &self.name, self.rank, self.quantity, self.prize);
        rules.finish()
    }
}

impl Validate for UpdateAwardRequest {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut rules = Rules::at(now);
        award_rules(&mut rules, "", &self.name, self.rank, self.quantity, self.prize);
        rules.finish()
    }
}

/// Every row is checked individually and ranks must be unique in the batch.
impl Validate for CreateAwardBatchRequest {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut rules = Rules::at(now);
        if self.awards.is_empty() {
            rules.fail("awards", "add at least one award");
        }
        let mut ranks = HashSet::new();
        for (i, award) in self.awards.iter().enumerate() {
            let prefix = format!("awards[{i}].");
            award_rules(
                &mut rules,
                &prefix,
                &award.name,
                award.rank,
                award.quantity,
                award.prize,
            );
            if !ranks.insert(award.rank) {
                rules.fail(
                    &format!("{prefix}rank"),
                    format!("rank {} is already used", award.rank),
                );
            }
        }
        rules.finish()
    }
}

impl Validate for UpdateExhibitionRequest {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut rules = Rules::at(now);
        rules
            .text("title", &self.title, TITLE)
            .text("description", &self.description, LONG_TEXT)
            .optional_text(
                "location",
                self.location.as_deref(),
                &[Constraint::MaxLength(200)],
            )
            .date("endDate", self.end_date, &[after_start(self.start_date)]);
        rules.finish()
    }
}

impl Validate for RejectSubmissionRequest {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut rules = Rules::at(now);
        rules.text(
            "reason",
            &self.reason,
            &[
                Constraint::Required,
                Constraint::MinLength(5),
                Constraint::MaxLength(500),
            ],
        );
        rules.finish()
    }
}

impl Validate for UploadPaintingRequest {
    fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
        let mut rules = Rules::at(now);
        rules
            .text("title", &self.title, TITLE)
            .text("description", &self.description, LONG_TEXT);
        rules.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_model::ContestId;
    use chrono::Duration;

    fn award(name: &str, rank: u32) -> NewAward {
        NewAward {
            name: name.into(),
            rank,
            quantity: 1,
            prize: 500.0,
        }
    }

    #[test]
    fn contest_end_must_follow_start() {
        let now = Utc::now();
        let request = UpdateContestRequest {
            title: "Young painters 2025".into(),
            description: String::new(),
            start_date: now,
            end_date: now - Duration::hours(1),
            banner_url: None,
        };
        let errors = request.validate_at(now).unwrap_err();
        assert_eq!(errors.field("endDate"), ["must be after startDate"]);
    }

    #[test]
    fn award_batch_rejects_duplicate_ranks() {
        let batch = CreateAwardBatchRequest {
            contest_id: ContestId::new(),
            awards: vec![award("Gold", 1), award("Silver", 2), award("Also gold", 1)],
        };
        let errors = batch.validate().unwrap_err();
        assert!(errors.has("awards[2].rank"));
        assert!(!errors.has("awards[1].rank"));
    }

    #[test]
    fn empty_award_batch_is_refused() {
        let batch = CreateAwardBatchRequest {
            contest_id: ContestId::new(),
            awards: Vec::new(),
        };
        assert!(batch.validate().unwrap_err().has("awards"));
    }

    #[test]
    fn campaign_needs_positive_goal_and_future_end() {
        let now = Utc::now();
        let request = CreateCampaignRequest {
            title: "Art supplies drive".into(),
            description: "Brushes for every school".into(),
            goal_amount: 0.0,
            start_date: now - Duration::days(10),
            end_date: now - Duration::days(1),
        };
        let errors = request.validate_at(now).unwrap_err();
        assert!(errors.has("goalAmount"));
        assert_eq!(errors.field("endDate"), ["must be in the future"]);
    }

    #[test]
    fn partial_campaign_update_checks_only_present_fields() {
        let request = UpdateCampaignRequest {
            goal_amount: Some(1000.0),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn rejection_needs_a_reason() {
        let request = RejectSubmissionRequest { reason: " ".into() };
        assert!(request.validate().unwrap_err().has("reason"));
    }
}
