use super::{StatusAction, StatusWorkflow, Transition};
use atelier_model::{
    CampaignStatus, ContestStatus, ExaminerStatus, ExhibitionStatus,
    PostStatus, RoundStatus, SubmissionStatus, UserStatus,
};

const fn edge<S>(from: S, action: StatusAction, to: S) -> Transition<S> {
    Transition { from, action, to }
}

const USER: &[Transition<UserStatus>] = &[
    edge(UserStatus::Active, StatusAction::Suspend, UserStatus::Suspended),
    edge(UserStatus::Suspended, StatusAction::Activate, UserStatus::Active),
    edge(UserStatus::Pending, StatusAction::Activate, UserStatus::Active),
    edge(UserStatus::Pending, StatusAction::Suspend, UserStatus::Suspended),
];

impl StatusWorkflow for UserStatus {
    const ENTITY: &'static str = "user";

    fn variants() -> &'static [Self] {
        UserStatus::all()
    }

    fn transitions() -> &'static [Transition<Self>] {
        USER
    }

    fn is_editable(&self) -> bool {
        true
    }
}

const CONTEST: &[Transition<ContestStatus>] = &[
    edge(ContestStatus::Draft, StatusAction::Publish, ContestStatus::Active),
    edge(ContestStatus::Draft, StatusAction::Cancel, ContestStatus::Cancelled),
    edge(ContestStatus::Active, StatusAction::Complete, ContestStatus::Completed),
    edge(ContestStatus::Active, StatusAction::Cancel, ContestStatus::Cancelled),
];

impl StatusWorkflow for ContestStatus {
    const ENTITY: &'static str = "contest";

    fn variants() -> &'static [Self] {
        ContestStatus::all()
    }

    fn transitions() -> &'static [Transition<Self>] {
        CONTEST
    }
}

const ROUND: &[Transition<RoundStatus>] = &[
    edge(RoundStatus::Upcoming, StatusAction::Open, RoundStatus::Open),
    edge(RoundStatus::Open, StatusAction::Close, RoundStatus::Closed),
];

impl StatusWorkflow for RoundStatus {
    const ENTITY: &'static str = "round";

    fn variants() -> &'static [Self] {
        RoundStatus::all()
    }

    fn transitions() -> &'static [Transition<Self>] {
        ROUND
    }
}

const SUBMISSION: &[Transition<SubmissionStatus>] = &[
    edge(
        SubmissionStatus::Pending,
        StatusAction::Accept,
        SubmissionStatus::Accepted,
    ),
    edge(
        SubmissionStatus::Pending,
        StatusAction::Reject,
        SubmissionStatus::Rejected,
    ),
];

impl StatusWorkflow for SubmissionStatus {
    const ENTITY: &'static str = "submission";

    fn variants() -> &'static [Self] {
        SubmissionStatus::all()
    }

    fn transitions() -> &'static [Transition<Self>] {
        SUBMISSION
    }
}

const CAMPAIGN: &[Transition<CampaignStatus>] = &[
    edge(CampaignStatus::Draft, StatusAction::Publish, CampaignStatus::Active),
    edge(CampaignStatus::Draft, StatusAction::Cancel, CampaignStatus::Cancelled),
    edge(CampaignStatus::Active, StatusAction::Close, CampaignStatus::Closed),
    edge(CampaignStatus::Active, StatusAction::Cancel, CampaignStatus::Cancelled),
];

impl StatusWorkflow for CampaignStatus {
    const ENTITY: &'static str = "campaign";

    fn variants() -> &'static [Self] {
        CampaignStatus::all()
    }

    fn transitions() -> &'static [Transition<Self>] {
        CAMPAIGN
    }
}

const EXHIBITION: &[Transition<ExhibitionStatus>] = &[
    edge(
        ExhibitionStatus::Draft,
        StatusAction::Publish,
        ExhibitionStatus::Published,
    ),
    edge(
        ExhibitionStatus::Published,
        StatusAction::Archive,
        ExhibitionStatus::Archived,
    ),
    edge(
        ExhibitionStatus::Archived,
        StatusAction::Publish,
        ExhibitionStatus::Published,
    ),
];

impl StatusWorkflow for ExhibitionStatus {
    const ENTITY: &'static str = "exhibition";

    fn variants() -> &'static [Self] {
        ExhibitionStatus::all()
    }

    fn transitions() -> &'static [Transition<Self>] {
        EXHIBITION
    }

    fn is_deletable(&self) -> bool {
        true
    }
}

const POST: &[Transition<PostStatus>] = &[
    edge(PostStatus::Draft, StatusAction::Publish, PostStatus::Published),
    edge(PostStatus::Published, StatusAction::Archive, PostStatus::Archived),
    edge(PostStatus::Archived, StatusAction::Publish, PostStatus::Published),
];

impl StatusWorkflow for PostStatus {
    const ENTITY: &'static str = "post";

    fn variants() -> &'static [Self] {
        PostStatus::all()
    }

    fn transitions() -> &'static [Transition<Self>] {
        POST
    }

    fn is_deletable(&self) -> bool {
        true
    }
}

const EXAMINER: &[Transition<ExaminerStatus>] = &[
    edge(
        ExaminerStatus::Active,
        StatusAction::Deactivate,
        ExaminerStatus::Inactive,
    ),
    edge(
        ExaminerStatus::Inactive,
        StatusAction::Activate,
        ExaminerStatus::Active,
    ),
];

impl StatusWorkflow for ExaminerStatus {
    const ENTITY: &'static str = "examiner";

    fn variants() -> &'static [Self] {
        ExaminerStatus::all()
    }

    fn transitions() -> &'static [Transition<Self>] {
        EXAMINER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_table_is_deterministic<S: StatusWorkflow>() {
        for (i, a) in S::transitions().iter().enumerate() {
            for b in &S::transitions()[i + 1..] {
                assert!(
                    !(a.from == b.from && a.action == b.action),
                    "{} has two targets for {:?} --{}-->",
                    S::ENTITY,
                    a.from,
                    a.action
                );
            }
        }
    }

    #[test]
    fn every_table_has_one_target_per_edge() {
        assert_table_is_deterministic::<UserStatus>();
        assert_table_is_deterministic::<ContestStatus>();
        assert_table_is_deterministic::<RoundStatus>();
        assert_table_is_deterministic::<SubmissionStatus>();
        assert_table_is_deterministic::<CampaignStatus>();
        assert_table_is_deterministic::<ExhibitionStatus>();
        assert_table_is_deterministic::<PostStatus>();
        assert_table_is_deterministic::<ExaminerStatus>();
    }

    #[test]
    fn finished_contests_are_locked() {
        assert!(ContestStatus::Completed.is_terminal());
        assert!(!ContestStatus::Completed.is_editable());
        assert!(ContestStatus::Active.is_editable());
        assert!(!ContestStatus::Draft.is_deletable());
    }

    #[test]
    fn archived_posts_can_be_republished() {
        assert_eq!(
            PostStatus::Archived.apply(StatusAction::Publish),
            Some(PostStatus::Published)
        );
    }
}
