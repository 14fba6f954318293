//! Seed data for `--demo`, which runs every page against a
//! [`MemoryBackend`] instead of a live server.

use atelier_model::{
    Award, AwardId, Campaign, CampaignId, CampaignStatus, Contest, ContestId,
    ContestStatus, CurrentUser, Examiner, ExaminerId, ExaminerStatus,
    Exhibition, ExhibitionId, ExhibitionStatus, Post, PostId, PostStatus,
    Round, RoundId, RoundStatus, Sponsor, SponsorId, Submission,
    SubmissionId, SubmissionStatus, User, UserId, UserRole, UserStatus,
};
use chrono::{DateTime, Duration, Utc};

use crate::memory::MemoryBackend;

const NAMES: &[&str] = &[
    "John Doe",
    "Jane Smith",
    "Nguyen Van An",
    "Tran Thi Binh",
    "Le Hoang Cuong",
    "Pham Minh Duc",
    "Hoang Thu Ha",
    "Vu Quang Huy",
    "Dang Ngoc Lan",
    "Bui Thanh Mai",
    "Do Gia Nam",
    "Ngo Bao Ngoc",
    "Duong Khanh Phuong",
    "Ly Tuan Quan",
];

const PAINTINGS: &[&str] = &[
    "Morning over Ha Long",
    "Grandmother's Garden",
    "Lanterns of Hoi An",
    "The Blue Kite",
    "Rice Fields in Autumn",
    "My School",
    "Rainy Street",
    "Harbor at Dusk",
];

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', ".")
}

fn users(now: DateTime<Utc>) -> Vec<User> {
    NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let role = match i % 7 {
                0 => UserRole::Staff,
                1 | 2 | 3 => UserRole::Competitor,
                4 => UserRole::Guardian,
                5 => UserRole::Examiner,
                _ => UserRole::Competitor,
            };
            let status = match i % 5 {
                3 => UserStatus::Suspended,
                4 => UserStatus::Pending,
                _ => UserStatus::Active,
            };
            User {
                id: UserId::new(),
                username: slug(name),
                full_name: name.to_string(),
                email: format!("{}@example.com", slug(name)),
                role,
                status,
                phone: None,
                created_at: now - Duration::days(90 - i as i64 * 5),
            }
        })
        .collect()
}

fn round(
    contest_id: ContestId,
    name: &str,
    status: RoundStatus,
    start: DateTime<Utc>,
) -> Round {
    Round {
        id: RoundId::new(),
        contest_id,
        name: name.to_string(),
        table: None,
        status,
        start_date: start,
        end_date: start + Duration::days(14),
        created_at: start - Duration::days(30),
    }
}

fn contest(
    title: &str,
    status: ContestStatus,
    start: DateTime<Utc>,
    rounds: &[(&str, RoundStatus)],
) -> Contest {
    let id = ContestId::new();
    let rounds = rounds
        .iter()
        .enumerate()
        .map(|(i, (name, status))| {
            round(id, name, *status, start + Duration::days(i as i64 * 21))
        })
        .collect();
    Contest {
        id,
        title: title.to_string(),
        description: format!("{title}, open to painters aged 6 to 15."),
        status,
        start_date: start,
        end_date: start + Duration::days(60),
        banner_url: None,
        rounds,
        created_at: start - Duration::days(45),
    }
}

fn submissions(
    now: DateTime<Utc>,
    contest: &Contest,
    competitors: &[&User],
) -> Vec<Submission> {
    PAINTINGS
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let competitor = competitors[i % competitors.len()];
            let round = contest.rounds.get(i % 2);
            let status = match i % 4 {
                1 => SubmissionStatus::Accepted,
                3 => SubmissionStatus::Rejected,
                _ => SubmissionStatus::Pending,
            };
            Submission {
                id: SubmissionId::new(),
                title: title.to_string(),
                description: String::new(),
                competitor_id: competitor.id,
                competitor_name: competitor.full_name.clone(),
                contest_id: contest.id,
                round_id: round.map(|r| r.id),
                round_name: round.map(|r| r.name.clone()),
                image_url: format!("memory://paintings/{}.png", i + 1),
                status,
                reject_reason: (status == SubmissionStatus::Rejected)
                    .then(|| "Painting does not follow the theme".to_string()),
                reviewed_at: (status != SubmissionStatus::Pending)
                    .then(|| now - Duration::days(2)),
                created_at: now - Duration::days(20 - i as i64),
            }
        })
        .collect()
}

fn awards(now: DateTime<Utc>, contest_id: ContestId) -> Vec<Award> {
    [("Gold", 1, 1, 5_000_000.0), ("Silver", 2, 2, 3_000_000.0), ("Bronze", 3, 3, 1_000_000.0)]
        .into_iter()
        .map(|(name, rank, quantity, prize)| Award {
            id: AwardId::new(),
            contest_id,
            name: name.to_string(),
            rank,
            quantity,
            prize,
            created_at: now - Duration::days(10),
        })
        .collect()
}

fn campaigns(now: DateTime<Utc>) -> (Vec<Campaign>, Vec<Sponsor>) {
    let specs = [
        ("Paint the Future", CampaignStatus::Active, 50_000_000.0, 32_500_000.0),
        ("Brushes for Every School", CampaignStatus::Draft, 20_000_000.0, 0.0),
        ("Spring Gallery Fund", CampaignStatus::Closed, 10_000_000.0, 12_000_000.0),
    ];
    let campaigns: Vec<Campaign> = specs
        .into_iter()
        .enumerate()
        .map(|(i, (title, status, goal, current))| Campaign {
            id: CampaignId::new(),
            title: title.to_string(),
            description: format!("{title} sponsorship drive"),
            goal_amount: goal,
            current_amount: current,
            status,
            start_date: now - Duration::days(30 - i as i64 * 10),
            end_date: now + Duration::days(30 + i as i64 * 10),
            created_at: now - Duration::days(40),
        })
        .collect();

    let sponsors = ["Saigon Paper Co.", "Red River Arts", "Lotus Foundation"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| Sponsor {
            id: SponsorId::new(),
            campaign_id: campaigns[0].id,
            name: name.to_string(),
            email: None,
            amount: 10_000_000.0 + i as f64 * 1_250_000.0,
            created_at: now - Duration::days(5 + i as i64),
        })
        .collect();
    (campaigns, sponsors)
}

fn exhibitions(now: DateTime<Utc>) -> Vec<Exhibition> {
    [
        ("Colors of Childhood", ExhibitionStatus::Published, Some("Hanoi")),
        ("Winners 2024", ExhibitionStatus::Archived, Some("Da Nang")),
        ("New Voices", ExhibitionStatus::Draft, None),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (title, status, location))| Exhibition {
        id: ExhibitionId::new(),
        title: title.to_string(),
        description: String::new(),
        location: location.map(str::to_string),
        status,
        start_date: now + Duration::days(i as i64 * 15),
        end_date: now + Duration::days(i as i64 * 15 + 10),
        painting_count: 12 * (i as u32 + 1),
        created_at: now - Duration::days(60),
    })
    .collect()
}

fn posts(now: DateTime<Utc>) -> Vec<Post> {
    [
        ("Contest rules explained", "news", PostStatus::Published),
        ("Meet the judges", "interview", PostStatus::Published),
        ("Tips for watercolor", "tutorial", PostStatus::Draft),
        ("Last year's winners", "news", PostStatus::Archived),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (title, category, status))| Post {
        id: PostId::new(),
        title: title.to_string(),
        excerpt: String::new(),
        author_name: NAMES[i % 2].to_string(),
        category: category.to_string(),
        status,
        created_at: now - Duration::days(i as i64 * 3),
    })
    .collect()
}

fn examiners(now: DateTime<Utc>) -> Vec<Examiner> {
    [
        ("Tran Van Khoa", &["watercolor", "oil"][..], ExaminerStatus::Active),
        ("Nguyen Thi Lien", &["sketch"][..], ExaminerStatus::Active),
        ("Pham Duc Minh", &["oil", "acrylic"][..], ExaminerStatus::Inactive),
    ]
    .into_iter()
    .map(|(name, specializations, status)| Examiner {
        id: ExaminerId::new(),
        full_name: name.to_string(),
        email: format!("{}@example.com", slug(name)),
        specializations: specializations.iter().map(|s| s.to_string()).collect(),
        status,
        assigned_count: 0,
        created_at: now - Duration::days(100),
    })
    .collect()
}

/// A backend populated with a small, realistic data set.
pub fn seeded_backend() -> MemoryBackend {
    let now = Utc::now();
    let users = users(now);
    let competitors: Vec<&User> = users
        .iter()
        .filter(|u| u.role == UserRole::Competitor)
        .collect();

    let summer = contest(
        "Summer Colors 2025",
        ContestStatus::Active,
        now - Duration::days(10),
        &[
            ("Qualifying round", RoundStatus::Open),
            ("Final round", RoundStatus::Upcoming),
        ],
    );
    let winter = contest(
        "Winter Tales",
        ContestStatus::Draft,
        now + Duration::days(60),
        &[("Round 1", RoundStatus::Upcoming)],
    );
    let spring = contest(
        "Spring Festival 2024",
        ContestStatus::Completed,
        now - Duration::days(300),
        &[("Round 1", RoundStatus::Closed)],
    );

    let submissions = submissions(now, &summer, &competitors);
    let awards = awards(now, summer.id);
    let (campaigns, sponsors) = campaigns(now);
    let current_user = users
        .iter()
        .find(|u| u.role == UserRole::Staff)
        .map(|u| CurrentUser {
            id: u.id,
            username: u.username.clone(),
            full_name: u.full_name.clone(),
            role: u.role,
        });

    let backend = MemoryBackend::new()
        .with_submissions(submissions)
        .with_users(users)
        .with_contests(vec![summer, winter, spring])
        .with_awards(awards)
        .with_campaigns(campaigns)
        .with_sponsors(sponsors)
        .with_exhibitions(exhibitions(now))
        .with_posts(posts(now))
        .with_examiners(examiners(now));
    match current_user {
        Some(user) => backend.with_current_user(user),
        None => backend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_covers_every_page() {
        let backend = seeded_backend();
        assert_eq!(backend.users().len(), NAMES.len());
        assert_eq!(backend.submissions().len(), PAINTINGS.len());
        assert!(!backend.awards().is_empty());
        assert!(!backend.campaigns().is_empty());
        assert!(!backend.posts().is_empty());
        assert!(
            backend
                .submissions()
                .iter()
                .any(|s| s.status == SubmissionStatus::Pending)
        );
    }
}
