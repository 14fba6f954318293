use atelier_console::pages::{
    AwardsPage, CampaignsPage, ContestsPage, ExaminersPage, ExhibitionsPage,
    PostsPage, RoundsPage, SubmissionsPage, UsersPage,
};
use atelier_console::{MemoryBackend, Services};
use atelier_core::validation::ImageUpload;
use atelier_core::{
    CategoryFilter, RequestError, StatusAction, StatusFilter, SubmitError,
    TransitionError,
};
use atelier_model::{
    Award, AwardId, Campaign, CampaignId, CampaignStatus, Contest, ContestId,
    ContestStatus, CreateCampaignRequest, Examiner, ExaminerId,
    ExaminerStatus, Exhibition, ExhibitionId, ExhibitionStatus, NewAward,
    Post, PostId, PostStatus, Round, RoundId, RoundStatus, Submission,
    SubmissionId, SubmissionStatus, UpdateContestRequest, UpdateRoundRequest,
    UploadPaintingRequest, User, UserId, UserRole, UserStatus,
};
use chrono::{DateTime, Duration, Utc};

fn user(name: &str, status: UserStatus) -> User {
    let handle = name.to_lowercase().replace(' ', ".");
    User {
        id: UserId::new(),
        username: handle.clone(),
        full_name: name.to_string(),
        email: format!("{handle}@example.com"),
        role: UserRole::Competitor,
        status,
        phone: None,
        created_at: Utc::now(),
    }
}

fn submission(title: &str, contest_id: ContestId) -> Submission {
    Submission {
        id: SubmissionId::new(),
        title: title.to_string(),
        description: String::new(),
        competitor_id: UserId::new(),
        competitor_name: "John Doe".to_string(),
        contest_id,
        round_id: None,
        round_name: None,
        image_url: "memory://paintings/1.png".to_string(),
        status: SubmissionStatus::Pending,
        reject_reason: None,
        reviewed_at: None,
        created_at: Utc::now(),
    }
}

fn contest(title: &str, status: ContestStatus) -> Contest {
    let start = Utc::now() + Duration::days(1);
    let id = ContestId::new();
    Contest {
        id,
        title: title.to_string(),
        description: String::new(),
        status,
        start_date: start,
        end_date: start + Duration::days(30),
        banner_url: None,
        rounds: vec![
            round(id, "Qualifying", RoundStatus::Open, start),
            round(id, "Final", RoundStatus::Closed, start),
        ],
        created_at: Utc::now(),
    }
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
        end_date: start + Duration::days(7),
        created_at: Utc::now(),
    }
}

fn campaign(title: &str, status: CampaignStatus) -> Campaign {
    Campaign {
        id: CampaignId::new(),
        title: title.to_string(),
        description: String::new(),
        goal_amount: 1000.0,
        current_amount: 250.0,
        status,
        start_date: Utc::now(),
        end_date: Utc::now() + Duration::days(30),
        created_at: Utc::now(),
    }
}

fn services(backend: &MemoryBackend) -> Services {
    Services::in_memory(backend.clone())
}

#[tokio::test]
async fn users_toggle_between_active_and_suspended() {
    let john = user("John Doe", UserStatus::Active);
    let backend = MemoryBackend::new()
        .with_users(vec![john.clone(), user("Jane Smith", UserStatus::Active)]);
    let mut page = UsersPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    let outcome = page.toggle(john.id).await.unwrap();
    assert_eq!(outcome.to, UserStatus::Suspended);
    assert_eq!(backend.users()[0].status, UserStatus::Suspended);
    assert_eq!(backend.users()[1].status, UserStatus::Active);

    let outcome = page.toggle(john.id).await.unwrap();
    assert_eq!(outcome.to, UserStatus::Active);
    assert_eq!(backend.users()[0].status, UserStatus::Active);
}

#[tokio::test]
async fn server_side_search_and_status_filter() {
    let backend = MemoryBackend::new().with_users(vec![
        user("John Doe", UserStatus::Active),
        user("Jane Smith", UserStatus::Suspended),
    ]);
    let mut page = UsersPage::new(&services(&backend), 10);

    page.list_mut().set_search("john");
    page.list_mut().refresh().await.unwrap();
    let names: Vec<String> = page
        .list()
        .view()
        .rows
        .into_iter()
        .map(|row| row.item.full_name)
        .collect();
    assert_eq!(names, vec!["John Doe".to_string()]);

    page.list_mut().set_search("");
    assert!(
        page.list_mut()
            .set_status_filter(StatusFilter::Only(UserStatus::Suspended))
    );
    page.list_mut().ensure_fresh().await.unwrap();
    let view = page.list().view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].item.full_name, "Jane Smith");
}

#[tokio::test]
async fn suspended_user_leaves_the_active_only_view() {
    let john = user("John Doe", UserStatus::Active);
    let backend = MemoryBackend::new()
        .with_users(vec![john.clone(), user("Jane Smith", UserStatus::Active)]);
    let mut page = UsersPage::new(&services(&backend), 10);
    page.list_mut()
        .set_status_filter(StatusFilter::Only(UserStatus::Active));
    page.list_mut().refresh().await.unwrap();

    page.toggle(john.id).await.unwrap();
    let view = page.list().view();
    let shown: Vec<(String, UserStatus)> = view
        .rows
        .iter()
        .map(|row| (row.item.full_name.clone(), row.item.status))
        .collect();
    assert_eq!(shown, vec![("Jane Smith".to_string(), UserStatus::Active)]);
    assert_eq!(view.meta.total, 1);
}

#[tokio::test]
async fn role_category_narrows_users() {
    let mut staff = user("Jane Smith", UserStatus::Active);
    staff.role = UserRole::Staff;
    let backend = MemoryBackend::new()
        .with_users(vec![user("John Doe", UserStatus::Active), staff]);
    let mut page = UsersPage::new(&services(&backend), 10);

    page.list_mut().set_category(CategoryFilter::parse("staff"));
    page.list_mut().refresh().await.unwrap();
    let view = page.list().view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].item.full_name, "Jane Smith");
}

#[tokio::test]
async fn failed_toggle_reports_server_message() {
    let john = user("John Doe", UserStatus::Active);
    let backend = MemoryBackend::new().with_users(vec![john.clone()]);
    let mut page = UsersPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    backend.fail_next_mutation(RequestError::with_status(409, "User is protected"));
    let err = page.toggle(john.id).await.unwrap_err();
    assert_eq!(err.user_message(), "User is protected");
    assert_eq!(backend.users()[0].status, UserStatus::Active);
    let notice = page.list().notice().unwrap();
    assert!(notice.is_error());
    assert_eq!(page.list().view().rows[0].item.status, UserStatus::Active);
}

#[tokio::test]
async fn accepted_submission_cannot_be_reviewed_again() {
    let contest_id = ContestId::new();
    let painting = submission("Rainy Street", contest_id);
    let backend = MemoryBackend::new().with_submissions(vec![painting.clone()]);
    let mut page = SubmissionsPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    page.accept(painting.id).await.unwrap();
    assert_eq!(backend.submissions()[0].status, SubmissionStatus::Accepted);
    assert!(page.list().view().rows[0].actions.is_empty());

    let err = page.accept(painting.id).await.unwrap_err();
    assert!(matches!(err, TransitionError::Illegal { .. }));
    assert_eq!(backend.mutation_count(), 1);
}

#[tokio::test]
async fn rejection_requires_a_reason_and_stores_it() {
    let painting = submission("Harbor at Dusk", ContestId::new());
    let backend = MemoryBackend::new().with_submissions(vec![painting.clone()]);
    let mut page = SubmissionsPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    let err = page.reject(painting.id, "  no ").await.unwrap_err();
    assert!(matches!(err, TransitionError::Invalid(_)));
    assert_eq!(backend.mutation_count(), 0);

    page.reject(painting.id, "Does not follow the theme")
        .await
        .unwrap();
    let stored = &backend.submissions()[0];
    assert_eq!(stored.status, SubmissionStatus::Rejected);
    assert_eq!(
        stored.reject_reason.as_deref(),
        Some("Does not follow the theme")
    );
}

#[tokio::test]
async fn upload_validates_before_sending() {
    let target = contest("Summer Colors", ContestStatus::Active);
    let backend = MemoryBackend::new().with_contests(vec![target.clone()]);
    let mut page = SubmissionsPage::new(&services(&backend), 10);

    let request = UploadPaintingRequest {
        contest_id: target.id,
        competitor_id: UserId::new(),
        round_id: None,
        title: "Lanterns of Hoi An".to_string(),
        description: String::new(),
    };

    let err = page
        .upload(request.clone(), ImageUpload::new("notes.txt", vec![1, 2, 3]), true)
        .await
        .unwrap_err();
    let SubmitError::Invalid(errors) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert!(errors.has("image"));
    assert!(errors.has("roundId"));
    assert_eq!(backend.mutation_count(), 0);

    let uploaded = page
        .upload(request, ImageUpload::new("lanterns.png", vec![0u8; 64]), false)
        .await
        .unwrap();
    assert_eq!(uploaded.status, SubmissionStatus::Pending);
    assert_eq!(backend.submissions().len(), 1);
    assert_eq!(page.list().view().rows.len(), 1);
}

#[tokio::test]
async fn completed_contest_is_locked_for_editing() {
    let done = contest("Spring Festival", ContestStatus::Completed);
    let open = contest("Summer Colors", ContestStatus::Active);
    let backend =
        MemoryBackend::new().with_contests(vec![done.clone(), open.clone()]);
    let mut page = ContestsPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    let err = page
        .edit(done.id, UpdateContestRequest::from(&done))
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Locked { .. }));

    let mut request = UpdateContestRequest::from(&open);
    request.title = "Summer Colors 2025".to_string();
    let saved = page.edit(open.id, request).await.unwrap();
    assert_eq!(saved.title, "Summer Colors 2025");
    assert!(
        page.list()
            .view()
            .rows
            .iter()
            .any(|row| row.item.title == "Summer Colors 2025")
    );
}

#[tokio::test]
async fn contest_edit_rejects_reversed_dates() {
    let open = contest("Summer Colors", ContestStatus::Active);
    let backend = MemoryBackend::new().with_contests(vec![open.clone()]);
    let mut page = ContestsPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    let mut request = UpdateContestRequest::from(&open);
    request.end_date = open.start_date - Duration::days(1);
    let err = page.edit(open.id, request).await.unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(_)));
    assert_eq!(backend.mutation_count(), 0);
}

#[tokio::test]
async fn contest_publish_goes_through_the_workflow() {
    let draft = contest("Winter Tales", ContestStatus::Draft);
    let backend = MemoryBackend::new().with_contests(vec![draft.clone()]);
    let mut page = ContestsPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    let err = page
        .list_mut()
        .run_action(draft.id, StatusAction::Complete)
        .await
        .unwrap_err();
    assert!(matches!(err, TransitionError::Illegal { .. }));

    let outcome = page
        .list_mut()
        .run_action(draft.id, StatusAction::Publish)
        .await
        .unwrap();
    assert_eq!(outcome.to, ContestStatus::Active);
}

#[tokio::test]
async fn rounds_come_from_their_contest() {
    let parent = contest("Summer Colors", ContestStatus::Active);
    let backend = MemoryBackend::new().with_contests(vec![parent.clone()]);
    let mut page = RoundsPage::new(&services(&backend), parent.id, 10);
    page.list_mut().refresh().await.unwrap();
    assert_eq!(page.list().view().rows.len(), 2);

    let open = &parent.rounds[0];
    let closed = &parent.rounds[1];
    page.list_mut()
        .run_action(open.id, StatusAction::Close)
        .await
        .unwrap();
    assert_eq!(
        page.list().find(&open.id).map(|r| r.status),
        Some(RoundStatus::Closed)
    );

    let mut request = UpdateRoundRequest::from(closed);
    request.name = "Grand final".to_string();
    let err = page.edit(closed.id, request).await.unwrap_err();
    assert!(matches!(err, SubmitError::Locked { .. }));
}

#[tokio::test]
async fn award_batch_with_duplicate_ranks_is_refused() {
    let contest_id = ContestId::new();
    let backend = MemoryBackend::new();
    let mut page = AwardsPage::new(&services(&backend), contest_id, 10);
    page.refresh().await.unwrap();

    let gold = NewAward {
        name: "Gold".to_string(),
        rank: 1,
        quantity: 1,
        prize: 500.0,
    };
    let err = page
        .create(vec![gold.clone(), gold.clone()])
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(_)));

    let silver = NewAward {
        name: "Silver".to_string(),
        rank: 2,
        ..gold.clone()
    };
    let created = page.create(vec![silver, gold]).await.unwrap();
    assert_eq!(created.len(), 2);
    let ranks: Vec<u32> = page.view().items.iter().map(|a| a.rank).collect();
    assert_eq!(ranks, vec![1, 2]);
}

#[tokio::test]
async fn deleting_an_award_refreshes_the_list() {
    let contest_id = ContestId::new();
    let award = Award {
        id: AwardId::new(),
        contest_id,
        name: "Gold".to_string(),
        rank: 1,
        quantity: 1,
        prize: 500.0,
        created_at: Utc::now(),
    };
    let backend = MemoryBackend::new().with_awards(vec![award.clone()]);
    let mut page = AwardsPage::new(&services(&backend), contest_id, 10);
    page.refresh().await.unwrap();

    page.delete(award.id).await.unwrap();
    assert!(page.view().is_empty());
    assert_eq!(page.view().meta.total_pages, 1);
    assert!(matches!(
        page.delete(award.id).await,
        Err(TransitionError::NotFound { .. })
    ));
}

#[tokio::test]
async fn campaign_create_validates_goal_and_dates() {
    let backend = MemoryBackend::new();
    let mut page = CampaignsPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    let start = Utc::now() + Duration::days(1);
    let mut request = CreateCampaignRequest {
        title: "Paint the Future".to_string(),
        description: String::new(),
        goal_amount: 0.0,
        start_date: start,
        end_date: start - Duration::days(1),
    };
    let err = page.create(request.clone()).await.unwrap_err();
    let SubmitError::Invalid(errors) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert!(errors.has("goalAmount"));
    assert!(errors.has("endDate"));

    request.goal_amount = 5000.0;
    request.end_date = start + Duration::days(30);
    let created = page.create(request).await.unwrap();
    assert_eq!(created.status, CampaignStatus::Draft);
    assert_eq!(page.list().view().rows.len(), 1);
}

#[tokio::test]
async fn campaign_progress_and_sponsors() {
    let drive = campaign("Paint the Future", CampaignStatus::Active);
    let backend = MemoryBackend::new().with_campaigns(vec![drive.clone()]);
    let page = CampaignsPage::new(&services(&backend), 10);

    assert_eq!(CampaignsPage::progress(&drive), 25);
    let sponsors = page.sponsors(drive.id, 1, 10).await.unwrap();
    assert!(sponsors.data.is_empty());
    assert_eq!(sponsors.meta.total_pages, 1);
}

#[tokio::test]
async fn posts_can_be_deleted() {
    let post = Post {
        id: PostId::new(),
        title: "Meet the judges".to_string(),
        excerpt: String::new(),
        author_name: "Jane Smith".to_string(),
        category: "interview".to_string(),
        status: PostStatus::Published,
        created_at: Utc::now(),
    };
    let backend = MemoryBackend::new().with_posts(vec![post.clone()]);
    let mut page = PostsPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    page.delete(post.id).await.unwrap();
    assert!(backend.posts().is_empty());
    assert!(page.list().view().is_empty());
    assert!(!page.list().notice().unwrap().is_error());
}

#[tokio::test]
async fn exhibition_archive_then_delete() {
    let show = Exhibition {
        id: ExhibitionId::new(),
        title: "Colors of Childhood".to_string(),
        description: String::new(),
        location: Some("Hanoi".to_string()),
        status: ExhibitionStatus::Published,
        start_date: Utc::now(),
        end_date: Utc::now() + Duration::days(10),
        painting_count: 12,
        created_at: Utc::now(),
    };
    let backend = MemoryBackend::new().with_exhibitions(vec![show.clone()]);
    let mut page = ExhibitionsPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    page.list_mut()
        .run_action(show.id, StatusAction::Archive)
        .await
        .unwrap();
    assert_eq!(backend.exhibitions()[0].status, ExhibitionStatus::Archived);

    page.delete(show.id).await.unwrap();
    assert!(backend.exhibitions().is_empty());
}

#[tokio::test]
async fn examiners_filter_by_specialization_locally() {
    let examiner = |name: &str, specializations: &[&str]| Examiner {
        id: ExaminerId::new(),
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        specializations: specializations.iter().map(|s| s.to_string()).collect(),
        status: ExaminerStatus::Active,
        assigned_count: 0,
        created_at: Utc::now(),
    };
    let backend = MemoryBackend::new().with_examiners(vec![
        examiner("Tran Van Khoa", &["watercolor", "oil"]),
        examiner("Nguyen Thi Lien", &["sketch"]),
    ]);
    let mut page = ExaminersPage::new(&services(&backend), 10);
    page.list_mut().refresh().await.unwrap();

    assert!(!page.list_mut().set_category(CategoryFilter::parse("Oil")));
    let view = page.list().view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].item.full_name, "Tran Van Khoa");
}
