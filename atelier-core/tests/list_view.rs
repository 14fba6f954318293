use async_trait::async_trait;
use atelier_core::query::{filter_items, paginate};
use atelier_core::{
    Fetched, FilterState, ListSource, ListViewController, Listable, LoadState,
    Reconcile, RequestError, RowAction, StatusAction, StatusFilter,
    TransitionError, TransitionPort,
};
use atelier_model::{
    ContestId, Submission, SubmissionId, SubmissionStatus, User, UserId,
    UserRole, UserStatus,
};
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn user(n: usize, name: &str) -> User {
    User {
        id: UserId::new(),
        username: format!("user{n:02}"),
        full_name: name.to_string(),
        email: format!("user{n:02}@example.com"),
        role: UserRole::Competitor,
        status: UserStatus::Active,
        phone: None,
        created_at: Utc::now() - Duration::minutes(n as i64),
    }
}

fn numbered_users(count: usize) -> Vec<User> {
    (1..=count).map(|n| user(n, &format!("Member {n:02}"))).collect()
}

/// In-memory backend shared by the source and the port, standing in for
/// the REST API.
#[derive(Clone)]
struct Backend<T> {
    records: Arc<RwLock<Vec<T>>>,
    server_paged: bool,
    fail_mutations: Option<RequestError>,
    fetches: Arc<AtomicUsize>,
}

impl<T> Backend<T> {
    fn new(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            server_paged: false,
            fail_mutations: None,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl<T: Listable> ListSource<T> for Backend<T> {
    async fn fetch(
        &self,
        filters: &FilterState<T::Status>,
    ) -> Result<Fetched<T>, RequestError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let records = self.records.read().clone();
        if !self.server_paged {
            return Ok(Fetched::Complete(records));
        }
        let matching: Vec<T> =
            filter_items(&records, filters).into_iter().cloned().collect();
        Ok(Fetched::Page(paginate(
            &matching,
            filters.page,
            filters.page_size,
        )))
    }
}

#[async_trait]
impl<T: Listable> TransitionPort<T> for Backend<T> {
    async fn apply(
        &self,
        id: T::Id,
        _action: StatusAction,
        target: T::Status,
    ) -> Result<(), RequestError> {
        if let Some(err) = &self.fail_mutations {
            return Err(err.clone());
        }
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| RequestError::with_status(404, "Not found"))?;
        record.set_status(target);
        Ok(())
    }
}

fn controller<T: Listable>(
    backend: &Backend<T>,
    page_size: u32,
) -> ListViewController<T> {
    ListViewController::new(
        Arc::new(backend.clone()),
        Arc::new(backend.clone()),
        page_size,
    )
}

#[tokio::test]
async fn twenty_five_users_paginate_in_tens_then_twenties() {
    let users = numbered_users(25);
    let backend = Backend::new(users.clone());
    let mut list = controller(&backend, 10);
    list.refresh().await.unwrap();

    let view = list.view();
    assert_eq!(view.meta.total_pages, 3);
    let names: Vec<_> = view.rows.iter().map(|r| r.item.id).collect();
    let expected: Vec<_> = users[..10].iter().map(|u| u.id).collect();
    assert_eq!(names, expected);

    list.set_page(3);
    assert_eq!(list.view().rows.len(), 5);

    assert!(!list.set_page_size(20));
    assert_eq!(list.filters().page, 1);
    let view = list.view();
    assert_eq!(view.rows.len(), 20);
    assert_eq!(view.rows[19].item.id, users[19].id);
    assert_eq!(view.meta.total_pages, 2);
}

#[tokio::test]
async fn searching_john_finds_only_john() {
    let backend = Backend::new(vec![user(1, "John Doe"), user(2, "Jane Smith")]);
    let mut list = controller(&backend, 10);
    list.refresh().await.unwrap();

    list.set_search("john");
    let view = list.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].item.full_name, "John Doe");
    assert_eq!(backend.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn user_suspend_and_reactivate_round_trips() {
    let users = numbered_users(3);
    let target = users[1].id;
    let backend = Backend::new(users);
    let mut list = controller(&backend, 10);
    list.refresh().await.unwrap();

    let outcome = list.run_action(target, StatusAction::Suspend).await.unwrap();
    assert_eq!(outcome.to, UserStatus::Suspended);
    assert_eq!(list.find(&target).unwrap().status, UserStatus::Suspended);
    let others_active = list
        .view()
        .rows
        .iter()
        .filter(|r| r.item.id != target)
        .all(|r| r.item.status == UserStatus::Active);
    assert!(others_active);

    list.run_action(target, StatusAction::Activate).await.unwrap();
    assert_eq!(list.find(&target).unwrap().status, UserStatus::Active);
    assert!(!list.notice().unwrap().is_error());
}

fn submission(title: &str) -> Submission {
    Submission {
        id: SubmissionId::new(),
        title: title.to_string(),
        description: String::new(),
        competitor_id: UserId::new(),
        competitor_name: "Lan Nguyen".into(),
        contest_id: ContestId::new(),
        round_id: None,
        round_name: None,
        image_url: "https://cdn.example.com/a.jpg".into(),
        status: SubmissionStatus::Pending,
        reject_reason: None,
        reviewed_at: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn accepted_submission_cannot_be_accepted_again() {
    let pending = submission("Morning market");
    let id = pending.id;
    let backend = Backend::new(vec![pending, submission("Harbour")]);
    let mut list = controller(&backend, 10).with_reconcile(Reconcile::LocalPatch);
    list.refresh().await.unwrap();

    list.run_action(id, StatusAction::Accept).await.unwrap();
    let row = list
        .view()
        .rows
        .into_iter()
        .find(|r| r.item.id == id)
        .unwrap();
    assert_eq!(row.item.status, SubmissionStatus::Accepted);
    assert!(!row.actions.contains(&RowAction::Status(StatusAction::Accept)));

    let err = list.run_action(id, StatusAction::Accept).await.unwrap_err();
    assert!(matches!(err, TransitionError::Illegal { .. }));
}

#[tokio::test]
async fn failed_transition_leaves_the_list_untouched() {
    let mut backend = Backend::new(numbered_users(4));
    backend.fail_mutations = Some(RequestError::with_status(500, ""));
    let mut list = controller(&backend, 10);
    list.refresh().await.unwrap();
    let before = list.view();

    let target = before.rows[0].item.id;
    let err = list.run_action(target, StatusAction::Suspend).await.unwrap_err();
    assert!(!err.user_message().is_empty());
    assert_eq!(list.view(), before);

    let notice = list.take_notice().unwrap();
    assert!(notice.is_error());
    assert!(!notice.message.is_empty());
}

#[tokio::test]
async fn superseded_fetch_is_discarded() {
    let backend = Backend::new(numbered_users(2));
    let mut list = controller(&backend, 10);

    let first = list.begin_load();
    list.set_search("member 02");
    let second = list.begin_load();

    let fresh = Ok(Fetched::Complete(vec![user(9, "Fresh")]));
    assert!(list.finish_load(second, fresh).unwrap());

    let late = Ok(Fetched::Complete(vec![user(8, "Late")]));
    assert!(!list.finish_load(first, late).unwrap());

    assert_eq!(list.state(), &LoadState::Loaded);
    list.set_search("");
    assert_eq!(list.view().rows[0].item.full_name, "Fresh");
}

#[tokio::test]
async fn fetch_error_is_recorded_and_retry_recovers() {
    let backend = Backend::new(numbered_users(2));
    let mut list = controller(&backend, 10);

    let ticket = list.begin_load();
    let failed = Err(RequestError::with_status(503, "Service unavailable"));
    assert!(list.finish_load(ticket, failed).is_err());
    assert_eq!(list.state().error(), Some("Service unavailable"));

    list.retry().await.unwrap();
    assert_eq!(list.state(), &LoadState::Loaded);
    assert_eq!(list.view().rows.len(), 2);
}

#[tokio::test]
async fn server_paged_list_clamps_after_shrinking() {
    let mut backend = Backend::new(numbered_users(25));
    backend.server_paged = true;
    let mut list = controller(&backend, 10);
    list.refresh().await.unwrap();

    assert!(list.set_page(3));
    list.ensure_fresh().await.unwrap();
    assert_eq!(list.view().rows.len(), 5);

    backend.records.write().truncate(12);
    list.refresh().await.unwrap();

    let view = list.view();
    assert_eq!(list.filters().page, 2);
    assert_eq!(view.meta.total_pages, 2);
    assert_eq!(view.rows.len(), 2);
}

#[tokio::test]
async fn status_filter_change_on_server_pages_needs_fetch() {
    let mut backend = Backend::new(numbered_users(5));
    backend.server_paged = true;
    let mut list = controller(&backend, 10);
    list.refresh().await.unwrap();

    assert!(list.set_status_filter(StatusFilter::Only(UserStatus::Suspended)));
    list.ensure_fresh().await.unwrap();
    assert!(list.view().is_empty());
    assert_eq!(list.view().meta.total_pages, 1);
}

async fn suspend_under_active_filter(
    reconcile: Reconcile,
    server_paged: bool,
) -> (ListViewController<User>, Backend<User>, UserId) {
    let users = numbered_users(3);
    let target = users[0].id;
    let mut backend = Backend::new(users);
    backend.server_paged = server_paged;
    let mut list = controller(&backend, 10).with_reconcile(reconcile);
    list.set_status_filter(StatusFilter::Only(UserStatus::Active));
    list.refresh().await.unwrap();
    assert_eq!(list.view().rows.len(), 3);

    list.run_action(target, StatusAction::Suspend).await.unwrap();
    (list, backend, target)
}

#[tokio::test]
async fn local_patch_hides_row_that_left_the_status_filter() {
    for server_paged in [true, false] {
        let (list, backend, target) =
            suspend_under_active_filter(Reconcile::LocalPatch, server_paged).await;
        let view = list.view();
        assert_eq!(view.rows.len(), 2, "server_paged={server_paged}");
        assert!(view.rows.iter().all(|r| r.item.status == UserStatus::Active));
        assert!(view.rows.iter().all(|r| r.item.id != target));
        assert_eq!(view.meta.total, 2);
        assert_eq!(backend.fetches.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn refetch_hides_row_that_left_the_status_filter() {
    let (list, backend, target) =
        suspend_under_active_filter(Reconcile::Refetch, true).await;
    let view = list.view();
    assert_eq!(view.rows.len(), 2);
    assert!(view.rows.iter().all(|r| r.item.status == UserStatus::Active));
    assert!(view.rows.iter().all(|r| r.item.id != target));
    assert_eq!(backend.fetches.load(Ordering::SeqCst), 2);
}
