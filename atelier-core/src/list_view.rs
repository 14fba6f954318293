//! The generic list view controller every admin page is built from.
//!
//! A controller owns the filter state, the most recent fetch result and the
//! load state. Sources either hand back the complete record set, in which
//! case filtering and pagination happen here, or an already-filtered server
//! page. Fetches are tagged with a [`LoadTicket`]; only the newest ticket's
//! result is ever applied.

use crate::error::{RequestError, TransitionError};
use crate::feedback::Notice;
use crate::query::{
    CategoryFilter, FilterState, Listable, PageResult, StatusFilter,
    filter_items, matches, paginate,
};
use crate::transition::{
    Reconcile, TransitionExecutor, TransitionOutcome, TransitionPort,
    patch_status,
};
use crate::workflow::{RowAction, StatusAction, StatusWorkflow, row_actions};
use async_trait::async_trait;
use atelier_model::PageMeta;
use atelier_model::page::total_pages;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// What a [`ListSource`] returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// Every record; the controller filters and paginates locally.
    Complete(Vec<T>),
    /// A page the server already filtered and sliced.
    Page(PageResult<T>),
}

impl<T> Fetched<T> {
    fn items_mut(&mut self) -> &mut [T] {
        match self {
            Fetched::Complete(items) => items,
            Fetched::Page(page) => &mut page.items,
        }
    }

    fn items(&self) -> &[T] {
        match self {
            Fetched::Complete(items) => items,
            Fetched::Page(page) => &page.items,
        }
    }
}

/// A server page is not filtered again on read, so a patched row that left
/// the active filter is removed here and the totals shrink with it.
fn drop_unmatched<T: Listable>(page: &mut PageResult<T>, filters: &FilterState<T::Status>) {
    let before = page.items.len();
    page.items.retain(|item| matches(item, filters));
    let removed = (before - page.items.len()) as u64;
    if removed > 0 {
        page.meta = PageMeta::compute(
            page.meta.total.saturating_sub(removed),
            page.meta.page,
            page.meta.limit,
        );
    }
}

#[async_trait]
pub trait ListSource<T: Listable>: Send + Sync {
    async fn fetch(
        &self,
        filters: &FilterState<T::Status>,
    ) -> Result<Fetched<T>, RequestError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// User-facing failure message; the view offers a retry.
    Errored(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Errored(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one fetch. Carries the filter snapshot it was issued for.
#[derive(Debug, Clone)]
pub struct LoadTicket<S> {
    generation: u64,
    filters: FilterState<S>,
}

impl<S> LoadTicket<S> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filters(&self) -> &FilterState<S> {
        &self.filters
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub item: T,
    pub actions: Vec<RowAction>,
    /// A status change for this row is awaiting the server.
    pub pending: bool,
}

/// Render-ready snapshot of a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    pub rows: Vec<Row<T>>,
    pub meta: PageMeta,
    pub state: LoadState,
}

impl<T> ListView<T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct ListViewController<T: Listable> {
    source: Arc<dyn ListSource<T>>,
    executor: TransitionExecutor<T>,
    reconcile: Reconcile,
    filters: FilterState<T::Status>,
    data: Option<Fetched<T>>,
    state: LoadState,
    issued: u64,
    stale: bool,
    notice: Option<Notice>,
}

impl<T: Listable> fmt::Debug for ListViewController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListViewController")
            .field("entity", &T::Status::ENTITY)
            .field("filters", &self.filters)
            .field("state", &self.state)
            .field("issued", &self.issued)
            .field("reconcile", &self.reconcile)
            .finish_non_exhaustive()
    }
}

impl<T: Listable> ListViewController<T> {
    pub fn new(
        source: Arc<dyn ListSource<T>>,
        port: Arc<dyn TransitionPort<T>>,
        page_size: u32,
    ) -> Self {
        Self {
            source,
            executor: TransitionExecutor::new(port),
            reconcile: Reconcile::Refetch,
            filters: FilterState::with_page_size(page_size),
            data: None,
            state: LoadState::Idle,
            issued: 0,
            stale: true,
            notice: None,
        }
    }

    pub fn with_reconcile(mut self, reconcile: Reconcile) -> Self {
        self.reconcile = reconcile;
        self
    }

    pub fn filters(&self) -> &FilterState<T::Status> {
        &self.filters
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn executor(&self) -> &TransitionExecutor<T> {
        &self.executor
    }

    /// Whether the current view can only be produced by fetching again.
    pub fn needs_fetch(&self) -> bool {
        self.data.is_none() || self.stale
    }

    fn is_server_paged(&self) -> bool {
        matches!(self.data, Some(Fetched::Page(_)))
    }

    fn after_filter_change(&mut self, changed: bool) -> bool {
        if changed && self.is_server_paged() {
            self.stale = true;
        }
        self.needs_fetch()
    }

    /// All filter setters reset to page 1 and return [`Self::needs_fetch`].
    pub fn set_search(&mut self, query: impl Into<String>) -> bool {
        let changed = self.filters.set_search(query);
        self.after_filter_change(changed)
    }

    pub fn set_status_filter(&mut self, status: StatusFilter<T::Status>) -> bool {
        let changed = self.filters.set_status(status);
        self.after_filter_change(changed)
    }

    pub fn set_category(&mut self, category: CategoryFilter) -> bool {
        let changed = self.filters.set_category(category);
        self.after_filter_change(changed)
    }

    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let changed = self.filters.set_page_size(page_size);
        self.after_filter_change(changed)
    }

    /// Move to `page`, clamped to the known page count.
    pub fn set_page(&mut self, page: u32) -> bool {
        let pages = self.total_pages();
        let changed = self.filters.set_page(page, pages);
        self.after_filter_change(changed)
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.filters.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> bool {
        self.set_page(self.filters.page.saturating_sub(1))
    }

    fn matching_total(&self) -> u64 {
        match &self.data {
            None => 0,
            Some(Fetched::Complete(items)) => {
                filter_items(items, &self.filters).len() as u64
            }
            Some(Fetched::Page(page)) => page.meta.total,
        }
    }

    fn total_pages(&self) -> u32 {
        total_pages(self.matching_total(), self.filters.page_size)
    }

    /// Start a fetch. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket<T::Status> {
        self.issued += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            generation: self.issued,
            filters: self.filters.clone(),
        }
    }

    /// Apply a fetch result. Returns `Ok(false)` when the ticket was
    /// superseded and the result discarded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket<T::Status>,
        result: Result<Fetched<T>, RequestError>,
    ) -> Result<bool, RequestError> {
        if ticket.generation != self.issued {
            debug!(
                entity = T::Status::ENTITY,
                generation = ticket.generation,
                latest = self.issued,
                "discarding superseded list result"
            );
            return Ok(false);
        }

        match result {
            Ok(fetched) => {
                self.data = Some(fetched);
                self.state = LoadState::Loaded;
                self.stale = false;
                self.clamp_page();
                Ok(true)
            }
            Err(err) => {
                warn!(
                    entity = T::Status::ENTITY,
                    error = %err,
                    "list fetch failed"
                );
                self.state = LoadState::Errored(err.user_message().to_string());
                Err(err)
            }
        }
    }

    /// Pull the page back into range after the result set shrank. A server
    /// page that is now out of range must be fetched again.
    fn clamp_page(&mut self) {
        let pages = self.total_pages();
        if self.filters.page > pages {
            debug!(
                entity = T::Status::ENTITY,
                from = self.filters.page,
                to = pages,
                "clamping page"
            );
            self.filters.page = pages;
            if self.is_server_paged() {
                self.stale = true;
            }
        }
    }

    async fn load(&mut self) -> Result<bool, RequestError> {
        let ticket = self.begin_load();
        let result = self.source.fetch(&ticket.filters).await;
        self.finish_load(ticket, result)
    }

    /// Fetch with the current filters and apply the result.
    pub async fn refresh(&mut self) -> Result<(), RequestError> {
        self.load().await?;
        if self.needs_fetch() {
            self.load().await?;
        }
        Ok(())
    }

    /// Re-run the failed fetch. No-op unless the last load errored.
    pub async fn retry(&mut self) -> Result<(), RequestError> {
        if matches!(self.state, LoadState::Errored(_)) {
            self.refresh().await
        } else {
            Ok(())
        }
    }

    /// Fetch only when a filter change or first load requires it.
    pub async fn ensure_fresh(&mut self) -> Result<(), RequestError> {
        if self.needs_fetch() {
            self.refresh().await
        } else {
            Ok(())
        }
    }

    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.data
            .as_ref()?
            .items()
            .iter()
            .find(|item| item.id() == *id)
    }

    fn visible_page(&self) -> PageResult<T> {
        match &self.data {
            None => PageResult::empty(self.filters.page_size),
            Some(Fetched::Complete(items)) => {
                let matching = filter_items(items, &self.filters);
                paginate(&matching, self.filters.page, self.filters.page_size)
                    .map(T::clone)
            }
            Some(Fetched::Page(page)) => page.clone(),
        }
    }

    pub fn view(&self) -> ListView<T> {
        let page = self.visible_page();
        let rows = page
            .items
            .into_iter()
            .map(|item| Row {
                actions: row_actions(item.status()),
                pending: self.executor.is_pending(&item.id()),
                item,
            })
            .collect();
        ListView {
            rows,
            meta: page.meta,
            state: self.state.clone(),
        }
    }

    /// Run a status action on a visible row, then reconcile the list.
    ///
    /// A failed refetch after a successful mutation does not turn the
    /// outcome into an error; the load state records it instead.
    pub async fn run_action(
        &mut self,
        id: T::Id,
        action: StatusAction,
    ) -> Result<TransitionOutcome<T::Id, T::Status>, TransitionError> {
        let Some(item) = self.find(&id).cloned() else {
            let err = TransitionError::NotFound {
                entity: T::Status::ENTITY,
            };
            self.notice = Some(Notice::error(err.user_message()));
            return Err(err);
        };

        let result = self.executor.execute(&item, action).await;
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.notice = Some(Notice::error(err.user_message()));
                return Err(err);
            }
        };

        match self.reconcile {
            Reconcile::LocalPatch => {
                if let Some(data) = self.data.as_mut() {
                    patch_status(data.items_mut(), &outcome);
                    if let Fetched::Page(page) = data {
                        drop_unmatched(page, &self.filters);
                    }
                }
                self.clamp_page();
            }
            Reconcile::Refetch => {
                self.stale = true;
                if let Err(err) = self.refresh().await {
                    debug!(error = %err, "refetch after transition failed");
                }
            }
        }

        self.notice = Some(Notice::success(format!(
            "{} is now {}",
            item.display_name(),
            outcome.to
        )));
        Ok(outcome)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Record feedback for actions performed outside the executor, such as
    /// deletes and edits issued by page controllers.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Forget the loaded data after an out-of-band mutation.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }
}
