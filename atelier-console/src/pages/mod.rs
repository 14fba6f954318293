//! Page controllers, one per admin resource.
//!
//! A page wires a [`ListViewController`] to the services for its resource
//! and adds the operations that are not plain status transitions: edits,
//! deletes, uploads and rejections that carry a reason.

pub mod awards;
pub mod campaigns;
pub mod content;
pub mod contests;
pub mod submissions;
pub mod users;

pub use awards::AwardsPage;
pub use campaigns::CampaignsPage;
pub use content::{ExaminersPage, ExhibitionsPage, PostsPage};
pub use contests::{ContestsPage, RoundsPage};
pub use submissions::SubmissionsPage;
pub use users::UsersPage;

use atelier_core::{
    ListViewController, Listable, Notice, Reconcile, RequestError,
    StatusAction, StatusWorkflow, SubmitError, TransitionError,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

use crate::api_client::ApiClient;
use crate::memory::MemoryBackend;
use crate::services::{
    AuthApiAdapter, AuthService, AwardApiAdapter, AwardService,
    CampaignApiAdapter, CampaignService, ContentApiAdapter, ContestApiAdapter,
    ContestService, ExaminerService, ExhibitionService, PaintingService,
    PostService, RoundService, SubmissionApiAdapter, SubmissionService,
    UserAdminApiAdapter, UserAdminService,
};

/// Every service a page may need, plus how lists catch up after a change.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserAdminService>,
    pub contests: Arc<dyn ContestService>,
    pub rounds: Arc<dyn RoundService>,
    pub submissions: Arc<dyn SubmissionService>,
    pub paintings: Arc<dyn PaintingService>,
    pub awards: Arc<dyn AwardService>,
    pub campaigns: Arc<dyn CampaignService>,
    pub exhibitions: Arc<dyn ExhibitionService>,
    pub posts: Arc<dyn PostService>,
    pub examiners: Arc<dyn ExaminerService>,
    pub auth: Arc<dyn AuthService>,
    pub reconcile: Reconcile,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("reconcile", &self.reconcile)
            .finish_non_exhaustive()
    }
}

impl Services {
    pub fn from_client(client: Arc<ApiClient>) -> Self {
        let contests = Arc::new(ContestApiAdapter::new(Arc::clone(&client)));
        let submissions =
            Arc::new(SubmissionApiAdapter::new(Arc::clone(&client)));
        let content = Arc::new(ContentApiAdapter::new(Arc::clone(&client)));
        Self {
            users: Arc::new(UserAdminApiAdapter::new(Arc::clone(&client))),
            contests: contests.clone(),
            rounds: contests,
            submissions: submissions.clone(),
            paintings: submissions,
            awards: Arc::new(AwardApiAdapter::new(Arc::clone(&client))),
            campaigns: Arc::new(CampaignApiAdapter::new(Arc::clone(&client))),
            exhibitions: content.clone(),
            posts: content.clone(),
            examiners: content,
            auth: Arc::new(AuthApiAdapter::new(client)),
            reconcile: Reconcile::Refetch,
        }
    }

    /// Backed by an in-memory store. Rows are patched in place after a
    /// status change instead of refetching.
    pub fn in_memory(backend: MemoryBackend) -> Self {
        let backend = Arc::new(backend);
        Self {
            users: backend.clone(),
            contests: backend.clone(),
            rounds: backend.clone(),
            submissions: backend.clone(),
            paintings: backend.clone(),
            awards: backend.clone(),
            campaigns: backend.clone(),
            exhibitions: backend.clone(),
            posts: backend.clone(),
            examiners: backend.clone(),
            auth: backend,
            reconcile: Reconcile::LocalPatch,
        }
    }
}

/// Error for an action the resource's API has no endpoint for.
pub(crate) fn unsupported(entity: &str, action: StatusAction) -> RequestError {
    RequestError::new(format!("Cannot {action} a {entity} from the console"))
}

/// Refetch after an edit, create or delete and leave a success notice.
pub(crate) async fn after_mutation<T: Listable>(
    list: &mut ListViewController<T>,
    message: String,
) {
    list.invalidate();
    if let Err(err) = list.refresh().await {
        debug!(entity = T::Status::ENTITY, error = %err, "refetch after mutation failed");
    }
    info!(entity = T::Status::ENTITY, "{message}");
    list.set_notice(Notice::success(message));
}

/// Record `err` as the page notice and hand it back.
pub(crate) fn report<T: Listable>(
    list: &mut ListViewController<T>,
    err: SubmitError,
) -> SubmitError {
    list.set_notice(Notice::error(err.user_message()));
    err
}

/// The visible record `id`, provided its status still allows editing.
pub(crate) fn editable<T: Listable>(
    list: &ListViewController<T>,
    id: &T::Id,
) -> Result<T, SubmitError> {
    let item = list.find(id).cloned().ok_or(SubmitError::NotFound {
        entity: T::Status::ENTITY,
    })?;
    if !item.status().is_editable() {
        return Err(SubmitError::Locked {
            entity: T::Status::ENTITY,
            status: item.status().to_string(),
        });
    }
    Ok(item)
}

/// Delete a visible row through `delete`, honoring the workflow's
/// deletability rule.
pub(crate) async fn delete_row<T, F, Fut>(
    list: &mut ListViewController<T>,
    id: T::Id,
    delete: F,
) -> Result<(), TransitionError>
where
    T: Listable,
    F: FnOnce(T::Id) -> Fut,
    Fut: Future<Output = Result<(), RequestError>>,
{
    let entity = T::Status::ENTITY;
    let result = match list.find(&id).cloned() {
        None => Err(TransitionError::NotFound { entity }),
        Some(item) if !item.status().is_deletable() => {
            Err(TransitionError::Forbidden {
                entity,
                from: item.status().to_string(),
                operation: "delete",
            })
        }
        Some(item) => delete(id)
            .await
            .map(|()| item)
            .map_err(TransitionError::from),
    };

    match result {
        Ok(item) => {
            after_mutation(list, format!("Deleted {}", item.display_name()))
                .await;
            Ok(())
        }
        Err(err) => {
            list.set_notice(Notice::error(err.user_message()));
            Err(err)
        }
    }
}
