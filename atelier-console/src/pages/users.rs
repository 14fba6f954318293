use async_trait::async_trait;
use atelier_core::{
    Fetched, ListSource, ListViewController, RequestError, StatusAction,
    TransitionError, TransitionOutcome, TransitionPort,
};
use atelier_core::query::FilterState;
use atelier_model::{User, UserId, UserStatus};
use std::sync::Arc;

use super::{Services, unsupported};
use crate::services::UserAdminService;

struct UserBackend {
    service: Arc<dyn UserAdminService>,
}

#[async_trait]
impl ListSource<User> for UserBackend {
    async fn fetch(
        &self,
        filters: &FilterState<UserStatus>,
    ) -> Result<Fetched<User>, RequestError> {
        let page = self.service.list_users(&filters.to_list_params()).await?;
        Ok(Fetched::Page(page.into()))
    }
}

#[async_trait]
impl TransitionPort<User> for UserBackend {
    async fn apply(
        &self,
        id: UserId,
        action: StatusAction,
        _target: UserStatus,
    ) -> Result<(), RequestError> {
        match action {
            StatusAction::Suspend => self.service.ban_user(id).await,
            StatusAction::Activate => self.service.activate_user(id).await,
            other => Err(unsupported("user", other)),
        }
    }
}

/// Accounts page.
#[derive(Debug)]
pub struct UsersPage {
    list: ListViewController<User>,
}

impl UsersPage {
    pub fn new(services: &Services, page_size: u32) -> Self {
        let backend = Arc::new(UserBackend {
            service: Arc::clone(&services.users),
        });
        Self {
            list: ListViewController::new(backend.clone(), backend, page_size)
                .with_reconcile(services.reconcile),
        }
    }

    pub fn list(&self) -> &ListViewController<User> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListViewController<User> {
        &mut self.list
    }

    /// Suspend an active account or reactivate a suspended one.
    pub async fn toggle(
        &mut self,
        id: UserId,
    ) -> Result<TransitionOutcome<UserId, UserStatus>, TransitionError> {
        let action = match self.list.find(&id).map(|user| user.status) {
            Some(UserStatus::Active) => StatusAction::Suspend,
            _ => StatusAction::Activate,
        };
        self.list.run_action(id, action).await
    }
}
