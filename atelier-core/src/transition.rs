//! Status transition executor.
//!
//! Checks an action against the entity's workflow, guards against double
//! submission per id and forwards the mutation to a [`TransitionPort`].
//! Illegal or duplicate attempts never reach the port.

use crate::error::{RequestError, TransitionError};
use crate::query::Listable;
use crate::workflow::{StatusAction, StatusWorkflow};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Remote side of a status change.
#[async_trait]
pub trait TransitionPort<T: Listable>: Send + Sync {
    /// Ask the server to move `id` to `target` via `action`.
    async fn apply(
        &self,
        id: T::Id,
        action: StatusAction,
        target: T::Status,
    ) -> Result<(), RequestError>;
}

/// How a list view catches up after a successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconcile {
    /// Re-run the list query.
    #[default]
    Refetch,
    /// Patch the status of the one affected row in place.
    LocalPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome<I, S> {
    pub id: I,
    pub from: S,
    pub to: S,
    pub action: StatusAction,
}

/// Removes the id from the in-flight set when dropped, so the marker is
/// released on success, failure and cancellation alike.
struct InFlightGuard<I: Eq + Hash> {
    set: Arc<Mutex<HashSet<I>>>,
    id: I,
}

impl<I: Eq + Hash + Copy> InFlightGuard<I> {
    fn acquire(set: &Arc<Mutex<HashSet<I>>>, id: I) -> Option<Self> {
        if !set.lock().insert(id) {
            return None;
        }
        Some(Self {
            set: Arc::clone(set),
            id,
        })
    }
}

impl<I: Eq + Hash> Drop for InFlightGuard<I> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.id);
    }
}

pub struct TransitionExecutor<T: Listable> {
    port: Arc<dyn TransitionPort<T>>,
    in_flight: Arc<Mutex<HashSet<T::Id>>>,
}

impl<T: Listable> Clone for TransitionExecutor<T> {
    fn clone(&self) -> Self {
        Self {
            port: Arc::clone(&self.port),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<T: Listable> fmt::Debug for TransitionExecutor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionExecutor")
            .field("entity", &T::Status::ENTITY)
            .field("in_flight", &self.in_flight.lock().len())
            .finish()
    }
}

impl<T: Listable> TransitionExecutor<T> {
    pub fn new(port: Arc<dyn TransitionPort<T>>) -> Self {
        Self {
            port,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Whether a mutation for `id` is currently awaiting the server.
    pub fn is_pending(&self, id: &T::Id) -> bool {
        self.in_flight.lock().contains(id)
    }

    pub async fn execute(
        &self,
        item: &T,
        action: StatusAction,
    ) -> Result<TransitionOutcome<T::Id, T::Status>, TransitionError> {
        let entity = T::Status::ENTITY;
        let from = item.status();
        let Some(to) = from.apply(action) else {
            debug!(%entity, status = %from, %action, "rejected illegal transition");
            return Err(TransitionError::Illegal {
                entity,
                from: from.to_string(),
                action,
            });
        };

        let id = item.id();
        let _guard = InFlightGuard::acquire(&self.in_flight, id)
            .ok_or(TransitionError::InFlight { entity })?;

        debug!(%entity, %id, %from, %to, "sending status change");
        match self.port.apply(id, action, to).await {
            Ok(()) => {
                info!(%entity, %id, %from, %to, "status changed");
                Ok(TransitionOutcome {
                    id,
                    from,
                    to,
                    action,
                })
            }
            Err(err) => {
                warn!(%entity, %id, %action, error = %err, "status change failed");
                Err(err.into())
            }
        }
    }
}

/// Apply `outcome` to the matching item only. Returns whether a row changed.
pub fn patch_status<T: Listable>(
    items: &mut [T],
    outcome: &TransitionOutcome<T::Id, T::Status>,
) -> bool {
    match items.iter_mut().find(|item| item.id() == outcome.id) {
        Some(item) => {
            item.set_status(outcome.to);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_model::{Post, PostId, PostStatus};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingPort {
        calls: AtomicUsize,
        fail_with: Option<RequestError>,
    }

    #[async_trait]
    impl TransitionPort<Post> for CountingPort {
        async fn apply(
            &self,
            _id: PostId,
            _action: StatusAction,
            _target: PostStatus,
        ) -> Result<(), RequestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    fn post(status: PostStatus) -> Post {
        Post {
            id: PostId::new(),
            title: "Spring salon".into(),
            excerpt: String::new(),
            author_name: "Staff".into(),
            category: "news".into(),
            status,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn illegal_action_never_reaches_the_port() {
        let port = Arc::new(CountingPort::default());
        let executor = TransitionExecutor::<Post>::new(port.clone());
        let err = executor
            .execute(&post(PostStatus::Draft), StatusAction::Archive)
            .await
            .unwrap_err();
        assert!(matches!(err, TransitionError::Illegal { .. }));
        assert_eq!(port.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_releases_the_in_flight_marker() {
        let port = Arc::new(CountingPort {
            fail_with: Some(RequestError::with_status(409, "")),
            ..Default::default()
        });
        let executor = TransitionExecutor::<Post>::new(port);
        let item = post(PostStatus::Draft);
        let err = executor
            .execute(&item, StatusAction::Publish)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), crate::error::GENERIC_FAILURE);
        assert!(!executor.is_pending(&item.id));
    }

    #[test]
    fn patch_touches_only_the_matching_row() {
        let mut items = vec![post(PostStatus::Draft), post(PostStatus::Draft)];
        let outcome = TransitionOutcome {
            id: items[1].id,
            from: PostStatus::Draft,
            to: PostStatus::Published,
            action: StatusAction::Publish,
        };
        assert!(patch_status(&mut items, &outcome));
        assert_eq!(items[0].status, PostStatus::Draft);
        assert_eq!(items[1].status, PostStatus::Published);
    }
}
