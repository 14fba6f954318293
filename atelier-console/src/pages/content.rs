//! Exhibitions, posts and examiners.

use async_trait::async_trait;
use atelier_core::query::FilterState;
use atelier_core::{
    Fetched, ListSource, ListViewController, RequestError, StatusAction,
    SubmitError, TransitionError, TransitionPort, Validate,
};
use atelier_model::{
    Examiner, ExaminerId, ExaminerStatus, Exhibition, ExhibitionId,
    ExhibitionStatus, Post, PostId, PostStatus, UpdateExhibitionRequest,
};
use std::sync::Arc;

use super::{Services, after_mutation, delete_row, editable, report};
use crate::services::{ExaminerService, ExhibitionService, PostService};

struct ExhibitionBackend {
    service: Arc<dyn ExhibitionService>,
}

#[async_trait]
impl ListSource<Exhibition> for ExhibitionBackend {
    async fn fetch(
        &self,
        filters: &FilterState<ExhibitionStatus>,
    ) -> Result<Fetched<Exhibition>, RequestError> {
        let page = self
            .service
            .list_exhibitions(&filters.to_list_params())
            .await?;
        Ok(Fetched::Page(page.into()))
    }
}

#[async_trait]
impl TransitionPort<Exhibition> for ExhibitionBackend {
    async fn apply(
        &self,
        id: ExhibitionId,
        _action: StatusAction,
        target: ExhibitionStatus,
    ) -> Result<(), RequestError> {
        self.service.set_exhibition_status(id, target).await
    }
}

pub struct ExhibitionsPage {
    list: ListViewController<Exhibition>,
    service: Arc<dyn ExhibitionService>,
}

impl std::fmt::Debug for ExhibitionsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExhibitionsPage")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

impl ExhibitionsPage {
    pub fn new(services: &Services, page_size: u32) -> Self {
        let backend = Arc::new(ExhibitionBackend {
            service: Arc::clone(&services.exhibitions),
        });
        Self {
            list: ListViewController::new(backend.clone(), backend, page_size)
                .with_reconcile(services.reconcile),
            service: Arc::clone(&services.exhibitions),
        }
    }

    pub fn list(&self) -> &ListViewController<Exhibition> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListViewController<Exhibition> {
        &mut self.list
    }

    pub async fn edit(
        &mut self,
        id: ExhibitionId,
        request: UpdateExhibitionRequest,
    ) -> Result<Exhibition, SubmitError> {
        let result = match editable(&self.list, &id) {
            Ok(_) => match request.validate() {
                Ok(()) => self
                    .service
                    .update_exhibition(id, &request)
                    .await
                    .map_err(SubmitError::from),
                Err(errors) => Err(errors.into()),
            },
            Err(err) => Err(err),
        };
        match result {
            Ok(exhibition) => {
                after_mutation(
                    &mut self.list,
                    format!("Saved {}", exhibition.title),
                )
                .await;
                Ok(exhibition)
            }
            Err(err) => Err(report(&mut self.list, err)),
        }
    }

    pub async fn delete(&mut self, id: ExhibitionId) -> Result<(), TransitionError> {
        let service = Arc::clone(&self.service);
        delete_row(&mut self.list, id, |id| async move {
            service.delete_exhibition(id).await
        })
        .await
    }
}

struct PostBackend {
    service: Arc<dyn PostService>,
}

#[async_trait]
impl ListSource<Post> for PostBackend {
    async fn fetch(
        &self,
        filters: &FilterState<PostStatus>,
    ) -> Result<Fetched<Post>, RequestError> {
        let page = self.service.list_posts(&filters.to_list_params()).await?;
        Ok(Fetched::Page(page.into()))
    }
}

#[async_trait]
impl TransitionPort<Post> for PostBackend {
    async fn apply(
        &self,
        id: PostId,
        _action: StatusAction,
        target: PostStatus,
    ) -> Result<(), RequestError> {
        self.service.set_post_status(id, target).await
    }
}

/// Blog posts page. Posts are moderated, never edited, from the console.
pub struct PostsPage {
    list: ListViewController<Post>,
    service: Arc<dyn PostService>,
}

impl std::fmt::Debug for PostsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostsPage")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

impl PostsPage {
    pub fn new(services: &Services, page_size: u32) -> Self {
        let backend = Arc::new(PostBackend {
            service: Arc::clone(&services.posts),
        });
        Self {
            list: ListViewController::new(backend.clone(), backend, page_size)
                .with_reconcile(services.reconcile),
            service: Arc::clone(&services.posts),
        }
    }

    pub fn list(&self) -> &ListViewController<Post> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListViewController<Post> {
        &mut self.list
    }

    pub async fn delete(&mut self, id: PostId) -> Result<(), TransitionError> {
        let service = Arc::clone(&self.service);
        delete_row(&mut self.list, id, |id| async move {
            service.delete_post(id).await
        })
        .await
    }
}

/// The examiners endpoint is not paginated; filtering happens locally.
struct ExaminerBackend {
    service: Arc<dyn ExaminerService>,
}

#[async_trait]
impl ListSource<Examiner> for ExaminerBackend {
    async fn fetch(
        &self,
        _filters: &FilterState<ExaminerStatus>,
    ) -> Result<Fetched<Examiner>, RequestError> {
        Ok(Fetched::Complete(self.service.list_examiners().await?))
    }
}

#[async_trait]
impl TransitionPort<Examiner> for ExaminerBackend {
    async fn apply(
        &self,
        id: ExaminerId,
        _action: StatusAction,
        target: ExaminerStatus,
    ) -> Result<(), RequestError> {
        self.service.set_examiner_status(id, target).await
    }
}

#[derive(Debug)]
pub struct ExaminersPage {
    list: ListViewController<Examiner>,
}

impl ExaminersPage {
    pub fn new(services: &Services, page_size: u32) -> Self {
        let backend = Arc::new(ExaminerBackend {
            service: Arc::clone(&services.examiners),
        });
        Self {
            list: ListViewController::new(backend.clone(), backend, page_size)
                .with_reconcile(services.reconcile),
        }
    }

    pub fn list(&self) -> &ListViewController<Examiner> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListViewController<Examiner> {
        &mut self.list
    }
}
