//! Exhibitions, posts and examiners.

use async_trait::async_trait;
use atelier_core::RequestError;
use atelier_core::api::{utils, v1};
use atelier_model::{
    Examiner, ExaminerId, ExaminerStatus, Exhibition, ExhibitionId,
    ExhibitionStatus, ListParams, Paginated, Post, PostId, PostStatus,
    SetStatusRequest, UpdateExhibitionRequest,
};
use std::sync::Arc;

use crate::api_client::ApiClient;

#[async_trait]
pub trait ExhibitionService: Send + Sync {
    async fn list_exhibitions(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Exhibition>, RequestError>;

    async fn get_exhibition(
        &self,
        id: ExhibitionId,
    ) -> Result<Exhibition, RequestError>;

    async fn update_exhibition(
        &self,
        id: ExhibitionId,
        request: &UpdateExhibitionRequest,
    ) -> Result<Exhibition, RequestError>;

    async fn delete_exhibition(&self, id: ExhibitionId) -> Result<(), RequestError>;

    async fn set_exhibition_status(
        &self,
        id: ExhibitionId,
        status: ExhibitionStatus,
    ) -> Result<(), RequestError>;
}

#[async_trait]
pub trait PostService: Send + Sync {
    async fn list_posts(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Post>, RequestError>;

    async fn delete_post(&self, id: PostId) -> Result<(), RequestError>;

    async fn set_post_status(
        &self,
        id: PostId,
        status: PostStatus,
    ) -> Result<(), RequestError>;
}

#[async_trait]
pub trait ExaminerService: Send + Sync {
    /// The examiner roster is small and returned whole.
    async fn list_examiners(&self) -> Result<Vec<Examiner>, RequestError>;

    async fn set_examiner_status(
        &self,
        id: ExaminerId,
        status: ExaminerStatus,
    ) -> Result<(), RequestError>;
}

#[derive(Debug, Clone)]
pub struct ContentApiAdapter {
    client: Arc<ApiClient>,
}

impl ContentApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn set_status(
        &self,
        route: &str,
        id: impl ToString,
        status: impl std::fmt::Display,
    ) -> Result<(), RequestError> {
        let path = utils::replace_param(route, "{id}", id.to_string());
        self.client
            .patch_no_content(&path, &SetStatusRequest::new(status))
            .await
    }
}

#[async_trait]
impl ExhibitionService for ContentApiAdapter {
    async fn list_exhibitions(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Exhibition>, RequestError> {
        self.client
            .get(v1::exhibitions::COLLECTION, &params.to_query_pairs())
            .await
    }

    async fn get_exhibition(
        &self,
        id: ExhibitionId,
    ) -> Result<Exhibition, RequestError> {
        let path =
            utils::replace_param(v1::exhibitions::ITEM, "{id}", id.to_string());
        self.client.get(&path, &[]).await
    }

    async fn update_exhibition(
        &self,
        id: ExhibitionId,
        request: &UpdateExhibitionRequest,
    ) -> Result<Exhibition, RequestError> {
        let path =
            utils::replace_param(v1::exhibitions::ITEM, "{id}", id.to_string());
        self.client.put(&path, request).await
    }

    async fn delete_exhibition(&self, id: ExhibitionId) -> Result<(), RequestError> {
        let path =
            utils::replace_param(v1::exhibitions::ITEM, "{id}", id.to_string());
        self.client.delete(&path).await
    }

    async fn set_exhibition_status(
        &self,
        id: ExhibitionId,
        status: ExhibitionStatus,
    ) -> Result<(), RequestError> {
        self.set_status(v1::exhibitions::STATUS, id, status).await
    }
}

#[async_trait]
impl PostService for ContentApiAdapter {
    async fn list_posts(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Post>, RequestError> {
        self.client
            .get(v1::posts::COLLECTION, &params.to_query_pairs())
            .await
    }

    async fn delete_post(&self, id: PostId) -> Result<(), RequestError> {
        let path = utils::replace_param(v1::posts::ITEM, "{id}", id.to_string());
        self.client.delete(&path).await
    }

    async fn set_post_status(
        &self,
        id: PostId,
        status: PostStatus,
    ) -> Result<(), RequestError> {
        self.set_status(v1::posts::STATUS, id, status).await
    }
}

#[async_trait]
impl ExaminerService for ContentApiAdapter {
    async fn list_examiners(&self) -> Result<Vec<Examiner>, RequestError> {
        self.client.get(v1::examiners::COLLECTION, &[]).await
    }

    async fn set_examiner_status(
        &self,
        id: ExaminerId,
        status: ExaminerStatus,
    ) -> Result<(), RequestError> {
        self.set_status(v1::examiners::STATUS, id, status).await
    }
}
