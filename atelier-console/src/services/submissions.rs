use async_trait::async_trait;
use atelier_core::RequestError;
use atelier_core::api::{utils, v1};
use atelier_core::validation::ImageUpload;
use atelier_model::{
    ListParams, Paginated, RejectSubmissionRequest, Submission, SubmissionId,
    UploadPaintingRequest,
};
use reqwest::multipart::{Form, Part};
use std::sync::Arc;

use crate::api_client::ApiClient;

#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn list_submissions(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Submission>, RequestError>;

    async fn get_submission(
        &self,
        id: SubmissionId,
    ) -> Result<Submission, RequestError>;

    async fn accept_submission(&self, id: SubmissionId) -> Result<(), RequestError>;

    async fn reject_submission(
        &self,
        id: SubmissionId,
        request: &RejectSubmissionRequest,
    ) -> Result<(), RequestError>;
}

/// Staff-side painting uploads on behalf of a competitor.
#[async_trait]
pub trait PaintingService: Send + Sync {
    async fn upload_painting(
        &self,
        request: &UploadPaintingRequest,
        image: ImageUpload,
    ) -> Result<Submission, RequestError>;

    /// Second-round uploads go to their own endpoint and require a round.
    async fn upload_round2_painting(
        &self,
        request: &UploadPaintingRequest,
        image: ImageUpload,
    ) -> Result<Submission, RequestError>;
}

#[derive(Debug, Clone)]
pub struct SubmissionApiAdapter {
    client: Arc<ApiClient>,
}

impl SubmissionApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn upload(
        &self,
        path: &str,
        request: &UploadPaintingRequest,
        image: ImageUpload,
    ) -> Result<Submission, RequestError> {
        let form = painting_form(request, image)?;
        self.client.post_multipart(path, form).await
    }
}

fn painting_form(
    request: &UploadPaintingRequest,
    image: ImageUpload,
) -> Result<Form, RequestError> {
    let part = Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.content_type)
        .map_err(|err| RequestError::new(format!("Invalid image type: {err}")))?;

    let mut form = Form::new()
        .text("contestId", request.contest_id.to_string())
        .text("competitorId", request.competitor_id.to_string())
        .text("title", request.title.clone())
        .text("description", request.description.clone());
    if let Some(round_id) = request.round_id {
        form = form.text("roundId", round_id.to_string());
    }
    Ok(form.part("image", part))
}

#[async_trait]
impl SubmissionService for SubmissionApiAdapter {
    async fn list_submissions(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<Submission>, RequestError> {
        self.client
            .get(v1::submissions::COLLECTION, &params.to_query_pairs())
            .await
    }

    async fn get_submission(
        &self,
        id: SubmissionId,
    ) -> Result<Submission, RequestError> {
        let path =
            utils::replace_param(v1::submissions::ITEM, "{id}", id.to_string());
        self.client.get(&path, &[]).await
    }

    async fn accept_submission(&self, id: SubmissionId) -> Result<(), RequestError> {
        let path =
            utils::replace_param(v1::submissions::ACCEPT, "{id}", id.to_string());
        self.client.post_no_content(&path, &serde_json::json!({})).await
    }

    async fn reject_submission(
        &self,
        id: SubmissionId,
        request: &RejectSubmissionRequest,
    ) -> Result<(), RequestError> {
        let path =
            utils::replace_param(v1::submissions::REJECT, "{id}", id.to_string());
        self.client.post_no_content(&path, request).await
    }
}

#[async_trait]
impl PaintingService for SubmissionApiAdapter {
    async fn upload_painting(
        &self,
        request: &UploadPaintingRequest,
        image: ImageUpload,
    ) -> Result<Submission, RequestError> {
        self.upload(v1::paintings::UPLOAD, request, image).await
    }

    async fn upload_round2_painting(
        &self,
        request: &UploadPaintingRequest,
        image: ImageUpload,
    ) -> Result<Submission, RequestError> {
        self.upload(v1::paintings::UPLOAD_ROUND2, request, image).await
    }
}
