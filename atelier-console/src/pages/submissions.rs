use async_trait::async_trait;
use atelier_core::query::FilterState;
use atelier_core::validation::ImageUpload;
use atelier_core::{
    Fetched, ListSource, ListViewController, Notice, RequestError,
    StatusAction, SubmitError, TransitionError, TransitionOutcome,
    TransitionPort, Validate, ValidationErrors,
};
use atelier_model::{
    RejectSubmissionRequest, Submission, SubmissionId, SubmissionStatus,
    UploadPaintingRequest,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::{Services, after_mutation, report, unsupported};
use crate::services::{PaintingService, SubmissionService};

type StagedReasons = Arc<Mutex<HashMap<SubmissionId, String>>>;

struct SubmissionBackend {
    service: Arc<dyn SubmissionService>,
    reasons: StagedReasons,
}

#[async_trait]
impl ListSource<Submission> for SubmissionBackend {
    async fn fetch(
        &self,
        filters: &FilterState<SubmissionStatus>,
    ) -> Result<Fetched<Submission>, RequestError> {
        let page = self
            .service
            .list_submissions(&filters.to_list_params())
            .await?;
        Ok(Fetched::Page(page.into()))
    }
}

#[async_trait]
impl TransitionPort<Submission> for SubmissionBackend {
    async fn apply(
        &self,
        id: SubmissionId,
        action: StatusAction,
        _target: SubmissionStatus,
    ) -> Result<(), RequestError> {
        match action {
            StatusAction::Accept => self.service.accept_submission(id).await,
            StatusAction::Reject => {
                let reason = self.reasons.lock().get(&id).cloned();
                let Some(reason) = reason else {
                    return Err(RequestError::new(
                        "A reason is required to reject a submission",
                    ));
                };
                let request = RejectSubmissionRequest { reason };
                self.service.reject_submission(id, &request).await
            }
            other => Err(unsupported("submission", other)),
        }
    }
}

/// Painting review page.
///
/// Rejections need a reason the status executor has no slot for, so the
/// page stages it for the port before running the action.
pub struct SubmissionsPage {
    list: ListViewController<Submission>,
    reasons: StagedReasons,
    paintings: Arc<dyn PaintingService>,
}

impl std::fmt::Debug for SubmissionsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionsPage")
            .field("list", &self.list)
            .field("staged_reasons", &self.reasons.lock().len())
            .finish_non_exhaustive()
    }
}

impl SubmissionsPage {
    pub fn new(services: &Services, page_size: u32) -> Self {
        let reasons = StagedReasons::default();
        let backend = Arc::new(SubmissionBackend {
            service: Arc::clone(&services.submissions),
            reasons: Arc::clone(&reasons),
        });
        Self {
            list: ListViewController::new(backend.clone(), backend, page_size)
                .with_reconcile(services.reconcile),
            reasons,
            paintings: Arc::clone(&services.paintings),
        }
    }

    pub fn list(&self) -> &ListViewController<Submission> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListViewController<Submission> {
        &mut self.list
    }

    pub async fn accept(
        &mut self,
        id: SubmissionId,
    ) -> Result<TransitionOutcome<SubmissionId, SubmissionStatus>, TransitionError>
    {
        self.list.run_action(id, StatusAction::Accept).await
    }

    /// Reject with a reason of 5 to 500 characters. An invalid reason is
    /// refused before anything is sent.
    pub async fn reject(
        &mut self,
        id: SubmissionId,
        reason: &str,
    ) -> Result<TransitionOutcome<SubmissionId, SubmissionStatus>, TransitionError>
    {
        let request = RejectSubmissionRequest {
            reason: reason.trim().to_string(),
        };
        if let Err(errors) = request.validate() {
            let err = TransitionError::Invalid(errors);
            self.list.set_notice(Notice::error(err.user_message()));
            return Err(err);
        }

        self.reasons.lock().insert(id, request.reason);
        let result = self.list.run_action(id, StatusAction::Reject).await;
        self.reasons.lock().remove(&id);
        result
    }

    /// Upload a painting on behalf of a competitor. `round2` routes to the
    /// second-round endpoint, which needs a round id.
    pub async fn upload(
        &mut self,
        request: UploadPaintingRequest,
        image: ImageUpload,
        round2: bool,
    ) -> Result<Submission, SubmitError> {
        match self.send_upload(&request, image, round2).await {
            Ok(submission) => {
                after_mutation(
                    &mut self.list,
                    format!("Uploaded {}", submission.title),
                )
                .await;
                Ok(submission)
            }
            Err(err) => Err(report(&mut self.list, err)),
        }
    }

    async fn send_upload(
        &self,
        request: &UploadPaintingRequest,
        image: ImageUpload,
        round2: bool,
    ) -> Result<Submission, SubmitError> {
        let mut errors = ValidationErrors::new();
        if let Err(invalid) = request.validate() {
            errors.merge(invalid);
        }
        if let Err(invalid) = image.validate() {
            errors.merge(invalid);
        }
        if round2 && request.round_id.is_none() {
            errors.add("roundId", "is required for round 2 uploads");
        }
        errors.into_result()?;

        let submission = if round2 {
            self.paintings.upload_round2_painting(request, image).await?
        } else {
            self.paintings.upload_painting(request, image).await?
        };
        Ok(submission)
    }
}
