use async_trait::async_trait;
use atelier_core::{
    RequestError, StatusAction, TransitionError, TransitionExecutor,
    TransitionPort,
};
use atelier_model::{Examiner, ExaminerId, ExaminerStatus};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Notify;

/// Blocks every mutation until released, so a second attempt can be made
/// while the first is still pending.
#[derive(Default)]
struct GatedPort {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl TransitionPort<Examiner> for GatedPort {
    async fn apply(
        &self,
        _id: ExaminerId,
        _action: StatusAction,
        _target: ExaminerStatus,
    ) -> Result<(), RequestError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

fn examiner() -> Examiner {
    Examiner {
        id: ExaminerId::new(),
        full_name: "Hoa Pham".into(),
        email: "hoa@example.com".into(),
        specializations: vec!["Ink".into()],
        status: ExaminerStatus::Active,
        assigned_count: 4,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn second_action_while_pending_is_refused() {
    let port = Arc::new(GatedPort::default());
    let executor = TransitionExecutor::<Examiner>::new(port.clone());
    let item = examiner();

    let task = {
        let executor = executor.clone();
        let item = item.clone();
        tokio::spawn(async move {
            executor.execute(&item, StatusAction::Deactivate).await
        })
    };

    port.entered.notified().await;
    assert!(executor.is_pending(&item.id));
    let err = executor
        .execute(&item, StatusAction::Deactivate)
        .await
        .unwrap_err();
    assert!(matches!(err, TransitionError::InFlight { .. }));

    port.release.notify_one();
    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.to, ExaminerStatus::Inactive);
    assert!(!executor.is_pending(&item.id));
}

#[tokio::test]
async fn other_ids_are_not_blocked() {
    let port = Arc::new(GatedPort::default());
    let executor = TransitionExecutor::<Examiner>::new(port.clone());
    let first = examiner();
    let second = examiner();

    let task = {
        let executor = executor.clone();
        let first = first.clone();
        tokio::spawn(async move {
            executor.execute(&first, StatusAction::Deactivate).await
        })
    };
    port.entered.notified().await;
    assert!(!executor.is_pending(&second.id));

    port.release.notify_one();
    task.await.unwrap().unwrap();
}
