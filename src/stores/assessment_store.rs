use std::sync::Arc;

use tracing::{debug, info};

use super::{remove_by_id, upsert, StateCell, StoreResult};
use crate::dto::assessment_dto::{AssessmentForm, NewAssessment};
use crate::error::Error;
use crate::gateway::AssessmentGateway;
use crate::models::assessment::Assessment;
use crate::models::{AssessmentId, CandidateId};
use crate::utils::validation::validate;

#[derive(Clone)]
pub struct AssessmentStore {
    gateway: Arc<dyn AssessmentGateway>,
    state: Arc<StateCell<Assessment>>,
}

impl AssessmentStore {
    pub fn new(gateway: Arc<dyn AssessmentGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(StateCell::new()),
        }
    }

    pub fn state(&self) -> &StateCell<Assessment> {
        &self.state
    }

    pub async fn create_from_form(
        &self,
        candidate_id: &CandidateId,
        form: AssessmentForm,
    ) -> StoreResult<Assessment> {
        self.create_from_form_confirmed(candidate_id, form)
            .await
            .map(|(assessment, _)| assessment)
    }

    pub async fn create(&self, request: NewAssessment) -> StoreResult<Assessment> {
        self.create_confirmed(request)
            .await
            .map(|(assessment, _)| assessment)
    }

    /// Like [`create_from_form`](Self::create_from_form), also returning the success text.
    pub(crate) async fn create_from_form_confirmed(
        &self,
        candidate_id: &CandidateId,
        form: AssessmentForm,
    ) -> StoreResult<(Assessment, String)> {
        if let Err(errors) = validate(&form) {
            return Err(self.state.rejected("create assessment", Error::from(errors)));
        }
        self.create_confirmed(NewAssessment::from_form(candidate_id.clone(), form))
            .await
    }

    async fn create_confirmed(&self, request: NewAssessment) -> StoreResult<(Assessment, String)> {
        self.state.begin();
        match self.gateway.create_assessment(request).await {
            Ok(confirmed) => {
                let assessment = confirmed.value;
                info!(assessment_id = %assessment.id, "Assessment created");
                let message = self.state.confirmed(
                    confirmed.message,
                    "Assessment uploaded successfully",
                    |s| upsert(&mut s.items, assessment.clone()),
                );
                Ok((assessment, message))
            }
            Err(e) => Err(self.state.rejected("create assessment", e)),
        }
    }

    pub async fn list_for_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> StoreResult<Vec<Assessment>> {
        self.state.begin();
        match self.gateway.list_candidate_assessments(candidate_id).await {
            Ok(assessments) => {
                debug!(candidate_id = %candidate_id, count = assessments.len(), "Assessments loaded");
                self.state.fetched(|s| s.items = assessments.clone());
                Ok(assessments)
            }
            Err(e) => Err(self.state.rejected("list assessments", e)),
        }
    }

    /// Removes the id the server reports as deleted.
    pub async fn delete(&self, id: &AssessmentId) -> StoreResult<String> {
        self.state.begin();
        match self.gateway.delete_assessment(id).await {
            Ok(confirmed) => {
                let deleted = confirmed.value;
                info!(assessment_id = %deleted, "Assessment deleted");
                Ok(self.state.confirmed(
                    confirmed.message,
                    "Assessment deleted successfully",
                    |s| remove_by_id(&mut s.items, &deleted),
                ))
            }
            Err(e) => Err(self.state.rejected("delete assessment", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{Confirmed, MockAssessmentGateway};
    use crate::models::assessment::{AssessmentType, Evaluation};
    use crate::stores::Notice;
    use crate::utils::files::{FileUpload, MIME_PDF};
    use reqwest::StatusCode;

    fn assessment(id: &str) -> Assessment {
        Assessment {
            id: AssessmentId::new(id),
            candidate: None,
            assessment_type: AssessmentType::Coding,
            evaluation: Evaluation::Good,
            remarks: None,
            test_file_url: None,
            is_completed: false,
            created_at: None,
        }
    }

    fn form() -> AssessmentForm {
        AssessmentForm {
            assessment_type: AssessmentType::Technical,
            evaluation: Evaluation::Excellent,
            remarks: Some("Take-home task".into()),
            test_file: FileUpload::new("task.pdf", MIME_PDF, b"%PDF-1.4".to_vec()),
        }
    }

    #[tokio::test]
    async fn create_from_form_sends_candidate_and_file() {
        let mut gateway = MockAssessmentGateway::new();
        gateway
            .expect_create_assessment()
            .withf(|req| {
                req.candidate_id.as_str() == "c1"
                    && req.remarks == "Take-home task"
                    && req.test_file.is_some()
            })
            .returning(|_| Ok(Confirmed::new(None, assessment("a1"))));

        let store = AssessmentStore::new(Arc::new(gateway));
        let created = store
            .create_from_form(&CandidateId::new("c1"), form())
            .await
            .unwrap();
        assert_eq!(created.id, AssessmentId::new("a1"));
        assert_eq!(
            store.state().snapshot().notice,
            Notice::Success("Assessment uploaded successfully".into())
        );
    }

    #[tokio::test]
    async fn unsupported_file_type_is_refused() {
        let store = AssessmentStore::new(Arc::new(MockAssessmentGateway::new()));
        let mut bad = form();
        bad.test_file = FileUpload::new("task.png", "image/png", vec![0u8; 4]);
        assert!(store
            .create_from_form(&CandidateId::new("c1"), bad)
            .await
            .is_err());
        assert!(store.state().snapshot().items.is_empty());
    }

    #[tokio::test]
    async fn delete_filters_reported_id_in_any_order() {
        let orders: [[&str; 3]; 3] = [["a", "b", "c"], ["c", "a", "b"], ["b", "c", "a"]];
        for order in orders {
            let mut gateway = MockAssessmentGateway::new();
            gateway.expect_list_candidate_assessments().returning(move |_| {
                Ok(order.iter().map(|id| assessment(id)).collect())
            });
            gateway
                .expect_delete_assessment()
                .returning(|id| Ok(Confirmed::new(None, id.clone())));

            let store = AssessmentStore::new(Arc::new(gateway));
            store.list_for_candidate(&CandidateId::new("c1")).await.unwrap();
            store.delete(&AssessmentId::new("b")).await.unwrap();

            let remaining: Vec<_> = store
                .state()
                .snapshot()
                .items
                .into_iter()
                .map(|a| a.id.to_string())
                .collect();
            let expected: Vec<_> = order
                .iter()
                .filter(|id| **id != "b")
                .map(|id| id.to_string())
                .collect();
            assert_eq!(remaining, expected);
        }
    }

    #[tokio::test]
    async fn failed_list_keeps_previous_items() {
        let mut gateway = MockAssessmentGateway::new();
        let mut seq = mockall::Sequence::new();
        gateway
            .expect_list_candidate_assessments()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![assessment("a")]));
        gateway
            .expect_list_candidate_assessments()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(Error::Api {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    message: None,
                })
            });

        let store = AssessmentStore::new(Arc::new(gateway));
        let id = CandidateId::new("c1");
        store.list_for_candidate(&id).await.unwrap();
        store.list_for_candidate(&id).await.unwrap_err();

        let state = store.state().snapshot();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.notice.error(), Some("An error occurred"));
    }
}
