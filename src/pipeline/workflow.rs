//! Multi-step pipeline operations run as explicit sagas.
//!
//! A workflow loads a fresh [`PipelineContext`], asks the state machine for a
//! plan, then runs each remote step in order. Steps are not compensated on
//! failure: interviews are append-only and there is no cancel endpoint, so a
//! failed step is reported together with the steps that already went through,
//! and the stores are refreshed on a best-effort basis.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, instrument, warn};

use super::actions::{self, Action, PipelineContext, Step};
use crate::dto::assessment_dto::AssessmentForm;
use crate::dto::interview_dto::InterviewForm;
use crate::error::Error;
use crate::models::candidate::PipelineStatus;
use crate::models::interview::Stage;
use crate::models::CandidateId;
use crate::stores::{AssessmentStore, CandidateStore, InterviewStore, StoreResult};
use crate::utils::validation::validate;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowReport {
    pub action: Action,
    pub completed: Vec<Step>,
    /// Success text of the main mutation.
    pub message: Option<String>,
    pub status: PipelineStatus,
    pub actions: Vec<Action>,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Nothing was sent to the backend.
    #[error("{0}")]
    Refused(Error),

    #[error("{action} stopped at '{failed}': {message}")]
    Failed {
        action: Action,
        completed: Vec<Step>,
        failed: Step,
        message: String,
    },
}

impl WorkflowError {
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::Refused(err) => err.user_message(),
            WorkflowError::Failed { message, .. } => message.clone(),
        }
    }

    /// Steps that reached the backend before the failure.
    pub fn completed(&self) -> &[Step] {
        match self {
            WorkflowError::Refused(_) => &[],
            WorkflowError::Failed { completed, .. } => completed,
        }
    }
}

pub type WorkflowResult = std::result::Result<WorkflowReport, WorkflowError>;

enum Payload {
    None,
    Interview(InterviewForm),
    Assessment(AssessmentForm),
}

#[derive(Clone)]
pub struct PipelineWorkflow {
    candidates: CandidateStore,
    interviews: InterviewStore,
    assessments: AssessmentStore,
    in_flight: Arc<Mutex<HashSet<CandidateId>>>,
}

struct InFlightGuard {
    set: Arc<Mutex<HashSet<CandidateId>>>,
    id: CandidateId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

impl PipelineWorkflow {
    pub fn new(
        candidates: CandidateStore,
        interviews: InterviewStore,
        assessments: AssessmentStore,
    ) -> Self {
        Self {
            candidates,
            interviews,
            assessments,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn candidates(&self) -> &CandidateStore {
        &self.candidates
    }

    pub fn interviews(&self) -> &InterviewStore {
        &self.interviews
    }

    pub fn assessments(&self) -> &AssessmentStore {
        &self.assessments
    }

    pub fn is_in_flight(&self, candidate_id: &CandidateId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(candidate_id)
    }

    /// Loads the candidate and its child lists into the stores.
    pub async fn snapshot(&self, candidate_id: &CandidateId) -> StoreResult<PipelineContext> {
        let candidate = self.candidates.get_by_id(candidate_id).await?;
        let interviews = self.interviews.list_for_candidate(candidate_id).await?;
        let assessments = self.assessments.list_for_candidate(candidate_id).await?;
        Ok(PipelineContext::from_candidate(&candidate)
            .with_interviews(&interviews)
            .with_assessments(&assessments))
    }

    pub async fn available_actions(&self, candidate_id: &CandidateId) -> StoreResult<Vec<Action>> {
        let ctx = self.snapshot(candidate_id).await?;
        Ok(actions::available_actions(&ctx))
    }

    /// Schedules a round; a first round also moves the candidate to
    /// `First Interview Complete`.
    #[instrument(skip(self, form), fields(candidate_id = %candidate_id, stage = %stage))]
    pub async fn schedule_interview(
        &self,
        candidate_id: &CandidateId,
        form: InterviewForm,
        stage: Stage,
    ) -> WorkflowResult {
        validate(&form).map_err(|e| WorkflowError::Refused(e.into()))?;
        self.run(
            candidate_id,
            Action::ScheduleInterview(stage),
            Payload::Interview(form),
        )
        .await
    }

    #[instrument(skip(self), fields(candidate_id = %candidate_id, stage = %stage))]
    pub async fn complete_interview(&self, candidate_id: &CandidateId, stage: Stage) -> WorkflowResult {
        self.run(candidate_id, Action::CompleteInterview(stage), Payload::None)
            .await
    }

    #[instrument(skip(self, form), fields(candidate_id = %candidate_id))]
    pub async fn send_assessment(
        &self,
        candidate_id: &CandidateId,
        form: AssessmentForm,
    ) -> WorkflowResult {
        validate(&form).map_err(|e| WorkflowError::Refused(e.into()))?;
        self.run(candidate_id, Action::SendAssessment, Payload::Assessment(form))
            .await
    }

    #[instrument(skip(self), fields(candidate_id = %candidate_id))]
    pub async fn hire(&self, candidate_id: &CandidateId) -> WorkflowResult {
        self.run(candidate_id, Action::Hire, Payload::None).await
    }

    #[instrument(skip(self), fields(candidate_id = %candidate_id))]
    pub async fn reject(&self, candidate_id: &CandidateId) -> WorkflowResult {
        self.run(candidate_id, Action::Reject, Payload::None).await
    }

    fn claim(&self, candidate_id: &CandidateId, action: Action) -> Result<InFlightGuard, WorkflowError> {
        let mut set = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !set.insert(candidate_id.clone()) {
            warn!(candidate_id = %candidate_id, %action, "Workflow already running for candidate");
            return Err(WorkflowError::Refused(Error::InFlight(
                action.label().to_lowercase(),
            )));
        }
        Ok(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            id: candidate_id.clone(),
        })
    }

    async fn run(&self, candidate_id: &CandidateId, action: Action, payload: Payload) -> WorkflowResult {
        let _guard = self.claim(candidate_id, action)?;

        let ctx = self
            .snapshot(candidate_id)
            .await
            .map_err(|rejection| WorkflowError::Failed {
                action,
                completed: Vec::new(),
                failed: Step::Load,
                message: rejection.message,
            })?;

        let steps = actions::plan(&ctx, action).map_err(|e| {
            warn!(%action, status = %ctx.status, "Pipeline action refused");
            WorkflowError::Refused(e)
        })?;

        let mut payload = Some(payload);
        let mut completed = vec![Step::Load];
        let mut message = None;
        let mut current = ctx;

        for step in steps {
            let outcome = match step {
                Step::Load | Step::Refresh => self.snapshot(candidate_id).await.map(|ctx| {
                    current = ctx;
                    None
                }),
                Step::CreateInterview(stage) => match payload.take() {
                    Some(Payload::Interview(form)) => self
                        .interviews
                        .schedule_confirmed(candidate_id, form, stage)
                        .await
                        .map(|(_, text)| Some(text)),
                    _ => Err(Error::NotFound("interview form".into()).into()),
                },
                Step::CreateAssessment => match payload.take() {
                    Some(Payload::Assessment(form)) => self
                        .assessments
                        .create_from_form_confirmed(candidate_id, form)
                        .await
                        .map(|(_, text)| Some(text)),
                    _ => Err(Error::NotFound("assessment form".into()).into()),
                },
                Step::UpdateStatus(status) => self
                    .candidates
                    .set_status(candidate_id, status)
                    .await
                    .map(Some),
            };

            match outcome {
                Ok(text) => {
                    if message.is_none() {
                        message = text;
                    }
                    completed.push(step);
                }
                Err(rejection) => {
                    warn!(%action, failed = %step, error = %rejection, "Workflow step failed");
                    if completed.len() > 1 && step != Step::Refresh {
                        // Best effort so the stores reflect whatever did go through.
                        if let Err(refresh) = self.snapshot(candidate_id).await {
                            warn!(%action, error = %refresh, "Refresh after failed step also failed");
                        }
                    }
                    return Err(WorkflowError::Failed {
                        action,
                        completed,
                        failed: step,
                        message: rejection.message,
                    });
                }
            }
        }

        info!(%action, status = %current.status, "Workflow finished");
        Ok(WorkflowReport {
            action,
            completed,
            message,
            status: current.status,
            actions: actions::available_actions(&current),
        })
    }
}
