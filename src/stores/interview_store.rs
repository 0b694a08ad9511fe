use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{upsert, StateCell, StoreResult};
use crate::dto::interview_dto::{InterviewForm, ScheduleInterview};
use crate::error::Error;
use crate::gateway::InterviewGateway;
use crate::models::interview::{Interview, Stage};
use crate::models::CandidateId;
use crate::utils::validation::validate;

#[derive(Clone)]
pub struct InterviewStore {
    gateway: Arc<dyn InterviewGateway>,
    state: Arc<StateCell<Interview>>,
}

impl InterviewStore {
    pub fn new(gateway: Arc<dyn InterviewGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(StateCell::new()),
        }
    }

    pub fn state(&self) -> &StateCell<Interview> {
        &self.state
    }

    /// True while any candidate has a scheduling request pending.
    pub fn is_submitting(&self) -> bool {
        self.state.snapshot().submitting
    }

    pub fn is_submitting_for(&self, candidate_id: &CandidateId) -> bool {
        self.state.is_pending(candidate_id.as_str())
    }

    /// Validates the form and schedules it; at most one submission per
    /// candidate is in flight.
    pub async fn schedule(
        &self,
        candidate_id: &CandidateId,
        form: InterviewForm,
        stage: Stage,
    ) -> StoreResult<Interview> {
        self.schedule_confirmed(candidate_id, form, stage)
            .await
            .map(|(interview, _)| interview)
    }

    pub async fn submit(&self, request: ScheduleInterview) -> StoreResult<Interview> {
        self.submit_confirmed(request)
            .await
            .map(|(interview, _)| interview)
    }

    /// Like [`schedule`](Self::schedule), also returning the success text.
    pub(crate) async fn schedule_confirmed(
        &self,
        candidate_id: &CandidateId,
        form: InterviewForm,
        stage: Stage,
    ) -> StoreResult<(Interview, String)> {
        if let Err(errors) = validate(&form) {
            return Err(self.state.rejected("schedule interview", Error::from(errors)));
        }
        self.submit_confirmed(ScheduleInterview::from_form(candidate_id.clone(), form, stage))
            .await
    }

    async fn submit_confirmed(&self, request: ScheduleInterview) -> StoreResult<(Interview, String)> {
        let Some(_guard) = self.state.try_begin_submit(request.candidate_id.as_str()) else {
            warn!(candidate_id = %request.candidate_id, "Interview submission already pending");
            return Err(Error::InFlight("schedule interview".into()).into());
        };

        match self.gateway.schedule_interview(request).await {
            Ok(confirmed) => {
                let interview = confirmed.value;
                info!(interview_id = %interview.id, stage = %interview.stage, "Interview scheduled");
                let message = self.state.confirmed(
                    confirmed.message,
                    "Interview scheduled successfully",
                    |s| upsert(&mut s.items, interview.clone()),
                );
                Ok((interview, message))
            }
            Err(e) => Err(self.state.rejected("schedule interview", e)),
        }
    }

    pub async fn list_for_candidate(&self, candidate_id: &CandidateId) -> StoreResult<Vec<Interview>> {
        self.state.begin();
        match self.gateway.list_candidate_interviews(candidate_id).await {
            Ok(interviews) => {
                debug!(candidate_id = %candidate_id, count = interviews.len(), "Interviews loaded");
                self.state.fetched(|s| s.items = interviews.clone());
                Ok(interviews)
            }
            Err(e) => Err(self.state.rejected("list interviews", e)),
        }
    }
}
