use std::sync::Arc;

use tracing::{debug, info};

use super::{remove_by_id, StateCell, StoreResult};
use crate::dto::candidate_dto::{CandidateForm, CandidateUpdate, EditCandidateForm};
use crate::error::Error;
use crate::gateway::CandidateGateway;
use crate::models::candidate::{Candidate, PipelineStatus};
use crate::models::CandidateId;
use crate::utils::validation::validate;

#[derive(Clone)]
pub struct CandidateStore {
    gateway: Arc<dyn CandidateGateway>,
    state: Arc<StateCell<Candidate>>,
}

impl CandidateStore {
    pub fn new(gateway: Arc<dyn CandidateGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(StateCell::new()),
        }
    }

    pub fn state(&self) -> &StateCell<Candidate> {
        &self.state
    }

    pub fn selected(&self) -> Option<Candidate> {
        self.state.snapshot().selected
    }

    /// Replaces the collection with the server's full candidate list.
    pub async fn list(&self) -> StoreResult<Vec<Candidate>> {
        self.state.begin();
        match self.gateway.list_candidates().await {
            Ok(candidates) => {
                debug!(count = candidates.len(), "Candidates loaded");
                self.state.fetched(|s| s.items = candidates.clone());
                Ok(candidates)
            }
            Err(e) => Err(self.state.rejected("list candidates", e)),
        }
    }

    /// Blank queries fall back to the full list.
    pub async fn search(&self, query: &str) -> StoreResult<Vec<Candidate>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list().await;
        }

        self.state.begin();
        match self.gateway.search_candidates(query).await {
            Ok(candidates) => {
                debug!(query, count = candidates.len(), "Candidate search finished");
                self.state.fetched(|s| s.items = candidates.clone());
                Ok(candidates)
            }
            Err(e) => Err(self.state.rejected("search candidates", e)),
        }
    }

    pub async fn get_by_id(&self, id: &CandidateId) -> StoreResult<Candidate> {
        self.state.begin();
        match self.gateway.get_candidate(id).await {
            Ok(candidate) => {
                self.state.fetched(|s| s.selected = Some(candidate.clone()));
                Ok(candidate)
            }
            Err(e) => Err(self.state.rejected("get candidate", e)),
        }
    }

    pub async fn create(&self, form: CandidateForm) -> StoreResult<Option<Candidate>> {
        if let Err(errors) = validate(&form) {
            return Err(self.state.rejected("create candidate", Error::from(errors)));
        }

        self.state.begin();
        match self.gateway.create_candidate(form).await {
            Ok(confirmed) => {
                let created = confirmed.value;
                self.state.confirmed(
                    confirmed.message,
                    "Candidate added successfully",
                    |s| {
                        if let Some(candidate) = &created {
                            s.items.push(candidate.clone());
                        }
                    },
                );
                if let Some(candidate) = &created {
                    info!(candidate_id = %candidate.id, "Candidate created");
                }
                Ok(created)
            }
            Err(e) => Err(self.state.rejected("create candidate", e)),
        }
    }

    /// The store does not patch its copy; callers refetch afterwards.
    ///
    /// A status change must be a legal pipeline move from the candidate's
    /// current status on the server, so terminal candidates stay terminal.
    pub async fn update(&self, id: &CandidateId, update: CandidateUpdate) -> StoreResult<String> {
        if let Some(next) = update.interview_status {
            self.check_status_change(id, next).await?;
        }
        self.write(id, update).await
    }

    /// Status write for a step the pipeline has already planned.
    pub(crate) async fn set_status(&self, id: &CandidateId, status: PipelineStatus) -> StoreResult<String> {
        self.write(id, CandidateUpdate::status(status)).await
    }

    async fn check_status_change(&self, id: &CandidateId, next: PipelineStatus) -> StoreResult<()> {
        let current = match self.gateway.get_candidate(id).await {
            Ok(candidate) => candidate.interview_status,
            Err(e) => return Err(self.state.rejected("update candidate", e)),
        };
        if current == next || current.can_transition_to(next) {
            return Ok(());
        }
        Err(self.state.rejected(
            "update candidate",
            Error::InvalidTransition {
                action: format!("Moving to {next}"),
                status: current,
            },
        ))
    }

    async fn write(&self, id: &CandidateId, update: CandidateUpdate) -> StoreResult<String> {
        self.state.begin();
        match self.gateway.update_candidate(id, update).await {
            Ok(confirmed) => {
                info!(candidate_id = %id, "Candidate updated");
                Ok(self
                    .state
                    .confirmed(confirmed.message, "Candidate updated successfully", |_| {}))
            }
            Err(e) => Err(self.state.rejected("update candidate", e)),
        }
    }

    pub async fn edit(&self, id: &CandidateId, form: EditCandidateForm) -> StoreResult<String> {
        if let Err(errors) = validate(&form) {
            return Err(self.state.rejected("update candidate", Error::from(errors)));
        }
        self.update(id, form.into()).await
    }

    pub async fn delete(&self, id: &CandidateId) -> StoreResult<String> {
        self.state.begin();
        match self.gateway.delete_candidate(id).await {
            Ok(confirmed) => {
                info!(candidate_id = %id, "Candidate deleted");
                Ok(self.state.confirmed(
                    confirmed.message,
                    "Candidate deleted successfully",
                    |s| remove_by_id(&mut s.items, id),
                ))
            }
            Err(e) => Err(self.state.rejected("delete candidate", e)),
        }
    }
}
