use std::sync::Arc;

use tracing::{debug, info};

use super::{remove_by_id, upsert, StateCell, StoreResult};
use crate::dto::interviewer_dto::InterviewerForm;
use crate::error::Error;
use crate::gateway::InterviewerGateway;
use crate::models::interviewer::Interviewer;
use crate::models::InterviewerId;
use crate::utils::validation::validate;

#[derive(Clone)]
pub struct InterviewerStore {
    gateway: Arc<dyn InterviewerGateway>,
    state: Arc<StateCell<Interviewer>>,
}

impl InterviewerStore {
    pub fn new(gateway: Arc<dyn InterviewerGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(StateCell::new()),
        }
    }

    pub fn state(&self) -> &StateCell<Interviewer> {
        &self.state
    }

    pub async fn list(&self) -> StoreResult<Vec<Interviewer>> {
        self.state.begin();
        match self.gateway.list_interviewers().await {
            Ok(page) => {
                debug!(count = page.interviewers.len(), total = ?page.total, "Interviewers loaded");
                let interviewers = page.interviewers;
                let total = page
                    .total
                    .or_else(|| u64::try_from(interviewers.len()).ok());
                self.state.fetched(|s| {
                    s.items = interviewers.clone();
                    s.total = total;
                });
                Ok(interviewers)
            }
            Err(e) => Err(self.state.rejected("list interviewers", e)),
        }
    }

    pub async fn get_by_id(&self, id: &InterviewerId) -> StoreResult<Interviewer> {
        self.state.begin();
        match self.gateway.get_interviewer(id).await {
            Ok(interviewer) => {
                self.state.fetched(|s| s.selected = Some(interviewer.clone()));
                Ok(interviewer)
            }
            Err(e) => Err(self.state.rejected("get interviewer", e)),
        }
    }

    pub async fn create(&self, form: InterviewerForm) -> StoreResult<Option<Interviewer>> {
        if let Err(errors) = validate(&form) {
            return Err(self.state.rejected("create interviewer", Error::from(errors)));
        }

        self.state.begin();
        match self.gateway.create_interviewer(form).await {
            Ok(confirmed) => {
                let created = confirmed.value;
                self.state.confirmed(
                    confirmed.message,
                    "Interviewer added successfully",
                    |s| {
                        if let Some(interviewer) = &created {
                            upsert(&mut s.items, interviewer.clone());
                            s.total = s.total.map(|t| t + 1);
                        }
                    },
                );
                info!(created = created.is_some(), "Interviewer created");
                Ok(created)
            }
            Err(e) => Err(self.state.rejected("create interviewer", e)),
        }
    }

    pub async fn update(&self, id: &InterviewerId, form: InterviewerForm) -> StoreResult<String> {
        if let Err(errors) = validate(&form) {
            return Err(self.state.rejected("update interviewer", Error::from(errors)));
        }

        self.state.begin();
        match self.gateway.update_interviewer(id, form).await {
            Ok(confirmed) => {
                info!(interviewer_id = %id, "Interviewer updated");
                Ok(self
                    .state
                    .confirmed(confirmed.message, "Interviewer updated successfully", |_| {}))
            }
            Err(e) => Err(self.state.rejected("update interviewer", e)),
        }
    }

    pub async fn delete(&self, id: &InterviewerId) -> StoreResult<String> {
        self.state.begin();
        match self.gateway.delete_interviewer(id).await {
            Ok(confirmed) => {
                info!(interviewer_id = %id, "Interviewer deleted");
                Ok(self.state.confirmed(
                    confirmed.message,
                    "Interviewer deleted successfully",
                    |s| {
                        let before = s.items.len();
                        remove_by_id(&mut s.items, id);
                        if s.items.len() < before {
                            s.total = s.total.map(|t| t.saturating_sub(1));
                        }
                    },
                ))
            }
            Err(e) => Err(self.state.rejected("delete interviewer", e)),
        }
    }
}
