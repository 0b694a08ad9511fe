pub mod config;
pub mod dto;
pub mod error;
pub mod gateway;
pub mod models;
pub mod pipeline;
pub mod stores;
pub mod utils;

use std::sync::Arc;

use url::Url;

use crate::config::Config;
use crate::error::Result;
use crate::gateway::HttpGateway;
use crate::pipeline::PipelineWorkflow;
use crate::stores::{AssessmentStore, CandidateStore, InterviewStore, InterviewerStore};

/// Process-wide console state: one store per resource over a shared gateway.
#[derive(Clone)]
pub struct Console {
    pub candidates: CandidateStore,
    pub interviewers: InterviewerStore,
    pub interviews: InterviewStore,
    pub assessments: AssessmentStore,
    pub workflow: PipelineWorkflow,
    files_url: Url,
}

impl Console {
    pub fn new(config: &Config) -> Result<Self> {
        let gateway = Arc::new(HttpGateway::new(config)?);
        Ok(Self::with_gateway(gateway, config.files_url.clone()))
    }

    pub fn with_gateway(gateway: Arc<HttpGateway>, files_url: Url) -> Self {
        let candidates = CandidateStore::new(gateway.clone());
        let interviewers = InterviewerStore::new(gateway.clone());
        let interviews = InterviewStore::new(gateway.clone());
        let assessments = AssessmentStore::new(gateway);
        let workflow = PipelineWorkflow::new(
            candidates.clone(),
            interviews.clone(),
            assessments.clone(),
        );

        Self {
            candidates,
            interviewers,
            interviews,
            assessments,
            workflow,
            files_url,
        }
    }

    /// Fetchable URL for a CV or assessment file path reported by the backend.
    pub fn file_url(&self, stored_path: &str) -> Result<Url> {
        utils::files::file_url(&self.files_url, stored_path)
    }
}
