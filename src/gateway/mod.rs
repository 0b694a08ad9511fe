//! Remote Entity Gateway: the typed boundary to the recruitment REST backend.
//!
//! One trait per resource so each store depends only on the calls it makes.
//! Every method is a single request; failures come back as [`Error`] values
//! and are turned into plain messages by the stores.
//!
//! [`Error`]: crate::error::Error

pub mod http_gateway;

use async_trait::async_trait;

use crate::dto::assessment_dto::NewAssessment;
use crate::dto::candidate_dto::{CandidateForm, CandidateUpdate};
use crate::dto::interview_dto::ScheduleInterview;
use crate::dto::interviewer_dto::InterviewerForm;
use crate::error::Result;
use crate::models::assessment::Assessment;
use crate::models::candidate::Candidate;
use crate::models::interview::Interview;
use crate::models::interviewer::Interviewer;
use crate::models::{AssessmentId, CandidateId, InterviewerId};

pub use http_gateway::HttpGateway;

/// A mutation the backend accepted, with its optional human-readable message.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmed<T> {
    pub message: Option<String>,
    pub value: T,
}

impl<T> Confirmed<T> {
    pub fn new(message: Option<String>, value: T) -> Self {
        Self { message, value }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterviewerPage {
    pub interviewers: Vec<Interviewer>,
    pub total: Option<u64>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateGateway: Send + Sync {
    async fn list_candidates(&self) -> Result<Vec<Candidate>>;
    async fn search_candidates(&self, query: &str) -> Result<Vec<Candidate>>;
    async fn get_candidate(&self, id: &CandidateId) -> Result<Candidate>;
    async fn create_candidate(&self, form: CandidateForm) -> Result<Confirmed<Option<Candidate>>>;
    async fn update_candidate(
        &self,
        id: &CandidateId,
        update: CandidateUpdate,
    ) -> Result<Confirmed<()>>;
    async fn delete_candidate(&self, id: &CandidateId) -> Result<Confirmed<()>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterviewerGateway: Send + Sync {
    async fn list_interviewers(&self) -> Result<InterviewerPage>;
    async fn get_interviewer(&self, id: &InterviewerId) -> Result<Interviewer>;
    async fn create_interviewer(&self, form: InterviewerForm)
        -> Result<Confirmed<Option<Interviewer>>>;
    async fn update_interviewer(
        &self,
        id: &InterviewerId,
        form: InterviewerForm,
    ) -> Result<Confirmed<()>>;
    async fn delete_interviewer(&self, id: &InterviewerId) -> Result<Confirmed<()>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterviewGateway: Send + Sync {
    async fn schedule_interview(&self, request: ScheduleInterview) -> Result<Confirmed<Interview>>;
    async fn list_candidate_interviews(&self, candidate_id: &CandidateId) -> Result<Vec<Interview>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentGateway: Send + Sync {
    async fn create_assessment(&self, request: NewAssessment) -> Result<Confirmed<Assessment>>;
    async fn list_candidate_assessments(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Assessment>>;
    async fn delete_assessment(&self, id: &AssessmentId) -> Result<Confirmed<AssessmentId>>;
}
