//! Response envelopes returned by the recruitment REST backend.

use serde::{Deserialize, Serialize};

use crate::models::assessment::Assessment;
use crate::models::candidate::Candidate;
use crate::models::interview::Interview;
use crate::models::interviewer::Interviewer;
use crate::models::AssessmentId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCreatedResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub candidate: Option<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewerListResponse {
    #[serde(default)]
    pub interviewers: Vec<Interviewer>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewerCreatedResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub interviewer: Option<Interviewer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewScheduledResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub interview: Interview,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewListResponse {
    #[serde(default)]
    pub interviews: Vec<Interview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentCreatedResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub assessment: Assessment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentDeletedResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<AssessmentId>,
}
