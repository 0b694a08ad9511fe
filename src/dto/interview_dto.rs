use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::interview::Stage;
use crate::models::{CandidateId, InterviewerId};
use crate::utils::validation::validate_time_of_day;

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct InterviewForm {
    #[validate(length(min = 1, message = "Interviewer is required"))]
    pub interviewer_id: String,
    pub interview_date: NaiveDate,
    #[validate(custom(function = "validate_time_of_day"))]
    pub interview_time: String,
}

/// Body of `POST interviews/schedule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInterview {
    pub candidate_id: CandidateId,
    pub interviewer_id: InterviewerId,
    pub interview_date: NaiveDate,
    pub interview_time: String,
    pub stage: Stage,
}

impl ScheduleInterview {
    pub fn from_form(candidate_id: CandidateId, form: InterviewForm, stage: Stage) -> Self {
        Self {
            candidate_id,
            interviewer_id: InterviewerId::new(form.interviewer_id),
            interview_date: form.interview_date,
            interview_time: form.interview_time.trim().to_string(),
            stage,
        }
    }
}
