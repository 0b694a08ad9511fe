use validator::Validate;

use crate::models::assessment::{AssessmentType, Evaluation};
use crate::models::CandidateId;
use crate::utils::files::FileUpload;
use crate::utils::validation::validate_assessment_file;

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct AssessmentForm {
    pub assessment_type: AssessmentType,
    pub evaluation: Evaluation,
    pub remarks: Option<String>,
    #[validate(custom(function = "validate_assessment_file"))]
    pub test_file: FileUpload,
}

/// Multipart body of `POST assessments`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssessment {
    pub candidate_id: CandidateId,
    pub assessment_type: AssessmentType,
    pub evaluation: Evaluation,
    pub remarks: String,
    pub test_file: Option<FileUpload>,
}

impl NewAssessment {
    pub fn from_form(candidate_id: CandidateId, form: AssessmentForm) -> Self {
        Self {
            candidate_id,
            assessment_type: form.assessment_type,
            evaluation: form.evaluation,
            remarks: form.remarks.unwrap_or_default(),
            test_file: Some(form.test_file),
        }
    }

    pub(crate) fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("candidateId", self.candidate_id.to_string()),
            ("assessmentType", self.assessment_type.to_string()),
            ("remarks", self.remarks.clone()),
            ("evaluation", self.evaluation.to_string()),
        ]
    }
}
