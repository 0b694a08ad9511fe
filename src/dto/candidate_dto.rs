use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::candidate::{Level, PipelineStatus};
use crate::utils::files::FileUpload;
use crate::utils::validation::{validate_cv_file, validate_salary, validate_technology};

/// Profile fields shared by the create and edit forms.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CandidateProfile {
    #[validate(length(min = 1, max = 100, message = "Name is required and must be less than 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Phone number is required and must be less than 20 characters"))]
    pub phone: String,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 100, message = "Email must be less than 100 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, max = 500, message = "References are required and must be less than 500 characters"))]
    pub references: String,
    #[validate(
        length(min = 1, max = 500, message = "Technologies are required and must be less than 500 characters"),
        custom(function = "validate_technology")
    )]
    pub technology: String,
    pub level: Level,
    #[validate(custom(function = "validate_salary"))]
    pub salary_expectation: Decimal,
    #[validate(range(min = 0.0, max = 50.0, message = "Experience must be between 0 and 50 years"))]
    pub experience: f64,
    pub interview_status: PipelineStatus,
}

impl CandidateProfile {
    pub(crate) fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("technology", self.technology.clone()),
            ("level", self.level.to_string()),
            ("salaryExpectation", self.salary_expectation.to_string()),
            ("experience", self.experience.to_string()),
            ("references", self.references.clone()),
            ("interviewStatus", self.interview_status.to_string()),
        ]
    }
}

/// Add-candidate form: the CV is mandatory.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CandidateForm {
    #[validate(nested)]
    pub profile: CandidateProfile,
    #[validate(custom(function = "validate_cv_file"))]
    pub cv_file: FileUpload,
}

/// Edit-candidate form: a new CV may or may not be attached.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_replacement_cv"))]
pub struct EditCandidateForm {
    #[validate(nested)]
    pub profile: CandidateProfile,
    pub cv_file: Option<FileUpload>,
}

fn validate_replacement_cv(form: &EditCandidateForm) -> Result<(), ValidationError> {
    match &form.cv_file {
        Some(file) => validate_cv_file(file),
        None => Ok(()),
    }
}

/// Partial candidate update. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option",
        default
    )]
    pub salary_expectation: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_status: Option<PipelineStatus>,
    #[serde(skip)]
    pub cv_file: Option<FileUpload>,
}

impl CandidateUpdate {
    pub fn status(status: PipelineStatus) -> Self {
        Self {
            interview_status: Some(status),
            ..Default::default()
        }
    }

    pub(crate) fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        let mut push = |name: &'static str, value: Option<String>| {
            if let Some(value) = value {
                fields.push((name, value));
            }
        };
        push("name", self.name.clone());
        push("email", self.email.clone());
        push("phone", self.phone.clone());
        push("technology", self.technology.clone());
        push("level", self.level.map(|l| l.to_string()));
        push("salaryExpectation", self.salary_expectation.map(|s| s.to_string()));
        push("experience", self.experience.map(|e| e.to_string()));
        push("references", self.references.clone());
        push("interviewStatus", self.interview_status.map(|s| s.to_string()));
        fields
    }
}

impl From<EditCandidateForm> for CandidateUpdate {
    fn from(form: EditCandidateForm) -> Self {
        let p = form.profile;
        Self {
            name: Some(p.name),
            email: Some(p.email),
            phone: Some(p.phone),
            technology: Some(p.technology),
            level: Some(p.level),
            salary_expectation: Some(p.salary_expectation),
            experience: Some(p.experience),
            references: Some(p.references),
            interview_status: Some(p.interview_status),
            cv_file: form.cv_file,
        }
    }
}
