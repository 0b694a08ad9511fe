use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::utils::files::{FileUpload, MIME_DOC, MIME_DOCX, MIME_PDF, MIME_TXT};
use crate::utils::time::parse_time_of_day;

pub const MAX_CV_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_TECHNOLOGIES: usize = 10;
pub const MAX_TECHNOLOGY_LEN: usize = 50;
pub const MAX_SALARY: i64 = 1_000_000;

const CV_MIME_TYPES: [&str; 3] = [MIME_PDF, MIME_DOC, MIME_DOCX];
const ASSESSMENT_MIME_TYPES: [&str; 4] = [MIME_PDF, MIME_DOC, MIME_DOCX, MIME_TXT];

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn validate_technology(value: &str) -> Result<(), ValidationError> {
    // Raw split on purpose: "React,,Node" has an empty token and must fail.
    let tokens: Vec<&str> = value.split(',').map(str::trim).collect();
    if tokens
        .iter()
        .any(|t| t.is_empty() || t.chars().count() > MAX_TECHNOLOGY_LEN)
    {
        return Err(invalid(
            "technology_length",
            "Each technology must be between 1-50 characters",
        ));
    }
    if tokens.len() > MAX_TECHNOLOGIES {
        return Err(invalid("technology_count", "Maximum 10 technologies allowed"));
    }
    Ok(())
}

pub fn validate_salary(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid("salary_range", "Salary cannot be negative"));
    }
    if *value > Decimal::from(MAX_SALARY) {
        return Err(invalid("salary_range", "Salary must be reasonable"));
    }
    Ok(())
}

pub fn validate_cv_file(file: &FileUpload) -> Result<(), ValidationError> {
    if file.size() > MAX_CV_BYTES {
        return Err(invalid("file_size", "File size must be less than 5MB"));
    }
    if !CV_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(invalid("file_type", "Only PDF, DOC, and DOCX files are allowed"));
    }
    Ok(())
}

pub fn validate_assessment_file(file: &FileUpload) -> Result<(), ValidationError> {
    if !ASSESSMENT_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(invalid(
            "file_type",
            "Only PDF, DOC, DOCX, and TXT files are accepted",
        ));
    }
    Ok(())
}

pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "Interview time is required"));
    }
    parse_time_of_day(value)
        .map(|_| ())
        .ok_or_else(|| invalid("time_format", "Interview time must look like HH:MM"))
}
