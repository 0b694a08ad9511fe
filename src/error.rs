use reqwest::StatusCode;

use crate::models::candidate::PipelineStatus;

pub type Result<T> = std::result::Result<T, Error>;

/// Fallback text when the backend rejects a request without a `message`.
pub const GENERIC_API_MESSAGE: &str = "An error occurred";
/// Fallback text when the request never produced a response.
pub const GENERIC_TRANSPORT_MESSAGE: &str = "An error occurred while processing the request";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {}", message.as_deref().unwrap_or(GENERIC_API_MESSAGE))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{action} is not available while the candidate is {status}")]
    InvalidTransition {
        action: String,
        status: PipelineStatus,
    },

    #[error("A {0} request is already in progress")]
    InFlight(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Plain notification text for this error.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api { message, .. } => message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_API_MESSAGE.to_string()),
            Error::Http(_) | Error::Json(_) => GENERIC_TRANSPORT_MESSAGE.to_string(),
            Error::Validation(errors) => first_validation_message(errors)
                .unwrap_or_else(|| "Please correct the highlighted fields".to_string()),
            other => other.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

fn first_validation_message(errors: &validator::ValidationErrors) -> Option<String> {
    use validator::ValidationErrorsKind;

    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by_key(|(name, _)| *name);

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(err) = list.first() {
                    return Some(match &err.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Invalid value for {field}"),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                if let Some(msg) = first_validation_message(inner) {
                    return Some(msg);
                }
            }
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    if let Some(msg) = first_validation_message(inner) {
                        return Some(msg);
                    }
                }
            }
        }
    }
    None
}
