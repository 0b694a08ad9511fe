use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{AssessmentId, Identified, PartyRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentType {
    Technical,
    Behavioral,
    Coding,
    Design,
}

impl AssessmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::Technical => "Technical",
            AssessmentType::Behavioral => "Behavioral",
            AssessmentType::Coding => "Coding",
            AssessmentType::Design => "Design",
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluation {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Evaluation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Evaluation::Excellent => "Excellent",
            Evaluation::Good => "Good",
            Evaluation::Average => "Average",
            Evaluation::Poor => "Poor",
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `is_completed` is set outside this client; it is only ever observed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(rename = "_id", alias = "id")]
    pub id: AssessmentId,
    #[serde(default, alias = "candidateId", skip_serializing_if = "Option::is_none")]
    pub candidate: Option<PartyRef>,
    pub assessment_type: AssessmentType,
    pub evaluation: Evaluation,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default, alias = "testFile")]
    pub test_file_url: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Assessment {
    type Id = AssessmentId;

    fn id(&self) -> &AssessmentId {
        &self.id
    }
}
