use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::assessment::Assessment;
use super::interview::Interview;
use super::{CandidateId, Identified};

/// A candidate's single authoritative place in the hiring workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PipelineStatus {
    #[default]
    Shortlisted,
    #[serde(rename = "First Interview Complete")]
    FirstInterviewComplete,
    #[serde(rename = "Second Interview Complete")]
    SecondInterviewComplete,
    Hired,
    Rejected,
    Blacklisted,
}

impl PipelineStatus {
    pub const ALL: [PipelineStatus; 6] = [
        PipelineStatus::Shortlisted,
        PipelineStatus::FirstInterviewComplete,
        PipelineStatus::SecondInterviewComplete,
        PipelineStatus::Hired,
        PipelineStatus::Rejected,
        PipelineStatus::Blacklisted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Shortlisted => "Shortlisted",
            PipelineStatus::FirstInterviewComplete => "First Interview Complete",
            PipelineStatus::SecondInterviewComplete => "Second Interview Complete",
            PipelineStatus::Hired => "Hired",
            PipelineStatus::Rejected => "Rejected",
            PipelineStatus::Blacklisted => "Blacklisted",
        }
    }

    /// `Hired`, `Rejected` and `Blacklisted` have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineStatus::Hired | PipelineStatus::Rejected | PipelineStatus::Blacklisted
        )
    }

    pub fn allowed_next(&self) -> &'static [PipelineStatus] {
        match self {
            PipelineStatus::Shortlisted => &[
                PipelineStatus::FirstInterviewComplete,
                PipelineStatus::Rejected,
                PipelineStatus::Hired,
            ],
            PipelineStatus::FirstInterviewComplete => &[
                PipelineStatus::SecondInterviewComplete,
                PipelineStatus::Rejected,
                PipelineStatus::Hired,
            ],
            PipelineStatus::SecondInterviewComplete => {
                &[PipelineStatus::Rejected, PipelineStatus::Hired]
            }
            PipelineStatus::Hired | PipelineStatus::Rejected | PipelineStatus::Blacklisted => &[],
        }
    }

    pub fn can_transition_to(&self, next: PipelineStatus) -> bool {
        self.allowed_next().contains(&next)
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PipelineStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown pipeline status: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Junior,
    Mid,
    Senior,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Junior => "Junior",
            Level::Mid => "Mid",
            Level::Senior => "Senior",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(rename = "_id", alias = "id")]
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub technology: String,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub salary_expectation: Option<Decimal>,
    #[serde(default)]
    pub experience: Option<f64>,
    #[serde(default)]
    pub references: Option<String>,
    #[serde(default)]
    pub cv_file_url: Option<String>,
    #[serde(default)]
    pub interview_status: PipelineStatus,
    #[serde(default)]
    pub interview_schedules: Vec<Interview>,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// What the scheduling panel shows for a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleView<'a> {
    Form,
    Existing(&'a [Interview]),
}

impl Candidate {
    /// Technology tags in entry order, trimmed, empties dropped.
    pub fn technologies(&self) -> Vec<&str> {
        split_technologies(&self.technology)
    }

    pub fn schedule_view(&self) -> ScheduleView<'_> {
        if self.interview_schedules.is_empty() {
            ScheduleView::Form
        } else {
            ScheduleView::Existing(&self.interview_schedules)
        }
    }
}

impl Identified for Candidate {
    type Id = CandidateId;

    fn id(&self) -> &CandidateId {
        &self.id
    }
}

pub fn split_technologies(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|tech| !tech.is_empty())
        .collect()
}
