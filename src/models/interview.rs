use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Identified, InterviewId, PartyRef};
use crate::utils::time::deserialize_flexible_date;

/// Which of the two sequential interview rounds a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    // Records created before stages existed carry no stage and were all first rounds.
    #[default]
    First,
    Second,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::First => "first",
            Stage::Second => "second",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    #[serde(rename = "_id", alias = "id")]
    pub id: InterviewId,
    #[serde(default, alias = "candidateId", skip_serializing_if = "Option::is_none")]
    pub candidate: Option<PartyRef>,
    #[serde(default, alias = "interviewerId", skip_serializing_if = "Option::is_none")]
    pub interviewer: Option<PartyRef>,
    #[serde(default)]
    pub stage: Stage,
    #[serde(
        rename = "interviewDate",
        alias = "date",
        deserialize_with = "deserialize_flexible_date"
    )]
    pub date: NaiveDate,
    #[serde(rename = "interviewTime", alias = "time")]
    pub time: String,
    #[serde(default)]
    pub reminder_sent: bool,
}

impl Interview {
    pub fn reminder_label(&self) -> &'static str {
        if self.reminder_sent {
            "Reminder Sent"
        } else {
            "Pending Reminder"
        }
    }
}

impl Identified for Interview {
    type Id = InterviewId;

    fn id(&self) -> &InterviewId {
        &self.id
    }
}
