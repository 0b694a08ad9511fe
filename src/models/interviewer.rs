use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Identified, InterviewerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interviewer {
    #[serde(rename = "_id", alias = "id")]
    pub id: InterviewerId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Interviewer {
    type Id = InterviewerId;

    fn id(&self) -> &InterviewerId {
        &self.id
    }
}
