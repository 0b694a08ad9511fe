pub mod assessment;
pub mod candidate;
pub mod interview;
pub mod interviewer;

use serde::{Deserialize, Serialize};

/// Entities held in a store collection, addressable by their server id.
pub trait Identified {
    type Id: PartialEq + Clone + std::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(CandidateId);
entity_id!(InterviewerId);
entity_id!(InterviewId);
entity_id!(AssessmentId);

/// A related record as the backend returns it: either a bare id or a
/// populated `{ _id, name, email }` summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyRef {
    Id(String),
    Summary(PartySummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySummary {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl PartyRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            PartyRef::Id(id) => Some(id),
            PartyRef::Summary(summary) => summary.id.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            PartyRef::Id(_) => None,
            PartyRef::Summary(summary) => Some(&summary.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_ref_accepts_bare_id_or_summary() {
        let bare: PartyRef = serde_json::from_str(r#""64f1c0""#).unwrap();
        assert_eq!(bare.id(), Some("64f1c0"));
        assert_eq!(bare.name(), None);

        let populated: PartyRef =
            serde_json::from_str(r#"{"_id":"64f1c0","name":"Dana","email":"dana@example.com"}"#)
                .unwrap();
        assert_eq!(populated.id(), Some("64f1c0"));
        assert_eq!(populated.name(), Some("Dana"));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = CandidateId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc""#);
        assert_eq!(id.to_string(), "abc");
    }
}
