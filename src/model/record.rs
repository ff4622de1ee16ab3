use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One board item with its fields pulled out by name.
///
/// Every attribute is optional: a missing field and an empty one look the same.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    #[serde(rename = "Created")]
    pub created: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Deadline")]
    pub deadline: Option<String>,
    #[serde(rename = "Priority")]
    pub priority: Option<String>,
    /// Passed through as the API returned it.
    #[serde(rename = "Members")]
    pub members: Option<Value>,
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
}

impl FlatRecord {
    pub fn members_display(&self) -> Option<String> {
        match self.members.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Array(values) => Some(
                values
                    .iter()
                    .map(|v| v.as_str().map_or_else(|| v.to_string(), String::from))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub details: ProjectDetails,
    pub items: Vec<FlatRecord>,
}
