//! Shapes of the GitHub `ProjectNext` GraphQL responses, kept close to the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of resolving `user.projectNext`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectNode {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub items: ItemConnection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemConnection {
    #[serde(default)]
    pub nodes: Vec<ItemNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemNode {
    pub title: Option<String>,
    pub id: String,
    #[serde(default)]
    pub field_values: FieldValueConnection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldValueConnection {
    #[serde(default)]
    pub nodes: Vec<FieldValueNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValueNode {
    pub created_at: Option<String>,
    pub creator: Option<Creator>,
    pub database_id: Option<i64>,
    pub id: Option<String>,
    pub project_field: ProjectFieldDef,
    /// Literal for text/date fields, option id for choice fields.
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFieldDef {
    pub name: String,
    /// Serialized JSON; choice fields carry an `options` list in here.
    pub settings: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    pub login: String,
}

impl ItemNode {
    pub fn has_field(&self, name: &str) -> bool {
        self.field_values
            .nodes
            .iter()
            .any(|f| f.project_field.name == name)
    }
}
