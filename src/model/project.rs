use crate::error::Result;
use crate::model::fields::{FieldKind, FieldValue, ItemFields};
use crate::model::raw::{ItemNode, ProjectNode};
use crate::model::record::{FlatRecord, ProjectDetails, ProjectSnapshot};

pub const TITLE: &str = "Title";
pub const STATUS: &str = "Status";
pub const DEADLINE: &str = "Deadline";
pub const PRIORITY: &str = "Priority";
pub const MEMBERS: &str = "Members";
pub const NOTES: &str = "Notes";

/// A fetched board: the raw nodes plus their flattened records.
#[derive(Debug, Clone)]
pub struct Project {
    details: ProjectDetails,
    nodes: Vec<ItemNode>,
    items: Vec<FlatRecord>,
}

impl Project {
    /// Flattens every item. Fails as a whole if any item has unparseable
    /// choice settings.
    pub fn from_node(node: ProjectNode, created_field: &str) -> Result<Self> {
        let items = node
            .items
            .nodes
            .iter()
            .map(|item| flatten_item(item, created_field))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            details: ProjectDetails {
                title: node.title,
                url: node.url,
            },
            nodes: node.items.nodes,
            items,
        })
    }

    pub fn details(&self) -> &ProjectDetails {
        &self.details
    }

    pub fn items(&self) -> &[FlatRecord] {
        &self.items
    }

    pub fn item_by_title(&self, title: &str) -> Option<&ItemNode> {
        self.nodes
            .iter()
            .find(|item| item.title.as_deref() == Some(title))
    }

    /// First item carrying a value for the named field.
    pub fn item_by_field_name(&self, field_name: &str) -> Option<&ItemNode> {
        self.nodes.iter().find(|item| item.has_field(field_name))
    }

    pub fn into_snapshot(self) -> ProjectSnapshot {
        ProjectSnapshot {
            details: self.details,
            items: self.items,
        }
    }
}

pub fn flatten_item(item: &ItemNode, created_field: &str) -> Result<FlatRecord> {
    let fields = ItemFields::new(item);
    let display = |name: &str, kind: FieldKind| -> Result<Option<String>> {
        Ok(fields.project(name, kind)?.and_then(FieldValue::into_display))
    };

    Ok(FlatRecord {
        created: fields.created_at(created_field),
        title: display(TITLE, FieldKind::Text)?,
        status: display(STATUS, FieldKind::Choice)?,
        deadline: display(DEADLINE, FieldKind::Date)?,
        priority: display(PRIORITY, FieldKind::Choice)?,
        members: fields
            .project(MEMBERS, FieldKind::Passthrough)?
            .map(FieldValue::into_json),
        notes: display(NOTES, FieldKind::Text)?,
    })
}
