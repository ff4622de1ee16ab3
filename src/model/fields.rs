use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{BoardError, Result};
use crate::model::raw::{FieldValueNode, ItemNode};
use crate::util::dates;

/// How the raw value of a named field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Raw value is an option id, resolved through the field's `settings.options`.
    Choice,
    Date,
    Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Choice { id: String, label: Option<String> },
    Date(String),
    Passthrough(Value),
}

impl FieldValue {
    /// Human-readable form. A choice that matched no option has none.
    pub fn into_display(self) -> Option<String> {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => Some(s),
            FieldValue::Choice { label, .. } => label,
            FieldValue::Passthrough(Value::String(s)) => Some(s),
            FieldValue::Passthrough(v) => Some(v.to_string()),
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => Value::String(s),
            FieldValue::Choice { label, .. } => label.map_or(Value::Null, Value::String),
            FieldValue::Passthrough(v) => v,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FieldSettings {
    #[serde(default)]
    options: Option<Vec<FieldOption>>,
}

#[derive(Debug, Deserialize)]
struct FieldOption {
    id: String,
    name: String,
}

/// Field values of one item, keyed by field name. The first entry for a name wins.
pub struct ItemFields<'a> {
    entries: &'a [FieldValueNode],
    by_name: HashMap<&'a str, &'a FieldValueNode>,
}

impl<'a> ItemFields<'a> {
    pub fn new(item: &'a ItemNode) -> Self {
        let entries = item.field_values.nodes.as_slice();
        let mut by_name = HashMap::with_capacity(entries.len());
        for entry in entries {
            by_name
                .entry(entry.project_field.name.as_str())
                .or_insert(entry);
        }
        Self { entries, by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a FieldValueNode> {
        self.by_name.get(name).copied()
    }

    /// Projects the named field. Absent fields and null values yield `None`;
    /// only unparseable choice settings are an error.
    pub fn project(&self, name: &str, kind: FieldKind) -> Result<Option<FieldValue>> {
        let Some(entry) = self.get(name) else {
            return Ok(None);
        };
        if entry.value.is_null() {
            return Ok(None);
        }

        let value = match kind {
            FieldKind::Text => FieldValue::Text(value_text(&entry.value)),
            FieldKind::Date => FieldValue::Date(dates::date_portion(&value_text(&entry.value))),
            FieldKind::Passthrough => FieldValue::Passthrough(entry.value.clone()),
            FieldKind::Choice => {
                let id = value_text(&entry.value);
                let label = resolve_option(entry, &id)?;
                FieldValue::Choice { id, label }
            }
        };
        Ok(Some(value))
    }

    /// Creation time of the item, taken from the designated field's entry.
    ///
    /// Without that entry the earliest `createdAt` on the item is used, so
    /// the answer never depends on the order the API listed the fields in.
    pub fn created_at(&self, designated: &str) -> Option<String> {
        let raw = self
            .get(designated)
            .and_then(|entry| entry.created_at.as_deref())
            .or_else(|| {
                dates::earliest(
                    self.entries
                        .iter()
                        .filter_map(|entry| entry.created_at.as_deref()),
                )
            })?;
        Some(dates::display_timestamp(raw))
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn resolve_option(entry: &FieldValueNode, id: &str) -> Result<Option<String>> {
    let settings = match entry.project_field.settings.as_deref() {
        Some(raw) => serde_json::from_str::<Option<FieldSettings>>(raw)
            .map_err(|source| BoardError::Settings {
                field: entry.project_field.name.clone(),
                source,
            })?
            .unwrap_or_default(),
        None => FieldSettings::default(),
    };

    let label = settings
        .options
        .unwrap_or_default()
        .into_iter()
        .find(|option| option.id == id)
        .map(|option| option.name);
    if label.is_none() {
        log::debug!(
            "No option {id} in settings of field {}",
            entry.project_field.name
        );
    }
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{choice_field, field, item};

    #[test]
    fn text_field_returns_raw_value() {
        let item = item("i1", vec![field("Notes", "n", "2024-01-01T00:00:00Z")]);
        let fields = ItemFields::new(&item);
        let value = fields.project("Notes", FieldKind::Text).unwrap();
        assert_eq!(value, Some(FieldValue::Text("n".into())));
    }

    #[test]
    fn absent_field_is_none_not_error() {
        let item = item("i1", vec![]);
        let fields = ItemFields::new(&item);
        assert_eq!(fields.project("Notes", FieldKind::Text).unwrap(), None);
        assert_eq!(fields.project("Status", FieldKind::Choice).unwrap(), None);
    }

    #[test]
    fn null_value_is_none() {
        let mut entry = field("Notes", "n", "2024-01-01T00:00:00Z");
        entry.value = Value::Null;
        let item = item("i1", vec![entry]);
        let fields = ItemFields::new(&item);
        assert_eq!(fields.project("Notes", FieldKind::Text).unwrap(), None);
    }

    #[test]
    fn choice_resolves_option_label() {
        let item = item(
            "i1",
            vec![choice_field("Status", "s1", &[("s0", "Todo"), ("s1", "Done")])],
        );
        let fields = ItemFields::new(&item);
        let value = fields.project("Status", FieldKind::Choice).unwrap().unwrap();
        assert_eq!(
            value,
            FieldValue::Choice {
                id: "s1".into(),
                label: Some("Done".into())
            }
        );
        assert_eq!(value.into_display(), Some("Done".into()));
    }

    #[test]
    fn unmatched_choice_has_no_display_value() {
        let item = item("i1", vec![choice_field("Status", "gone", &[("s1", "Done")])]);
        let fields = ItemFields::new(&item);
        let value = fields.project("Status", FieldKind::Choice).unwrap().unwrap();
        assert_eq!(value.into_display(), None);
    }

    #[test]
    fn choice_without_options_list_has_no_label() {
        let mut entry = field("Priority", "p1", "2024-01-01T00:00:00Z");
        entry.project_field.settings = Some(r#"{"width": 200}"#.into());
        let item = item("i1", vec![entry]);
        let fields = ItemFields::new(&item);
        let value = fields.project("Priority", FieldKind::Choice).unwrap().unwrap();
        assert_eq!(value.into_display(), None);
    }

    #[test]
    fn malformed_choice_settings_is_a_parse_error() {
        let mut entry = field("Status", "s1", "2024-01-01T00:00:00Z");
        entry.project_field.settings = Some("{not json".into());
        let item = item("i1", vec![entry]);
        let fields = ItemFields::new(&item);

        let err = fields.project("Status", FieldKind::Choice).unwrap_err();
        assert!(matches!(err, BoardError::Settings { ref field, .. } if field == "Status"));
    }

    #[test]
    fn malformed_settings_on_text_field_are_ignored() {
        let mut entry = field("Notes", "n", "2024-01-01T00:00:00Z");
        entry.project_field.settings = Some("{not json".into());
        let item = item("i1", vec![entry]);
        let fields = ItemFields::new(&item);
        assert!(fields.project("Notes", FieldKind::Text).unwrap().is_some());
    }

    #[test]
    fn duplicate_field_names_resolve_to_first_entry() {
        let item = item(
            "i1",
            vec![
                choice_field("Status", "s1", &[("s1", "Done"), ("s2", "Todo")]),
                choice_field("Status", "s2", &[("s1", "Done"), ("s2", "Todo")]),
            ],
        );
        let fields = ItemFields::new(&item);
        let value = fields.project("Status", FieldKind::Choice).unwrap().unwrap();
        assert_eq!(value.into_display(), Some("Done".into()));
    }

    #[test]
    fn date_field_keeps_only_the_date() {
        let item = item(
            "i1",
            vec![field("Deadline", "2024-01-02T10:00:00+00:00", "2024-01-01T00:00:00Z")],
        );
        let fields = ItemFields::new(&item);
        assert_eq!(
            fields.project("Deadline", FieldKind::Date).unwrap(),
            Some(FieldValue::Date("2024-01-02".into()))
        );
    }

    #[test]
    fn passthrough_keeps_json_shape() {
        let mut entry = field("Members", "", "2024-01-01T00:00:00Z");
        entry.value = serde_json::json!(["alice", "bob"]);
        let item = item("i1", vec![entry]);
        let fields = ItemFields::new(&item);
        let value = fields.project("Members", FieldKind::Passthrough).unwrap().unwrap();
        assert_eq!(value.into_json(), serde_json::json!(["alice", "bob"]));
    }

    #[test]
    fn created_at_uses_designated_field() {
        let item = item(
            "i1",
            vec![
                field("Notes", "n", "2024-03-01T08:00:00Z"),
                field("Title", "T1", "2024-02-01T09:30:00Z"),
            ],
        );
        let fields = ItemFields::new(&item);
        assert_eq!(fields.created_at("Title"), Some("2024-02-01 09:30:00".into()));
    }

    #[test]
    fn created_at_falls_back_to_earliest_entry() {
        let item = item(
            "i1",
            vec![
                field("Notes", "n", "2024-03-01T08:00:00Z"),
                field("Deadline", "2024-05-01", "2024-01-15T07:00:00Z"),
            ],
        );
        let fields = ItemFields::new(&item);
        assert_eq!(fields.created_at("Title"), Some("2024-01-15 07:00:00".into()));
    }

    #[test]
    fn created_at_fallback_compares_across_offsets() {
        let item = item(
            "i1",
            vec![
                field("Notes", "n", "2024-01-01T06:00:00Z"),
                field("Deadline", "2024-05-01", "2024-01-01T10:00:00+05:00"),
            ],
        );
        let fields = ItemFields::new(&item);
        assert_eq!(fields.created_at("Title"), Some("2024-01-01 10:00:00".into()));
    }

    #[test]
    fn unmatched_choice_serializes_as_null() {
        let unmatched = item("i1", vec![choice_field("Status", "gone", &[("s1", "Done")])]);
        let value = ItemFields::new(&unmatched)
            .project("Status", FieldKind::Choice)
            .unwrap()
            .unwrap();
        assert_eq!(value.into_json(), Value::Null);

        let matched = item("i2", vec![choice_field("Status", "s1", &[("s1", "Done")])]);
        let value = ItemFields::new(&matched)
            .project("Status", FieldKind::Choice)
            .unwrap()
            .unwrap();
        assert_eq!(value.into_json(), Value::String("Done".into()));
    }

    #[test]
    fn created_at_without_entries_is_none() {
        let item = item("i1", vec![]);
        assert_eq!(ItemFields::new(&item).created_at("Title"), None);
    }
}
