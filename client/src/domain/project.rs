//! Projects (events) and their three nested item lists.
//!
//! List entries are kept as raw JSON values so entries written by other
//! clients survive a read-modify-write untouched; [`ProjectList::items`]
//! offers a typed, lenient view for rendering.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Backend project identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Wrap a raw identifier, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Project workflow status; wire names are the backend's Russian labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// `Создан`.
    #[serde(rename = "Создан")]
    Created,
    /// `На согласовании`.
    #[serde(rename = "На согласовании")]
    PendingApproval,
    /// `Согласован`.
    #[serde(rename = "Согласован")]
    Approved,
    /// `Сбор проекта`.
    #[serde(rename = "Сбор проекта")]
    ProjectBuild,
    /// `Монтаж`.
    #[serde(rename = "Монтаж")]
    Assembly,
    /// `Демонтаж`.
    #[serde(rename = "Демонтаж")]
    Disassembly,
    /// `Разбор`.
    #[serde(rename = "Разбор")]
    Breakdown,
}

impl ProjectStatus {
    /// Every status in workflow order.
    pub const ALL: [Self; 7] = [
        Self::Created,
        Self::PendingApproval,
        Self::Approved,
        Self::ProjectBuild,
        Self::Assembly,
        Self::Disassembly,
        Self::Breakdown,
    ];

    /// Backend label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "Создан",
            Self::PendingApproval => "На согласовании",
            Self::Approved => "Согласован",
            Self::ProjectBuild => "Сбор проекта",
            Self::Assembly => "Монтаж",
            Self::Disassembly => "Демонтаж",
            Self::Breakdown => "Разбор",
        }
    }

    /// Parse a backend label.
    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == raw.trim())
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the three named lists on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectListKind {
    /// Draft list assembled before approval.
    Preliminary,
    /// Agreed list used for the build.
    Final,
    /// Items to collect after the event.
    Dismantling,
}

impl ProjectListKind {
    /// Every list kind in display order.
    pub const ALL: [Self; 3] = [Self::Preliminary, Self::Final, Self::Dismantling];

    /// Field name on the project resource.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Preliminary => "preliminary_list",
            Self::Final => "final_list",
            Self::Dismantling => "dismantling_list",
        }
    }

    /// Short name used on the command line.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Preliminary => "preliminary",
            Self::Final => "final",
            Self::Dismantling => "dismantling",
        }
    }

    /// Human-readable title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Preliminary => "Предварительный список",
            Self::Final => "Финальный список",
            Self::Dismantling => "Список демонтажа",
        }
    }
}

/// Where a list item was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    /// Picked from the inventory catalogue.
    Inventory,
    /// Picked from the equipment/decor catalogue.
    Equipment,
    /// Typed in by hand.
    Manual,
}

impl ItemSource {
    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inventory => "Инвентарь",
            Self::Equipment => "Оборудование/декор",
            Self::Manual => "Ручной ввод",
        }
    }
}

/// A single entry in a project list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectListItem {
    /// Catalogue identifier when picked from inventory/equipment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Item name.
    pub name: String,
    /// Catalogue category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Requested quantity.
    #[serde(deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Origin of the entry.
    pub source: ItemSource,
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Number(u32),
        Text(String),
    }

    match Quantity::deserialize(deserializer)? {
        Quantity::Number(value) => Ok(value),
        Quantity::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// The `{ "items": [...] }` object stored under one list field.
///
/// Unknown keys on the object are preserved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ProjectList {
    /// Number of entries, including ones that do not decode.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Raw entries in insertion order.
    pub fn raw_items(&self) -> &[Value] {
        &self.items
    }

    /// Entries that decode as [`ProjectListItem`], in insertion order.
    pub fn items(&self) -> Vec<ProjectListItem> {
        self.items
            .iter()
            .filter_map(|raw| serde_json::from_value(raw.clone()).ok())
            .collect()
    }

    /// A copy of this list with `item` appended after the existing entries.
    pub fn appended(&self, item: &ProjectListItem) -> Result<Self, serde_json::Error> {
        let mut next = self.clone();
        next.items.push(serde_json::to_value(item)?);
        Ok(next)
    }
}

/// Project resource as returned by `GET /api/projects/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Backend identifier.
    pub id: ProjectId,
    /// Event title.
    pub title: String,
    /// Name of the lead decorator.
    pub lead_decorator: String,
    /// Event date.
    #[serde(deserialize_with = "crate::domain::timestamp::lenient")]
    pub project_date: DateTime<Utc>,
    /// Free-form details.
    #[serde(default)]
    pub full_details: Option<Map<String, Value>>,
    /// Workflow status.
    pub status: ProjectStatus,
    /// Draft list.
    #[serde(default)]
    pub preliminary_list: Option<ProjectList>,
    /// Agreed list.
    #[serde(default)]
    pub final_list: Option<ProjectList>,
    /// Dismantling list.
    #[serde(default)]
    pub dismantling_list: Option<ProjectList>,
    /// Curator sign-off.
    #[serde(default)]
    pub curator_agreement: bool,
    /// Decorator sign-off.
    #[serde(default)]
    pub decorator_agreement: bool,
    /// Creation time.
    #[serde(deserialize_with = "crate::domain::timestamp::lenient")]
    pub created_at: DateTime<Utc>,
    /// Last modification time; doubles as the revision for preconditions.
    #[serde(deserialize_with = "crate::domain::timestamp::lenient")]
    pub updated_at: DateTime<Utc>,
    /// Creator's user id.
    #[serde(default)]
    pub created_by: Option<String>,
}

impl Project {
    /// The list stored under `kind`, if present.
    pub fn list(&self, kind: ProjectListKind) -> Option<&ProjectList> {
        match kind {
            ProjectListKind::Preliminary => self.preliminary_list.as_ref(),
            ProjectListKind::Final => self.final_list.as_ref(),
            ProjectListKind::Dismantling => self.dismantling_list.as_ref(),
        }
    }

    /// Revision tag used for optimistic concurrency on partial updates.
    pub fn revision(&self) -> ProjectRevision {
        ProjectRevision(self.updated_at.to_rfc3339())
    }
}

/// Precondition sent as `If-Match` so a stale write can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRevision(String);

impl ProjectRevision {
    /// Quoted entity-tag form for the `If-Match` header.
    pub fn as_entity_tag(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

/// Payload for `POST /api/projects`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    /// Event title.
    pub title: String,
    /// Name of the lead decorator.
    pub lead_decorator: String,
    /// Event date.
    #[serde(deserialize_with = "crate::domain::timestamp::lenient")]
    pub project_date: DateTime<Utc>,
    /// Free-form details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_details: Option<Map<String, Value>>,
}

/// Partial update for `PATCH /api/projects/{id}`; absent fields are untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New lead decorator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_decorator: Option<String>,
    /// New event date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_date: Option<DateTime<Utc>>,
    /// New workflow status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    /// Replacement draft list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preliminary_list: Option<ProjectList>,
    /// Replacement agreed list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_list: Option<ProjectList>,
    /// Replacement dismantling list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismantling_list: Option<ProjectList>,
    /// Curator sign-off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curator_agreement: Option<bool>,
    /// Decorator sign-off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorator_agreement: Option<bool>,
}

impl ProjectUpdate {
    /// An update that replaces exactly one list and nothing else.
    pub fn single_list(kind: ProjectListKind, list: ProjectList) -> Self {
        let mut update = Self::default();
        match kind {
            ProjectListKind::Preliminary => update.preliminary_list = Some(list),
            ProjectListKind::Final => update.final_list = Some(list),
            ProjectListKind::Dismantling => update.dismantling_list = Some(list),
        }
        update
    }

    /// An update that only changes the status.
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    //! Wire-shape coverage for project payloads.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn manual_item(name: &str) -> ProjectListItem {
        ProjectListItem {
            id: None,
            name: name.to_owned(),
            category: None,
            quantity: 2,
            notes: None,
            source: ItemSource::Manual,
        }
    }

    #[rstest]
    fn single_list_update_only_serialises_that_field() {
        let list = ProjectList::default()
            .appended(&manual_item("String lights"))
            .expect("append");
        let update = ProjectUpdate::single_list(ProjectListKind::Final, list);
        insta::assert_json_snapshot!(update, @r#"
        {
          "final_list": {
            "items": [
              {
                "name": "String lights",
                "quantity": 2,
                "source": "manual"
              }
            ]
          }
        }
        "#);
    }

    #[rstest]
    fn appending_preserves_unknown_entries_and_keys() {
        let list: ProjectList = serde_json::from_value(json!({
            "items": [{ "legacy": true }],
            "approved_by": "curator"
        }))
        .expect("list should decode");

        let next = list.appended(&manual_item("Ваза")).expect("append");
        assert_eq!(next.len(), 2);
        assert_eq!(next.raw_items().first(), Some(&json!({ "legacy": true })));
        assert_eq!(next.items().len(), 1, "legacy entry does not decode");
        let encoded = serde_json::to_value(&next).expect("encode");
        assert_eq!(encoded.get("approved_by"), Some(&json!("curator")));
    }

    #[rstest]
    #[case(json!(3), 3)]
    #[case(json!("4"), 4)]
    #[case(json!(" 5 "), 5)]
    fn quantity_accepts_numbers_and_numeric_strings(#[case] raw: Value, #[case] expected: u32) {
        let item: ProjectListItem = serde_json::from_value(json!({
            "name": "Свечи",
            "quantity": raw,
            "source": "inventory"
        }))
        .expect("item should decode");
        assert_eq!(item.quantity, expected);
    }

    #[rstest]
    fn status_labels_round_trip() {
        for status in ProjectStatus::ALL {
            let encoded = serde_json::to_value(status).expect("encode");
            assert_eq!(encoded, json!(status.label()));
            assert_eq!(ProjectStatus::from_label(status.label()), Some(status));
        }
    }

    #[rstest]
    fn revision_is_a_quoted_timestamp() {
        let project: Project = serde_json::from_value(json!({
            "id": "p-1",
            "title": "Свадьба",
            "lead_decorator": "Анна",
            "project_date": "2025-06-01T12:00:00Z",
            "status": "Создан",
            "created_at": "2025-05-01T12:00:00Z",
            "updated_at": "2025-05-02T08:30:00Z"
        }))
        .expect("project should decode");
        assert_eq!(
            project.revision().as_entity_tag(),
            "\"2025-05-02T08:30:00+00:00\""
        );
        assert!(project.list(ProjectListKind::Final).is_none());
    }

    #[rstest]
    #[case("2025-06-01T18:00:00")]
    #[case("2025-06-01T18:00:00.123456")]
    #[case("2025-06-01T18:00:00Z")]
    fn project_dates_without_offsets_decode_as_utc(#[case] raw: &str) {
        let project: Project = serde_json::from_value(json!({
            "id": "p-2",
            "title": "Юбилей",
            "lead_decorator": "Анна",
            "project_date": raw,
            "status": "Монтаж",
            "created_at": "2025-05-01T12:00:00",
            "updated_at": "2025-05-02T08:30:00"
        }))
        .expect("project should decode");
        assert_eq!(project.project_date.date_naive().to_string(), "2025-06-01");
        assert_eq!(project.project_date.format("%H:%M").to_string(), "18:00");
        assert_eq!(
            project.revision().as_entity_tag(),
            "\"2025-05-02T08:30:00+00:00\""
        );
    }
}
