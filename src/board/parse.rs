use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

use super::model::Project;

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectsDocument {
    Bare(Vec<Project>),
    Wrapped { projects: Vec<Project> },
}

/// Parses a stored board: either a bare array of projects or an object with a
/// `projects` array.
pub fn parse_projects(raw: &str) -> serde_json::Result<Vec<Project>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: ProjectsDocument = serde_json::from_str(raw)?;
    Ok(match document {
        ProjectsDocument::Bare(projects) | ProjectsDocument::Wrapped { projects } => projects,
    })
}

/// Treats an explicit `null` the same as a missing field.
pub(super) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(super) fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

pub(super) mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        let parsed = raw.as_deref().and_then(super::parse_due_date);
        if parsed.is_none()
            && let Some(raw) = raw.as_deref()
            && !raw.trim().is_empty()
        {
            tracing::debug!(due_date = raw, "ignoring unparseable card due date");
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Priority;

    #[test]
    fn accepts_bare_and_wrapped_documents() {
        let bare = parse_projects(r#"[{"id":"p1","name":"One"}]"#).unwrap();
        let wrapped = parse_projects(r#"{"projects":[{"id":"p1","name":"One"}]}"#).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare[0].name, "One");
        assert!(bare[0].lists.is_empty());
    }

    #[test]
    fn blank_document_is_empty_board() {
        assert!(parse_projects("  \n").unwrap().is_empty());
    }

    #[test]
    fn nulls_and_unknown_values_fall_back_to_defaults() {
        let raw = r#"[{
            "id": "p1",
            "name": "Launch",
            "description": null,
            "lists": [{
                "id": "l1",
                "name": "To Do",
                "cards": [
                    {"id": "c1", "title": "A", "priority": "urgent", "dueDate": ""},
                    {"id": "c2", "title": "B", "priority": null, "completed": null, "tags": null},
                    {"id": "c3", "title": "C", "priority": "high", "dueDate": "2024-03-05"},
                    {"id": "c4", "title": "D", "priority": "medium",
                     "dueDate": "2024-03-05T10:00:00Z"},
                    {"id": "c5", "title": "E", "dueDate": "next week"}
                ]
            }],
            "notes": [{"id": "n1", "title": "Plan", "content": null}]
        }]"#;

        let projects = parse_projects(raw).unwrap();
        let cards = &projects[0].lists[0].cards;
        assert_eq!(cards[0].priority, Priority::Low);
        assert_eq!(cards[0].due_date, None);
        assert_eq!(cards[1].priority, Priority::Low);
        assert!(!cards[1].completed);
        assert!(cards[1].tags.is_empty());
        assert_eq!(cards[2].priority, Priority::High);
        assert_eq!(cards[2].due_date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(cards[3].priority, Priority::Medium);
        assert_eq!(cards[3].due_date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(cards[4].due_date, None);
        assert_eq!(projects[0].notes[0].content, "");
        assert_eq!(projects[0].description, "");
    }

    #[test]
    fn due_dates_serialize_as_plain_dates() {
        let card = crate::board::Card {
            id: "c1".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 9),
            ..Default::default()
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["dueDate"], "2025-01-09");
        assert_eq!(json["priority"], "low");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_projects("{not json").is_err());
    }
}
