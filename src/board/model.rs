use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::parse::{due_date, nullable};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    #[default]
    #[serde(other)]
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "nullable")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "nullable")]
    pub completed: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub cards: Vec<Card>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub content: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub lists: Vec<List>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Vec<Note>,
}

impl Project {
    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|list| list.cards.len()).sum()
    }
}

/// Totals across every project on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub projects: usize,
    pub tasks: usize,
    pub completed: usize,
}

impl ProjectStats {
    pub fn collect(projects: &[Project]) -> Self {
        let mut stats = Self {
            projects: projects.len(),
            ..Self::default()
        };

        for card in projects
            .iter()
            .flat_map(|project| &project.lists)
            .flat_map(|list| &list.cards)
        {
            stats.tasks += 1;
            if card.completed {
                stats.completed += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, completed: bool) -> Card {
        Card {
            id: id.to_owned(),
            title: id.to_owned(),
            completed,
            ..Card::default()
        }
    }

    #[test]
    fn stats_count_cards_across_projects() {
        let projects = vec![
            Project {
                id: "a".into(),
                lists: vec![List {
                    id: "l1".into(),
                    cards: vec![card("c1", true), card("c2", false)],
                    ..List::default()
                }],
                ..Project::default()
            },
            Project {
                id: "b".into(),
                lists: vec![
                    List {
                        id: "l2".into(),
                        cards: vec![card("c3", true)],
                        ..List::default()
                    },
                    List::default(),
                ],
                ..Project::default()
            },
        ];

        let stats = ProjectStats::collect(&projects);
        assert_eq!(
            stats,
            ProjectStats {
                projects: 2,
                tasks: 3,
                completed: 2,
            }
        );
        assert_eq!(projects[1].card_count(), 1);
    }

    #[test]
    fn empty_board_has_zero_stats() {
        assert_eq!(ProjectStats::collect(&[]), ProjectStats::default());
    }
}
