use chrono::NaiveDate;

use super::model::{Card, List, Note, Priority, Project};

fn card(id: &str, title: &str, priority: Priority, due: Option<(i32, u32, u32)>) -> Card {
    Card {
        id: id.to_owned(),
        title: title.to_owned(),
        priority,
        due_date: due.and_then(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day)),
        ..Card::default()
    }
}

fn note(id: &str, title: &str, content: &str, tags: &[&str]) -> Note {
    Note {
        id: id.to_owned(),
        title: title.to_owned(),
        content: content.to_owned(),
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
    }
}

/// Sample board used by `--seed-demo`.
pub fn demo_board() -> Vec<Project> {
    let mut shipped = card(
        "card_launch_4",
        "Write release notes",
        Priority::Low,
        Some((2025, 2, 28)),
    );
    shipped.completed = true;

    let launch = Project {
        id: "project_launch".to_owned(),
        name: "Launch".to_owned(),
        description: "Public launch of the new site".to_owned(),
        lists: vec![
            List {
                id: "list_launch_1".to_owned(),
                name: "To Do".to_owned(),
                cards: vec![
                    card(
                        "card_launch_1",
                        "Finalize pricing page",
                        Priority::High,
                        Some((2025, 3, 14)),
                    ),
                    card("card_launch_2", "Press kit", Priority::Medium, None),
                ],
            },
            List {
                id: "list_launch_2".to_owned(),
                name: "In Progress".to_owned(),
                cards: vec![card(
                    "card_launch_3",
                    "Load testing",
                    Priority::High,
                    Some((2025, 3, 7)),
                )],
            },
            List {
                id: "list_launch_3".to_owned(),
                name: "Done".to_owned(),
                cards: vec![shipped],
            },
        ],
        notes: vec![
            note(
                "note_launch_1",
                "Plan",
                "# Plan\nMilestones live in [[Roadmap]].\nRisks are tracked in [[Risks]].",
                &["planning"],
            ),
            note(
                "note_launch_2",
                "Roadmap",
                "Derived from the [[Plan]]. Budget sign-off pending in [[Budget]].",
                &["planning", "dates"],
            ),
            note(
                "note_launch_3",
                "Risks",
                "- traffic spike on day one\n- see [[Plan]] for mitigations",
                &["risk"],
            ),
        ],
    };

    let personal = Project {
        id: "project_personal".to_owned(),
        name: "Personal".to_owned(),
        description: String::new(),
        lists: vec![List {
            id: "list_personal_1".to_owned(),
            name: "To Do".to_owned(),
            cards: vec![card("card_personal_1", "Renew passport", Priority::Medium, None)],
        }],
        notes: Vec::new(),
    };

    vec![launch, personal]
}
