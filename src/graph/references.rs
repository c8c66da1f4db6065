use std::sync::LazyLock;

use regex::Regex;

use crate::board::{Note, Project};

use super::model::{EdgeStyle, Graph, GraphEdge};

pub const REFERENCE_WEIGHT: f32 = 0.5;

// Shortest match, single line: `[[a]] and [[b]]` is two references.
static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").expect("reference pattern is valid"));

/// Names inside `[[...]]` in the order they appear, repeats included.
pub fn extract_references(content: &str) -> impl Iterator<Item = &str> {
    REFERENCE_PATTERN
        .captures_iter(content)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
}

fn note_titled<'a>(notes: &'a [Note], title: &str) -> Option<&'a Note> {
    notes.iter().find(|note| note.title == title)
}

/// Appends a dashed edge for every `[[Title]]` in a note that names another
/// note of the same project. Unknown titles and self references add nothing.
///
/// Returns the number of edges added.
pub fn resolve_references(project: &Project, graph: &mut Graph) -> usize {
    let mut added = 0usize;

    for note in &project.notes {
        for name in extract_references(&note.content) {
            let Some(target) = note_titled(&project.notes, name) else {
                tracing::debug!(
                    note = %note.id,
                    reference = name,
                    "dropping unresolved note reference"
                );
                continue;
            };

            if target.id == note.id {
                tracing::debug!(note = %note.id, reference = name, "dropping self reference");
                continue;
            }

            let pushed = graph.push_edge(GraphEdge {
                source: note.id.clone(),
                target: target.id.clone(),
                weight: REFERENCE_WEIGHT,
                style: EdgeStyle::Dashed,
            });
            if pushed {
                added += 1;
            }
        }
    }

    added
}
