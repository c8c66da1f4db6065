use std::collections::BTreeSet;

use crate::board::Project;

use super::model::{EdgeStyle, Graph, GraphEdge, GraphNode, NodeKind};
use super::references::resolve_references;
use super::style::{LIST_COLOR, NOTE_COLOR, PROJECT_COLOR, priority_color};

pub const PROJECT_LIST_WEIGHT: f32 = 2.0;
pub const LIST_CARD_WEIGHT: f32 = 1.0;
pub const PROJECT_NOTE_WEIGHT: f32 = 1.5;

fn containment(source: &str, target: &str, weight: f32) -> GraphEdge {
    GraphEdge {
        source: source.to_owned(),
        target: target.to_owned(),
        weight,
        style: EdgeStyle::Solid,
    }
}

/// Full graph for a project: containment edges followed by note references.
pub fn build_graph(project: &Project) -> Graph {
    let mut graph = build_structure(project);
    let added = resolve_references(project, &mut graph);
    tracing::debug!(
        project = %project.id,
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        references = added,
        "built project graph"
    );
    graph
}

/// Project, list, card and note nodes with solid containment edges only.
///
/// Nodes come out as the project, then each list followed by its cards, then
/// the notes.
pub fn build_structure(project: &Project) -> Graph {
    let mut graph = Graph::default();

    graph.push_node(GraphNode::new(
        &project.id,
        &project.name,
        NodeKind::Project,
        PROJECT_COLOR,
    ));

    for list in &project.lists {
        let mut list_node = GraphNode::new(&list.id, &list.name, NodeKind::List, LIST_COLOR);
        list_node.parent = Some(project.id.clone());
        graph.push_node(list_node);
        graph.push_edge(containment(&project.id, &list.id, PROJECT_LIST_WEIGHT));

        for card in &list.cards {
            let mut card_node = GraphNode::new(
                &card.id,
                &card.title,
                NodeKind::Card,
                priority_color(card.priority),
            );
            card_node.parent = Some(list.id.clone());
            card_node.metadata.completed = Some(card.completed);
            card_node.metadata.due_date = card.due_date;
            graph.push_node(card_node);
            graph.push_edge(containment(&list.id, &card.id, LIST_CARD_WEIGHT));
        }
    }

    for note in &project.notes {
        let mut note_node = GraphNode::new(&note.id, &note.title, NodeKind::Note, NOTE_COLOR);
        note_node.parent = Some(project.id.clone());
        note_node.metadata.tags = Some(note.tags.iter().cloned().collect::<BTreeSet<_>>());
        graph.push_node(note_node);
        graph.push_edge(containment(&project.id, &note.id, PROJECT_NOTE_WEIGHT));
    }

    graph
}
