use std::collections::HashSet;

use eframe::egui::{Color32, Pos2};

use super::highlight::Highlight;
use super::interaction::Interaction;
use super::model::{EdgeStyle, Graph, GraphNode, NodeKind};
use super::style::{EDGE_COLOR, EDGE_HIGHLIGHT_COLOR, dim_color, edge_width};
use super::viewport::ViewportTransform;
use crate::util::format_due_date;

const DIMMED_FACTOR: f32 = 0.3;
const SEARCH_DIM_FACTOR: f32 = 0.6;
const MIN_EDGE_WIDTH: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Emphasis {
    Dimmed,
    Normal,
    Matched,
    Related,
    Focused,
}

/// One node resolved to surface pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode<'a> {
    pub index: usize,
    pub id: &'a str,
    pub kind: NodeKind,
    pub label_lines: &'a [String],
    pub position: Pos2,
    pub radius: f32,
    pub fill: Color32,
    pub emphasis: Emphasis,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
    pub index: usize,
    pub from: Pos2,
    pub to: Pos2,
    pub width: f32,
    pub color: Color32,
    pub dashed: bool,
    pub emphasis: Emphasis,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tooltip {
    pub anchor: Pos2,
    pub title: String,
    pub lines: Vec<String>,
}

/// What the renderer draws for one frame. Nodes come back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene<'a> {
    pub transform: ViewportTransform,
    pub nodes: Vec<SceneNode<'a>>,
    pub edges: Vec<SceneEdge>,
    pub tooltip: Option<Tooltip>,
}

pub struct SceneInputs<'a> {
    pub graph: &'a Graph,
    pub transform: ViewportTransform,
    pub interaction: &'a Interaction,
    pub highlight: Option<&'a Highlight>,
    pub search_matches: &'a HashSet<usize>,
    /// Wrapped label lines, one entry per node.
    pub labels: &'a [Vec<String>],
}

pub fn tooltip_lines(node: &GraphNode) -> Vec<String> {
    match node.kind {
        NodeKind::Card => {
            let state = if node.metadata.completed.unwrap_or(false) {
                "Completed"
            } else {
                "Not completed"
            };
            vec![format_due_date(node.metadata.due_date), state.to_owned()]
        }
        NodeKind::Note => {
            let tags = node
                .metadata
                .tags
                .as_ref()
                .filter(|tags| !tags.is_empty())
                .map(|tags| tags.iter().map(String::as_str).collect::<Vec<_>>().join(", "));
            vec![match tags {
                Some(tags) => format!("Tags: {tags}"),
                None => "No tags".to_owned(),
            }]
        }
        NodeKind::Project | NodeKind::List => vec![node.kind.label().to_owned()],
    }
}

fn node_emphasis(
    index: usize,
    highlight: Option<&Highlight>,
    matches: &HashSet<usize>,
) -> Emphasis {
    match highlight {
        Some(highlight) if highlight.focus == index => Emphasis::Focused,
        Some(highlight) if highlight.contains_node(index) => Emphasis::Related,
        Some(_) => Emphasis::Dimmed,
        None if matches.is_empty() => Emphasis::Normal,
        None if matches.contains(&index) => Emphasis::Matched,
        None => Emphasis::Dimmed,
    }
}

pub fn build_scene<'a>(inputs: SceneInputs<'a>) -> Scene<'a> {
    let SceneInputs {
        graph,
        transform,
        interaction,
        highlight,
        search_matches,
        labels,
    } = inputs;
    let dim_factor = if highlight.is_some() {
        DIMMED_FACTOR
    } else {
        SEARCH_DIM_FACTOR
    };

    let mut nodes = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let emphasis = node_emphasis(index, highlight, search_matches);
            let fill = if emphasis == Emphasis::Dimmed {
                dim_color(node.color, dim_factor)
            } else {
                node.color
            };
            SceneNode {
                index,
                id: node.id.as_str(),
                kind: node.kind,
                label_lines: labels.get(index).map(Vec::as_slice).unwrap_or_default(),
                position: transform.apply(node.position),
                radius: node.kind.display_radius()
                    * transform.scale
                    * interaction.pulse_scale(index),
                fill,
                emphasis,
            }
        })
        .collect::<Vec<_>>();
    nodes.sort_by_key(|node| node.emphasis);

    let edges = graph
        .edges()
        .iter()
        .zip(graph.endpoints())
        .enumerate()
        .map(|(index, (edge, &(source, target)))| {
            let emphasis = match highlight {
                Some(highlight) if highlight.contains_edge(index) => Emphasis::Related,
                Some(_) => Emphasis::Dimmed,
                None => Emphasis::Normal,
            };
            let color = match emphasis {
                Emphasis::Related => EDGE_HIGHLIGHT_COLOR,
                Emphasis::Dimmed => dim_color(EDGE_COLOR, DIMMED_FACTOR),
                _ => EDGE_COLOR,
            };
            SceneEdge {
                index,
                from: transform.apply(graph.nodes()[source].position),
                to: transform.apply(graph.nodes()[target].position),
                width: (edge_width(edge.weight) * transform.scale).max(MIN_EDGE_WIDTH),
                color,
                dashed: edge.style == EdgeStyle::Dashed,
                emphasis,
            }
        })
        .collect::<Vec<_>>();

    let tooltip = interaction.hovered().and_then(|index| {
        let node = graph.node(index)?;
        let radius = node.kind.display_radius() * transform.scale;
        let center = transform.apply(node.position);
        Some(Tooltip {
            anchor: Pos2::new(center.x + radius + 8.0, center.y - radius),
            title: format!("{} {}", node.kind.icon(), node.label),
            lines: tooltip_lines(node),
        })
    });

    Scene {
        transform,
        nodes,
        edges,
        tooltip,
    }
}
