use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use eframe::egui::{Color32, Vec2};

pub type NodeId = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Project,
    List,
    Card,
    Note,
}

impl NodeKind {
    /// Radius used by the collision force. Larger than the drawn circle so
    /// labels under neighbouring nodes stay readable.
    pub fn collision_radius(self) -> f32 {
        match self {
            Self::Project => 50.0,
            Self::List => 40.0,
            Self::Card | Self::Note => 30.0,
        }
    }

    pub fn display_radius(self) -> f32 {
        match self {
            Self::Project => 30.0,
            Self::List => 20.0,
            Self::Card | Self::Note => 15.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::List => "List",
            Self::Card => "Card",
            Self::Note => "Note",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Project => "📋",
            Self::List => "📑",
            Self::Card => "📝",
            Self::Note => "📌",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeMetadata {
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
    pub tags: Option<BTreeSet<String>>,
}

/// Fixed-position override. Only set while the node is being dragged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pin {
    pub fx: Option<f32>,
    pub fy: Option<f32>,
}

impl Pin {
    pub fn at(position: Vec2) -> Self {
        Self {
            fx: Some(position.x),
            fy: Some(position.y),
        }
    }

    pub fn is_set(self) -> bool {
        self.fx.is_some() || self.fy.is_some()
    }

    pub fn clear(&mut self) {
        self.fx = None;
        self.fy = None;
    }
}

#[derive(Clone, Debug)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    pub color: Color32,
    pub metadata: NodeMetadata,
    /// Structural owner: the list for a card, the project for lists and notes.
    pub parent: Option<NodeId>,
    pub position: Vec2,
    pub velocity: Vec2,
    pub pin: Pin,
}

impl GraphNode {
    pub fn new(
        id: impl Into<NodeId>,
        label: impl Into<String>,
        kind: NodeKind,
        color: Color32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            color,
            metadata: NodeMetadata::default(),
            parent: None,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            pin: Pin::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeStyle {
    /// Structural containment.
    Solid,
    /// Inferred note-to-note reference.
    Dashed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f32,
    pub style: EdgeStyle,
}

/// Nodes and edges for one open graph view, plus index lookups.
///
/// Every stored edge resolves to two nodes of the same graph; edges naming an
/// unknown node are refused by [`Graph::push_edge`].
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    endpoints: Vec<(usize, usize)>,
    index_by_id: HashMap<NodeId, usize>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl Graph {
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [GraphNode] {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, index: usize) -> Option<&GraphNode> {
        self.nodes.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Node indices of each edge, in edge order.
    pub fn endpoints(&self) -> &[(usize, usize)] {
        &self.endpoints
    }

    /// Edge indices leaving `index`.
    pub fn outgoing(&self, index: usize) -> &[usize] {
        self.outgoing.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Edge indices arriving at `index`.
    pub fn incoming(&self, index: usize) -> &[usize] {
        self.incoming.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn dashed_edge_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.style == EdgeStyle::Dashed)
            .count()
    }

    pub fn push_node(&mut self, node: GraphNode) -> usize {
        let index = self.nodes.len();
        self.index_by_id.entry(node.id.clone()).or_insert(index);
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        index
    }

    /// Appends an edge when both endpoints exist. Parallel edges are kept.
    pub fn push_edge(&mut self, edge: GraphEdge) -> bool {
        let (Some(source), Some(target)) =
            (self.index_of(&edge.source), self.index_of(&edge.target))
        else {
            return false;
        };

        let edge_index = self.edges.len();
        self.edges.push(edge);
        self.endpoints.push((source, target));
        self.outgoing[source].push(edge_index);
        self.incoming[target].push(edge_index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> GraphNode {
        GraphNode::new(id, id, NodeKind::Note, Color32::WHITE)
    }

    fn edge(source: &str, target: &str) -> GraphEdge {
        GraphEdge {
            source: source.to_owned(),
            target: target.to_owned(),
            weight: 1.0,
            style: EdgeStyle::Solid,
        }
    }

    #[test]
    fn edges_to_unknown_nodes_are_refused() {
        let mut graph = Graph::default();
        graph.push_node(node("a"));

        assert!(!graph.push_edge(edge("a", "b")));
        assert!(!graph.push_edge(edge("b", "a")));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn parallel_edges_share_adjacency() {
        let mut graph = Graph::default();
        let a = graph.push_node(node("a"));
        let b = graph.push_node(node("b"));

        assert!(graph.push_edge(edge("a", "b")));
        assert!(graph.push_edge(edge("a", "b")));

        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.outgoing(a), &[0, 1]);
        assert_eq!(graph.incoming(b), &[0, 1]);
        assert_eq!(graph.endpoints(), &[(a, b), (a, b)]);
        assert!(graph.outgoing(42).is_empty());
    }

    #[test]
    fn pin_round_trip() {
        let mut pin = Pin::at(Vec2::new(3.0, 4.0));
        assert!(pin.is_set());
        assert_eq!((pin.fx, pin.fy), (Some(3.0), Some(4.0)));
        pin.clear();
        assert!(!pin.is_set());
    }
}
