use std::collections::HashSet;

use super::model::Graph;

/// The focused node with its first-degree neighborhood.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
    pub focus: usize,
    pub nodes: HashSet<usize>,
    /// Edge indices touching the focus, either direction.
    pub edges: HashSet<usize>,
}

impl Highlight {
    pub fn contains_node(&self, index: usize) -> bool {
        self.nodes.contains(&index)
    }

    pub fn contains_edge(&self, index: usize) -> bool {
        self.edges.contains(&index)
    }
}

fn collect_neighbors(
    graph: &Graph,
    edge_indices: &[usize],
    forward: bool,
    nodes: &mut HashSet<usize>,
    edges: &mut HashSet<usize>,
) {
    for &edge_index in edge_indices {
        let Some(&(source, target)) = graph.endpoints().get(edge_index) else {
            continue;
        };
        nodes.insert(if forward { target } else { source });
        edges.insert(edge_index);
    }
}

pub fn build_highlight(graph: &Graph, focus: usize) -> Option<Highlight> {
    graph.node(focus)?;

    let mut nodes = HashSet::from([focus]);
    let mut edges = HashSet::new();
    collect_neighbors(graph, graph.outgoing(focus), true, &mut nodes, &mut edges);
    collect_neighbors(graph, graph.incoming(focus), false, &mut nodes, &mut edges);

    Some(Highlight {
        focus,
        nodes,
        edges,
    })
}
