use std::collections::HashSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::model::Graph;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Fuzzy label matches for the graph search box, cached per query.
#[derive(Default)]
pub struct NodeSearch {
    matcher: SkimMatcherV2,
    query: String,
    matches: HashSet<usize>,
}

impl NodeSearch {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &HashSet<usize> {
        &self.matches
    }

    /// Re-runs the search when the trimmed query changed. A blank query
    /// matches nothing.
    pub fn update(&mut self, graph: &Graph, query: &str) -> &HashSet<usize> {
        let query = query.trim();
        if query == self.query {
            return &self.matches;
        }

        self.query = query.to_owned();
        self.matches.clear();
        if !query.is_empty() {
            let matcher = &self.matcher;
            self.matches.extend(
                graph
                    .nodes()
                    .iter()
                    .enumerate()
                    .filter(|(_, node)| fuzzy_match_score(matcher, &node.label, query).is_some())
                    .map(|(index, _)| index),
            );
        }
        tracing::debug!(query, matches = self.matches.len(), "node search");
        &self.matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::demo_board;
    use crate::graph::build::build_graph;

    #[test]
    fn blank_query_matches_nothing() {
        let graph = build_graph(&demo_board()[0]);
        let mut search = NodeSearch::default();
        assert!(search.update(&graph, "   ").is_empty());
    }

    #[test]
    fn matches_labels_case_insensitively() {
        let graph = build_graph(&demo_board()[0]);
        let mut search = NodeSearch::default();
        let matches = search.update(&graph, "ROADMAP").clone();
        assert!(matches.contains(&graph.index_of("note_launch_2").unwrap()));
        assert!(!matches.contains(&graph.index_of("list_launch_1").unwrap()));
    }

    #[test]
    fn requery_replaces_previous_matches() {
        let graph = build_graph(&demo_board()[0]);
        let mut search = NodeSearch::default();
        search.update(&graph, "roadmap");
        let matches = search.update(&graph, "zzzz-not-here").clone();
        assert!(matches.is_empty());
        assert_eq!(search.query(), "zzzz-not-here");
    }
}
