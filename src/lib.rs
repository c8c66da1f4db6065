//! Kanban board data and the project knowledge graph built from it.

pub mod board;
pub mod graph;
pub mod logging;
pub mod util;
