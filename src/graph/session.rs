use eframe::egui::{Pos2, Vec2};

use crate::board::BoardState;
use crate::util::{LABEL_LINE_WIDTH, wrap_label};

use super::build::build_graph;
use super::highlight::{Highlight, build_highlight};
use super::interaction::{GraphAction, Interaction, PointerEvent};
use super::layout::{LayoutBounds, LayoutConfig, Simulation};
use super::model::Graph;
use super::scene::{Scene, SceneInputs, build_scene};
use super::search::NodeSearch;
use super::viewport::ViewportController;

pub const FALLBACK_MESSAGE: &str =
    "Graph view unavailable: the OpenGL renderer could not be loaded.";

/// The drawing surface offered to the graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceInfo {
    pub size: Vec2,
    /// Whether the renderer the canvas needs is available.
    pub backend_ready: bool,
}

pub enum GraphOpen {
    Opened(Box<GraphSession>),
    /// The view cannot be drawn; show this instead.
    Fallback(String),
    /// No current project.
    Skipped,
}

/// Builds a fresh graph for the current project and starts its layout.
///
/// Nothing is kept between opens: every call rebuilds the graph, reseeds the
/// layout and resets the viewport.
pub fn open_graph(state: &BoardState, surface: SurfaceInfo, config: LayoutConfig) -> GraphOpen {
    let Some(project) = state.current_project() else {
        tracing::debug!(user = state.user_id(), "no current project; graph not opened");
        return GraphOpen::Skipped;
    };

    if !surface.backend_ready {
        tracing::warn!(project = %project.id, "renderer unavailable; showing graph fallback");
        return GraphOpen::Fallback(FALLBACK_MESSAGE.to_owned());
    }

    let mut graph = build_graph(project);
    let simulation = Simulation::new(config, LayoutBounds::new(surface.size, config.margin));
    simulation.seed_positions(&mut graph);
    let labels = graph
        .nodes()
        .iter()
        .map(|node| wrap_label(&node.label, LABEL_LINE_WIDTH))
        .collect();

    tracing::info!(
        project = %project.id,
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        dashed = graph.dashed_edge_count(),
        "opened graph view"
    );

    GraphOpen::Opened(Box::new(GraphSession {
        project_id: project.id.clone(),
        graph,
        simulation,
        viewport: ViewportController::new(surface.size),
        interaction: Interaction::default(),
        search: NodeSearch::default(),
        highlight: None,
        labels,
    }))
}

/// One open graph view. Dropping it (or [`GraphSession::close`]) stops the
/// layout and discards all view state.
pub struct GraphSession {
    project_id: String,
    graph: Graph,
    simulation: Simulation,
    viewport: ViewportController,
    interaction: Interaction,
    search: NodeSearch,
    highlight: Option<Highlight>,
    labels: Vec<Vec<String>>,
}

impl GraphSession {
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Runs one layout tick and advances animations. Returns whether another
    /// frame is needed.
    pub fn frame(&mut self, dt: f32) -> bool {
        let moved = self
            .simulation
            .tick(&mut self.graph, self.interaction.state());
        let animating = self.viewport.advance(dt);
        self.interaction.advance(dt);
        moved || animating || self.interaction.is_pulsing()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<GraphAction> {
        let action = self
            .interaction
            .handle(event, &self.graph, self.viewport.transform());
        self.refresh_highlight();
        action
    }

    fn refresh_highlight(&mut self) {
        let focus = self.interaction.state().focus();
        if self.highlight.as_ref().map(|highlight| highlight.focus) == focus {
            return;
        }
        self.highlight = focus.and_then(|index| build_highlight(&self.graph, index));
    }

    pub fn zoom(&mut self, factor: f32) {
        self.viewport.zoom(factor);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset_view();
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.viewport.pan_by(delta);
    }

    pub fn zoom_at(&mut self, factor: f32, anchor: Pos2) {
        self.viewport.zoom_at(factor, anchor);
    }

    /// Follows a new surface size; positions are re-clamped on the next tick.
    pub fn resize(&mut self, size: Vec2) {
        if self.viewport.size() == size {
            return;
        }
        tracing::debug!(width = size.x, height = size.y, "graph surface resized");
        self.simulation.set_bounds(size);
        self.viewport.resize(size);
    }

    pub fn search(&mut self, query: &str) -> usize {
        self.search.update(&self.graph, query).len()
    }

    pub fn search_query(&self) -> &str {
        self.search.query()
    }

    pub fn scene(&self) -> Scene<'_> {
        build_scene(SceneInputs {
            graph: &self.graph,
            transform: self.viewport.transform(),
            interaction: &self.interaction,
            highlight: self.highlight.as_ref(),
            search_matches: self.search.matches(),
            labels: &self.labels,
        })
    }

    pub fn close(self) {
        tracing::info!(project = %self.project_id, "closed graph view");
    }
}
