//! Knowledge graph of one project: builder, reference resolver, force layout,
//! viewport and pointer interaction.

pub mod build;
pub mod highlight;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod references;
pub mod scene;
pub mod search;
pub mod session;
pub mod style;
pub mod viewport;

pub use build::{build_graph, build_structure};
pub use interaction::{
    ActionSink, GraphAction, Interaction, InteractionState, PointerEvent, hit_test,
};
pub use layout::{Force, ForceField, LayoutBounds, LayoutConfig, Link, Simulation};
pub use model::{EdgeStyle, Graph, GraphEdge, GraphNode, NodeId, NodeKind, NodeMetadata, Pin};
pub use references::{extract_references, resolve_references};
pub use scene::{Emphasis, Scene, SceneEdge, SceneNode, Tooltip};
pub use session::{GraphOpen, GraphSession, SurfaceInfo, open_graph};
pub use viewport::{MAX_SCALE, MIN_SCALE, ViewportController, ViewportTransform};
