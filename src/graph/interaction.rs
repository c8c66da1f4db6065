use eframe::egui::{Pos2, Vec2};

use super::model::{Graph, NodeKind};
use super::viewport::ViewportTransform;

/// Pointer travel, in pixels, below which a press and release is a click.
pub const CLICK_TOLERANCE: f32 = 3.0;
pub const PULSE_DURATION_SECS: f32 = 0.3;
/// Minimum pick radius in pixels, so small zoomed-out nodes stay grabbable.
const MIN_PICK_RADIUS: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
    pub node: usize,
    /// Where the node is pinned, in model coordinates.
    pub pointer: Vec2,
    /// Node position minus pointer position at the press, in model units.
    pub grab: Vec2,
    /// Screen position of the press.
    pub press: Pos2,
    pub moved: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovering(usize),
    Dragging(Drag),
}

impl InteractionState {
    /// The dragged node and its pin position.
    pub fn drag_target(&self) -> Option<(usize, Vec2)> {
        match self {
            Self::Dragging(drag) => Some((drag.node, drag.pointer)),
            _ => None,
        }
    }

    /// Node whose neighborhood is highlighted.
    pub fn focus(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Hovering(node) => Some(*node),
            Self::Dragging(drag) => Some(drag.node),
        }
    }
}

/// Pointer input in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Moved(Pos2),
    Pressed(Pos2),
    Released(Pos2),
    Left,
}

/// Requests the graph hands to the card editor and note viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphAction {
    OpenCardEditor { list_id: String, card_id: String },
    OpenNoteView { note_id: String },
}

pub trait ActionSink {
    fn open_card_editor(&mut self, list_id: &str, card_id: &str);

    fn open_note_view(&mut self, note_id: &str);
}

impl GraphAction {
    pub fn dispatch(&self, sink: &mut dyn ActionSink) {
        tracing::info!(action = ?self, "delegating graph action");
        match self {
            Self::OpenCardEditor { list_id, card_id } => sink.open_card_editor(list_id, card_id),
            Self::OpenNoteView { note_id } => sink.open_note_view(note_id),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Pulse {
    node: usize,
    elapsed: f32,
}

/// Node whose drawn circle contains `screen`. Among overlapping circles the
/// closest center wins.
pub fn hit_test(graph: &Graph, transform: ViewportTransform, screen: Pos2) -> Option<usize> {
    graph
        .nodes()
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let center = transform.apply(node.position);
            let radius = (node.kind.display_radius() * transform.scale).max(MIN_PICK_RADIUS);
            let distance = center.distance(screen);
            (distance <= radius).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

fn click_action(graph: &Graph, index: usize) -> Option<GraphAction> {
    let node = graph.node(index)?;
    match node.kind {
        NodeKind::Card => Some(GraphAction::OpenCardEditor {
            list_id: node.parent.clone()?,
            card_id: node.id.clone(),
        }),
        NodeKind::Note => Some(GraphAction::OpenNoteView {
            note_id: node.id.clone(),
        }),
        NodeKind::Project | NodeKind::List => None,
    }
}

/// Hover, drag and click handling for one open graph view.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    state: InteractionState,
    pulse: Option<Pulse>,
}

impl Interaction {
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn hovered(&self) -> Option<usize> {
        match self.state {
            InteractionState::Hovering(node) => Some(node),
            _ => None,
        }
    }

    pub fn dragging(&self) -> Option<usize> {
        self.state.drag_target().map(|(node, _)| node)
    }

    /// Feeds one pointer event through the state machine. A click on a card
    /// or note yields the action to delegate.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        graph: &Graph,
        transform: ViewportTransform,
    ) -> Option<GraphAction> {
        match (self.state, event) {
            (InteractionState::Dragging(mut drag), PointerEvent::Moved(screen)) => {
                drag.moved |= drag.press.distance(screen) > CLICK_TOLERANCE;
                if drag.moved {
                    drag.pointer = transform.invert(screen) + drag.grab;
                }
                self.state = InteractionState::Dragging(drag);
                None
            }
            (InteractionState::Dragging(drag), PointerEvent::Released(screen)) => {
                let moved = drag.moved || drag.press.distance(screen) > CLICK_TOLERANCE;
                self.state = match hit_test(graph, transform, screen) {
                    Some(node) => InteractionState::Hovering(node),
                    None => InteractionState::Idle,
                };
                if moved {
                    tracing::debug!(node = drag.node, "drag released");
                    return None;
                }

                self.pulse = Some(Pulse {
                    node: drag.node,
                    elapsed: 0.0,
                });
                click_action(graph, drag.node)
            }
            (InteractionState::Dragging(_), PointerEvent::Left) => {
                self.state = InteractionState::Idle;
                None
            }
            (InteractionState::Dragging(_), PointerEvent::Pressed(_)) => None,
            (_, PointerEvent::Moved(screen)) => {
                self.state = match hit_test(graph, transform, screen) {
                    Some(node) => InteractionState::Hovering(node),
                    None => InteractionState::Idle,
                };
                None
            }
            (_, PointerEvent::Pressed(screen)) => {
                if let Some(node) = hit_test(graph, transform, screen)
                    && let Some(position) = graph.node(node).map(|node| node.position)
                {
                    self.state = InteractionState::Dragging(Drag {
                        node,
                        pointer: position,
                        grab: position - transform.invert(screen),
                        press: screen,
                        moved: false,
                    });
                }
                None
            }
            (_, PointerEvent::Released(screen)) => {
                self.state = match hit_test(graph, transform, screen) {
                    Some(node) => InteractionState::Hovering(node),
                    None => InteractionState::Idle,
                };
                None
            }
            (_, PointerEvent::Left) => {
                self.state = InteractionState::Idle;
                None
            }
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(pulse) = &mut self.pulse {
            pulse.elapsed += dt.max(0.0);
            if pulse.elapsed >= PULSE_DURATION_SECS {
                self.pulse = None;
            }
        }
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse.is_some()
    }

    /// Radius multiplier of the click pulse: grows to 1.5 and back.
    pub fn pulse_scale(&self, node: usize) -> f32 {
        match self.pulse {
            Some(pulse) if pulse.node == node => {
                let t = (pulse.elapsed / PULSE_DURATION_SECS).clamp(0.0, 1.0);
                1.0 + 0.5 * (t * std::f32::consts::PI).sin()
            }
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;
    use crate::board::demo_board;
    use crate::graph::build::build_graph;

    /// Launch graph with every node laid out on a row, 100 units apart.
    fn row_graph() -> Graph {
        let mut graph = build_graph(&demo_board()[0]);
        for (index, node) in graph.nodes_mut().iter_mut().enumerate() {
            node.position = vec2(50.0 + index as f32 * 100.0, 50.0);
        }
        graph
    }

    fn screen_of(graph: &Graph, id: &str) -> Pos2 {
        let index = graph.index_of(id).unwrap();
        ViewportTransform::IDENTITY.apply(graph.nodes()[index].position)
    }

    fn click(interaction: &mut Interaction, graph: &Graph, at: Pos2) -> Option<GraphAction> {
        let transform = ViewportTransform::IDENTITY;
        interaction.handle(PointerEvent::Pressed(at), graph, transform);
        interaction.handle(PointerEvent::Released(at + vec2(1.0, 1.0)), graph, transform)
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl ActionSink for Recorder {
        fn open_card_editor(&mut self, list_id: &str, card_id: &str) {
            self.0.push(format!("card {list_id}/{card_id}"));
        }

        fn open_note_view(&mut self, note_id: &str) {
            self.0.push(format!("note {note_id}"));
        }
    }

    #[test]
    fn hover_enters_and_leaves() {
        let graph = row_graph();
        let mut interaction = Interaction::default();
        let transform = ViewportTransform::IDENTITY;

        let list = screen_of(&graph, "list_launch_1");
        interaction.handle(PointerEvent::Moved(list), &graph, transform);
        assert_eq!(interaction.hovered(), graph.index_of("list_launch_1"));

        interaction.handle(PointerEvent::Moved(pos2(5_000.0, 5_000.0)), &graph, transform);
        assert_eq!(*interaction.state(), InteractionState::Idle);

        let project = screen_of(&graph, "project_launch");
        interaction.handle(PointerEvent::Moved(project), &graph, transform);
        interaction.handle(PointerEvent::Left, &graph, transform);
        assert_eq!(interaction.state().focus(), None);
    }

    #[test]
    fn clicking_a_card_opens_its_editor() {
        let graph = row_graph();
        let mut interaction = Interaction::default();
        let action = click(&mut interaction, &graph, screen_of(&graph, "card_launch_1"));
        assert_eq!(
            action,
            Some(GraphAction::OpenCardEditor {
                list_id: "list_launch_1".into(),
                card_id: "card_launch_1".into(),
            })
        );

        let mut sink = Recorder::default();
        if let Some(action) = action {
            action.dispatch(&mut sink);
        }
        assert_eq!(sink.0, ["card list_launch_1/card_launch_1"]);
    }

    #[test]
    fn clicking_a_note_opens_it_and_lists_do_nothing_but_pulse() {
        let graph = row_graph();
        let mut interaction = Interaction::default();

        let note = graph.index_of("note_launch_1").unwrap();
        assert_eq!(
            click(&mut interaction, &graph, screen_of(&graph, "note_launch_1")),
            Some(GraphAction::OpenNoteView {
                note_id: "note_launch_1".into()
            })
        );
        assert!(interaction.pulse_scale(note) >= 1.0);

        let list = graph.index_of("list_launch_2").unwrap();
        assert_eq!(click(&mut interaction, &graph, screen_of(&graph, "list_launch_2")), None);
        assert!(interaction.is_pulsing());
        interaction.advance(PULSE_DURATION_SECS * 0.5);
        assert!((interaction.pulse_scale(list) - 1.5).abs() < 1e-4);
        assert_eq!(interaction.pulse_scale(note), 1.0);
        interaction.advance(PULSE_DURATION_SECS);
        assert!(!interaction.is_pulsing());
        assert_eq!(interaction.pulse_scale(list), 1.0);
    }

    #[test]
    fn dragging_moves_the_pin_and_suppresses_the_click() {
        let graph = row_graph();
        let mut interaction = Interaction::default();
        let transform = ViewportTransform::IDENTITY;
        let card = graph.index_of("card_launch_2").unwrap();
        let press = screen_of(&graph, "card_launch_2") + vec2(2.0, 0.0);

        interaction.handle(PointerEvent::Pressed(press), &graph, transform);
        assert_eq!(interaction.dragging(), Some(card));
        assert_eq!(interaction.state().focus(), Some(card));

        interaction.handle(PointerEvent::Moved(press + vec2(1.0, 1.0)), &graph, transform);
        assert_eq!(
            interaction.state().drag_target(),
            Some((card, graph.nodes()[card].position))
        );

        interaction.handle(PointerEvent::Moved(press + vec2(40.0, 30.0)), &graph, transform);
        let (_, pin) = interaction.state().drag_target().unwrap();
        assert_eq!(pin, graph.nodes()[card].position + vec2(40.0, 30.0));

        let action = interaction.handle(PointerEvent::Released(press), &graph, transform);
        assert_eq!(action, None);
        assert_eq!(interaction.dragging(), None);
        assert!(!interaction.is_pulsing());
    }

    #[test]
    fn picking_respects_zoom_and_prefers_the_closest_center() {
        let graph = row_graph();
        let zoomed_out = ViewportTransform {
            translate: Vec2::ZERO,
            scale: 0.1,
        };
        let project = graph.index_of("project_launch").unwrap();
        let at = zoomed_out.apply(graph.nodes()[project].position);
        assert_eq!(hit_test(&graph, zoomed_out, at), Some(project));
        assert_eq!(hit_test(&graph, zoomed_out, at + vec2(0.0, 3.5)), Some(project));
        assert_eq!(hit_test(&graph, ViewportTransform::IDENTITY, pos2(-100.0, -100.0)), None);
    }
}
