use eframe::egui::{self, Key, Response, RichText, Ui, vec2};

use board_graph::graph::LayoutConfig;
use board_graph::graph::style::LEGEND;

use super::super::{GraphPane, ViewModel};

const SLIDER_KEY_BASE_RATE: f32 = 10.0;
const SLIDER_KEY_ACCEL_PER_SEC: f32 = 9.0;
const SLIDER_KEY_ACCEL_MAX: f32 = 40.0;

#[derive(Clone, Copy, Default)]
struct SliderKeyHoldState {
    positive_secs: f32,
    negative_secs: f32,
}

fn slider_key_accel_multiplier(hold_secs: f32) -> f32 {
    let ramp = hold_secs * SLIDER_KEY_ACCEL_PER_SEC;
    (1.0 + ramp + ramp * ramp * 0.15).min(SLIDER_KEY_ACCEL_MAX)
}

/// Holding an arrow key on a focused slider speeds up the longer it is held.
fn apply_slider_arrow_acceleration(
    ui: &Ui,
    response: &Response,
    value: &mut f32,
    min: f32,
    max: f32,
) -> bool {
    let state_id = response.id.with("arrow_key_hold_state");
    let mut hold_state = ui.ctx().data(|data| {
        data.get_temp::<SliderKeyHoldState>(state_id)
            .unwrap_or_default()
    });

    if !response.has_focus() {
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, SliderKeyHoldState::default()));
        return false;
    }

    let (delta_time, increase_down, decrease_down) = ui.input(|input| {
        (
            input.stable_dt.min(0.1),
            input.key_down(Key::ArrowRight) || input.key_down(Key::ArrowUp),
            input.key_down(Key::ArrowLeft) || input.key_down(Key::ArrowDown),
        )
    });

    hold_state.positive_secs = if increase_down {
        hold_state.positive_secs + delta_time
    } else {
        0.0
    };
    hold_state.negative_secs = if decrease_down {
        hold_state.negative_secs + delta_time
    } else {
        0.0
    };

    let direction = (increase_down as i8) - (decrease_down as i8);
    ui.ctx()
        .data_mut(|data| data.insert_temp(state_id, hold_state));
    if direction == 0 {
        return false;
    }

    let hold_secs = if direction > 0 {
        hold_state.positive_secs
    } else {
        hold_state.negative_secs
    };
    let step = ((max - min) / 200.0).max(0.0005);
    let speed = SLIDER_KEY_BASE_RATE * slider_key_accel_multiplier(hold_secs);
    let old_value = *value;
    *value = (*value + direction as f32 * step * speed * delta_time).clamp(min, max);
    ui.ctx().request_repaint();
    (*value - old_value).abs() > f32::EPSILON
}

fn tuning_slider(ui: &mut Ui, value: &mut f32, min: f32, max: f32, label: &str, hint: &str) {
    let response = ui
        .add(egui::Slider::new(&mut *value, min..=max).text(label))
        .on_hover_text(hint);
    apply_slider_arrow_acceleration(ui, &response, value, min, max);
}

impl ViewModel {
    pub(in crate::app) fn draw_projects(&mut self, ui: &mut Ui) {
        ui.heading("Projects");
        ui.separator();

        let current = self
            .board
            .current_project()
            .map(|project| project.id.clone());
        let mut picked = None;
        egui::ScrollArea::vertical()
            .max_height(240.0)
            .show(ui, |ui| {
                if self.board.projects().is_empty() {
                    ui.label(RichText::new("No projects yet.").weak());
                }
                for project in self.board.projects() {
                    let selected = current.as_deref() == Some(project.id.as_str());
                    let label = format!("📋 {}  ({} cards)", project.name, project.card_count());
                    if ui.selectable_label(selected, label).clicked() {
                        picked = Some(project.id.clone());
                    }
                }
            });
        if let Some(project_id) = picked {
            self.select_project(&project_id);
        }

        ui.add_space(8.0);
        let has_project = current.is_some();
        let is_open = !matches!(self.graph, GraphPane::Closed);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(has_project && !is_open, egui::Button::new("Open graph"))
                .on_hover_text("Build the knowledge graph of the selected project.")
                .clicked()
            {
                self.open_requested = true;
            }
            if ui
                .add_enabled(is_open, egui::Button::new("Close graph"))
                .clicked()
            {
                self.close_graph();
            }
        });

        ui.add_space(8.0);
        egui::CollapsingHeader::new("Layout tuning")
            .default_open(false)
            .show(ui, |ui| self.draw_layout_tuning(ui));

        ui.add_space(8.0);
        ui.separator();
        ui.strong("Legend");
        for (name, color) in LEGEND {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 6.0, color);
                ui.label(name);
            });
        }
        ui.horizontal(|ui| {
            ui.label(RichText::new("- - -").monospace());
            ui.label("Note reference");
        });
    }

    fn draw_layout_tuning(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Applies the next time the graph opens.").small().weak());
        let layout = &mut self.layout;
        tuning_slider(
            ui,
            &mut layout.link_distance,
            30.0,
            300.0,
            "Link distance",
            "Resting length of every edge, in layout units.",
        );
        tuning_slider(
            ui,
            &mut layout.link_strength,
            0.05,
            1.0,
            "Link strength",
            "Spring stiffness before scaling by edge weight.",
        );
        tuning_slider(
            ui,
            &mut layout.charge_strength,
            -1_500.0,
            -10.0,
            "Charge",
            "Pairwise repulsion; more negative pushes nodes further apart.",
        );
        tuning_slider(
            ui,
            &mut layout.center_strength,
            0.0,
            0.5,
            "Centering",
            "Pull of the graph's centroid toward the middle of the canvas.",
        );
        tuning_slider(
            ui,
            &mut layout.collision_strength,
            0.0,
            1.0,
            "Collision",
            "How firmly overlapping nodes are separated.",
        );
        tuning_slider(
            ui,
            &mut layout.velocity_decay,
            0.05,
            0.9,
            "Friction",
            "Fraction of velocity lost every tick.",
        );
        if ui.button("Restore defaults").clicked() {
            self.layout = LayoutConfig::default();
        }
    }

    pub(in crate::app) fn draw_graph_controls(&mut self, ui: &mut Ui) {
        let GraphPane::Open(session) = &mut self.graph else {
            return;
        };

        ui.heading("Graph");
        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Zoom in").clicked() {
                session.zoom(1.2);
            }
            if ui.button("Zoom out").clicked() {
                session.zoom(0.8);
            }
            if ui.button("Reset view").clicked() {
                session.reset_view();
            }
            ui.label(format!("{:.0}%", session.viewport().transform().scale * 100.0));
        });

        let graph = session.graph();
        ui.label(format!(
            "{} nodes, {} edges ({} references)",
            graph.nodes().len(),
            graph.edges().len(),
            graph.dashed_edge_count()
        ));
        let status = if session.simulation().is_settled() {
            "settled"
        } else {
            "moving"
        };
        ui.label(RichText::new(format!("layout {status}")).small().weak());

        ui.separator();
        ui.label("Search nodes")
            .on_hover_text("Fuzzy-highlight nodes whose label matches.");
        ui.text_edit_singleline(&mut self.search);
        let matches = session.search(&self.search);
        if !self.search.trim().is_empty() {
            ui.label(RichText::new(format!("{matches} matching")).small().weak());
        }

        ui.separator();
        self.draw_focus_details(ui);
    }
}
