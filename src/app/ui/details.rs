use eframe::egui::{self, Context, RichText, Ui};

use board_graph::graph::scene::tooltip_lines;
use board_graph::util::format_due_date;

use super::super::{GraphPane, ViewModel};

impl ViewModel {
    /// Details of the hovered or dragged node, with its direct neighbors.
    pub(in crate::app) fn draw_focus_details(&self, ui: &mut Ui) {
        ui.strong("Focus");
        let GraphPane::Open(session) = &self.graph else {
            return;
        };

        let Some(highlight) = session.highlight() else {
            ui.label(RichText::new("Hover a node to inspect it.").weak());
            return;
        };
        let graph = session.graph();
        let Some(node) = graph.node(highlight.focus) else {
            return;
        };

        ui.label(RichText::new(format!("{} {}", node.kind.icon(), node.label)).strong());
        ui.small(format!("{} · {}", node.kind.label(), node.id));
        for line in tooltip_lines(node) {
            ui.label(line);
        }

        let mut neighbors = highlight
            .nodes
            .iter()
            .filter(|&&index| index != highlight.focus)
            .filter_map(|&index| graph.node(index))
            .collect::<Vec<_>>();
        neighbors.sort_by(|a, b| a.label.cmp(&b.label));

        ui.add_space(4.0);
        ui.label(format!("{} connected", neighbors.len()));
        egui::ScrollArea::vertical()
            .id_salt("focus_neighbors")
            .max_height(200.0)
            .show(ui, |ui| {
                for neighbor in neighbors {
                    ui.label(format!("{} {}", neighbor.kind.icon(), neighbor.label));
                }
            });
    }

    pub(in crate::app) fn draw_dialogs(&mut self, ctx: &Context) {
        if let Some((list_id, card_id)) = self.dialogs.card.clone() {
            let mut open = true;
            egui::Window::new("Card")
                .id(egui::Id::new(("card_dialog", card_id.as_str())))
                .collapsible(false)
                .resizable(true)
                .default_width(320.0)
                .open(&mut open)
                .show(ctx, |ui| {
                    let Some((list, card)) = self.board.find_card(&list_id, &card_id) else {
                        ui.label("This card no longer exists.");
                        return;
                    };
                    ui.heading(card.title.as_str());
                    ui.small(format!("in {}", list.name));
                    ui.separator();
                    ui.label(format!("Priority: {}", card.priority.label()));
                    ui.label(format_due_date(card.due_date));
                    ui.label(if card.completed {
                        "Completed"
                    } else {
                        "Not completed"
                    });
                    if !card.tags.is_empty() {
                        ui.label(format!("Tags: {}", card.tags.join(", ")));
                    }
                    if !card.description.is_empty() {
                        ui.separator();
                        ui.label(card.description.as_str());
                    }
                });
            if !open {
                self.dialogs.card = None;
            }
        }

        if let Some(note_id) = self.dialogs.note.clone() {
            let mut open = true;
            egui::Window::new("Note")
                .id(egui::Id::new(("note_dialog", note_id.as_str())))
                .collapsible(false)
                .resizable(true)
                .default_width(360.0)
                .open(&mut open)
                .show(ctx, |ui| {
                    let Some(note) = self.board.find_note(&note_id) else {
                        ui.label("This note no longer exists.");
                        return;
                    };
                    ui.heading(note.title.as_str());
                    if !note.tags.is_empty() {
                        ui.small(format!("Tags: {}", note.tags.join(", ")));
                    }
                    ui.separator();
                    egui::ScrollArea::vertical()
                        .max_height(320.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(note.content.as_str()).monospace());
                        });
                });
            if !open {
                self.dialogs.note = None;
            }
        }
    }
}
