use eframe::egui::{self, Align, Context, Layout, RichText};

use board_graph::graph::{GraphOpen, SurfaceInfo, open_graph};

use super::super::{GraphPane, ViewModel};

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context, backend_ready: bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Board graph");
                    ui.separator();
                    ui.label(format!("user: {}", self.board.user_id()));
                    let stats = self.board.stats();
                    ui.label(format!("projects: {}", stats.projects));
                    ui.label(format!("tasks: {}", stats.tasks));
                    ui.label(format!("completed: {}", stats.completed));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new(self.board_path.display().to_string())
                                .small()
                                .weak(),
                        );
                    });
                });
            });

        egui::SidePanel::left("projects")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_projects(ui));

        if matches!(self.graph, GraphPane::Open(_)) {
            egui::SidePanel::right("graph_controls")
                .resizable(true)
                .default_width(300.0)
                .show(ctx, |ui| self.draw_graph_controls(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.open_requested {
                self.open_requested = false;
                let surface = SurfaceInfo {
                    size: ui.available_size(),
                    backend_ready,
                };
                self.graph = match open_graph(&self.board, surface, self.layout) {
                    GraphOpen::Opened(session) => GraphPane::Open(session),
                    GraphOpen::Fallback(message) => GraphPane::Fallback(message),
                    GraphOpen::Skipped => GraphPane::Closed,
                };
            }

            if matches!(self.graph, GraphPane::Open(_)) {
                self.draw_graph(ui);
                return;
            }

            match &self.graph {
                GraphPane::Fallback(message) => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Graph view unavailable");
                        ui.add_space(6.0);
                        ui.label(message.as_str());
                    });
                }
                _ => self.draw_overview(ui),
            }
        });

        self.draw_dialogs(ctx);
    }

    fn draw_overview(&self, ui: &mut egui::Ui) {
        let Some(project) = self.board.current_project() else {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.label("Select a project to see its lists and open its graph.");
            });
            return;
        };

        ui.heading(project.name.as_str());
        if !project.description.is_empty() {
            ui.label(project.description.as_str());
        }
        ui.add_space(8.0);

        egui::ScrollArea::horizontal().show(ui, |ui| {
            ui.horizontal_top(|ui| {
                for list in &project.lists {
                    ui.group(|ui| {
                        ui.set_min_width(180.0);
                        ui.vertical(|ui| {
                            ui.strong(format!("{} ({})", list.name, list.cards.len()));
                            ui.separator();
                            for card in &list.cards {
                                let title = if card.completed {
                                    RichText::new(card.title.as_str()).strikethrough()
                                } else {
                                    RichText::new(card.title.as_str())
                                };
                                ui.label(title);
                                ui.label(
                                    RichText::new(format!("{} priority", card.priority.label()))
                                        .small()
                                        .weak(),
                                );
                            }
                        });
                    });
                }
            });
        });

        if !project.notes.is_empty() {
            ui.add_space(10.0);
            ui.strong("Notes");
            for note in &project.notes {
                ui.label(format!("📌 {}", note.title));
            }
        }
    }
}
