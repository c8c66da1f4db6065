use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::Context as _;
use board_graph::board::{
    BoardState, Project, demo_board, load_projects, projects_path, save_projects,
};
use board_graph::graph::{ActionSink, GraphSession, LayoutConfig};
use eframe::egui::{self, Context};

mod graph;
mod render_utils;
mod ui;

#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub data_dir: PathBuf,
    pub user_id: String,
    pub project: Option<String>,
    pub seed_demo: bool,
}

struct LoadedBoard {
    path: PathBuf,
    projects: Vec<Project>,
}

pub struct BoardApp {
    options: LoadOptions,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<LoadedBoard, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

enum GraphPane {
    Closed,
    Open(Box<GraphSession>),
    Fallback(String),
}

/// Card and note windows opened from the graph.
#[derive(Default)]
struct Dialogs {
    card: Option<(String, String)>,
    note: Option<String>,
}

impl ActionSink for Dialogs {
    fn open_card_editor(&mut self, list_id: &str, card_id: &str) {
        self.card = Some((list_id.to_owned(), card_id.to_owned()));
    }

    fn open_note_view(&mut self, note_id: &str) {
        self.note = Some(note_id.to_owned());
    }
}

struct ViewModel {
    board: BoardState,
    board_path: PathBuf,
    layout: LayoutConfig,
    graph: GraphPane,
    open_requested: bool,
    search: String,
    dialogs: Dialogs,
}

fn load_board(options: &LoadOptions) -> anyhow::Result<LoadedBoard> {
    let path = projects_path(&options.data_dir, &options.user_id)?;

    if options.seed_demo && !path.exists() {
        let written = save_projects(&options.data_dir, &options.user_id, &demo_board())
            .context("failed to seed demo board")?;
        tracing::info!(path = %written.display(), "seeded demo board");
    }

    let projects = load_projects(&options.data_dir, &options.user_id)
        .with_context(|| format!("failed to load board for user `{}`", options.user_id))?;
    Ok(LoadedBoard { path, projects })
}

impl BoardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: LoadOptions) -> Self {
        let state = Self::start_load(options.clone());
        Self { options, state }
    }

    fn spawn_load(options: LoadOptions) -> Receiver<Result<LoadedBoard, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_board(&options).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(options: LoadOptions) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(options),
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(loaded)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            loaded,
                            &self.options,
                        ))));
                    }
                    Ok(Err(error)) => {
                        tracing::warn!(%error, "board load failed");
                        transition = Some(AppState::Error(error));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading board...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the board");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.options.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let backend_ready = frame.gl().is_some();
                model.show(ctx, backend_ready);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(loaded: LoadedBoard, options: &LoadOptions) -> Self {
        let mut board = BoardState::new(options.user_id.clone(), loaded.projects);
        tracing::info!(
            user = board.user_id(),
            projects = board.projects().len(),
            path = %loaded.path.display(),
            "loaded board"
        );

        if let Some(project_id) = options.project.as_deref()
            && board.select_project(project_id).is_none()
        {
            tracing::warn!(project = project_id, "requested project not found");
        }

        Self {
            board,
            board_path: loaded.path,
            layout: LayoutConfig::default(),
            graph: GraphPane::Closed,
            open_requested: false,
            search: String::new(),
            dialogs: Dialogs::default(),
        }
    }

    fn close_graph(&mut self) {
        if let GraphPane::Open(session) = std::mem::replace(&mut self.graph, GraphPane::Closed) {
            session.close();
        }
        self.open_requested = false;
    }

    fn select_project(&mut self, project_id: &str) {
        if self.board.current_project().map(|project| project.id.as_str()) == Some(project_id) {
            return;
        }
        self.close_graph();
        self.dialogs = Dialogs::default();
        self.board.select_project(project_id);
    }
}
