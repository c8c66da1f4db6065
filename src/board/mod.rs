mod demo;
mod model;
mod parse;
mod state;
mod storage;

pub use demo::demo_board;
pub use model::{Card, List, Note, Priority, Project, ProjectStats};
pub use parse::parse_projects;
pub use state::BoardState;
pub use storage::{BoardError, load_projects, projects_path, save_projects};
