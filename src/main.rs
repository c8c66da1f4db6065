mod app;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use board_graph::logging::init_logging;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory holding one `projects_<user>.json` board per user.
    #[arg(long, default_value = "./board-data")]
    data_dir: PathBuf,
    #[arg(long, default_value = "local")]
    user: String,
    /// Project to select on startup.
    #[arg(long)]
    project: Option<String>,
    /// Write the demo board first if the user has none yet.
    #[arg(long)]
    seed_demo: bool,
    /// Used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_filter)?;

    let load = app::LoadOptions {
        data_dir: args.data_dir,
        user_id: args.user,
        project: args.project,
        seed_demo: args.seed_demo,
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Board graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::BoardApp::new(cc, load.clone())))),
    )
    .map_err(|error| anyhow::anyhow!("{error}"))
    .context("graph window failed")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory;

    use super::*;
    use board_graph::board::projects_path;

    #[test]
    fn data_dir_help_names_the_stored_file() {
        let stored = projects_path(Path::new("data"), "alice").unwrap();
        let file_name = stored
            .file_name()
            .unwrap()
            .to_string_lossy()
            .replace("alice", "<user>");

        let command = Args::command();
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "data_dir")
            .and_then(|arg| arg.get_help())
            .unwrap()
            .to_string();
        assert!(help.contains(&file_name), "{help}");
    }

    #[test]
    fn defaults_match_a_fresh_local_board() {
        let args = Args::try_parse_from(["board-graph"]).unwrap();
        assert_eq!(args.data_dir, Path::new("./board-data"));
        assert_eq!(args.user, "local");
        assert_eq!(args.project, None);
        assert!(!args.seed_demo);
        assert_eq!(args.log_filter, "info");
    }
}
