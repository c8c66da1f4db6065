use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::Project;
use super::parse::parse_projects;

const PROJECTS_FILE_PREFIX: &str = "projects_";

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid user id `{0}`")]
    InvalidUser(String),
    #[error("failed to read projects file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("projects file {} is not a valid board", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode board")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write projects file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn valid_user_id(user_id: &str) -> bool {
    !user_id.is_empty()
        && user_id != "."
        && user_id != ".."
        && user_id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
}

/// Location of a user's board inside `data_dir`.
pub fn projects_path(data_dir: &Path, user_id: &str) -> Result<PathBuf, BoardError> {
    if !valid_user_id(user_id) {
        return Err(BoardError::InvalidUser(user_id.to_owned()));
    }

    Ok(data_dir.join(format!("{PROJECTS_FILE_PREFIX}{user_id}.json")))
}

/// Loads a user's projects. A user without a stored board has no projects.
pub fn load_projects(data_dir: &Path, user_id: &str) -> Result<Vec<Project>, BoardError> {
    let path = projects_path(data_dir, user_id)?;

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::info!(
                user = user_id,
                path = %path.display(),
                "no stored board, starting empty"
            );
            return Ok(Vec::new());
        }
        Err(source) => return Err(BoardError::Read { path, source }),
    };

    parse_projects(&raw).map_err(|source| BoardError::Parse { path, source })
}

pub fn save_projects(
    data_dir: &Path,
    user_id: &str,
    projects: &[Project],
) -> Result<PathBuf, BoardError> {
    let path = projects_path(data_dir, user_id)?;

    fs::create_dir_all(data_dir).map_err(|source| BoardError::Write {
        path: path.clone(),
        source,
    })?;

    let json = serde_json::to_string_pretty(projects).map_err(BoardError::Encode)?;

    fs::write(&path, json).map_err(|source| BoardError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(
        user = user_id,
        path = %path.display(),
        projects = projects.len(),
        "saved board"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::demo_board;

    #[test]
    fn missing_file_is_an_empty_board() {
        let dir = tempfile::tempdir().unwrap();
        let projects = load_projects(dir.path(), "alice").unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn saved_board_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested");
        let board = demo_board();

        let path = save_projects(&data_dir, "alice", &board).unwrap();
        assert!(path.ends_with("projects_alice.json"));

        let loaded = load_projects(&data_dir, "alice").unwrap();
        assert_eq!(loaded, board);
        assert!(load_projects(&data_dir, "bob").unwrap().is_empty());
    }

    #[test]
    fn rejects_user_ids_that_escape_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        for user in ["", "..", "../etc", "a/b", "a\\b"] {
            assert!(
                matches!(
                    load_projects(dir.path(), user),
                    Err(BoardError::InvalidUser(_))
                ),
                "user id {user:?} should be rejected"
            );
        }
        assert!(projects_path(dir.path(), "user-1_a.b").is_ok());
    }

    #[test]
    fn corrupt_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = projects_path(dir.path(), "alice").unwrap();
        fs::write(&path, "[{]").unwrap();

        let error = load_projects(dir.path(), "alice").unwrap_err();
        assert!(matches!(error, BoardError::Parse { .. }));
        assert!(error.to_string().contains("projects_alice.json"));
    }
}
