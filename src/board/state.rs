use super::model::{Card, List, Note, Project, ProjectStats};

/// The signed-in user's board and the project currently on screen.
///
/// Passed by reference into the graph entry point instead of living in
/// process-wide state.
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    user_id: String,
    projects: Vec<Project>,
    current_project_id: Option<String>,
}

impl BoardState {
    pub fn new(user_id: impl Into<String>, projects: Vec<Project>) -> Self {
        Self {
            user_id: user_id.into(),
            projects,
            current_project_id: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn stats(&self) -> ProjectStats {
        ProjectStats::collect(&self.projects)
    }

    /// Makes `project_id` current. Unknown ids clear the selection.
    pub fn select_project(&mut self, project_id: &str) -> Option<&Project> {
        let found = self
            .projects
            .iter()
            .position(|project| project.id == project_id);
        self.current_project_id = found.map(|index| self.projects[index].id.clone());
        found.map(|index| &self.projects[index])
    }

    pub fn current_project(&self) -> Option<&Project> {
        let id = self.current_project_id.as_deref()?;
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn find_card(&self, list_id: &str, card_id: &str) -> Option<(&List, &Card)> {
        let project = self.current_project()?;
        let list = project.lists.iter().find(|list| list.id == list_id)?;
        let card = list.cards.iter().find(|card| card.id == card_id)?;
        Some((list, card))
    }

    pub fn find_note(&self, note_id: &str) -> Option<&Note> {
        self.current_project()?
            .notes
            .iter()
            .find(|note| note.id == note_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::demo_board;

    #[test]
    fn selection_tracks_known_projects_only() {
        let mut state = BoardState::new("alice", demo_board());
        assert!(state.current_project().is_none());

        let id = state.projects()[0].id.clone();
        assert_eq!(state.select_project(&id).map(|p| p.id.as_str()), Some(id.as_str()));
        assert_eq!(state.current_project().map(|p| p.id.as_str()), Some(id.as_str()));

        assert!(state.select_project("missing").is_none());
        assert!(state.current_project().is_none());
    }

    #[test]
    fn lookups_are_scoped_to_the_current_project() {
        let mut state = BoardState::new("alice", demo_board());
        let project = state.projects()[0].clone();
        let list = &project.lists[0];
        let card = &list.cards[0];
        let note = &project.notes[0];

        assert!(state.find_card(&list.id, &card.id).is_none());
        assert!(state.find_note(&note.id).is_none());

        state.select_project(&project.id);
        let (found_list, found_card) = state.find_card(&list.id, &card.id).unwrap();
        assert_eq!(found_list.id, list.id);
        assert_eq!(found_card.id, card.id);
        assert_eq!(state.find_note(&note.id).map(|n| n.title.as_str()), Some(note.title.as_str()));
        assert!(state.find_card(&list.id, "nope").is_none());
    }
}
