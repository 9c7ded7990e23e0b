use crate::domain::{Project, ProjectId, ProjectStatus};
use crate::state::listener::Listeners;
use log::{debug, trace};
use std::{cell::RefCell, rc::Rc};

/// Authoritative, ordered collection of projects.
///
/// Every mutation synchronously notifies all listeners with a snapshot before
/// returning. The store performs no validation of its own; callers are expected
/// to validate input first. Share it between views as `Rc<ProjectState>`.
#[derive(Debug, Default)]
pub struct ProjectState {
    projects: RefCell<Vec<Project>>,
    listeners: Listeners<Project>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for every future change. There is no unsubscribe.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: Fn(Vec<Project>) + 'static,
    {
        self.listeners.add(Rc::new(listener));
    }

    /// Appends a new active project and notifies listeners
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: i64,
    ) -> ProjectId {
        let project = Project::new(title.into(), description.into(), people);
        let id = project.id.clone();
        debug!("adding project {} ({} people)", id, people);

        self.projects.borrow_mut().push(project);
        self.update_listeners();
        id
    }

    /// Moves a project to `new_status`.
    ///
    /// Unknown ids and moves to the current status are ignored without
    /// notifying anyone. Returns whether the project actually moved.
    pub fn move_project(&self, id: &ProjectId, new_status: ProjectStatus) -> bool {
        let moved = {
            let mut projects = self.projects.borrow_mut();
            let Some(project) = projects.iter_mut().find(|project| &project.id == id) else {
                trace!("ignoring move of unknown project {}", id);
                return false;
            };
            project.set_status(new_status)
        };

        if moved {
            debug!("moved project {} to {}", id, new_status);
            self.update_listeners();
        } else {
            trace!("project {} already {}", id, new_status);
        }
        moved
    }

    /// Snapshot of all projects in insertion order
    pub fn projects(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    pub fn projects_with_status(&self, status: ProjectStatus) -> Vec<Project> {
        self.projects
            .borrow()
            .iter()
            .filter(|project| project.status == status)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &ProjectId) -> Option<Project> {
        self.projects
            .borrow()
            .iter()
            .find(|project| &project.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    fn update_listeners(&self) {
        // Release the borrow first so listeners can read or mutate the store
        let snapshot = self.projects();
        self.listeners.notify(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_listener(state: &ProjectState) -> Rc<Cell<usize>> {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        state.add_listener(move |_projects| counter.set(counter.get() + 1));
        calls
    }

    #[test]
    fn test_add_project() {
        let state = ProjectState::new();
        let id = state.add_project("Build a shed", "For tools", 2);

        assert_eq!(state.len(), 1);
        let project = state.get(&id).unwrap();
        assert_eq!(project.title, "Build a shed");
        assert_eq!(project.description, "For tools");
        assert_eq!(project.people, 2);
        assert_eq!(project.status, ProjectStatus::Active);
    }

    #[test]
    fn test_add_project_preserves_insertion_order_and_unique_ids() {
        let state = ProjectState::new();
        let first = state.add_project("First project", "a", 1);
        let second = state.add_project("Second project", "b", 1);

        assert_ne!(first, second);
        let titles: Vec<String> = state.projects().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["First project", "Second project"]);
    }

    #[test]
    fn test_add_project_notifies_with_snapshot() {
        let state = ProjectState::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        state.add_listener(move |projects| sink.borrow_mut().push(projects.len()));

        state.add_project("Project one", "a", 1);
        state.add_project("Project two", "b", 1);

        assert_eq!(*received.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_store_accepts_unvalidated_people_counts() {
        let state = ProjectState::new();
        let zero = state.add_project("Nobody assigned", "x", 0);
        let negative = state.add_project("Negative crew", "y", -3);

        assert_eq!(state.len(), 2);
        assert_eq!(state.get(&zero).unwrap().people, 0);
        assert_eq!(state.get(&negative).unwrap().people, -3);
    }

    #[test]
    fn test_move_unknown_id_is_ignored() {
        let state = ProjectState::new();
        state.add_project("Build a shed", "For tools", 2);
        let calls = counting_listener(&state);
        let before = state.projects();

        assert!(!state.move_project(&ProjectId::from("missing"), ProjectStatus::Finished));

        assert_eq!(calls.get(), 0);
        assert_eq!(state.projects(), before);
    }

    #[test]
    fn test_move_to_same_status_does_not_notify() {
        let state = ProjectState::new();
        let id = state.add_project("Build a shed", "For tools", 2);
        let calls = counting_listener(&state);

        assert!(!state.move_project(&id, ProjectStatus::Active));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_move_notifies_every_listener_once() {
        let state = ProjectState::new();
        let id = state.add_project("Build a shed", "For tools", 2);

        let snapshots = Rc::new(RefCell::new(Vec::new()));
        for _ in 0..3 {
            let sink = Rc::clone(&snapshots);
            state.add_listener(move |projects| sink.borrow_mut().push(projects));
        }

        assert!(state.move_project(&id, ProjectStatus::Finished));

        let snapshots = snapshots.borrow();
        assert_eq!(snapshots.len(), 3);
        for snapshot in snapshots.iter() {
            assert_eq!(snapshot.len(), 1);
            assert_eq!(snapshot[0].status, ProjectStatus::Finished);
        }
        assert_eq!(state.get(&id).unwrap().status, ProjectStatus::Finished);
    }

    #[test]
    fn test_listener_registered_twice_is_called_twice() {
        let state = ProjectState::new();
        let calls = Rc::new(Cell::new(0));
        let listener = {
            let calls = Rc::clone(&calls);
            move |_projects: Vec<Project>| calls.set(calls.get() + 1)
        };
        state.add_listener(listener.clone());
        state.add_listener(listener);

        state.add_project("Build a shed", "For tools", 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_snapshot_mutation_does_not_leak_into_store() {
        let state = ProjectState::new();
        state.add_listener(|mut projects| {
            projects.clear();
        });
        state.add_listener(|mut projects| {
            if let Some(project) = projects.first_mut() {
                project.title = "Tampered".to_string();
            }
        });

        let id = state.add_project("Build a shed", "For tools", 2);
        assert_eq!(state.len(), 1);
        assert_eq!(state.get(&id).unwrap().title, "Build a shed");
    }

    #[test]
    fn test_listener_may_reenter_store() {
        let state = Rc::new(ProjectState::new());
        let handle = Rc::downgrade(&state);
        state.add_listener(move |projects| {
            let Some(state) = handle.upgrade() else {
                return;
            };
            // Finish every project as soon as it shows up
            for project in projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Active)
            {
                state.move_project(&project.id, ProjectStatus::Finished);
            }
        });

        let id = state.add_project("Build a shed", "For tools", 2);
        assert_eq!(state.get(&id).unwrap().status, ProjectStatus::Finished);
    }

    #[test]
    fn test_projects_with_status() {
        let state = ProjectState::new();
        let a = state.add_project("Project A", "a", 1);
        state.add_project("Project B", "b", 1);
        state.move_project(&a, ProjectStatus::Finished);

        assert_eq!(state.projects_with_status(ProjectStatus::Active).len(), 1);
        let finished = state.projects_with_status(ProjectStatus::Finished);
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].id, a);
    }
}
