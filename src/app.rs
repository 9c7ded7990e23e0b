use crate::config::TrackerConfig;
use crate::domain::ProjectStatus;
use crate::error::Result;
use crate::state::ProjectState;
use crate::ui::{Alert, ProjectInput, ProjectList, Surface};
use log::info;
use std::rc::Rc;

/// A mounted tracker page: one store, the input form and both lists
pub struct App {
    pub state: Rc<ProjectState>,
    pub input: Rc<ProjectInput>,
    pub active: Rc<ProjectList>,
    pub finished: Rc<ProjectList>,
}

impl App {
    /// Creates the store and mounts the form followed by the active and finished lists
    pub fn mount(
        surface: Rc<dyn Surface>,
        alert: Rc<dyn Alert>,
        config: &TrackerConfig,
    ) -> Result<Self> {
        let state = Rc::new(ProjectState::new());
        let input = ProjectInput::new(Rc::clone(&state), Rc::clone(&surface), alert, config)?;
        let active = ProjectList::new(
            ProjectStatus::Active,
            Rc::clone(&state),
            Rc::clone(&surface),
            config,
        )?;
        let finished = ProjectList::new(ProjectStatus::Finished, Rc::clone(&state), surface, config)?;

        info!("project tracker mounted into #{}", config.host_id);
        Ok(Self {
            state,
            input,
            active,
            finished,
        })
    }

    pub fn list(&self, status: ProjectStatus) -> &Rc<ProjectList> {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::ui::memory::{Markup, MemorySurface, MemoryTransfer, RecordingAlert};
    use crate::ui::{Component, EventKind};

    fn mount_app() -> (Rc<MemorySurface>, Rc<RecordingAlert>, App) {
        let surface = Rc::new(MemorySurface::with_tracker_templates());
        let alert = Rc::new(RecordingAlert::new());
        let app = App::mount(surface.clone(), alert.clone(), &TrackerConfig::default()).unwrap();
        (surface, alert, app)
    }

    fn rendered(surface: &MemorySurface, list: &ProjectList) -> Vec<(String, String, String)> {
        surface
            .children(list.list_element())
            .into_iter()
            .map(|item| {
                (
                    surface.text_of(item, "h2").unwrap_or_default(),
                    surface.text_of(item, "h3").unwrap_or_default(),
                    surface.text_of(item, "p").unwrap_or_default(),
                )
            })
            .collect()
    }

    fn submit(surface: &MemorySurface, app: &App, title: &str, description: &str, people: &str) {
        for (id, value) in [("title", title), ("description", description), ("people", people)] {
            let node = surface.element_by_id(id).unwrap();
            surface.set_value(node, value).unwrap();
        }
        surface.dispatch(app.input.element(), EventKind::Submit, None);
    }

    #[test]
    fn test_page_order() {
        let (surface, _alert, app) = mount_app();
        let host = surface.element_by_id("app").unwrap();

        assert_eq!(
            surface.children(host),
            vec![
                app.input.element(),
                app.active.element(),
                app.finished.element()
            ]
        );
    }

    #[test]
    fn test_add_then_finish_project() {
        let (surface, alert, app) = mount_app();

        submit(&surface, &app, "Build a shed", "For tools", "2");

        assert_eq!(
            rendered(&surface, &app.active),
            vec![(
                "Build a shed".to_string(),
                "2 People assigned".to_string(),
                "For tools".to_string()
            )]
        );
        assert!(rendered(&surface, &app.finished).is_empty());

        let id = app.state.projects()[0].id.clone();
        app.state.move_project(&id, ProjectStatus::Finished);

        assert!(rendered(&surface, app.list(ProjectStatus::Active)).is_empty());
        let finished = rendered(&surface, app.list(ProjectStatus::Finished));
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].0, "Build a shed");
        assert!(alert.messages().is_empty());
    }

    #[test]
    fn test_drag_round_trip_between_lists() {
        let (surface, _alert, app) = mount_app();
        submit(&surface, &app, "Build a shed", "For tools", "2");
        let id = app.state.projects()[0].id.clone();

        for target in [ProjectStatus::Finished, ProjectStatus::Active] {
            let item = surface.element_by_id(id.as_str()).unwrap();
            let target = app.list(target);
            let mut transfer = MemoryTransfer::new();

            surface.dispatch(item, EventKind::DragStart, Some(&mut transfer));
            assert!(surface.dispatch(target.element(), EventKind::DragOver, Some(&mut transfer)));
            surface.dispatch(target.element(), EventKind::Drop, Some(&mut transfer));

            assert_eq!(app.state.get(&id).unwrap().status, target.status());
            assert_eq!(target.assigned_projects().len(), 1);
        }
        assert!(app.finished.assigned_projects().is_empty());
    }

    #[test]
    fn test_repeated_moves_keep_page_size_bounded() {
        let (surface, _alert, app) = mount_app();
        submit(&surface, &app, "Build a shed", "For tools", "2");
        let id = app.state.projects()[0].id.clone();

        app.state.move_project(&id, ProjectStatus::Finished);
        app.state.move_project(&id, ProjectStatus::Active);
        let settled = surface.node_count();

        for _ in 0..500 {
            app.state.move_project(&id, ProjectStatus::Finished);
            app.state.move_project(&id, ProjectStatus::Active);
        }

        assert_eq!(surface.node_count(), settled);
        assert_eq!(rendered(&surface, &app.active).len(), 1);
    }

    #[test]
    fn test_invalid_submission_alerts_without_rendering() {
        let (surface, alert, app) = mount_app();

        submit(&surface, &app, "Shed", "For tools", "0");

        assert!(app.state.is_empty());
        assert!(rendered(&surface, &app.active).is_empty());
        assert_eq!(alert.messages().len(), 1);
    }

    #[test]
    fn test_mount_without_host_fails() {
        let surface = Rc::new(MemorySurface::new());
        surface.append_markup(surface.root(), &Markup::new("div").id("elsewhere"));
        let alert = Rc::new(RecordingAlert::new());

        let result = App::mount(surface, alert, &TrackerConfig::default());
        assert!(matches!(result, Err(TrackerError::ElementNotFound(id)) if id == "app"));
    }
}
