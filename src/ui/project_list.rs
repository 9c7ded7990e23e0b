use crate::config::TrackerConfig;
use crate::domain::{Project, ProjectId, ProjectStatus};
use crate::error::{Result, TrackerError};
use crate::state::ProjectState;
use crate::ui::component::{mount, query_required, Component};
use crate::ui::project_item::ProjectItem;
use crate::ui::surface::{DomEvent, EventHandler, EventKind, InsertPosition, NodeId, Surface};
use log::{debug, error};
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

/// List of the projects in one status, usable as a drop target.
///
/// The list re-renders from scratch on every store notification. Dropping a
/// dragged project moves it to this list's status.
pub struct ProjectList {
    status: ProjectStatus,
    state: Rc<ProjectState>,
    surface: Rc<dyn Surface>,
    config: TrackerConfig,
    element: NodeId,
    list_element: NodeId,
    assigned_projects: RefCell<Vec<Project>>,
    this: Weak<ProjectList>,
}

impl ProjectList {
    /// Mounts the list template at the end of the host and subscribes to `state`
    pub fn new(
        status: ProjectStatus,
        state: Rc<ProjectState>,
        surface: Rc<dyn Surface>,
        config: &TrackerConfig,
    ) -> Result<Rc<Self>> {
        let element_id = format!("{}-projects", status.tag());
        let mounted = mount(
            surface.as_ref(),
            &config.list_template_id,
            &config.host_id,
            InsertPosition::AtEnd,
            Some(element_id.as_str()),
        )?;
        let list_element = query_required(surface.as_ref(), mounted.element, "ul")?;

        let list = Rc::new_cyclic(|this| Self {
            status,
            state,
            surface,
            config: config.clone(),
            element: mounted.element,
            list_element,
            assigned_projects: RefCell::new(Vec::new()),
            this: this.clone(),
        });
        list.configure()?;
        list.render_content()?;
        Ok(list)
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Id of the `ul` holding the item views
    pub fn list_id(&self) -> String {
        format!("{}-projects-list", self.status.tag())
    }

    pub fn list_element(&self) -> NodeId {
        self.list_element
    }

    /// Projects shown after the latest notification
    pub fn assigned_projects(&self) -> Vec<Project> {
        self.assigned_projects.borrow().clone()
    }

    /// Replaces the shown projects with those of `projects` in this list's status
    pub fn assign(&self, projects: Vec<Project>) -> Result<()> {
        let relevant: Vec<Project> = projects
            .into_iter()
            .filter(|project| project.status == self.status)
            .collect();
        *self.assigned_projects.borrow_mut() = relevant;
        self.render_projects()
    }

    fn render_projects(&self) -> Result<()> {
        let list_id = self.list_id();
        let list_element = self
            .surface
            .element_by_id(&list_id)
            .ok_or_else(|| TrackerError::ElementNotFound(list_id.clone()))?;
        self.surface.clear_children(list_element)?;

        let projects = self.assigned_projects();
        for project in projects {
            ProjectItem::new(Rc::clone(&self.surface), &self.config, &list_id, project)?;
        }
        Ok(())
    }

    fn drag_over(&self, event: &mut DomEvent<'_>) -> Result<()> {
        let accepts = event
            .transfer()
            .and_then(|transfer| transfer.types().into_iter().next())
            .is_some_and(|media_type| media_type == self.config.drag_media_type);
        if accepts {
            event.prevent_default();
            self.surface
                .add_class(self.list_element, &self.config.droppable_class)?;
        }
        Ok(())
    }

    fn drop_project(&self, event: &mut DomEvent<'_>) -> Result<()> {
        event.prevent_default();
        self.surface
            .remove_class(self.list_element, &self.config.droppable_class)?;

        let Some(id) = event
            .transfer()
            .and_then(|transfer| transfer.get_data(&self.config.drag_media_type))
        else {
            return Ok(());
        };
        self.state.move_project(&ProjectId::from(id), self.status);
        Ok(())
    }

    fn drag_leave(&self) -> Result<()> {
        self.surface
            .remove_class(self.list_element, &self.config.droppable_class)
    }

    /// Wraps a method as an event handler holding only a weak reference
    fn handler(
        &self,
        action: fn(&ProjectList, &mut DomEvent<'_>) -> Result<()>,
    ) -> EventHandler {
        let this = self.this.clone();
        Rc::new(move |event: &mut DomEvent<'_>| {
            if let Some(list) = this.upgrade() {
                if let Err(err) = action(&list, event) {
                    error!("{} list failed to handle {:?}: {}", list.status, event.kind(), err);
                }
            }
        })
    }
}

impl Component for ProjectList {
    fn configure(&self) -> Result<()> {
        self.surface.add_listener(
            self.element,
            EventKind::DragOver,
            self.handler(|list, event| list.drag_over(event)),
        )?;
        self.surface.add_listener(
            self.element,
            EventKind::DragLeave,
            self.handler(|list, _event| list.drag_leave()),
        )?;
        self.surface.add_listener(
            self.element,
            EventKind::Drop,
            self.handler(|list, event| list.drop_project(event)),
        )?;

        let this = self.this.clone();
        self.state.add_listener(move |projects| {
            let Some(list) = this.upgrade() else {
                return;
            };
            if let Err(err) = list.assign(projects) {
                error!("failed to render {} projects: {}", list.status, err);
            }
        });
        debug!("{} list subscribed to project state", self.status);
        Ok(())
    }

    fn render_content(&self) -> Result<()> {
        self.surface.set_id(self.list_element, &self.list_id())?;
        let heading = query_required(self.surface.as_ref(), self.element, "h2")?;
        self.surface.set_text(heading, &self.status.heading())
    }

    fn element(&self) -> NodeId {
        self.element
    }
}
