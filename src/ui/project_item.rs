use crate::config::TrackerConfig;
use crate::domain::Project;
use crate::error::Result;
use crate::ui::component::{mount, query_required, Component};
use crate::ui::surface::{DomEvent, DragEffect, EventKind, InsertPosition, NodeId, Surface};
use log::trace;
use std::rc::Rc;

/// One rendered project inside a list, usable as a drag source
pub struct ProjectItem {
    surface: Rc<dyn Surface>,
    element: NodeId,
    project: Project,
    media_type: String,
}

impl ProjectItem {
    /// Mounts the item template at the end of the list `host_id`.
    /// The item element takes the project id as its element id.
    pub fn new(
        surface: Rc<dyn Surface>,
        config: &TrackerConfig,
        host_id: &str,
        project: Project,
    ) -> Result<Self> {
        let mounted = mount(
            surface.as_ref(),
            &config.item_template_id,
            host_id,
            InsertPosition::AtEnd,
            Some(project.id.as_str()),
        )?;

        let item = Self {
            surface,
            element: mounted.element,
            project,
            media_type: config.drag_media_type.clone(),
        };
        item.configure()?;
        item.render_content()?;
        Ok(item)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn people_label(&self) -> String {
        self.project.people_label()
    }
}

impl Component for ProjectItem {
    fn configure(&self) -> Result<()> {
        let id = self.project.id.clone();
        let media_type = self.media_type.clone();
        self.surface.add_listener(
            self.element,
            EventKind::DragStart,
            Rc::new(move |event: &mut DomEvent<'_>| {
                if let Some(transfer) = event.transfer_mut() {
                    transfer.set_data(&media_type, id.as_str());
                    transfer.set_effect_allowed(DragEffect::Move);
                }
            }),
        )?;

        let id = self.project.id.clone();
        self.surface.add_listener(
            self.element,
            EventKind::DragEnd,
            Rc::new(move |_event: &mut DomEvent<'_>| trace!("drag of project {} ended", id)),
        )
    }

    fn render_content(&self) -> Result<()> {
        let surface = self.surface.as_ref();
        surface.set_text(query_required(surface, self.element, "h2")?, &self.project.title)?;
        surface.set_text(query_required(surface, self.element, "h3")?, &self.people_label())?;
        surface.set_text(
            query_required(surface, self.element, "p")?,
            &self.project.description,
        )
    }

    fn element(&self) -> NodeId {
        self.element
    }
}
