use crate::error::{Result, TrackerError};
use crate::ui::surface::{InsertPosition, NodeId, Surface};

/// Elements produced by [`mount`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mounted {
    pub host: NodeId,
    pub element: NodeId,
}

/// Clones `template_id`, optionally renames the copy and inserts it into `host_id`
pub fn mount(
    surface: &dyn Surface,
    template_id: &str,
    host_id: &str,
    position: InsertPosition,
    new_element_id: Option<&str>,
) -> Result<Mounted> {
    let host = surface
        .element_by_id(host_id)
        .ok_or_else(|| TrackerError::ElementNotFound(host_id.to_string()))?;
    let element = surface.clone_template(template_id)?;

    if let Some(id) = new_element_id {
        surface.set_id(element, id)?;
    }
    surface.insert(host, element, position)?;

    Ok(Mounted { host, element })
}

/// Looks up a required descendant of a mounted element
pub fn query_required(surface: &dyn Surface, parent: NodeId, selector: &str) -> Result<NodeId> {
    surface
        .query(parent, selector)
        .ok_or_else(|| TrackerError::SelectorNotMatched {
            parent: parent.to_string(),
            selector: selector.to_string(),
        })
}

/// Behaviour every mounted view provides
pub trait Component {
    /// Registers event handlers and store subscriptions
    fn configure(&self) -> Result<()>;

    /// Writes the view's content into its element
    fn render_content(&self) -> Result<()>;

    /// Root element of the view
    fn element(&self) -> NodeId;
}
