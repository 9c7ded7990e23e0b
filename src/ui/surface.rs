use crate::error::Result;
use std::{fmt, rc::Rc};

/// Handle to an element owned by a [`Surface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}

/// Where a mounted element goes inside its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    AtStart,
    AtEnd,
}

/// UI events the views react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

/// Operation a drag source allows its target to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
    All,
}

/// Carrier for the payload of a drag gesture
pub trait TransferChannel {
    /// Stores `value` under `key`, replacing any previous value for that key
    fn set_data(&mut self, key: &str, value: &str);

    fn get_data(&self, key: &str) -> Option<String>;

    /// Declared keys, in the order they were first written
    fn types(&self) -> Vec<String>;

    fn effect_allowed(&self) -> DragEffect;

    fn set_effect_allowed(&mut self, effect: DragEffect);
}

/// A dispatched event, optionally carrying a drag payload
pub struct DomEvent<'a> {
    kind: EventKind,
    transfer: Option<&'a mut dyn TransferChannel>,
    default_prevented: bool,
}

impl<'a> DomEvent<'a> {
    pub fn new(kind: EventKind, transfer: Option<&'a mut dyn TransferChannel>) -> Self {
        Self {
            kind,
            transfer,
            default_prevented: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn transfer(&self) -> Option<&dyn TransferChannel> {
        self.transfer.as_deref()
    }

    pub fn transfer_mut(&mut self) -> Option<&mut (dyn TransferChannel + 'a)> {
        self.transfer.as_deref_mut()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type EventHandler = Rc<dyn Fn(&mut DomEvent<'_>)>;

/// Element tree the views render into.
///
/// Methods take `&self`; implementations use interior mutability because
/// handlers registered here call back into the surface while they run.
pub trait Surface {
    /// Deep-copies the first element inside the template `template_id`.
    /// The copy is detached until inserted.
    fn clone_template(&self, template_id: &str) -> Result<NodeId>;

    /// Finds an attached element by id
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Finds the first descendant of `parent` matching `selector`
    /// (a tag name, or `#id`)
    fn query(&self, parent: NodeId, selector: &str) -> Option<NodeId>;

    fn insert(&self, host: NodeId, node: NodeId, position: InsertPosition) -> Result<()>;

    fn set_id(&self, node: NodeId, id: &str) -> Result<()>;

    fn set_text(&self, node: NodeId, text: &str) -> Result<()>;

    fn value(&self, node: NodeId) -> Result<String>;

    fn set_value(&self, node: NodeId, value: &str) -> Result<()>;

    fn add_class(&self, node: NodeId, class: &str) -> Result<()>;

    fn remove_class(&self, node: NodeId, class: &str) -> Result<()>;

    /// Removes every child of `node`, along with their listeners
    fn clear_children(&self, node: NodeId) -> Result<()>;

    fn add_listener(&self, node: NodeId, kind: EventKind, handler: EventHandler) -> Result<()>;
}

/// Blocking notification shown to the user
pub trait Alert {
    fn alert(&self, message: &str);
}
