pub mod component;
pub mod memory;
pub mod project_input;
pub mod project_item;
pub mod project_list;
pub mod surface;

pub use component::{mount, Component, Mounted};
pub use memory::{Markup, MemorySurface, MemoryTransfer, RecordingAlert};
pub use project_input::{ProjectDraft, ProjectInput};
pub use project_item::ProjectItem;
pub use project_list::ProjectList;
pub use surface::{
    Alert, DomEvent, DragEffect, EventHandler, EventKind, InsertPosition, NodeId, Surface,
    TransferChannel,
};
