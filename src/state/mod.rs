pub mod listener;
pub mod project_state;

pub use listener::{Listener, Listeners};
pub use project_state::ProjectState;
