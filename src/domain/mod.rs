pub mod project;
pub mod validation;

pub use project::{people_label, Project, ProjectId, ProjectStatus};
pub use validation::{coerce_number, validate, validate_all, Validatable, Value};
