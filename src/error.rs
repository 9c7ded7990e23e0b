use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template has no element content: {0}")]
    EmptyTemplate(String),

    #[error("Element not found: #{0}")]
    ElementNotFound(String),

    #[error("No element matching '{selector}' inside {parent}")]
    SelectorNotMatched { parent: String, selector: String },

    #[error("Unknown node handle: {0}")]
    UnknownNode(usize),

    #[error("Invalid project status: {0}")]
    InvalidStatus(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
