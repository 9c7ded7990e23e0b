use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Element ids for the three form inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputIds {
    pub title: String,
    pub description: String,
    pub people: String,
}

impl Default for InputIds {
    fn default() -> Self {
        Self {
            title: "title".to_string(),
            description: "description".to_string(),
            people: "people".to_string(),
        }
    }
}

/// Page hooks and drag settings shared by all views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Element every view is mounted into
    pub host_id: String,
    pub input_template_id: String,
    pub list_template_id: String,
    pub item_template_id: String,
    /// Id given to the mounted form element
    pub form_id: String,
    pub inputs: InputIds,
    /// Media type carrying the dragged project id
    pub drag_media_type: String,
    /// Class added to a list while it can accept a drop
    pub droppable_class: String,
    pub alert_message: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            host_id: "app".to_string(),
            input_template_id: "project-input".to_string(),
            list_template_id: "project-list".to_string(),
            item_template_id: "single-project".to_string(),
            form_id: "user-input".to_string(),
            inputs: InputIds::default(),
            drag_media_type: "text/plain".to_string(),
            droppable_class: "droppable".to_string(),
            alert_message: "Invalid operation — please try again.".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Parses a JSON configuration; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("host_id", &self.host_id),
            ("input_template_id", &self.input_template_id),
            ("list_template_id", &self.list_template_id),
            ("item_template_id", &self.item_template_id),
            ("form_id", &self.form_id),
            ("inputs.title", &self.inputs.title),
            ("inputs.description", &self.inputs.description),
            ("inputs.people", &self.inputs.people),
            ("drag_media_type", &self.drag_media_type),
            ("droppable_class", &self.droppable_class),
            ("alert_message", &self.alert_message),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(TrackerError::ConfigError(format!("{} must not be empty", key)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.host_id, "app");
        assert_eq!(config.drag_media_type, "text/plain");
        assert_eq!(config.inputs.people, "people");
        assert_eq!(config.alert_message, "Invalid operation — please try again.");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TrackerConfig::from_json(
            r#"{ "host_id": "root", "inputs": { "title": "project-title" } }"#,
        )
        .unwrap();

        assert_eq!(config.host_id, "root");
        assert_eq!(config.inputs.title, "project-title");
        assert_eq!(config.inputs.description, "description");
        assert_eq!(config.droppable_class, "droppable");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = TrackerConfig::from_json(r#"{ "hots_id": "root" }"#);
        assert!(matches!(result, Err(TrackerError::SerializationError(_))));
    }

    #[test]
    fn test_empty_media_type_rejected() {
        let result = TrackerConfig::from_json(r#"{ "drag_media_type": " " }"#);
        assert!(matches!(result, Err(TrackerError::ConfigError(_))));
    }

    #[test]
    fn test_empty_form_hooks_rejected() {
        for (json, key) in [
            (r#"{ "form_id": "" }"#, "form_id"),
            (r#"{ "inputs": { "title": "" } }"#, "inputs.title"),
            (r#"{ "inputs": { "description": "  " } }"#, "inputs.description"),
            (r#"{ "inputs": { "people": "" } }"#, "inputs.people"),
            (r#"{ "alert_message": "" }"#, "alert_message"),
        ] {
            match TrackerConfig::from_json(json) {
                Err(TrackerError::ConfigError(message)) => {
                    assert!(message.starts_with(key), "{}", message)
                }
                other => panic!("expected config error for {}, got {:?}", key, other),
            }
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "alert_message": "Nope" }}"#).unwrap();

        let config = TrackerConfig::load(file.path()).unwrap();
        assert_eq!(config.alert_message, "Nope");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TrackerConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(TrackerError::IoError(_))));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = TrackerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TrackerConfig::from_json(&json).unwrap(), config);
    }
}
