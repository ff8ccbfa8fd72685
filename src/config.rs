use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConceptMapError, Result};

/// Markup conventions the extractor looks for.
///
/// The defaults match the HTML export of bubbl.us. Class fields are
/// whitespace-separated class lists; an element matches when it carries
/// every listed class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Tag of concept bubbles and their nested containers.
    pub container_tag: String,
    /// Class marking a concept bubble.
    pub entity_class: String,
    /// Attribute holding a bubble's raw identifier.
    pub entity_id_attribute: String,
    /// Class of the element holding a bubble's label.
    pub text_class: String,
    /// Class of the container of links pointing into a bubble.
    pub incoming_class: String,
    /// Class of the container of links leaving a bubble.
    pub outgoing_class: String,
    /// Tag of a single connector.
    pub line_tag: String,
    /// Class of a single connector.
    pub line_class: String,
    /// Connector attribute naming the bubble at the other end.
    pub reference_attribute: String,
    /// Connector attribute holding the label the tool stamps on every link.
    pub title_attribute: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            container_tag: "div".to_string(),
            entity_class: "bubble root pinned".to_string(),
            entity_id_attribute: "id".to_string(),
            text_class: "bubble-text".to_string(),
            incoming_class: "lines-incoming".to_string(),
            outgoing_class: "lines-outgoing".to_string(),
            line_tag: "a".to_string(),
            line_class: "line".to_string(),
            reference_attribute: "href".to_string(),
            title_attribute: "title".to_string(),
        }
    }
}

/// Loads an extractor configuration from a JSON file.
///
/// Fields missing from the file keep their default values.
pub fn load_config(path: &Path) -> Result<ExtractorConfig> {
    let contents = fs::read_to_string(path).map_err(|e| config_error("cannot read", path, e))?;
    serde_json::from_str(&contents).map_err(|e| config_error("invalid JSON in", path, e))
}

/// Writes `config` to `path` as indented JSON, creating missing parent
/// directories.
///
/// The JSON goes to a `.tmp` sibling first and is renamed over `path`, so
/// readers see either the old file or the complete new one.
pub fn save_config(path: &Path, config: &ExtractorConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| config_error("cannot serialize", path, e))?;

    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| config_error("cannot create directory for", path, e))?;
    }

    let staged = path.with_extension("tmp");
    fs::write(&staged, json + "\n").map_err(|e| config_error("cannot stage", path, e))?;
    fs::rename(&staged, path).map_err(|e| config_error("cannot replace", path, e))
}

fn config_error(action: &str, path: &Path, cause: impl fmt::Display) -> ConceptMapError {
    ConceptMapError::Config {
        message: format!("{action} config '{}': {cause}", path.display()),
    }
}
