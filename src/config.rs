//! Panel configuration.
//!
//! Element ids keep the camelCase keys the hosting page uses (`viewBlockDiv`,
//! `inputText`, ...); the matcher knobs are snake_case. Every key is
//! optional.
//!
//! ```toml
//! frame = "ai_frame"
//! viewBlockDiv = "ai_view_block"
//! max_matches = 50
//! on_invalid_block = "abort"
//! ```

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeBlockError};
use crate::index::InvalidBlockPolicy;
use crate::matcher::DEFAULT_MAX_MATCHES;

/// Ids of the host elements the panel binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    /// Editor frame; receives focus back when the panel hides.
    pub frame: String,
    /// Panel container shown and hidden as a whole.
    pub view_block_div: String,
    /// Text input the user types into.
    pub input_text: String,
    pub previous: String,
    pub next: String,
    /// Where "N match(es) found." is written.
    pub matches_text: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            frame: "ai_frame".to_string(),
            view_block_div: "ai_view_block".to_string(),
            input_text: "ac_view_input_text".to_string(),
            previous: "ac_button_previous".to_string(),
            next: "ac_button_next".to_string(),
            matches_text: "ac_matches_text".to_string(),
        }
    }
}

impl ElementIds {
    fn all(&self) -> [(&'static str, &str); 6] {
        [
            ("frame", self.frame.as_str()),
            ("viewBlockDiv", self.view_block_div.as_str()),
            ("inputText", self.input_text.as_str()),
            ("previous", self.previous.as_str()),
            ("next", self.next.as_str()),
            ("matchesText", self.matches_text.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    #[serde(flatten)]
    pub elements: ElementIds,
    pub max_matches: usize,
    /// Fall back to similarity ranking when nothing matches by prefix.
    pub use_similar: bool,
    /// Text placed in the input when the panel opens.
    pub initial_text: String,
    pub on_invalid_block: InvalidBlockPolicy,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            max_matches: DEFAULT_MAX_MATCHES,
            use_similar: true,
            initial_text: String::new(),
            on_invalid_block: InvalidBlockPolicy::default(),
        }
    }
}

impl PanelConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a `.json` or `.toml` file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| TypeBlockError::Io {
            path: path.to_string(),
            source,
        })?;
        match path.extension() {
            Some("json") => Self::from_json_str(&text),
            Some("toml") => Self::from_toml_str(&text),
            other => Err(TypeBlockError::Config(format!(
                "unsupported config extension {:?} for {}",
                other.unwrap_or(""),
                path
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (key, id) in self.elements.all() {
            if id.trim().is_empty() {
                return Err(TypeBlockError::Config(format!("element id '{}' is empty", key)));
            }
        }
        if self.max_matches == 0 {
            return Err(TypeBlockError::Config("max_matches must be greater than 0".into()));
        }
        Ok(())
    }
}
