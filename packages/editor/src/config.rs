use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "polaris.config.json";

/// Token field editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Character that opens the suggestion menu
    #[serde(default = "default_trigger")]
    pub trigger: char,

    /// Put a space after an inserted variable unless whitespace already follows
    #[serde(default = "default_insert_trailing_space")]
    pub insert_trailing_space: bool,

    /// Upper bound on suggestion results (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_suggestions: Option<usize>,

    /// Undo levels kept per session (0 = unlimited)
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
}

fn default_trigger() -> char {
    '@'
}

fn default_insert_trailing_space() -> bool {
    true
}

fn default_history_depth() -> usize {
    100
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, EditorError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config = Self::from_json(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded editor config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
            insert_trailing_space: default_insert_trailing_space(),
            max_suggestions: None,
            history_depth: default_history_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "trigger": "#",
            "insertTrailingSpace": false,
            "maxSuggestions": 5,
            "historyDepth": 20
        }"##;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.trigger, '#');
        assert!(!config.insert_trailing_space);
        assert_eq!(config.max_suggestions, Some(5));
        assert_eq!(config.history_depth, 20);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.trigger, '@');
        assert!(config.insert_trailing_space);
        assert_eq!(config.max_suggestions, None);
        assert_eq!(config.history_depth, 100);
    }

    #[test]
    fn test_rejects_multi_char_trigger() {
        assert!(EditorConfig::from_json(r#"{ "trigger": "@@" }"#).is_err());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EditorConfig::load(dir.path()).unwrap(), EditorConfig::default());

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "maxSuggestions": 3 }"#,
        )
        .unwrap();
        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config.max_suggestions, Some(3));
        assert_eq!(config.trigger, '@');
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();

        assert!(matches!(
            EditorConfig::load(dir.path()),
            Err(EditorError::Config(_))
        ));
    }
}
