//! # Content Type Registry
//!
//! Content types and the variables each one offers as suggestions. The
//! registry is a plain value: build one, fill it, and hand it to whatever
//! opens sessions. Nothing is global.

use crate::{EditSession, EditorConfig, EditorError};
use polaris_parser::SuggestionCandidate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub variables: Vec<SuggestionCandidate>,
}

impl ContentType {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            variables: Vec::new(),
        }
    }

    pub fn with_variable(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push(SuggestionCandidate::new(label, value));
        self
    }
}

/// Registered content types, in registration order
#[derive(Debug, Clone, Default)]
pub struct ContentTypeRegistry {
    types: Vec<ContentType>,
}

impl ContentTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, content_type: ContentType) -> Result<(), EditorError> {
        if self.get(&content_type.name).is_some() {
            return Err(EditorError::DuplicateContentType(content_type.name));
        }

        tracing::debug!(
            name = %content_type.name,
            variables = content_type.variables.len(),
            "registered content type"
        );
        self.types.push(content_type);
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Option<ContentType> {
        let index = self.types.iter().position(|t| t.name == name)?;
        Some(self.types.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&ContentType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    /// Variables offered by `name`
    pub fn candidates(&self, name: &str) -> Result<&[SuggestionCandidate], EditorError> {
        self.get(name)
            .map(|t| t.variables.as_slice())
            .ok_or_else(|| EditorError::UnknownContentType(name.to_string()))
    }

    /// Open a session whose suggestions come from content type `name`
    pub fn session_for(
        &self,
        name: &str,
        key: impl Into<String>,
        value: &str,
        config: EditorConfig,
    ) -> Result<EditSession, EditorError> {
        let candidates = self.candidates(name)?.to_vec();
        Ok(EditSession::new(key, value, config).with_candidates(candidates))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> ContentType {
        ContentType::new("post", "Posts")
            .with_variable("Post Title", "post_title")
            .with_variable("Post Date", "post_date")
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ContentTypeRegistry::new();
        registry.register(post()).unwrap();
        registry
            .register(ContentType::new("page", "Pages").with_variable("Page Title", "page_title"))
            .unwrap();

        assert_eq!(registry.names(), vec!["post", "page"]);
        assert_eq!(registry.candidates("post").unwrap().len(), 2);
        assert_eq!(registry.get("page").unwrap().label, "Pages");
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut registry = ContentTypeRegistry::new();
        registry.register(post()).unwrap();

        let err = registry.register(ContentType::new("post", "Again")).unwrap_err();
        assert!(matches!(err, EditorError::DuplicateContentType(name) if name == "post"));
        assert_eq!(registry.get("post").unwrap().label, "Posts");
    }

    #[test]
    fn test_registries_are_isolated() {
        let mut first = ContentTypeRegistry::new();
        first.register(post()).unwrap();

        let second = ContentTypeRegistry::new();
        assert!(second.is_empty());
        assert!(matches!(
            second.candidates("post"),
            Err(EditorError::UnknownContentType(_))
        ));
    }

    #[test]
    fn test_unregister() {
        let mut registry = ContentTypeRegistry::new();
        registry.register(post()).unwrap();

        assert_eq!(registry.unregister("post").map(|t| t.name), Some("post".to_string()));
        assert!(registry.unregister("post").is_none());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_session_for_uses_type_candidates() {
        let mut registry = ContentTypeRegistry::new();
        registry.register(post()).unwrap();

        let session = registry
            .session_for("post", "title", "{post_title}", EditorConfig::default())
            .unwrap();
        assert_eq!(session.segments()[1].display_value, "Post Title");
        assert!(registry
            .session_for("nope", "title", "", EditorConfig::default())
            .is_err());
    }

    #[test]
    fn test_content_type_from_json() {
        let json = r#"{"name":"post","label":"Posts","variables":[{"label":"Post Title","value":"post_title"}]}"#;
        let content_type: ContentType = serde_json::from_str(json).unwrap();
        assert_eq!(content_type.variables[0].value, "post_title");
    }
}
