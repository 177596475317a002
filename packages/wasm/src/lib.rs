use polaris_editor::{Command, EditSession, EditorConfig, SyncOutcome};
use polaris_parser::{Segment, SuggestionCandidate};
use serde::Serialize;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, err: impl Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization error", e))
}

/// One token field, driven from JavaScript with JSON commands
#[wasm_bindgen]
pub struct TokenField {
    session: EditSession,
}

#[wasm_bindgen]
impl TokenField {
    /// `config` is an optional `polaris.config.json` document
    #[wasm_bindgen(constructor)]
    pub fn new(key: &str, value: &str, config: Option<String>) -> Result<TokenField, JsValue> {
        let config = match config {
            Some(json) => EditorConfig::from_json(&json).map_err(|e| js_error("Config error", e))?,
            None => EditorConfig::default(),
        };

        Ok(TokenField {
            session: EditSession::new(key, value, config),
        })
    }

    /// Replace the suggestion candidates (`[{label, value}]`)
    #[wasm_bindgen(js_name = setCandidates)]
    pub fn set_candidates(&mut self, candidates: &str) -> Result<(), JsValue> {
        let candidates: Vec<SuggestionCandidate> =
            serde_json::from_str(candidates).map_err(|e| js_error("Invalid candidates", e))?;
        self.session.set_candidates(candidates);
        Ok(())
    }

    /// Apply a JSON command and return the JSON dispatch result
    pub fn dispatch(&mut self, command: &str) -> Result<String, JsValue> {
        let command: Command =
            serde_json::from_str(command).map_err(|e| js_error("Invalid command", e))?;
        to_json(&self.session.dispatch(command))
    }

    #[wasm_bindgen(js_name = selectSuggestion)]
    pub fn select_suggestion(&mut self, value: &str) -> Result<String, JsValue> {
        let result = self
            .session
            .select_suggestion(value)
            .map_err(|e| js_error("Selection error", e))?;
        to_json(&result)
    }

    /// Returns `"unchanged"`, `"reparsed"` or `"suppressed"`
    #[wasm_bindgen(js_name = syncExternal)]
    pub fn sync_external(&mut self, value: &str) -> String {
        match self.session.sync_external(value) {
            SyncOutcome::Unchanged => "unchanged",
            SyncOutcome::Reparsed => "reparsed",
            SyncOutcome::Suppressed => "suppressed",
        }
        .to_string()
    }

    /// Call once the caret has been restored after a dispatch
    pub fn settle(&mut self) {
        self.session.settle();
    }

    #[wasm_bindgen(getter, js_name = isMutating)]
    pub fn is_mutating(&self) -> bool {
        self.session.is_mutating()
    }

    pub fn suggestions(&self) -> Result<String, JsValue> {
        to_json(&self.session.suggestions())
    }

    pub fn segments(&self) -> Result<String, JsValue> {
        to_json(self.session.segments())
    }

    pub fn anchor(&self) -> Result<String, JsValue> {
        to_json(self.session.anchor())
    }

    #[wasm_bindgen(getter)]
    pub fn value(&self) -> String {
        self.session.value()
    }

    #[wasm_bindgen(getter, js_name = plainText)]
    pub fn plain_text(&self) -> String {
        self.session.plain_text()
    }

    #[wasm_bindgen(getter, js_name = displayText)]
    pub fn display_text(&self) -> String {
        self.session.display_text()
    }

    #[wasm_bindgen(getter, js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    #[wasm_bindgen(getter, js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }
}

/// Parse a flat value and return the segments as JSON
#[wasm_bindgen(js_name = parse)]
pub fn parse_js(value: &str) -> Result<String, JsValue> {
    to_json(&polaris_parser::parse(value))
}

/// Serialize JSON segments back into a flat value
#[wasm_bindgen(js_name = serialize)]
pub fn serialize_js(segments: &str) -> Result<String, JsValue> {
    let segments: Vec<Segment> =
        serde_json::from_str(segments).map_err(|e| js_error("Invalid segments", e))?;
    Ok(polaris_parser::serialize(&segments))
}

/// Plain-text projection of a flat value (`{name}` becomes `name`)
#[wasm_bindgen(js_name = plainText)]
pub fn plain_text_js(value: &str) -> String {
    polaris_parser::plain_text(&polaris_parser::parse(value))
}
