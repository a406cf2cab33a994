//! JSON mode: asks the backend to answer with a single JSON object.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// JSON mode options for structured output.
///
/// Configured as `generation.json_mode` (`"json_object"` or `"off"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JsonMode {
    /// Backend guarantees syntactically valid JSON output
    #[default]
    #[serde(rename = "json_object")]
    Json,

    /// No JSON enforcement; the prompt directive alone shapes the reply.
    /// For OpenAI-compatible servers that reject `response_format`.
    #[serde(rename = "off")]
    Off,
}

impl JsonMode {
    /// `response_format` value for a chat-completions request, if any.
    pub fn response_format(&self) -> Option<serde_json::Value> {
        match self {
            JsonMode::Json => Some(json!({ "type": "json_object" })),
            JsonMode::Off => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_response_format() {
        assert_eq!(
            JsonMode::Json.response_format(),
            Some(json!({"type": "json_object"}))
        );
        assert_eq!(JsonMode::Off.response_format(), None);
        assert_eq!(JsonMode::default(), JsonMode::Json);
    }

    #[test]
    fn test_json_mode_config_values() {
        let mode: JsonMode = serde_json::from_str("\"off\"").unwrap();
        assert_eq!(mode, JsonMode::Off);
        let mode: JsonMode = serde_json::from_str("\"json_object\"").unwrap();
        assert_eq!(mode, JsonMode::Json);
        assert!(serde_json::from_str::<JsonMode>("\"json_schema\"").is_err());
    }
}
