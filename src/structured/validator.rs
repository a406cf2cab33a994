//! Response validator for structured replies.
//!
//! The check is purely structural: the reply must be a JSON object and carry
//! every required key. Field content is never inspected.

use crate::catalog::SchemaSpec;
use crate::structured::record::ExtractedRecord;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^```(?:json)?\s*([\s\S]*?)\s*```$").expect("fence pattern is valid")
});

/// Validator for backend replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseValidator;

impl ResponseValidator {
    pub fn new() -> Self {
        Self
    }

    /// Parse `raw`, verify every required key of `schema`, and project the reply
    /// onto exactly those keys.
    ///
    /// All missing keys are reported together in one `SchemaViolation`.
    pub fn extract(&self, raw: &str, schema: &SchemaSpec) -> Result<ExtractedRecord> {
        let object = self.parse_object(raw)?;

        let missing: Vec<String> = schema
            .required
            .iter()
            .filter(|key| !object.contains_key(**key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::SchemaViolation { missing });
        }

        let fields = schema
            .required
            .iter()
            .filter_map(|key| {
                object
                    .get(*key)
                    .map(|value| (key.to_string(), value_to_text(value)))
            })
            .collect::<BTreeMap<_, _>>();
        Ok(ExtractedRecord::from_fields(fields))
    }

    /// Parse the reply as a JSON object.
    ///
    /// A reply wrapped in a single markdown code fence is unwrapped first.
    pub fn parse_object(&self, raw: &str) -> Result<Map<String, Value>> {
        let trimmed = raw.trim();
        let candidate = FENCED_JSON
            .captures(trimmed)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or(trimmed);

        let value: Value = serde_json::from_str(candidate)
            .map_err(|e| Error::malformed_response(format!("reply is not valid JSON: {}", e), raw))?;

        match value {
            Value::Object(map) => Ok(map),
            other => Err(Error::malformed_response(
                format!("expected a JSON object, got {}", json_type_name(&other)),
                raw,
            )),
        }
    }
}

/// Strings are taken verbatim; anything else keeps its compact JSON text.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CHARACTER_SCHEMA, PLACE_SCHEMA};

    #[test]
    fn test_extracts_required_fields() {
        let record = ResponseValidator::new()
            .extract(
                r#"{"character_name":"Bram","physical_description":"tall","personality":"dour"}"#,
                &CHARACTER_SCHEMA,
            )
            .unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("physical_description"), Some("tall"));
    }

    #[test]
    fn test_extra_keys_are_dropped() {
        let record = ResponseValidator::new()
            .extract(
                r#"{"place_name":"Elsewhere","long_description":"damp","secrets":"a trapdoor","weather":"rain"}"#,
                &PLACE_SCHEMA,
            )
            .unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("place_name"), None);
        assert_eq!(record.get("weather"), None);
    }

    #[test]
    fn test_reports_every_missing_key() {
        let err = ResponseValidator::new()
            .extract(r#"{"character_name":"Bram"}"#, &CHARACTER_SCHEMA)
            .unwrap_err();
        match err {
            Error::SchemaViolation { missing } => {
                assert_eq!(missing, vec!["physical_description", "personality"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = ResponseValidator::new()
            .extract("not json", &CHARACTER_SCHEMA)
            .unwrap_err();
        match err {
            Error::MalformedResponse { raw, .. } => assert_eq!(raw, "not json"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_object_json_is_malformed() {
        let err = ResponseValidator::new()
            .extract(r#"["character_name"]"#, &CHARACTER_SCHEMA)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_fenced_reply_is_unwrapped() {
        let raw = "```json\n{\"long_description\":\"a mill\",\"secrets\":\"none\"}\n```";
        let record = ResponseValidator::new().extract(raw, &PLACE_SCHEMA).unwrap();
        assert_eq!(record.get("long_description"), Some("a mill"));
    }

    #[test]
    fn test_non_string_values_keep_json_text() {
        let record = ResponseValidator::new()
            .extract(
                r#"{"long_description":["moss","stone"],"secrets":null}"#,
                &PLACE_SCHEMA,
            )
            .unwrap();
        assert_eq!(record.get("long_description"), Some(r#"["moss","stone"]"#));
        assert_eq!(record.get("secrets"), Some("null"));
    }
}
