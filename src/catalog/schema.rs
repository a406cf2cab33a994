//! Required-field specifications for each request type.

/// Structural contract for a backend reply.
///
/// `required` keys must be present in the reply. `echoed` keys are named in the
/// prompt so the backend keeps the record coherent, but their values always come
/// from the caller and are never read back from the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaSpec {
    pub required: &'static [&'static str],
    pub echoed: &'static [&'static str],
}

pub const CHARACTER_SCHEMA: SchemaSpec = SchemaSpec::new(
    &["character_name", "physical_description", "personality"],
    &[],
);

pub const PLACE_SCHEMA: SchemaSpec =
    SchemaSpec::new(&["long_description", "secrets"], &["place_name"]);

impl SchemaSpec {
    pub const fn new(required: &'static [&'static str], echoed: &'static [&'static str]) -> Self {
        Self { required, echoed }
    }

    /// Every key the prompt asks for, echoed keys first.
    pub fn declared_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.echoed.iter().chain(self.required.iter()).copied()
    }

    /// Example JSON object with every declared key mapped to an empty string.
    pub fn example_object(&self) -> String {
        let body = self
            .declared_fields()
            .map(|f| format!("\"{}\": \"\"", f))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{ {} }}", body)
    }

    /// Output-format instruction rendered into the user message.
    pub fn format_directive(&self) -> String {
        let keys = self.declared_fields().collect::<Vec<_>>().join(", ");
        format!(
            "VERY IMPORTANT: Output the data as text blocks formatted as JSON with ONLY the following keys: {}, for example: {}",
            keys,
            self.example_object()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_directive_names_every_required_key() {
        let directive = CHARACTER_SCHEMA.format_directive();
        for key in CHARACTER_SCHEMA.required {
            assert!(directive.contains(key), "directive missing {}", key);
        }
        assert!(directive.ends_with(
            "{ \"character_name\": \"\", \"physical_description\": \"\", \"personality\": \"\" }"
        ));
    }

    #[test]
    fn test_place_schema_echoes_place_name() {
        let declared: Vec<_> = PLACE_SCHEMA.declared_fields().collect();
        assert_eq!(declared, vec!["place_name", "long_description", "secrets"]);
        assert!(!PLACE_SCHEMA.required.contains(&"place_name"));
        assert!(PLACE_SCHEMA.required.contains(&"secrets"));
    }

    #[test]
    fn test_example_object_is_valid_json() {
        let value: serde_json::Value =
            serde_json::from_str(&PLACE_SCHEMA.example_object()).unwrap();
        assert_eq!(value["place_name"], "");
        assert_eq!(value.as_object().unwrap().len(), 3);
    }
}
