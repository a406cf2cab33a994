//! Accent-image prompt: frames a transcribed scene for an image backend.

use crate::config::ScribeConfig;
use crate::{Error, ErrorContext, Result};
use serde::Serialize;

/// Rendered image request, ready for an image-generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePrompt {
    pub prompt: String,
    /// Requested dimensions, e.g. `512x512`.
    pub size: String,
}

/// Build the accent-image prompt for `subject` using the configured image context and style.
///
/// Unset context or style render as empty lines; a blank subject is rejected.
pub fn image_prompt(config: &ScribeConfig, subject: &str) -> Result<ImagePrompt> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(Error::invalid_parameter_with_context(
            "image subject must not be empty",
            ErrorContext::new()
                .with_field_path("subject")
                .with_source("prompt_assembler"),
        ));
    }

    let prompt = format!(
        "We are requesting a small accent image.\n\nContext: {}\nStyle: {}\nSubject matter: {}",
        config.image_context.as_deref().unwrap_or(""),
        config.image_style.as_deref().unwrap_or(""),
        subject
    );
    tracing::debug!(size = %config.image_size, prompt_len = prompt.len(), "assembled image prompt");

    Ok(ImagePrompt {
        prompt,
        size: config.image_size.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScribeConfig {
        ScribeConfig {
            image_context: Some("A rain-soaked border march".to_string()),
            image_style: Some("muted watercolour".to_string()),
            image_size: "256x256".to_string(),
            ..ScribeConfig::default()
        }
    }

    #[test]
    fn test_image_prompt_layout() {
        let rendered = image_prompt(&config(), " a ferryman with a lantern ").unwrap();
        assert_eq!(
            rendered.prompt,
            "We are requesting a small accent image.\n\n\
             Context: A rain-soaked border march\n\
             Style: muted watercolour\n\
             Subject matter: a ferryman with a lantern"
        );
        assert_eq!(rendered.size, "256x256");
    }

    #[test]
    fn test_unset_style_uses_default_size() {
        let rendered = image_prompt(&ScribeConfig::default(), "a crow").unwrap();
        assert!(rendered.prompt.contains("Style: \n"));
        assert_eq!(rendered.size, "512x512");
    }

    #[test]
    fn test_blank_subject_is_invalid_parameter() {
        let err = image_prompt(&config(), "   ").unwrap_err();
        assert!(err.is_caller_error());
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("subject")
        );
    }
}
