//! Prompt assembler: renders catalog templates into the message sequence sent to the backend.

mod context;
mod image;

pub use context::{AreaSize, GenerationContext};
pub use image::{image_prompt, ImagePrompt};

use crate::catalog::{self, RequestType};
use crate::types::Message;
use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Render the template for `request_type` into a system message and a user message.
///
/// The output-format directive is derived from the request type's schema, so the
/// keys the backend is asked for always match the keys the validator checks.
pub fn assemble(request_type: RequestType, ctx: &GenerationContext) -> Result<Vec<Message>> {
    let template = catalog::template(request_type)?;
    let schema = request_type.schema()?;

    if let Some(size) = ctx.area_size() {
        if size.request_type() != request_type {
            return Err(Error::invalid_parameter_with_context(
                format!(
                    "area size '{}' does not match request type '{}'",
                    size, request_type
                ),
                ErrorContext::new()
                    .with_field_path("area_size")
                    .with_source("prompt_assembler"),
            ));
        }
    }

    let seed_text = match ctx.seed_text() {
        Some(seed) => seed,
        None if template.needs_seed_text() => {
            return Err(Error::invalid_parameter_with_context(
                format!("request type '{}' requires seed text", request_type),
                ErrorContext::new()
                    .with_field_path("seed_text")
                    .with_source("prompt_assembler"),
            ))
        }
        None => "",
    };

    let directive = schema.format_directive();
    let values = [
        ("system_context", ctx.system_context()),
        ("world_context", ctx.world_context()),
        ("seed_text", seed_text),
        ("format_directive", directive.as_str()),
    ];

    let system = render(template.system, &values)?;
    let user = render(template.user, &values)?;
    tracing::debug!(
        request_type = %request_type,
        system_len = system.len(),
        user_len = user.len(),
        "assembled prompt"
    );

    Ok(vec![Message::system(system), Message::user(user)])
}

/// Substitute every `{name}` token in a single pass.
///
/// Substituted values are not rescanned, so seed text containing braces is left
/// alone. Any token without a value fails the whole render.
fn render(template: &str, values: &[(&str, &str)]) -> Result<String> {
    let mut unresolved = Vec::new();
    let lookup = |name: &str| {
        values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    };
    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures| match lookup(&caps[1]) {
        Some(value) => value,
        None => {
            unresolved.push(caps[1].to_string());
            caps[0].to_string()
        }
    });

    if !unresolved.is_empty() {
        return Err(Error::configuration_with_context(
            "template contains unresolved placeholders",
            ErrorContext::new()
                .with_details(unresolved.join(", "))
                .with_source("prompt_assembler"),
        ));
    }
    Ok(rendered.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;

    fn full_context() -> GenerationContext {
        GenerationContext::new(
            "You are the narrator of a low-magic frontier campaign.",
            "A wind-scoured steppe dotted with trading posts.",
        )
    }

    #[test]
    fn test_every_implemented_type_renders_without_placeholders() {
        for t in RequestType::ALL.into_iter().filter(|t| t.is_implemented()) {
            let messages = assemble(t, &full_context().with_seed_text("a leaning watchtower"))
                .unwrap_or_else(|e| panic!("{} failed: {}", t, e));
            assert_eq!(messages.len(), 2);
            for msg in &messages {
                assert!(!msg.content.trim().is_empty());
                assert!(
                    !PLACEHOLDER.is_match(&msg.content),
                    "{} left a placeholder: {}",
                    t,
                    msg.content
                );
            }
        }
    }

    #[test]
    fn test_system_carries_context_and_user_carries_directive() {
        let messages = assemble(RequestType::MeetCharacter, &full_context()).unwrap();
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(
            messages[0].content,
            "You are the narrator of a low-magic frontier campaign."
        );
        assert_eq!(messages[1].role, MessageRole::User);
        assert!(messages[1]
            .content
            .contains("A wind-scoured steppe dotted with trading posts."));
        for key in ["character_name", "physical_description", "personality"] {
            assert!(messages[1].content.contains(key));
        }
    }

    #[test]
    fn test_place_prompt_includes_seed_and_echoed_key() {
        let ctx = full_context()
            .with_seed_text("a dim tavern")
            .with_area_size(AreaSize::Small);
        let messages = assemble(RequestType::DiscoverPlace, &ctx).unwrap();
        assert!(messages[1].content.contains("a dim tavern"));
        assert!(messages[1].content.contains("place_name"));
        assert!(messages[1].content.contains("small area"));
    }

    #[test]
    fn test_seed_text_braces_are_not_rendered() {
        let ctx = full_context().with_seed_text("the {world_context} inn");
        let messages = assemble(RequestType::LocationOverview, &ctx).unwrap();
        assert!(messages[1].content.contains("the {world_context} inn"));
    }

    #[test]
    fn test_missing_seed_is_invalid_parameter() {
        let err = assemble(RequestType::DiscoverPlace, &full_context()).unwrap_err();
        assert!(err.is_caller_error());
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("seed_text")
        );
    }

    #[test]
    fn test_mismatched_area_size_is_rejected() {
        let ctx = full_context()
            .with_seed_text("a market square")
            .with_area_size(AreaSize::Large);
        let err = assemble(RequestType::DiscoverPlace, &ctx).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_reserved_type_fails_fast() {
        let err = assemble(RequestType::RandomEncounter, &full_context()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedRequestType { .. }));
    }

    #[test]
    fn test_render_reports_unknown_placeholders() {
        let values = [("known", "value")];
        let err = render("{known} and {unknown}", &values).unwrap_err();
        assert!(err.to_string().contains("unknown"));
        assert_eq!(render("{known}!", &values).unwrap(), "value!");
    }
}
