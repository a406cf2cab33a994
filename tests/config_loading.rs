//! Loading configuration files from disk.

use session_scribe::prompt::image_prompt;
use session_scribe::{Error, ScribeConfig};
use std::io::Write;
use std::path::Path;

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_json_file_with_legacy_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "config.json",
        r#"{
            "general_sytem_context": "You are the game master's quiet assistant.",
            "general_world_context": "A salt-mining town under a red sky.",
            "image_style": "woodcut",
            "image_size": "256x256",
            "image_context": "Salt flats at dusk",
            "UPLOAD_FOLDER": "static/audio"
        }"#,
    );

    let cfg = ScribeConfig::from_path(&path).unwrap();
    assert_eq!(
        cfg.general_system_context,
        "You are the game master's quiet assistant."
    );
    assert_eq!(cfg.image_style.as_deref(), Some("woodcut"));
    assert_eq!(cfg.image_size, "256x256");
}

#[test]
fn test_image_prompt_from_loaded_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "config.json",
        r#"{"image_style": "woodcut", "image_context": "Salt flats at dusk", "image_size": "1024x1024"}"#,
    );
    let cfg = ScribeConfig::from_path(&path).unwrap();

    let rendered = image_prompt(&cfg, "a caravan crossing the flats").unwrap();
    assert!(rendered.prompt.starts_with("We are requesting a small accent image.\n\n"));
    assert!(rendered.prompt.contains("Context: Salt flats at dusk\nStyle: woodcut\n"));
    assert!(rendered
        .prompt
        .ends_with("Subject matter: a caravan crossing the flats"));
    assert_eq!(rendered.size, "1024x1024");
}

#[test]
fn test_yaml_file_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "scribe.yaml",
        "general_world_context: Glacier monasteries\ngeneration:\n  max_tokens: 900\n  timeout_secs: 15\n",
    );

    let cfg = ScribeConfig::load(Some(&path)).unwrap();
    assert_eq!(cfg.general_world_context, "Glacier monasteries");
    assert_eq!(cfg.generation.max_tokens, 900);
}

#[test]
fn test_missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = ScribeConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    let field = err.context().and_then(|c| c.field_path.clone()).unwrap();
    assert!(field.ends_with("absent.json"));
}

#[test]
fn test_invalid_sampling_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "config.json",
        r#"{"generation": {"top_p": 1.5}}"#,
    );
    let err = ScribeConfig::load(Some(&path)).unwrap_err();
    assert_eq!(
        err.context().and_then(|c| c.field_path.as_deref()),
        Some("generation.top_p")
    );
}

#[test]
fn test_malformed_json_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "config.json", "{ not json");
    let err = ScribeConfig::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid JSON configuration"));
}
