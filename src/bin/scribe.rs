//! scribe: command-line front end for the session generation pipeline
//!
//! Usage:
//!   scribe [--config <path>] npc                                   Generate an NPC
//!   scribe [--config <path>] setting <name> <description> <size>   Generate a place (size: small|large)
//!   scribe [--config <path>] image-prompt <subject>                Frame a scene for an accent image
//!   scribe oracle                                                  Ask the yes/no oracle
//!   scribe [--config <path>] check-key                             Check that an API key is configured

use anyhow::Context;
use session_scribe::{oracle, prompt, GenerationPipeline, ScribeConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, args) = split_config_flag(args);
    let Some(command) = args.first() else {
        print_usage();
        return ExitCode::from(1);
    };

    let result = match command.as_str() {
        "npc" => cmd_npc(config_path).await,
        "setting" => cmd_setting(config_path, &args[1..]).await,
        "image-prompt" => cmd_image_prompt(config_path, &args[1..]),
        "oracle" => cmd_oracle(),
        "check-key" => cmd_check_key(config_path),
        "version" | "--version" | "-V" => {
            println!("scribe {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code_for(&err)
        }
    }
}

fn print_usage() {
    println!(
        r#"scribe: tabletop session assistant

USAGE:
    scribe [--config <path>] <COMMAND>

COMMANDS:
    npc                                  Generate an ordinary NPC
    setting <name> <description> <size>  Describe a place; size is small or large
    image-prompt <subject>               Frame a scene for an accent image
    oracle                               Roll the yes/no oracle
    check-key                            Report whether an API key is configured
    version                              Show version information
    help                                 Show this help message

ENVIRONMENT:
    SCRIBE_CONFIG               Config file path (default: config.json)
    OPENAI_API_KEY              Backend API key
    SCRIBE_BASE_URL             Backend base URL override
    SCRIBE_HTTP_TIMEOUT_SECS    Backend request timeout
    RUST_LOG                    Log filter (default: info)"#
    );
}

/// Remove `--config <path>` from anywhere in the argument list.
fn split_config_flag(args: Vec<String>) -> (Option<PathBuf>, Vec<String>) {
    let mut config = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            config = iter.next().map(PathBuf::from);
        } else {
            rest.push(arg);
        }
    }
    (config, rest)
}

/// Caller mistakes exit with 2, everything else with 1.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<session_scribe::Error>() {
        Some(e) if e.is_caller_error() => ExitCode::from(2),
        _ => ExitCode::from(1),
    }
}

fn pipeline(config_path: Option<PathBuf>) -> anyhow::Result<GenerationPipeline<session_scribe::OpenAiChatClient>> {
    let config = ScribeConfig::load(config_path.as_deref())?;
    Ok(GenerationPipeline::from_config(Arc::new(config))?)
}

async fn cmd_npc(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let npc = pipeline(config_path)?.create_npc().await?;
    println!("{}", serde_json::to_string_pretty(&npc)?);
    Ok(())
}

async fn cmd_setting(config_path: Option<PathBuf>, args: &[String]) -> anyhow::Result<()> {
    let [name, description, size] = args else {
        return Err(session_scribe::Error::invalid_parameter(
            "arguments",
            "usage: scribe setting <name> <description> <small|large>",
        )
        .into());
    };
    let place = pipeline(config_path)?
        .create_setting(name, description, size)
        .await
        .with_context(|| format!("could not describe '{name}'"))?;
    println!("{}", serde_json::to_string_pretty(&place)?);
    Ok(())
}

fn cmd_image_prompt(config_path: Option<PathBuf>, args: &[String]) -> anyhow::Result<()> {
    let config = ScribeConfig::load(config_path.as_deref())?;
    let rendered = prompt::image_prompt(&config, &args.join(" "))?;
    println!("{}", serde_json::to_string_pretty(&rendered)?);
    Ok(())
}

fn cmd_oracle() -> anyhow::Result<()> {
    let answer = oracle::consult(&mut rand::thread_rng());
    println!("{}", serde_json::to_string(&answer)?);
    Ok(())
}

fn cmd_check_key(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ScribeConfig::load(config_path.as_deref())?;
    let success = config.has_api_key();
    println!("{}", serde_json::json!({ "success": success }));
    if success {
        Ok(())
    } else {
        anyhow::bail!("no API key configured")
    }
}
