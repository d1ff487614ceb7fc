//! chatpane - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// chatpane - TUI chat transcript pane with lazy scrollback loading
#[derive(Parser, Debug)]
#[command(name = "chatpane")]
#[command(version)]
#[command(about = "TUI chat transcript pane with scroll-anchored lazy history loading")]
pub struct Args {
    /// Path to a JSONL transcript (starts an empty conversation if not provided)
    pub file: Option<PathBuf>,

    /// Pane title shown in the header
    #[arg(short, long)]
    pub title: Option<String>,

    /// Disable the connectivity watcher
    #[arg(long)]
    pub offline: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set NO_COLOR env var if --no-color flag is passed
    // This ensures consistent color handling throughout the application
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = chatpane::config::load_config_with_precedence(args.config.clone())?;
        let merged = chatpane::config::merge_config(config_file);
        let with_env = chatpane::config::apply_env_overrides(merged);

        let offline_override = if args.offline { Some(true) } else { None };
        chatpane::config::apply_cli_overrides(with_env, args.title.clone(), offline_override)
    };

    chatpane::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    // Load the transcript, or start an empty conversation.
    let history = match &args.file {
        Some(path) => {
            let (history, errors) = chatpane::parser::load_transcript(path)?;
            for error in &errors {
                tracing::warn!("{error}");
            }
            info!(
                messages = history.len(),
                skipped = errors.len(),
                "transcript loaded"
            );
            history
        }
        None => chatpane::model::ConversationHistory::new(
            chatpane::model::ConversationId::new("scratch").expect("id is non-empty"),
        ),
    };

    chatpane::shell::run(&config, history, args.no_color)?;

    Ok(())
}
