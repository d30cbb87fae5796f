//! gbb - Entry Point

use clap::Parser;
use gbb::backend::{demo, BoardService, ExternalEditor, LocalStore};
use gbb::config::KeyBindings;
use gbb::model::Identity;
use gbb::view::{BoardStyles, ColorConfig, SuspendingEditor, TuiOptions};
use std::path::PathBuf;
use tracing::info;

/// gbb - terminal client for a threaded bulletin board
#[derive(Parser, Debug)]
#[command(name = "gbb")]
#[command(version)]
#[command(about = "Terminal client for a threaded bulletin board")]
pub struct Args {
    /// Post as this user
    #[arg(short, long)]
    pub user: Option<String>,

    /// Enable moderation (pin, close, delete any message)
    #[arg(long)]
    pub admin: bool,

    /// Path to the JSON board store
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Editor command line for composing messages
    #[arg(short, long)]
    pub editor: Option<String>,

    /// Browse a generated in-memory board instead of the store
    #[arg(long, value_name = "SEED", num_args = 0..=1, default_missing_value = "1")]
    pub demo: Option<u64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = gbb::config::load_config_with_precedence(args.config.clone())?;
        let merged = gbb::config::merge_config(config_file);
        let with_env = gbb::config::apply_env_overrides(merged);

        // --admin only ever grants; absence keeps the configured value
        gbb::config::apply_cli_overrides(
            with_env,
            args.user.clone(),
            args.admin.then_some(true),
            args.data.clone(),
            args.editor.clone(),
        )
    };

    gbb::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let identity = Identity {
        user: config.user.clone(),
        admin: config.admin,
    };

    let service: Box<dyn BoardService> = match args.demo {
        Some(seed) => {
            info!(seed, "Using generated demo board");
            Box::new(LocalStore::in_memory(identity.clone(), demo::generate(seed)))
        }
        None => Box::new(LocalStore::open(&config.data_file, identity.clone())?),
    };
    let editor = Box::new(SuspendingEditor::new(ExternalEditor::new(config.editor.clone())));

    let options = TuiOptions {
        identity,
        page_jump: config.page_jump,
        key_bindings: KeyBindings::default(),
        styles: BoardStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color)),
    };

    gbb::view::run(service, editor, options)?;

    Ok(())
}
