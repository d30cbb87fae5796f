//! Configuration file loading with precedence handling.

use crate::backend::editor::resolve_editor_command;
use crate::view_state::DEFAULT_PAGE_JUMP;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, a directory, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; anything missing falls back to the defaults in
/// [`ResolvedConfig`]. Corresponds to `~/.config/gbb/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Name messages are posted under.
    #[serde(default)]
    pub user: Option<String>,

    /// Grants moderation rights (pin, close, modify anyone's posts).
    #[serde(default)]
    pub admin: Option<bool>,

    /// JSON document holding the board.
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Editor command line, run through `sh -c`.
    #[serde(default)]
    pub editor: Option<String>,

    /// Rows the board window scrolls by when the cursor leaves it.
    #[serde(default)]
    pub page_jump: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Name messages are posted under.
    pub user: String,
    /// Moderation rights.
    pub admin: bool,
    /// Board store location.
    pub data_file: PathBuf,
    /// Editor command line.
    pub editor: String,
    /// Board window scroll step.
    pub page_jump: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            admin: false,
            data_file: default_data_path(),
            editor: resolve_editor_command(),
            page_jump: DEFAULT_PAGE_JUMP,
            log_file_path: default_log_path(),
        }
    }
}

/// Login name from `$USER`, or `anonymous`.
pub fn default_user() -> String {
    std::env::var("USER")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "anonymous".to_string())
}

/// Resolve default board store path.
///
/// Returns `~/.local/share/gbb/board.json` on Linux, the platform data
/// directory elsewhere, or `board.json` in the current directory.
pub fn default_data_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("gbb").join("board.json"),
        None => PathBuf::from("board.json"),
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/gbb/gbb.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("gbb").join("gbb.log")
    } else {
        PathBuf::from("gbb.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/gbb/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gbb").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `GBB_CONFIG` environment variable
/// 3. Default path `~/.config/gbb/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("GBB_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        user: config.user.unwrap_or(defaults.user),
        admin: config.admin.unwrap_or(defaults.admin),
        data_file: config.data_file.unwrap_or(defaults.data_file),
        editor: config.editor.unwrap_or(defaults.editor),
        page_jump: config.page_jump.unwrap_or(defaults.page_jump),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `GBB_USER`, `GBB_EDITOR`, `GBB_DATA_FILE` and `GBB_LOG_FILE`.
/// Empty values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    let var = |name: &str| std::env::var(name).ok().filter(|value| !value.is_empty());

    if let Some(user) = var("GBB_USER") {
        config.user = user;
    }
    if let Some(editor) = var("GBB_EDITOR") {
        config.editor = editor;
    }
    if let Some(path) = var("GBB_DATA_FILE") {
        config.data_file = PathBuf::from(path);
    }
    if let Some(path) = var("GBB_LOG_FILE") {
        config.log_file_path = PathBuf::from(path);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    user_override: Option<String>,
    admin_override: Option<bool>,
    data_override: Option<PathBuf>,
    editor_override: Option<String>,
) -> ResolvedConfig {
    if let Some(user) = user_override {
        config.user = user;
    }

    if let Some(admin) = admin_override {
        config.admin = admin;
    }

    if let Some(path) = data_override {
        config.data_file = path;
    }

    if let Some(editor) = editor_override {
        config.editor = editor;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
