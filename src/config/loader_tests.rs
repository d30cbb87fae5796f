//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static [&'static str]);

impl EnvGuard {
    fn new(names: &'static [&'static str]) -> Self {
        for name in names {
            env::remove_var(name);
        }
        EnvGuard(names)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for name in self.0 {
            env::remove_var(name);
        }
    }
}

const OVERRIDE_VARS: &[&str] = &["GBB_USER", "GBB_EDITOR", "GBB_DATA_FILE", "GBB_LOG_FILE"];

fn base_config() -> ResolvedConfig {
    ResolvedConfig {
        user: "alice".to_string(),
        admin: false,
        data_file: PathBuf::from("/srv/board.json"),
        editor: "vi".to_string(),
        page_jump: 10,
        log_file_path: PathBuf::from("/var/log/gbb.log"),
    }
}

// ===== Paths =====

#[test]
fn default_config_path_ends_in_gbb_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("gbb") && path_str.ends_with("config.toml"),
        "got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_gbb_log() {
    let path = default_log_path();
    assert!(path.to_string_lossy().ends_with("gbb.log"), "got: {:?}", path);
}

#[test]
fn default_data_path_is_board_json() {
    assert_eq!(
        default_data_path().file_name().and_then(|n| n.to_str()),
        Some("board.json")
    );
}

// ===== Loading =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load_config_file(dir.path().join("absent.toml"));
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_every_field() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "config.toml",
        r#"
user = "carol"
admin = true
data_file = "/tmp/board.json"
editor = "vim -n"
page_jump = 4
log_file_path = "/tmp/gbb.log"
"#,
    );

    let config = load_config_file(&path).unwrap().unwrap();

    assert_eq!(
        config,
        ConfigFile {
            user: Some("carol".to_string()),
            admin: Some(true),
            data_file: Some(PathBuf::from("/tmp/board.json")),
            editor: Some("vim -n".to_string()),
            page_jump: Some(4),
            log_file_path: Some(PathBuf::from("/tmp/gbb.log")),
        }
    );
}

#[test]
fn load_config_file_handles_partial_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "partial.toml", "admin = true\n# nothing else\n");

    let config = load_config_file(&path).unwrap().unwrap();

    assert_eq!(config.admin, Some(true));
    assert_eq!(config.user, None);
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "broken.toml", "this is not valid TOML ][}{");

    match load_config_file(&path) {
        Err(ConfigError::ParseError { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn config_file_rejects_unknown_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "unknown.toml", "theme = \"dark\"\n");

    assert!(matches!(
        load_config_file(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn directory_in_place_of_file_is_read_error() {
    let dir = TempDir::new().unwrap();

    assert!(matches!(
        load_config_file(dir.path()),
        Err(ConfigError::ReadError { .. })
    ));
}

// ===== Merging =====

#[test]
#[serial(editor_env)]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_only_present_fields() {
    let config_file = ConfigFile {
        user: Some("dave".to_string()),
        page_jump: Some(3),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.user, "dave");
    assert_eq!(resolved.page_jump, 3);
    assert_eq!(resolved.admin, defaults.admin);
    assert_eq!(resolved.data_file, defaults.data_file);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
}

#[test]
fn resolved_config_default_is_not_admin() {
    let config = ResolvedConfig::default();
    assert!(!config.admin);
    assert_eq!(config.page_jump, DEFAULT_PAGE_JUMP);
    assert!(!config.user.is_empty());
}

// ===== Environment =====

#[test]
#[serial(gbb_env)]
fn apply_env_overrides_reads_every_variable() {
    let _guard = EnvGuard::new(OVERRIDE_VARS);
    env::set_var("GBB_USER", "erin");
    env::set_var("GBB_EDITOR", "ed");
    env::set_var("GBB_DATA_FILE", "/data/b.json");
    env::set_var("GBB_LOG_FILE", "/logs/g.log");

    let result = apply_env_overrides(base_config());

    assert_eq!(result.user, "erin");
    assert_eq!(result.editor, "ed");
    assert_eq!(result.data_file, PathBuf::from("/data/b.json"));
    assert_eq!(result.log_file_path, PathBuf::from("/logs/g.log"));
    assert_eq!(result.page_jump, 10);
}

#[test]
#[serial(gbb_env)]
fn apply_env_overrides_no_change_when_unset_or_empty() {
    let _guard = EnvGuard::new(OVERRIDE_VARS);
    env::set_var("GBB_USER", "");

    assert_eq!(apply_env_overrides(base_config()), base_config());
}

#[test]
#[serial(gbb_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(&["GBB_CONFIG"]);
    let dir = TempDir::new().unwrap();
    let explicit = write_config(&dir, "explicit.toml", "user = \"explicit\"\n");
    let from_env = write_config(&dir, "env.toml", "user = \"env\"\n");
    env::set_var("GBB_CONFIG", &from_env);

    let config = load_config_with_precedence(Some(explicit)).unwrap().unwrap();

    assert_eq!(config.user, Some("explicit".to_string()));
}

#[test]
#[serial(gbb_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(&["GBB_CONFIG"]);
    let dir = TempDir::new().unwrap();
    let from_env = write_config(&dir, "env.toml", "user = \"env\"\n");
    env::set_var("GBB_CONFIG", &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();

    assert_eq!(config.user, Some("env".to_string()));
}

// ===== CLI =====

#[test]
fn apply_cli_overrides_no_overrides() {
    let result = apply_cli_overrides(base_config(), None, None, None, None);
    assert_eq!(result, base_config());
}

#[test]
fn apply_cli_overrides_replace_given_fields() {
    let result = apply_cli_overrides(
        base_config(),
        Some("frank".to_string()),
        Some(true),
        Some(PathBuf::from("other.json")),
        None,
    );

    assert_eq!(result.user, "frank");
    assert!(result.admin);
    assert_eq!(result.data_file, PathBuf::from("other.json"));
    assert_eq!(result.editor, "vi");
}

#[test]
#[serial(gbb_env)]
fn precedence_chain_full_defaults_to_cli() {
    // GIVEN a config file, an env override and a CLI flag for the same field
    let _guard = EnvGuard::new(OVERRIDE_VARS);
    let file = ConfigFile {
        user: Some("from-file".to_string()),
        editor: Some("file-editor".to_string()),
        page_jump: Some(5),
        ..ConfigFile::default()
    };
    env::set_var("GBB_USER", "from-env");
    env::set_var("GBB_EDITOR", "env-editor");

    // WHEN the whole chain is applied
    let merged = merge_config(Some(file));
    let with_env = apply_env_overrides(merged);
    let resolved = apply_cli_overrides(with_env, Some("from-cli".to_string()), None, None, None);

    // THEN each field comes from the highest source that set it
    assert_eq!(resolved.user, "from-cli");
    assert_eq!(resolved.editor, "env-editor");
    assert_eq!(resolved.page_jump, 5);
}
