// Configuration loading and parsing (sentimeter.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::form::FormOptions;
use crate::text::{InputPolicy, DEFAULT_MAX_CHARS};

pub const CONFIG_FILE_NAME: &str = "sentimeter.toml";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/predict";
pub const DEFAULT_RENDER_INTERVAL_MS: u64 = 33;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub form: FormConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Prediction endpoint URL.
    pub endpoint: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub max_chars: usize,
    pub discard_stale_results: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            max_chars: DEFAULT_MAX_CHARS,
            discard_stale_results: true,
        }
    }
}

impl FormConfig {
    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            policy: InputPolicy::new(self.max_chars),
            discard_stale_results: self.discard_stale_results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub render_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            render_interval_ms: DEFAULT_RENDER_INTERVAL_MS,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/sentimeter.toml` relative to `base_dir`.
///
/// A missing file yields the built-in defaults; a present but invalid file
/// is an error.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE_NAME);
    let config = if path.exists() {
        let text = read_file(&path)?;
        parse_config(&text, &path)?
    } else {
        Config::default()
    };

    validate(&config)?;
    Ok(config)
}

/// Parse config TOML text. `path` is only used for error reporting.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `defaults/sentimeter.toml` to `config/` if the config copy is
/// missing. Returns the path written, if any.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let default_path = base_dir.join("defaults").join(CONFIG_FILE_NAME);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE_NAME);

    if !default_path.is_file() {
        return Ok(None);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            let content =
                std::fs::read(&default_path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", default_path.display()),
                })?;
            std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(Some(target))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Pick the directory holding `config/` and `defaults/`.
///
/// The working directory wins when it has either; otherwise the per-user
/// config directory is used.
pub fn resolve_base_dir(cwd: &Path) -> PathBuf {
    if cwd.join("config").is_dir() || cwd.join("defaults").is_dir() {
        return cwd.to_path_buf();
    }
    match directories::ProjectDirs::from("", "", "sentimeter") {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => cwd.to_path_buf(),
    }
}

/// Convenience wrapper: resolves the base directory from the current
/// working directory, copies defaults, and loads.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    let base_dir = resolve_base_dir(&cwd);
    ensure_config_files(&base_dir)?;
    load_config_from(&base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let endpoint = &config.service.endpoint;
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "service.endpoint".into(),
            message: format!("must be an http:// or https:// URL, got {endpoint:?}"),
        });
    }

    if config.form.max_chars == 0 {
        return Err(ConfigError::ValidationError {
            field: "form.max_chars".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.ui.render_interval_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "ui.render_interval_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Repository root, where `defaults/` lives.
    fn project_root() -> PathBuf {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let root = manifest_dir.join("../..");
        assert!(
            root.join("defaults").join(CONFIG_FILE_NAME).exists(),
            "Cannot locate defaults/{CONFIG_FILE_NAME} from {:?}",
            manifest_dir
        );
        root
    }

    /// Fresh scratch directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sentimeter_config_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_config(base: &Path, text: &str) {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE_NAME), text).unwrap();
    }

    #[test]
    fn defaults_file_matches_builtin_defaults() {
        let root = project_root();
        let path = root.join("defaults").join(CONFIG_FILE_NAME);
        let text = fs::read_to_string(&path).unwrap();
        let config = parse_config(&text, &path).expect("defaults should parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.service.endpoint, "http://localhost:8000/predict");
        assert_eq!(config.form.max_chars, 5000);
        assert!(config.form.discard_stale_results);
        assert_eq!(config.ui.render_interval_ms, 33);
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let tmp = scratch_dir("missing");
        let config = load_config_from(&tmp).expect("should fall back to defaults");
        assert_eq!(config, Config::default());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn partial_config_fills_remaining_defaults() {
        let tmp = scratch_dir("partial");
        write_config(
            &tmp,
            r#"
[service]
endpoint = "https://sentiment.internal/predict"
"#,
        );
        let config = load_config_from(&tmp).expect("should load partial config");
        assert_eq!(config.service.endpoint, "https://sentiment.internal/predict");
        assert_eq!(config.form, FormConfig::default());
        assert_eq!(config.ui, UiConfig::default());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn form_options_follow_config() {
        let form = FormConfig {
            max_chars: 280,
            discard_stale_results: false,
        };
        let options = form.form_options();
        assert_eq!(options.policy.max_chars, 280);
        assert!(!options.discard_stale_results);
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let tmp = scratch_dir("bad_endpoint");
        write_config(
            &tmp,
            r#"
[service]
endpoint = "localhost:8000/predict"
"#,
        );
        let err = load_config_from(&tmp).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "service.endpoint"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_max_chars() {
        let tmp = scratch_dir("zero_max");
        write_config(&tmp, "[form]\nmax_chars = 0\n");
        let err = load_config_from(&tmp).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "form.max_chars"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_render_interval() {
        let tmp = scratch_dir("zero_interval");
        write_config(&tmp, "[ui]\nrender_interval_ms = 0\n");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch_dir("invalid");
        write_config(&tmp, "[form\nmax_chars = ");
        let err = load_config_from(&tmp).unwrap_err();
        match err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with(Path::new("config").join(CONFIG_FILE_NAME)));
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_file() {
        let tmp = scratch_dir("ensure_copy");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::copy(
            project_root().join("defaults").join(CONFIG_FILE_NAME),
            tmp.join("defaults").join(CONFIG_FILE_NAME),
        )
        .unwrap();

        let copied = ensure_config_files(&tmp).unwrap();
        assert_eq!(copied, Some(tmp.join("config").join(CONFIG_FILE_NAME)));
        assert!(tmp.join("config").join(CONFIG_FILE_NAME).exists());

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config, Config::default());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = scratch_dir("ensure_skip");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE_NAME), "[form]\nmax_chars = 1\n").unwrap();
        write_config(&tmp, "[form]\nmax_chars = 42\n");

        let copied = ensure_config_files(&tmp).unwrap();
        assert!(copied.is_none());
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.form.max_chars, 42);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_without_defaults_is_noop() {
        let tmp = scratch_dir("ensure_noop");
        assert!(ensure_config_files(&tmp).unwrap().is_none());
        assert!(!tmp.join("config").exists());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn resolve_base_dir_prefers_cwd_with_config() {
        let tmp = scratch_dir("resolve");
        fs::create_dir_all(tmp.join("config")).unwrap();
        assert_eq!(resolve_base_dir(&tmp), tmp);
        let _ = fs::remove_dir_all(&tmp);
    }
}
